use std::collections::BTreeSet;

/// Incremental index of the zero-cost cells inside the active submatrix.
///
/// Each zero is stored twice, once under its row and once under its column,
/// so both "which zeros does this line hold" and "drop this line" are cheap.
/// Iteration is row-major, which makes penalty tie-breaking deterministic.
#[derive(Debug, Clone, Default)]
pub struct ZeroCellIndex {
    by_row: Vec<BTreeSet<usize>>,
    by_col: Vec<BTreeSet<usize>>,
    len: usize,
}

impl ZeroCellIndex {
    pub fn new(n: usize) -> Self {
        Self {
            by_row: vec![BTreeSet::new(); n],
            by_col: vec![BTreeSet::new(); n],
            len: 0,
        }
    }

    /// Registers a zero. Returns false if it was already present.
    pub fn insert(&mut self, row: usize, col: usize) -> bool {
        if self.by_row[row].insert(col) {
            self.by_col[col].insert(row);
            self.len += 1;
            true
        } else {
            false
        }
    }

    /// Drops a zero. Returns false if it was not present.
    pub fn remove(&mut self, row: usize, col: usize) -> bool {
        if self.by_row[row].remove(&col) {
            self.by_col[col].remove(&row);
            self.len -= 1;
            true
        } else {
            false
        }
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.by_row[row].contains(&col)
    }

    pub fn row_has_zero(&self, row: usize) -> bool {
        !self.by_row[row].is_empty()
    }

    pub fn col_has_zero(&self, col: usize) -> bool {
        !self.by_col[col].is_empty()
    }

    /// Columns holding a zero in `row`, ascending.
    pub fn zeros_in_row(&self, row: usize) -> impl Iterator<Item = usize> + '_ {
        self.by_row[row].iter().copied()
    }

    /// Rows holding a zero in `col`, ascending.
    pub fn zeros_in_col(&self, col: usize) -> impl Iterator<Item = usize> + '_ {
        self.by_col[col].iter().copied()
    }

    /// Removes every zero of a row leaving the active set and returns the
    /// columns that lost one.
    pub fn remove_row(&mut self, row: usize) -> Vec<usize> {
        let cols = std::mem::take(&mut self.by_row[row]);
        for &col in &cols {
            self.by_col[col].remove(&row);
        }
        self.len -= cols.len();
        cols.into_iter().collect()
    }

    /// Removes every zero of a column leaving the active set and returns the
    /// rows that lost one.
    pub fn remove_col(&mut self, col: usize) -> Vec<usize> {
        let rows = std::mem::take(&mut self.by_col[col]);
        for &row in &rows {
            self.by_row[row].remove(&col);
        }
        self.len -= rows.len();
        rows.into_iter().collect()
    }

    /// All indexed zeros in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.by_row
            .iter()
            .enumerate()
            .flat_map(|(row, cols)| cols.iter().map(move |&col| (row, col)))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_remove() {
        let mut index = ZeroCellIndex::new(3);
        assert!(index.insert(0, 1));
        assert!(!index.insert(0, 1));
        assert!(index.insert(2, 1));
        assert_eq!(index.len(), 2);
        assert!(index.col_has_zero(1));
        assert!(!index.row_has_zero(1));

        assert!(index.remove(0, 1));
        assert!(!index.remove(0, 1));
        assert_eq!(index.zeros_in_col(1).collect::<Vec<_>>(), vec![2]);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_remove_lines() {
        let mut index = ZeroCellIndex::new(4);
        index.insert(0, 2);
        index.insert(1, 2);
        index.insert(1, 3);
        index.insert(3, 0);

        assert_eq!(index.remove_col(2), vec![0, 1]);
        assert!(!index.row_has_zero(0));
        assert!(index.contains(1, 3));
        assert_eq!(index.len(), 2);

        assert_eq!(index.remove_row(1), vec![3]);
        assert!(!index.col_has_zero(3));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_row_major_iteration() {
        let mut index = ZeroCellIndex::new(3);
        index.insert(2, 0);
        index.insert(0, 2);
        index.insert(0, 1);
        assert_eq!(
            index.iter().collect::<Vec<_>>(),
            vec![(0, 1), (0, 2), (2, 0)]
        );
    }
}

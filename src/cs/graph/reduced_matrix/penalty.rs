use super::cost::{Cost, CostValue};
use super::reduced::ReducedMatrix;

/// A zero cell chosen for assignment together with its penalty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZeroCell<T> {
    pub row: usize,
    pub col: usize,
    pub penalty: Cost<T>,
}

/// The two smallest costs seen on a line and where the smallest sits.
#[derive(Debug, Clone, Copy)]
struct LineMinima<T> {
    first: Option<(usize, Cost<T>)>,
    second: Option<Cost<T>>,
}

impl<T: CostValue> LineMinima<T> {
    fn new() -> Self {
        Self {
            first: None,
            second: None,
        }
    }

    fn push(&mut self, index: usize, cost: Cost<T>) {
        match self.first {
            None => self.first = Some((index, cost)),
            Some((_, min)) if cost < min => {
                self.second = Some(min);
                self.first = Some((index, cost));
            }
            _ => {
                if self.second.map_or(true, |second| cost < second) {
                    self.second = Some(cost);
                }
            }
        }
    }

    /// Smallest cost on the line other than the one at `index`.
    fn excluding(&self, index: usize) -> Option<Cost<T>> {
        match self.first {
            Some((i, _)) if i == index => self.second,
            Some((_, min)) => Some(min),
            None => None,
        }
    }
}

/// Opportunity cost of not using the edge `(row, col)`: the cheapest other
/// active cell in its row plus the cheapest other active cell in its column.
///
/// A line with no other active cell contributes zero. If the only
/// alternatives are forbidden the penalty is `Forbidden`, which outranks any
/// finite penalty. A sum past the range of `T` saturates at its maximum.
pub fn penalty<T: CostValue>(matrix: &ReducedMatrix<T>, row: usize, col: usize) -> Cost<T> {
    let row_alt = matrix
        .active_cols()
        .filter(|&c| c != col)
        .map(|c| matrix.get(row, c))
        .fold(None, min_cost);
    let col_alt = matrix
        .active_rows()
        .filter(|&r| r != row)
        .map(|r| matrix.get(r, col))
        .fold(None, min_cost);
    row_alt
        .unwrap_or_else(Cost::zero)
        .saturating_add(col_alt.unwrap_or_else(Cost::zero))
}

fn min_cost<T: CostValue>(min: Option<Cost<T>>, cost: Cost<T>) -> Option<Cost<T>> {
    match min {
        Some(m) if m <= cost => Some(m),
        _ => Some(cost),
    }
}

/// Picks the indexed zero with the largest penalty.
///
/// Zeros are scanned in row-major order and only a strictly larger penalty
/// replaces the current best, so ties go to the lowest row, then the lowest
/// column. Returns `None` when the matrix holds no active zero.
///
/// # Complexity
/// * Time: O(k²) for a k×k active submatrix; each zero is scored in O(1)
///   from per-line minima
/// * Space: O(n)
pub fn select_max_penalty_zero<T: CostValue>(matrix: &ReducedMatrix<T>) -> Option<ZeroCell<T>> {
    let n = matrix.len();
    let mut row_minima = vec![LineMinima::new(); n];
    let mut col_minima = vec![LineMinima::new(); n];
    for row in matrix.active_rows() {
        for col in matrix.active_cols() {
            let cost = matrix.get(row, col);
            row_minima[row].push(col, cost);
            col_minima[col].push(row, cost);
        }
    }

    let mut best: Option<ZeroCell<T>> = None;
    for (row, col) in matrix.zeros().iter() {
        let penalty = row_minima[row]
            .excluding(col)
            .unwrap_or_else(Cost::zero)
            .saturating_add(col_minima[col].excluding(row).unwrap_or_else(Cost::zero));
        if best.map_or(true, |b| penalty > b.penalty) {
            best = Some(ZeroCell { row, col, penalty });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cs::graph::reduced_matrix::CostMatrix;
    use Cost::{Finite, Forbidden as F};

    fn reduced(rows: Vec<Vec<i32>>) -> ReducedMatrix<i32> {
        let mut m = ReducedMatrix::new(&CostMatrix::from_values(rows, -1).unwrap());
        m.minimize_all_rows().unwrap();
        m.minimize_all_cols().unwrap();
        m
    }

    #[test]
    fn test_penalty_matches_definition() {
        // Reduces to:
        //    -  0  3  0
        //    1  -  0  1
        //    0  0  -  2
        //    0  2  1  -
        let m = reduced(vec![
            vec![-1, 1, 4, 1],
            vec![2, -1, 1, 2],
            vec![1, 1, -1, 3],
            vec![1, 3, 2, -1],
        ]);
        assert_eq!(penalty(&m, 0, 1), Finite(0));
        assert_eq!(penalty(&m, 1, 2), Finite(2));
        assert_eq!(penalty(&m, 3, 0), Finite(1));
        assert_eq!(penalty(&m, 0, 3), Finite(1));
    }

    #[test]
    fn test_selects_max_penalty() {
        let m = reduced(vec![
            vec![-1, 1, 4, 1],
            vec![2, -1, 1, 2],
            vec![1, 1, -1, 3],
            vec![1, 3, 2, -1],
        ]);
        let zero = select_max_penalty_zero(&m).unwrap();
        assert_eq!((zero.row, zero.col), (1, 2));
        assert_eq!(zero.penalty, Finite(2));

        // The per-line minima agree with the direct definition for every zero.
        for (row, col) in m.zeros().iter() {
            assert!(penalty(&m, row, col) <= zero.penalty);
        }
    }

    #[test]
    fn test_ties_go_to_first_row_major_zero() {
        // Symmetric costs: every zero has the same penalty.
        let m = reduced(vec![vec![-1, 5, 5], vec![5, -1, 5], vec![5, 5, -1]]);
        let zero = select_max_penalty_zero(&m).unwrap();
        assert_eq!((zero.row, zero.col), (0, 1));
        assert_eq!(zero.penalty, Finite(0));
    }

    #[test]
    fn test_forced_zero_outranks_finite() {
        // Row 0 can only go to column 1.
        let m = reduced(vec![vec![-1, 7, -1], vec![1, -1, 9], vec![1, 1, -1]]);
        let zero = select_max_penalty_zero(&m).unwrap();
        assert_eq!((zero.row, zero.col), (0, 1));
        assert_eq!(zero.penalty, F);
    }

    #[test]
    fn test_near_max_alternatives_saturate() {
        let big = 3_000_000_000u32;
        let m = {
            let mut m = ReducedMatrix::new(
                &CostMatrix::new(vec![
                    vec![F, Finite(0), Finite(big)],
                    vec![Finite(big), F, Finite(0)],
                    vec![Finite(0), Finite(big), F],
                ])
                .unwrap(),
            );
            m.minimize_all_rows().unwrap();
            m.minimize_all_cols().unwrap();
            m
        };
        assert_eq!(penalty(&m, 1, 2), Finite(u32::MAX));
        let zero = select_max_penalty_zero(&m).unwrap();
        assert_eq!((zero.row, zero.col), (0, 1));
        assert_eq!(zero.penalty, Finite(u32::MAX));
    }

    #[test]
    fn test_line_minima() {
        let mut minima = LineMinima::new();
        minima.push(0, Finite(4));
        minima.push(1, Finite(2));
        minima.push(2, Finite(3));
        assert_eq!(minima.excluding(1), Some(Finite(3)));
        assert_eq!(minima.excluding(0), Some(Finite(2)));

        let mut single = LineMinima::new();
        single.push(5, Finite(0));
        assert_eq!(single.excluding(5), None);
    }
}

use ndarray::Array2;
use std::collections::BTreeSet;
use std::fmt;

use super::cost::{Cost, CostValue};
use super::matrix::CostMatrix;
use super::zero_index::ZeroCellIndex;
use crate::error::{Error, Line, Result};

/// Lines that lost a zero when a row/column pair left the active set.
///
/// Only still-active lines are listed; they may need to be minimized again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Released {
    pub rows: Vec<usize>,
    pub cols: Vec<usize>,
}

/// Working copy of a cost matrix that is reduced in place.
///
/// Owns the grid, the sets of rows and columns not yet assigned, and the
/// index of zeros inside that active submatrix. Every mutation keeps the
/// zero index exact: each zero of the active submatrix is listed once and
/// every listed cell is a true zero.
#[derive(Debug, Clone)]
pub struct ReducedMatrix<T> {
    cells: Array2<Cost<T>>,
    rows: BTreeSet<usize>,
    cols: BTreeSet<usize>,
    zeros: ZeroCellIndex,
}

impl<T: CostValue> ReducedMatrix<T> {
    /// Copies `matrix` with every row and column active and indexes the
    /// zeros it already contains.
    pub fn new(matrix: &CostMatrix<T>) -> Self {
        let cells = matrix.cells().clone();
        let n = cells.nrows();
        let mut zeros = ZeroCellIndex::new(n);
        for ((row, col), cost) in cells.indexed_iter() {
            if cost.is_zero() {
                zeros.insert(row, col);
            }
        }
        Self {
            cells,
            rows: (0..n).collect(),
            cols: (0..n).collect(),
            zeros,
        }
    }

    /// Number of cities, active or not.
    pub fn len(&self) -> usize {
        self.cells.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, row: usize, col: usize) -> Cost<T> {
        self.cells[[row, col]]
    }

    pub fn active_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.iter().copied()
    }

    pub fn active_cols(&self) -> impl Iterator<Item = usize> + '_ {
        self.cols.iter().copied()
    }

    /// Number of active rows, which always equals the number of active columns.
    pub fn active_len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_active_row(&self, row: usize) -> bool {
        self.rows.contains(&row)
    }

    pub fn is_active_col(&self, col: usize) -> bool {
        self.cols.contains(&col)
    }

    pub fn zeros(&self) -> &ZeroCellIndex {
        &self.zeros
    }

    /// Subtracts the row minimum from every active row.
    ///
    /// Rows that already hold a zero are included: with non-negative costs
    /// their minimum is zero and nothing changes, but a negative cost must
    /// still be lifted so that every cell ends up non-negative.
    ///
    /// # Errors
    /// * `Error::Infeasible` - if a row has no finite active cell
    pub fn minimize_all_rows(&mut self) -> Result<()> {
        let rows: Vec<usize> = self.rows.iter().copied().collect();
        for row in rows {
            self.minimize_row(row)?;
        }
        Ok(())
    }

    /// Subtracts the column minimum from every active column that has no zero
    /// yet. Meant to run after [`minimize_all_rows`](Self::minimize_all_rows).
    ///
    /// # Errors
    /// * `Error::Infeasible` - if a column has no finite active cell
    pub fn minimize_all_cols(&mut self) -> Result<()> {
        let cols: Vec<usize> = self
            .cols
            .iter()
            .copied()
            .filter(|&col| !self.zeros.col_has_zero(col))
            .collect();
        for col in cols {
            self.minimize_col(col)?;
        }
        Ok(())
    }

    /// Subtracts the minimum over the active columns from a row, leaving at
    /// least one zero in it.
    ///
    /// # Errors
    /// * `Error::InvalidInput` - if `row` is not active
    /// * `Error::Infeasible` - if every active cell of the row is forbidden
    pub fn minimize_row(&mut self, row: usize) -> Result<()> {
        if !self.is_active_row(row) {
            return Err(Error::invalid_input(format!("row {} is not active", row)));
        }
        let min = min_finite(self.cols.iter().map(|&col| self.cells[[row, col]]))
            .ok_or(Error::Infeasible {
                line: Line::Row(row),
            })?;
        if min.is_zero() {
            return Ok(());
        }

        for &col in &self.cols {
            let cell = &mut self.cells[[row, col]];
            *cell = cell.reduced_by(min);
            if cell.is_zero() {
                self.zeros.insert(row, col);
            } else {
                // A negative minimum lifts existing zeros.
                self.zeros.remove(row, col);
            }
        }
        Ok(())
    }

    /// Column counterpart of [`minimize_row`](Self::minimize_row).
    ///
    /// # Errors
    /// * `Error::InvalidInput` - if `col` is not active
    /// * `Error::Infeasible` - if every active cell of the column is forbidden
    pub fn minimize_col(&mut self, col: usize) -> Result<()> {
        if !self.is_active_col(col) {
            return Err(Error::invalid_input(format!(
                "column {} is not active",
                col
            )));
        }
        let min = min_finite(self.rows.iter().map(|&row| self.cells[[row, col]]))
            .ok_or(Error::Infeasible {
                line: Line::Col(col),
            })?;
        if min.is_zero() {
            return Ok(());
        }

        for &row in &self.rows {
            let cell = &mut self.cells[[row, col]];
            *cell = cell.reduced_by(min);
            if cell.is_zero() {
                self.zeros.insert(row, col);
            } else {
                self.zeros.remove(row, col);
            }
        }
        Ok(())
    }

    /// Marks an edge as unusable. Returns true if the cell was an indexed zero.
    pub fn forbid(&mut self, row: usize, col: usize) -> bool {
        self.cells[[row, col]] = Cost::Forbidden;
        self.zeros.remove(row, col)
    }

    /// Removes `row` and `col` from the active sets after they were assigned
    /// to each other, and reports the active lines that lost a zero.
    ///
    /// # Errors
    /// * `Error::InvalidInput` - if either line is already inactive
    pub fn assign(&mut self, row: usize, col: usize) -> Result<Released> {
        if !self.is_active_row(row) || !self.is_active_col(col) {
            return Err(Error::invalid_input(format!(
                "cell ({}, {}) is outside the active submatrix",
                row, col
            )));
        }
        self.rows.remove(&row);
        self.cols.remove(&col);

        let cols = self
            .zeros
            .remove_row(row)
            .into_iter()
            .filter(|&c| c != col)
            .collect();
        let rows = self.zeros.remove_col(col);
        Ok(Released { rows, cols })
    }
}

fn min_finite<T, I>(costs: I) -> Option<T>
where
    T: CostValue,
    I: IntoIterator<Item = Cost<T>>,
{
    costs
        .into_iter()
        .filter_map(Cost::finite)
        .fold(None, |min, v| match min {
            Some(m) if m <= v => Some(m),
            _ => Some(v),
        })
}

/// Renders the active submatrix, `-` marking forbidden cells.
impl<T: CostValue> fmt::Display for ReducedMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self.rows.last().map_or(1, |r| r.to_string().len());
        let width = self
            .rows
            .iter()
            .flat_map(|&r| self.cols.iter().map(move |&c| (r, c)))
            .map(|(r, c)| self.cells[[r, c]].to_string().len())
            .chain(self.cols.iter().map(|c| c.to_string().len()))
            .max()
            .unwrap_or(1)
            + 2;

        write!(f, "{:label$}", "")?;
        for col in &self.cols {
            write!(f, "{:>width$}", col)?;
        }
        writeln!(f)?;
        for &row in &self.rows {
            write!(f, "{:>label$}", row)?;
            for &col in &self.cols {
                write!(f, "{:>width$}", self.cells[[row, col]])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

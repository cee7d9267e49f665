use ndarray::Array2;

use super::cost::{Cost, CostValue};
use crate::error::{Error, Result};

/// A validated n×n matrix of directed edge costs, indexed by city id.
///
/// Guarantees `n >= 2`, a `Forbidden` diagonal and no NaN values. The matrix
/// is never mutated by a solve; reduction works on its own copy.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix<T> {
    cells: Array2<Cost<T>>,
}

impl<T: CostValue> CostMatrix<T> {
    /// Builds a matrix from rows of costs.
    ///
    /// # Errors
    /// * `Error::InvalidInput` - if fewer than two rows are given, a row has the wrong
    ///   length, a diagonal cell is finite or a value is NaN
    ///
    /// # Example
    /// ```
    /// use tsp_assignment::{Cost, CostMatrix};
    /// use tsp_assignment::Cost::Forbidden as F;
    ///
    /// let matrix = CostMatrix::new(vec![
    ///     vec![F, Cost::Finite(1), Cost::Finite(2)],
    ///     vec![Cost::Finite(1), F, Cost::Finite(3)],
    ///     vec![Cost::Finite(2), Cost::Finite(3), F],
    /// ])
    /// .unwrap();
    /// assert_eq!(matrix.len(), 3);
    /// ```
    pub fn new(rows: Vec<Vec<Cost<T>>>) -> Result<Self> {
        let n = rows.len();
        if n < 2 {
            return Err(Error::invalid_input(format!(
                "need at least 2 cities, got {}",
                n
            )));
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(Error::invalid_input(format!(
                    "matrix is not square: row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    n
                )));
            }
        }

        let cells: Vec<Cost<T>> = rows.into_iter().flatten().collect();
        let cells = Array2::from_shape_vec((n, n), cells)
            .map_err(|e| Error::invalid_input(e.to_string()))?;
        Self::validated(cells)
    }

    /// Builds a matrix from raw values, treating every cell equal to
    /// `forbidden` as a `Forbidden` edge (e.g. `i32::MAX` or `f64::MAX`).
    pub fn from_values(rows: Vec<Vec<T>>, forbidden: T) -> Result<Self> {
        Self::new(
            rows.into_iter()
                .map(|row| {
                    row.into_iter()
                        .map(|v| Cost::from_sentinel(v, forbidden))
                        .collect()
                })
                .collect(),
        )
    }

    /// Builds an n×n matrix from a cost function of `(row, col)`.
    pub fn from_fn<F>(n: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> Cost<T>,
    {
        if n < 2 {
            return Err(Error::invalid_input(format!(
                "need at least 2 cities, got {}",
                n
            )));
        }
        Self::validated(Array2::from_shape_fn((n, n), |(r, c)| f(r, c)))
    }

    fn validated(cells: Array2<Cost<T>>) -> Result<Self> {
        for ((row, col), cost) in cells.indexed_iter() {
            match cost {
                Cost::Finite(_) if row == col => {
                    return Err(Error::invalid_input(format!(
                        "diagonal cell ({}, {}) must be forbidden",
                        row, col
                    )));
                }
                Cost::Finite(v) if v.partial_cmp(v).is_none() => {
                    return Err(Error::invalid_input(format!(
                        "cell ({}, {}) is not comparable",
                        row, col
                    )));
                }
                _ => {}
            }
        }
        Ok(Self { cells })
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.cells.nrows()
    }

    /// Always false: a valid matrix holds at least two cities.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, row: usize, col: usize) -> Cost<T> {
        self.cells[[row, col]]
    }

    pub(crate) fn cells(&self) -> &Array2<Cost<T>> {
        &self.cells
    }

    /// Copies the matrix back out as rows.
    pub fn rows(&self) -> Vec<Vec<Cost<T>>> {
        self.cells.outer_iter().map(|row| row.to_vec()).collect()
    }

    /// Sums the costs along consecutive cities of `path`.
    ///
    /// Returns `Forbidden` if any edge is forbidden. Indices must be in range.
    pub fn tour_cost(&self, path: &[usize]) -> Cost<T> {
        path.windows(2)
            .fold(Cost::zero(), |acc, edge| acc + self.get(edge[0], edge[1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Cost::{Finite, Forbidden as F};

    #[test]
    fn test_rejects_small_and_ragged() {
        let single: Vec<Vec<Cost<i32>>> = vec![vec![F]];
        assert!(matches!(CostMatrix::new(single), Err(Error::InvalidInput(_))));

        let ragged = vec![vec![F, Finite(1)], vec![Finite(1)]];
        assert!(matches!(CostMatrix::new(ragged), Err(Error::InvalidInput(_))));

        assert!(CostMatrix::<i32>::from_fn(1, |_, _| F).is_err());
    }

    #[test]
    fn test_rejects_finite_diagonal() {
        let rows = vec![vec![Finite(0), Finite(1)], vec![Finite(1), F]];
        assert!(matches!(CostMatrix::new(rows), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_rejects_nan() {
        let rows = vec![vec![F, Finite(f64::NAN)], vec![Finite(1.0), F]];
        assert!(matches!(CostMatrix::new(rows), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_from_values_maps_sentinel() {
        let m = i32::MAX;
        let matrix = CostMatrix::from_values(vec![vec![m, 4], vec![m, m]], m).unwrap();
        assert_eq!(matrix.get(0, 1), Finite(4));
        assert_eq!(matrix.get(1, 0), F);
        assert_eq!(matrix.rows()[0], vec![F, Finite(4)]);
    }

    #[test]
    fn test_tour_cost() {
        let matrix = CostMatrix::from_fn(3, |r, c| {
            if r == c {
                F
            } else {
                Finite((r * 10 + c) as u64)
            }
        })
        .unwrap();
        // 0->1 = 1, 1->2 = 12, 2->0 = 20
        assert_eq!(matrix.tour_cost(&[0, 1, 2, 0]), Finite(33));
        assert_eq!(matrix.tour_cost(&[0, 0]), F);
    }
}

//! Reduced-matrix assignment heuristic for the Traveling Salesman Problem.
//!
//! The matrix is reduced until every row and column holds a zero. The zero
//! whose removal would cost the most (its *penalty*: cheapest other cell in
//! its row plus cheapest other cell in its column) is committed as a tour
//! edge, its row and column leave the matrix, and the edge that would close
//! the current partial path into a premature cycle is forbidden. This repeats
//! until one row and one column are left; they form the closing edge.
//!
//! The result is always a single Hamiltonian cycle, but not necessarily an
//! optimal one.

pub mod assignment;
pub mod cost;
pub mod engine;
pub mod matrix;
pub mod penalty;
pub mod points;
pub mod reduced;
pub mod tour;
pub mod zero_index;


use log::debug;
use rayon::prelude::*;

pub use assignment::Assignment;
pub use cost::{Cost, CostValue};
pub use engine::{AssignmentEngine, Commit, EngineState};
pub use matrix::CostMatrix;
pub use penalty::{penalty, select_max_penalty_zero, ZeroCell};
pub use points::{euclidean_matrix, Point};
pub use reduced::{ReducedMatrix, Released};
pub use tour::{reconstruct, Tour};
pub use zero_index::ZeroCellIndex;

use crate::error::{Error, Result};

/// Options for [`solve_with_config`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolverConfig {
    /// City the returned tour starts and ends at.
    pub start_city: usize,
    /// Log the active reduced matrix at `trace` level after every commit.
    pub trace_matrices: bool,
}

/// Builds a low-cost tour through every city of `matrix`.
///
/// # Errors
/// * `Error::Infeasible` - if the construction reaches a row or column with
///   no usable edge left
///
/// # Example
/// ```
/// use tsp_assignment::{solve, Cost, CostMatrix};
/// use tsp_assignment::Cost::Forbidden as F;
///
/// let matrix = CostMatrix::new(vec![
///     vec![F, Cost::Finite(1), Cost::Finite(2)],
///     vec![Cost::Finite(1), F, Cost::Finite(3)],
///     vec![Cost::Finite(2), Cost::Finite(3), F],
/// ])
/// .unwrap();
///
/// let tour = solve(&matrix).unwrap();
/// assert_eq!(tour.total_cost, 6);
/// assert_eq!(tour.cities.len(), 4);
/// assert_eq!(tour.cities[0], tour.cities[3]);
/// ```
///
/// # Complexity
/// * Time: O(n³)
/// * Space: O(n²)
pub fn solve<T: CostValue>(matrix: &CostMatrix<T>) -> Result<Tour<T>> {
    solve_with_config(matrix, &SolverConfig::default())
}

/// [`solve`] with explicit options.
///
/// # Errors
/// * `Error::InvalidInput` - if `config.start_city` is not a city of the matrix
/// * `Error::Infeasible` - as for [`solve`]
pub fn solve_with_config<T: CostValue>(
    matrix: &CostMatrix<T>,
    config: &SolverConfig,
) -> Result<Tour<T>> {
    if config.start_city >= matrix.len() {
        return Err(Error::invalid_input(format!(
            "start city {} is out of range for {} cities",
            config.start_city,
            matrix.len()
        )));
    }

    debug!("solving {}-city tour", matrix.len());
    let tour = AssignmentEngine::new(matrix)
        .with_matrix_tracing(config.trace_matrices)
        .into_tour(config.start_city)?;
    debug!(
        "tour of cost {} through {} cities",
        tour.total_cost,
        tour.len()
    );
    Ok(tour)
}

/// Solves independent instances in parallel. Results keep the input order.
pub fn solve_batch<T>(matrices: &[CostMatrix<T>], config: &SolverConfig) -> Vec<Result<Tour<T>>>
where
    T: CostValue + Send + Sync,
{
    matrices
        .par_iter()
        .map(|matrix| solve_with_config(matrix, config))
        .collect()
}

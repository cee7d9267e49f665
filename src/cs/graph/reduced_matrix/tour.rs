use super::assignment::Assignment;
use super::cost::CostValue;
use super::matrix::CostMatrix;
use crate::error::{Error, Result};

/// A closed tour: `cities` starts and ends at the same city and lists every
/// other city exactly once in between.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour<T> {
    pub cities: Vec<usize>,
    /// Sum of the original, unreduced costs along the tour.
    pub total_cost: T,
}

impl<T> Tour<T> {
    /// Number of distinct cities visited.
    pub fn len(&self) -> usize {
        self.cities.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consecutive `(from, to)` pairs of the tour.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cities.windows(2).map(|w| (w[0], w[1]))
    }
}

/// Follows the successors of a complete assignment from `start` and sums the
/// costs of `original` along the way.
///
/// # Errors
/// * `Error::InvalidInput` - if `start` is not a city of the matrix
/// * `Error::InternalInconsistency` - if the assignment is not a single cycle
///   through every city, or it uses a forbidden edge
pub fn reconstruct<T: CostValue>(
    assignment: &Assignment,
    original: &CostMatrix<T>,
    start: usize,
) -> Result<Tour<T>> {
    let n = original.len();
    if assignment.cities() != n {
        return Err(Error::internal(format!(
            "assignment covers {} cities, matrix has {}",
            assignment.cities(),
            n
        )));
    }
    if start >= n {
        return Err(Error::invalid_input(format!(
            "start city {} is out of range for {} cities",
            start, n
        )));
    }

    let mut visited = vec![false; n];
    let mut cities = Vec::with_capacity(n + 1);
    let mut total_cost = T::zero();
    let mut current = start;
    visited[start] = true;
    cities.push(start);

    for step in 1..=n {
        let next = assignment
            .successor(current)
            .ok_or_else(|| Error::internal(format!("city {} has no successor", current)))?;
        if step < n && visited[next] {
            return Err(Error::internal(format!(
                "tour revisits city {} after {} of {} steps",
                next, step, n
            )));
        }
        if step == n && next != start {
            return Err(Error::internal(format!(
                "tour ends at city {} instead of {}",
                next, start
            )));
        }
        let cost = original.get(current, next).finite().ok_or_else(|| {
            Error::internal(format!("tour uses forbidden edge {} -> {}", current, next))
        })?;
        total_cost = total_cost + cost;
        visited[next] = true;
        cities.push(next);
        current = next;
    }

    Ok(Tour { cities, total_cost })
}

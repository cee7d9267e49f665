use log::{debug, trace, warn};

use super::assignment::Assignment;
use super::cost::{Cost, CostValue};
use super::matrix::CostMatrix;
use super::penalty::select_max_penalty_zero;
use super::reduced::{ReducedMatrix, Released};
use super::tour::{reconstruct, Tour};
use crate::error::{Error, Line, Result};

/// Where the engine is in its construction loop.
///
/// Between calls it rests in `Initializing`, `Selecting`, `Finalizing` or
/// `Done`. If a step fails the engine stays in the state that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Initializing,
    Reducing,
    Selecting,
    Committing,
    Finalizing,
    Done,
}

/// One committed tour edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Commit<T> {
    pub row: usize,
    pub col: usize,
    /// Penalty of the selected zero; zero for the forced final pair.
    pub penalty: Cost<T>,
    /// True for the last pair, which is taken regardless of cost.
    pub forced: bool,
}

/// Builds a tour by repeatedly committing the zero cell with the largest
/// penalty and re-reducing the matrix around it.
///
/// The engine can be driven to completion with [`run`](Self::run) or one
/// edge at a time with [`step`](Self::step), which lets callers inspect the
/// reduced matrix and the partial assignment between commits.
///
/// # Example
/// ```
/// use tsp_assignment::{AssignmentEngine, CostMatrix, EngineState};
///
/// let f = i32::MAX;
/// let costs = CostMatrix::from_values(
///     vec![vec![f, 1, 2], vec![1, f, 3], vec![2, 3, f]],
///     f,
/// )
/// .unwrap();
///
/// let mut engine = AssignmentEngine::new(&costs);
/// while let Some(commit) = engine.step().unwrap() {
///     assert!(engine.assignment().premature_cycle().is_none());
///     assert_eq!(commit.forced, engine.state() == EngineState::Done);
/// }
/// let tour = engine.into_tour(0).unwrap();
/// assert_eq!(tour.total_cost, 6);
/// ```
#[derive(Debug, Clone)]
pub struct AssignmentEngine<'a, T> {
    original: &'a CostMatrix<T>,
    matrix: ReducedMatrix<T>,
    assignment: Assignment,
    state: EngineState,
    trace_matrices: bool,
}

impl<'a, T: CostValue> AssignmentEngine<'a, T> {
    pub fn new(original: &'a CostMatrix<T>) -> Self {
        Self {
            original,
            matrix: ReducedMatrix::new(original),
            assignment: Assignment::new(original.len()),
            state: EngineState::Initializing,
            trace_matrices: false,
        }
    }

    /// Dumps the active reduced matrix at `trace` level after every change.
    pub fn with_matrix_tracing(mut self, enabled: bool) -> Self {
        self.trace_matrices = enabled;
        self
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn matrix(&self) -> &ReducedMatrix<T> {
        &self.matrix
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    /// Reduces every row, then every column still lacking a zero.
    ///
    /// # Errors
    /// * `Error::Infeasible` - if some row or column is entirely forbidden
    /// * `Error::InternalInconsistency` - if called twice
    pub fn initialize(&mut self) -> Result<()> {
        if self.state != EngineState::Initializing {
            return Err(Error::internal(format!(
                "initialize called in state {:?}",
                self.state
            )));
        }
        self.state = EngineState::Reducing;
        self.matrix
            .minimize_all_rows()
            .and_then(|_| self.matrix.minimize_all_cols())
            .map_err(log_infeasible)?;
        self.trace_matrix("after initial reduction");
        self.state = self.resting_state();
        Ok(())
    }

    /// Commits the next edge, initializing first if needed.
    ///
    /// Returns `None` once the tour is complete.
    ///
    /// # Errors
    /// * `Error::Infeasible` - if a line runs out of finite cells
    /// * `Error::InternalInconsistency` - if called again after a failed step
    pub fn step(&mut self) -> Result<Option<Commit<T>>> {
        match self.state {
            EngineState::Initializing => {
                self.initialize()?;
                self.step()
            }
            EngineState::Selecting => self.select_and_commit().map(Some),
            EngineState::Finalizing => self.finalize().map(Some),
            EngineState::Done => Ok(None),
            EngineState::Reducing | EngineState::Committing => Err(Error::internal(format!(
                "engine halted in state {:?} by an earlier failure",
                self.state
            ))),
        }
    }

    /// Commits every remaining edge.
    pub fn run(&mut self) -> Result<()> {
        while self.step()?.is_some() {}
        Ok(())
    }

    /// Finishes the construction and turns the assignment into a tour that
    /// starts and ends at `start`.
    pub fn into_tour(mut self, start: usize) -> Result<Tour<T>> {
        self.run()?;
        reconstruct(&self.assignment, self.original, start)
    }

    fn resting_state(&self) -> EngineState {
        match self.matrix.active_len() {
            0 => EngineState::Done,
            1 => EngineState::Finalizing,
            _ => EngineState::Selecting,
        }
    }

    fn select_and_commit(&mut self) -> Result<Commit<T>> {
        let zero = select_max_penalty_zero(&self.matrix)
            .ok_or_else(|| Error::internal("active submatrix holds no zero"))?;

        self.state = EngineState::Committing;
        let closing = self.assignment.commit(zero.row, zero.col)?;
        let mut released = self.matrix.assign(zero.row, zero.col)?;
        debug!(
            "commit {} -> {} (penalty {}), {} cities left",
            zero.row,
            zero.col,
            zero.penalty,
            self.matrix.active_len()
        );

        // The last remaining pair is the closing edge itself, so only guard
        // while more than one row is left.
        if let Some((end, start)) = closing {
            if self.matrix.active_len() > 1 && self.matrix.forbid(end, start) {
                released.rows.push(end);
                released.cols.push(start);
            }
        }

        self.state = EngineState::Reducing;
        self.restore_zeros(&released).map_err(log_infeasible)?;
        self.trace_matrix(&format!("after commit {} -> {}", zero.row, zero.col));
        self.state = self.resting_state();

        Ok(Commit {
            row: zero.row,
            col: zero.col,
            penalty: zero.penalty,
            forced: false,
        })
    }

    fn restore_zeros(&mut self, released: &Released) -> Result<()> {
        for &row in &released.rows {
            if self.matrix.is_active_row(row) && !self.matrix.zeros().row_has_zero(row) {
                self.matrix.minimize_row(row)?;
            }
        }
        for &col in &released.cols {
            if self.matrix.is_active_col(col) && !self.matrix.zeros().col_has_zero(col) {
                self.matrix.minimize_col(col)?;
            }
        }
        Ok(())
    }

    fn finalize(&mut self) -> Result<Commit<T>> {
        let row = self.matrix.active_rows().next();
        let col = self.matrix.active_cols().next();
        let (row, col) = row
            .zip(col)
            .ok_or_else(|| Error::internal("no pair left to finalize"))?;

        if self.original.get(row, col).is_forbidden() {
            return Err(log_infeasible(Error::Infeasible {
                line: Line::Row(row),
            }));
        }
        self.assignment.commit(row, col)?;
        self.matrix.assign(row, col)?;
        self.state = EngineState::Done;
        debug!("forced final commit {} -> {}", row, col);

        Ok(Commit {
            row,
            col,
            penalty: Cost::zero(),
            forced: true,
        })
    }

    fn trace_matrix(&self, label: &str) {
        if self.trace_matrices {
            trace!("reduced matrix {}:\n{}", label, self.matrix);
        }
    }
}

fn log_infeasible(err: Error) -> Error {
    if let Error::Infeasible { line } = &err {
        warn!("no tour can be completed: {} has no finite active cell", line);
    }
    err
}

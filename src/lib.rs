pub mod cs;
pub mod error;

pub use cs::graph;
pub use cs::graph::reduced_matrix::{
    euclidean_matrix, solve, solve_batch, solve_with_config, AssignmentEngine, Commit, Cost,
    CostMatrix, CostValue, EngineState, Point, SolverConfig, Tour,
};
pub use error::{Error, Line, Result};

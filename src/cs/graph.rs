pub mod reduced_matrix;

// Re-export the reduced-matrix heuristic with descriptive names
pub use reduced_matrix::{
    solve as reduced_matrix_tsp, solve_batch as reduced_matrix_tsp_batch,
    solve_with_config as reduced_matrix_tsp_with_config, SolverConfig,
};

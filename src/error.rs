use std::fmt;

use thiserror::Error;

/// A single row or column of a cost matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Line {
    Row(usize),
    Col(usize),
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Row(row) => write!(f, "row {}", row),
            Line::Col(col) => write!(f, "column {}", col),
        }
    }
}

/// Errors produced while solving a tour.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The matrix is malformed: too small, not square, a finite diagonal or an
    /// incomparable value. Rejected before any reduction happens.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An active line ran out of finite cells, so no tour can be completed.
    #[error("infeasible: {line} has no finite cost among the active cells")]
    Infeasible { line: Line },

    /// The committed assignment does not form a single cycle. Indicates a bug.
    #[error("internal inconsistency: {0}")]
    InternalInconsistency(String),
}

impl Error {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Error::InternalInconsistency(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::Infeasible {
            line: Line::Row(3),
        };
        assert_eq!(
            err.to_string(),
            "infeasible: row 3 has no finite cost among the active cells"
        );
        assert_eq!(
            Error::invalid_input("matrix is empty").to_string(),
            "invalid input: matrix is empty"
        );
        assert_eq!(Line::Col(7).to_string(), "column 7");
    }
}

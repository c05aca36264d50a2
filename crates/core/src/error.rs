//! Error types for the editor core.

use thiserror::Error;

/// Checked board access failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("coordinates out of bounds: row {row}, col {col}")]
    OutOfBounds { row: i8, col: i8 },
}

/// The board or an engine message cannot be used for a query
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("board contains {0} full line(s)")]
    FullRows(usize),
    #[error("board has an odd number of filled cells ({0})")]
    OddCellCount(u32),
    #[error("unknown piece {0:?}")]
    UnknownPiece(String),
    #[error("malformed engine message: {0}")]
    Json(String),
}

impl From<serde_json::Error> for QueryError {
    fn from(err: serde_json::Error) -> Self {
        QueryError::Json(err.to_string())
    }
}

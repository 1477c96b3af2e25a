//! Error types for table construction.

use thiserror::Error;

pub type TableResult<T> = Result<T, TableError>;

/// Errors raised while building a [`crate::DemandFactorTable`].
///
/// Lookups themselves never fail.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TableError {
    #[error("Table axis '{axis}' has no breakpoints")]
    EmptyAxis { axis: &'static str },

    #[error("Table axis '{axis}' is not strictly increasing at index {index}")]
    NotIncreasing { axis: &'static str, index: usize },

    #[error("Table axis '{axis}' has a non-finite breakpoint at index {index}")]
    NonFiniteBreakpoint { axis: &'static str, index: usize },

    #[error("Table shape mismatch: expected {expected_rows}x{expected_cols}, got {what}")]
    ShapeMismatch {
        expected_rows: usize,
        expected_cols: usize,
        what: String,
    },

    #[error("Non-finite coefficient at row {row}, col {col}")]
    NonFiniteValue { row: usize, col: usize },

    #[error("Unknown table kind: {name} (expected 'group' or 'workshop')")]
    UnknownKind { name: String },
}

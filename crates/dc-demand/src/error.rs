//! Error types for demand calculations.

use dc_core::DcError;
use thiserror::Error;

pub type DemandResult<T> = Result<T, DemandError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DemandError {
    /// No power left in the aggregate: empty registry, every device excluded,
    /// or only zero-rated devices.
    #[error("Empty group: {what} is zero, no included equipment contributes power")]
    EmptyGroup { what: &'static str },

    #[error("Non-finite value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid rules: {what}")]
    InvalidRules { what: &'static str },
}

impl From<DcError> for DemandError {
    fn from(e: DcError) -> Self {
        match e {
            DcError::NonFinite { what, value } => DemandError::NonFinite { what, value },
        }
    }
}

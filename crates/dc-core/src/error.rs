use thiserror::Error;

pub type DcResult<T> = Result<T, DcError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DcError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}

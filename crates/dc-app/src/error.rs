//! Error types for the dc-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates
/// and gives frontends a single error interface.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Failed to read project file: {path}")]
    ProjectFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write project file: {path}")]
    ProjectFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Project validation failed: {0}")]
    Validation(String),

    #[error("Override rejected: {0}")]
    Override(String),

    #[error("Calculation failed: {0}")]
    Calculation(#[from] dc_demand::DemandError),

    #[error("Report error: {0}")]
    Report(String),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for dc-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<dc_project::ProjectError> for AppError {
    fn from(err: dc_project::ProjectError) -> Self {
        match err {
            dc_project::ProjectError::Validation(e) => AppError::Validation(e.to_string()),
            dc_project::ProjectError::Override(e) => AppError::Override(e.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<dc_project::ValidationError> for AppError {
    fn from(err: dc_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<dc_project::OverrideError> for AppError {
    fn from(err: dc_project::OverrideError) -> Self {
        AppError::Override(err.to_string())
    }
}

impl From<dc_core::DcError> for AppError {
    fn from(err: dc_core::DcError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

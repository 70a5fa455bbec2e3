//! Error types for the cf-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Project validation failed: {0}")]
    Validation(String),

    #[error("No engine configured: {message}")]
    NoEngine { message: String },

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Analysis error: {0}")]
    Analysis(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Malformed table {path} line {line}: {message}")]
    TableParse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for cf-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<cf_project::ProjectError> for AppError {
    fn from(err: cf_project::ProjectError) -> Self {
        AppError::Project(err.to_string())
    }
}

impl From<cf_project::ValidationError> for AppError {
    fn from(err: cf_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<cf_sim::SimError> for AppError {
    fn from(err: cf_sim::SimError) -> Self {
        AppError::Simulation(err.to_string())
    }
}

impl From<cf_analysis::AnalysisError> for AppError {
    fn from(err: cf_analysis::AnalysisError) -> Self {
        AppError::Analysis(err.to_string())
    }
}

impl From<cf_results::ResultsError> for AppError {
    fn from(err: cf_results::ResultsError) -> Self {
        AppError::Results(err.to_string())
    }
}

impl From<cf_core::CfError> for AppError {
    fn from(err: cf_core::CfError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

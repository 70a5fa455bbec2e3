//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered while driving the water-quality engine.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Unknown node: {node}")]
    UnknownNode { node: String },

    #[error("Engine returned no quality results for trace node {node}")]
    MissingQuality { node: String },

    #[error("Malformed engine output: {what}")]
    MalformedOutput { what: String },

    #[error("Time axis or node list of run for {node} differs from earlier runs")]
    AxisMismatch { node: String },

    #[error("Convergence failed: {what}")]
    ConvergenceFailed { what: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Backend error: {message}")]
    Backend { message: String },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<cf_core::CfError> for SimError {
    fn from(e: cf_core::CfError) -> Self {
        SimError::Backend {
            message: e.to_string(),
        }
    }
}

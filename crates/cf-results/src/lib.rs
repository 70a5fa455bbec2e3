//! cf-results: analysis run cache and table storage.

pub mod hash;
pub mod store;
pub mod types;

pub use hash::{compute_run_id, digest_bytes};
pub use store::{RunStore, now_timestamp};
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Run not found: {run_id}")]
    RunNotFound { run_id: String },

    #[error("Invalid path: {message}")]
    InvalidPath { message: String },

    #[error("Stored table is inconsistent: {0}")]
    Table(#[from] cf_core::CfError),
}

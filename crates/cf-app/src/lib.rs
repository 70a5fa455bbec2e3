//! Shared application service layer for contamflow.
//!
//! Centralizes project handling, engine configuration, analysis runs with
//! caching, table import/export and result queries for the CLI.

pub mod analysis_service;
pub mod error;
pub mod project_service;
pub mod query;
pub mod runtime_config;
pub mod table_io;

// Re-export key types for convenience
pub use analysis_service::{
    RunMode, RunOptions, RunRequest, RunResponse, delete_run, ensure_run,
    ensure_run_with_simulator, list_runs, load_run,
};
pub use error::{AppError, AppResult};
pub use project_service::{
    NetworkSummary, load_project, save_project, summarize_network, validate_project,
};
pub use query::{RunSummary, TableKind, export_table, get_run_summary, sensor_summaries};

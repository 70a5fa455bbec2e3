use thiserror::Error;

pub type CfResult<T> = Result<T, CfError>;

#[derive(Error, Debug)]
pub enum CfError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Row {row} has {found} values, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Duplicate injection node: {node}")]
    DuplicateInjectionNode { node: String },

    #[error("Duplicate row for node {node} at t={time_s}")]
    DuplicateRow { node: String, time_s: f64 },
}

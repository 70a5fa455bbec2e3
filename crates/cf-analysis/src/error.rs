use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Cannot derive a non-detection time from {times} distinct time step(s); pass one explicitly")]
    SentinelUndefined { times: usize },

    #[error("Trace table is empty")]
    EmptyTrace,

    #[error("No demand for node {node} at t={time_s}")]
    MissingDemand { node: String, time_s: f64 },

    #[error("Unknown injection node: {node}")]
    UnknownInjectionNode { node: String },

    #[error("Detection time {time_s} for ({node}, {inj_node}) is not a simulated time step")]
    DetectionTimeOffAxis {
        node: String,
        inj_node: String,
        time_s: f64,
    },

    #[error("Table error: {0}")]
    Table(#[from] cf_core::CfError),
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;

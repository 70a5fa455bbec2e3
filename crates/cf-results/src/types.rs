//! Result data types.

use cf_core::{DemandTable, DetectionTable, TraceTable, VolumeTable};
use cf_project::{AnalysisDef, SimulationDef};
use serde::{Deserialize, Serialize};

pub type RunId = String;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: RunId,
    pub project_name: String,
    pub network_id: String,
    pub timestamp: String,
    pub source: RunSource,
    pub simulation: SimulationDef,
    pub analysis: AnalysisDef,
    pub tool_version: String,
    /// Trace column order.
    pub inj_nodes: Vec<String>,
    pub node_count: usize,
    pub time_steps: usize,
    /// Last simulated time.
    pub horizon_s: f64,
}

/// Where the trace and demand tables came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RunSource {
    /// Produced by driving the engine for this project, identified by digests
    /// of the engine inputs that live outside the project file.
    Simulated {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        engine_sha256: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        inp_sha256: Option<String>,
    },
    /// Loaded from table files, identified by content digest.
    Imported {
        trace_sha256: String,
        demand_sha256: String,
    },
}

/// All tables of one analysis run.
#[derive(Debug, Clone, Default)]
pub struct RunTables {
    pub trace: TraceTable,
    pub demand: DemandTable,
    pub detection: DetectionTable,
    pub volume: VolumeTable,
}

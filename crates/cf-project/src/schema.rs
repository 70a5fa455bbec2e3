//! Project schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    pub network: NetworkDef,
    #[serde(default)]
    pub simulation: SimulationDef,
    #[serde(default)]
    pub analysis: AnalysisDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkDef {
    pub id: String,
    /// EPANET input file the engine loads the network from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inp_path: Option<PathBuf>,
    #[serde(default)]
    pub nodes: Vec<NodeDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeDef {
    pub id: String,
    #[serde(default)]
    pub kind: NodeKind,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    #[default]
    Junction,
    Tank,
    Reservoir,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationDef {
    #[serde(default = "default_duration_s")]
    pub duration_s: u64,
    /// Shared hydraulic, quality and report step.
    #[serde(default = "default_timestep_s")]
    pub timestep_s: u64,
    #[serde(default)]
    pub engine: EngineDef,
    /// Directory of engine outputs recorded ahead of time, replayed instead of
    /// calling a live engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_dir: Option<PathBuf>,
}

impl Default for SimulationDef {
    fn default() -> Self {
        Self {
            duration_s: default_duration_s(),
            timestep_s: default_timestep_s(),
            engine: EngineDef::default(),
            recorded_dir: None,
        }
    }
}

fn default_duration_s() -> u64 {
    24 * 3600
}

fn default_timestep_s() -> u64 {
    3600
}

/// Options passed through to the water-quality engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineDef {
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
    #[serde(default)]
    pub use_hyd: bool,
    #[serde(default)]
    pub save_hyd: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hydfile: Option<PathBuf>,
    #[serde(default)]
    pub version: EngineVersionDef,
    #[serde(default)]
    pub convergence_error: bool,
}

impl Default for EngineDef {
    fn default() -> Self {
        Self {
            file_prefix: default_file_prefix(),
            use_hyd: false,
            save_hyd: false,
            hydfile: None,
            version: EngineVersionDef::default(),
            convergence_error: false,
        }
    }
}

fn default_file_prefix() -> String {
    "temp".to_string()
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum EngineVersionDef {
    #[serde(rename = "2.0")]
    V2_0,
    #[default]
    #[serde(rename = "2.2")]
    V2_2,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisDef {
    /// Concentration (percent) a node must exceed to count as detecting.
    #[serde(default = "default_sensitivity")]
    pub sensitivity: f64,
    /// Detection time reported for scenarios a node never detects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_detection_s: Option<f64>,
    /// Injection points; all junctions when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub injection_nodes: Option<Vec<String>>,
    #[serde(default)]
    pub volume_method: VolumeMethodDef,
}

impl Default for AnalysisDef {
    fn default() -> Self {
        Self {
            sensitivity: default_sensitivity(),
            non_detection_s: None,
            injection_nodes: None,
            volume_method: VolumeMethodDef::default(),
        }
    }
}

fn default_sensitivity() -> f64 {
    1.0
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum VolumeMethodDef {
    #[default]
    DetectionStep,
    Integrated,
}

//! Content-based hashing for run IDs.

use cf_project::schema::Project;
use sha2::{Digest, Sha256};

use crate::types::RunSource;

/// Run id over everything that affects the tables: network, simulation and
/// analysis settings, the table source and the tool version. The project name
/// is not hashed.
pub fn compute_run_id(project: &Project, source: &RunSource, tool_version: &str) -> String {
    let mut hasher = Sha256::new();

    let network_json = serde_json::to_string(&project.network).unwrap_or_default();
    hasher.update(network_json.as_bytes());

    let simulation_json = serde_json::to_string(&project.simulation).unwrap_or_default();
    hasher.update(simulation_json.as_bytes());

    let analysis_json = serde_json::to_string(&project.analysis).unwrap_or_default();
    hasher.update(analysis_json.as_bytes());

    let source_json = serde_json::to_string(source).unwrap_or_default();
    hasher.update(source_json.as_bytes());

    hasher.update(tool_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}

pub fn digest_bytes(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

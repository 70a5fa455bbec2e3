//! Project validation logic.

use crate::schema::{NodeKind, Project};
use std::collections::{HashMap, HashSet};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    let mut node_kinds = HashMap::new();
    for node in &project.network.nodes {
        if node_kinds.insert(node.id.as_str(), node.kind).is_some() {
            return Err(ValidationError::DuplicateId {
                id: node.id.clone(),
                context: format!("network '{}' nodes", project.network.id),
            });
        }
    }

    let sim = &project.simulation;
    if sim.timestep_s == 0 {
        return Err(ValidationError::InvalidValue {
            field: "simulation.timestep_s".to_string(),
            value: sim.timestep_s.to_string(),
            reason: "must be positive".to_string(),
        });
    }
    if sim.duration_s < sim.timestep_s {
        return Err(ValidationError::InvalidValue {
            field: "simulation.duration_s".to_string(),
            value: sim.duration_s.to_string(),
            reason: format!("shorter than one timestep ({} s)", sim.timestep_s),
        });
    }
    if sim.engine.file_prefix.trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "simulation.engine.file_prefix".to_string(),
            value: sim.engine.file_prefix.clone(),
            reason: "must not be empty".to_string(),
        });
    }

    let analysis = &project.analysis;
    if !analysis.sensitivity.is_finite() || analysis.sensitivity < 0.0 {
        return Err(ValidationError::InvalidValue {
            field: "analysis.sensitivity".to_string(),
            value: analysis.sensitivity.to_string(),
            reason: "must be a finite, non-negative percentage".to_string(),
        });
    }
    if let Some(t) = analysis.non_detection_s
        && !t.is_finite()
    {
        return Err(ValidationError::InvalidValue {
            field: "analysis.non_detection_s".to_string(),
            value: t.to_string(),
            reason: "must be finite".to_string(),
        });
    }

    if let Some(inj_nodes) = &analysis.injection_nodes {
        let mut seen = HashSet::new();
        for id in inj_nodes {
            if !seen.insert(id.as_str()) {
                return Err(ValidationError::DuplicateId {
                    id: id.clone(),
                    context: "analysis injection_nodes".to_string(),
                });
            }
            if !node_kinds.contains_key(id.as_str()) {
                return Err(ValidationError::MissingReference {
                    id: id.clone(),
                    context: "analysis injection_nodes".to_string(),
                });
            }
        }
    } else if !node_kinds.values().any(|k| *k == NodeKind::Junction) {
        return Err(ValidationError::InvalidValue {
            field: "analysis.injection_nodes".to_string(),
            value: "<all junctions>".to_string(),
            reason: "network has no junctions".to_string(),
        });
    }

    Ok(())
}

//! Project loading, saving, validation, and introspection.

use std::path::Path;

use cf_project::schema::{NodeKind, Project};

use crate::error::{AppError, AppResult};

/// Summary of a project's network for listing.
#[derive(Debug, Clone)]
pub struct NetworkSummary {
    pub id: String,
    pub junctions: usize,
    pub tanks: usize,
    pub reservoirs: usize,
    /// Configured injection points, or all junctions.
    pub injection_nodes: usize,
}

/// Load, migrate and validate a project (YAML, or JSON by extension).
pub fn load_project(path: &Path) -> AppResult<Project> {
    if !path.exists() {
        return Err(AppError::FileRead {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "project file not found"),
        });
    }
    Ok(cf_project::load(path)?)
}

/// Save project to a YAML file.
pub fn save_project(path: &Path, project: &Project) -> AppResult<()> {
    cf_project::validate_project(project)?;
    let content = serde_yaml::to_string(project)
        .map_err(|e| AppError::Project(format!("Failed to serialize project: {}", e)))?;

    std::fs::write(path, content).map_err(|e| AppError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

pub fn validate_project(project: &Project) -> AppResult<()> {
    cf_project::validate_project(project)?;
    Ok(())
}

pub fn summarize_network(project: &Project) -> NetworkSummary {
    let count = |kind: NodeKind| {
        project
            .network
            .nodes
            .iter()
            .filter(|n| n.kind == kind)
            .count()
    };
    let junctions = count(NodeKind::Junction);
    NetworkSummary {
        id: project.network.id.clone(),
        junctions,
        tanks: count(NodeKind::Tank),
        reservoirs: count(NodeKind::Reservoir),
        injection_nodes: project
            .analysis
            .injection_nodes
            .as_ref()
            .map_or(junctions, Vec::len),
    }
}

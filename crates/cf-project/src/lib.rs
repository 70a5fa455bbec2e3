//! cf-project: analysis project file format and validation.
//!
//! Projects are stored as YAML or JSON. Loading always migrates to
//! [`LATEST_VERSION`] and validates; saving validates first.

use std::path::Path;

pub mod migrate;
pub mod schema;
pub mod validate;

pub use migrate::{LATEST_VERSION, migrate_to_latest};
pub use schema::*;
pub use validate::{ValidationError, validate_project};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Migration error: {what}")]
    Migration { what: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk encoding of a project file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectFormat {
    Yaml,
    Json,
}

impl ProjectFormat {
    /// `.json` files are JSON, everything else YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }

    fn decode(self, content: &str) -> ProjectResult<Project> {
        Ok(match self {
            Self::Yaml => serde_yaml::from_str(content)?,
            Self::Json => serde_json::from_str(content)?,
        })
    }

    fn encode(self, project: &Project) -> ProjectResult<String> {
        Ok(match self {
            Self::Yaml => serde_yaml::to_string(project)?,
            Self::Json => serde_json::to_string_pretty(project)?,
        })
    }
}

pub fn load_as(path: &Path, format: ProjectFormat) -> ProjectResult<Project> {
    let content = std::fs::read_to_string(path)?;
    let project = migrate_to_latest(format.decode(&content)?)?;
    validate_project(&project)?;
    Ok(project)
}

pub fn save_as(path: &Path, project: &Project, format: ProjectFormat) -> ProjectResult<()> {
    validate_project(project)?;
    std::fs::write(path, format.encode(project)?)?;
    Ok(())
}

/// Load a project, picking the format from the file extension.
pub fn load(path: &Path) -> ProjectResult<Project> {
    load_as(path, ProjectFormat::from_path(path))
}

pub fn load_yaml(path: &Path) -> ProjectResult<Project> {
    load_as(path, ProjectFormat::Yaml)
}

pub fn save_yaml(path: &Path, project: &Project) -> ProjectResult<()> {
    save_as(path, project, ProjectFormat::Yaml)
}

pub fn save_json(path: &Path, project: &Project) -> ProjectResult<()> {
    save_as(path, project, ProjectFormat::Json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(ProjectFormat::from_path(Path::new("a.json")), ProjectFormat::Json);
        assert_eq!(ProjectFormat::from_path(Path::new("a.JSON")), ProjectFormat::Json);
        assert_eq!(ProjectFormat::from_path(Path::new("a.yaml")), ProjectFormat::Yaml);
        assert_eq!(ProjectFormat::from_path(Path::new("project")), ProjectFormat::Yaml);
    }
}

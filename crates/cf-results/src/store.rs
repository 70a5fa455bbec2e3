//! Run storage API.
//!
//! Layout: `<root>/<run_id>/manifest.json` plus one JSONL file per table.

use crate::types::{RunManifest, RunTables};
use crate::{ResultsError, ResultsResult};
use cf_core::{DemandTable, DetectionTable, TraceTable, VolumeTable};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

const MANIFEST_FILE: &str = "manifest.json";
const TRACE_FILE: &str = "trace.jsonl";
const DEMAND_FILE: &str = "demand.jsonl";
const DETECTION_FILE: &str = "detection.jsonl";
const VOLUME_FILE: &str = "volume.jsonl";

#[derive(Clone)]
pub struct RunStore {
    root_dir: PathBuf,
}

impl RunStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    /// Store next to the project file, under `.contamflow/runs`.
    pub fn for_project(project_path: &Path) -> ResultsResult<Self> {
        let project_dir = project_path
            .parent()
            .ok_or_else(|| ResultsError::InvalidPath {
                message: "project path has no parent directory".to_string(),
            })?;
        let runs_dir = project_dir.join(".contamflow").join("runs");
        Self::new(runs_dir)
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn run_dir(&self, run_id: &str) -> PathBuf {
        self.root_dir.join(run_id)
    }

    pub fn has_run(&self, run_id: &str) -> bool {
        self.run_dir(run_id).join(MANIFEST_FILE).exists()
    }

    pub fn save_run(&self, manifest: &RunManifest, tables: &RunTables) -> ResultsResult<()> {
        let run_dir = self.run_dir(&manifest.run_id);
        fs::create_dir_all(&run_dir)?;

        write_jsonl(&run_dir.join(TRACE_FILE), tables.trace.records())?;
        write_jsonl(&run_dir.join(DEMAND_FILE), tables.demand.records())?;
        write_jsonl(&run_dir.join(DETECTION_FILE), tables.detection.records())?;
        write_jsonl(&run_dir.join(VOLUME_FILE), tables.volume.records())?;

        // Manifest last: its presence marks the run as complete.
        let manifest_json = serde_json::to_string_pretty(manifest)?;
        fs::write(run_dir.join(MANIFEST_FILE), manifest_json)?;

        Ok(())
    }

    pub fn load_manifest(&self, run_id: &str) -> ResultsResult<RunManifest> {
        let manifest_path = self.run_dir(run_id).join(MANIFEST_FILE);

        if !manifest_path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }

        let content = fs::read_to_string(manifest_path)?;
        let manifest = serde_json::from_str(&content)?;
        Ok(manifest)
    }

    pub fn load_tables(&self, run_id: &str) -> ResultsResult<(RunManifest, RunTables)> {
        let manifest = self.load_manifest(run_id)?;
        let run_dir = self.run_dir(run_id);

        let tables = RunTables {
            trace: TraceTable::new(
                manifest.inj_nodes.clone(),
                read_jsonl(&run_dir.join(TRACE_FILE), run_id)?,
            )?,
            demand: DemandTable::new(read_jsonl(&run_dir.join(DEMAND_FILE), run_id)?)?,
            detection: DetectionTable::new(read_jsonl(&run_dir.join(DETECTION_FILE), run_id)?)?,
            volume: VolumeTable::new(read_jsonl(&run_dir.join(VOLUME_FILE), run_id)?)?,
        };
        Ok((manifest, tables))
    }

    /// All complete runs, newest first.
    pub fn list_runs(&self) -> ResultsResult<Vec<RunManifest>> {
        let mut runs = Vec::new();

        if !self.root_dir.exists() {
            return Ok(runs);
        }

        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if entry.path().is_dir() {
                let run_id = entry.file_name().to_string_lossy().to_string();
                if let Ok(manifest) = self.load_manifest(&run_id) {
                    runs.push(manifest);
                }
            }
        }

        runs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(runs)
    }

    pub fn delete_run(&self, run_id: &str) -> ResultsResult<()> {
        let run_dir = self.run_dir(run_id);
        if run_dir.exists() {
            fs::remove_dir_all(run_dir)?;
        }
        Ok(())
    }
}

fn write_jsonl<T: Serialize>(path: &Path, records: &[T]) -> ResultsResult<()> {
    let mut content = String::new();
    for record in records {
        let line = serde_json::to_string(record)?;
        content.push_str(&line);
        content.push('\n');
    }
    fs::write(path, content)?;
    Ok(())
}

fn read_jsonl<T: DeserializeOwned>(path: &Path, run_id: &str) -> ResultsResult<Vec<T>> {
    if !path.exists() {
        return Err(ResultsError::RunNotFound {
            run_id: run_id.to_string(),
        });
    }

    let content = fs::read_to_string(path)?;
    let mut records = Vec::new();
    for line in content.lines() {
        if !line.trim().is_empty() {
            records.push(serde_json::from_str(line)?);
        }
    }
    Ok(records)
}

/// RFC 3339 timestamp for new manifests.
pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

//! Replays engine outputs recorded ahead of time.
//!
//! On disk a recording is a directory holding `hydraulics.json` for the
//! hydraulics-only run and one `trace_<node>.json` per trace run, each a
//! serialized [`SimOutput`].

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use crate::error::{SimError, SimResult};
use crate::network::NetworkModel;
use crate::settings::{QualityParameter, RunOptions, SimSettings};
use crate::simulator::{QualitySimulator, SimOutput};

const HYDRAULICS_FILE: &str = "hydraulics.json";
const TRACE_PREFIX: &str = "trace_";

#[derive(Debug, Clone, Default)]
pub struct RecordedSimulator {
    runs: HashMap<QualityParameter, SimOutput>,
}

impl RecordedSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, quality: QualityParameter, output: SimOutput) {
        self.runs.insert(quality, output);
    }

    pub fn with_hydraulics(mut self, output: SimOutput) -> Self {
        self.insert(QualityParameter::None, output);
        self
    }

    pub fn with_trace(mut self, node: impl Into<String>, output: SimOutput) -> Self {
        self.insert(QualityParameter::Trace { node: node.into() }, output);
        self
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn from_dir(dir: &Path) -> SimResult<Self> {
        let mut sim = Self::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(stem) = file_name.strip_suffix(".json") else {
                continue;
            };

            let quality = if file_name == HYDRAULICS_FILE {
                QualityParameter::None
            } else if let Some(node) = stem.strip_prefix(TRACE_PREFIX) {
                QualityParameter::Trace {
                    node: node.to_string(),
                }
            } else {
                continue;
            };

            let content = fs::read_to_string(&path)?;
            let output: SimOutput = serde_json::from_str(&content)?;
            output.validate()?;
            sim.insert(quality, output);
        }
        tracing::debug!(dir = %dir.display(), runs = sim.len(), "loaded recorded engine runs");
        Ok(sim)
    }

    pub fn save_dir(&self, dir: &Path) -> SimResult<()> {
        fs::create_dir_all(dir)?;
        for (quality, output) in &self.runs {
            fs::write(dir.join(file_name(quality)), serde_json::to_string_pretty(output)?)?;
        }
        Ok(())
    }
}

fn file_name(quality: &QualityParameter) -> String {
    match quality {
        QualityParameter::None => HYDRAULICS_FILE.to_string(),
        QualityParameter::Trace { node } => format!("{}{}.json", TRACE_PREFIX, node),
    }
}

impl QualitySimulator for RecordedSimulator {
    fn run(
        &self,
        network: &NetworkModel,
        settings: &SimSettings,
        _options: &RunOptions,
    ) -> SimResult<SimOutput> {
        let recorded = self
            .runs
            .get(&settings.quality)
            .ok_or_else(|| SimError::Backend {
                message: format!(
                    "no recorded run for {:?} on network '{}'",
                    settings.quality, network.name
                ),
            })?;
        let mut output = recorded.clone();
        output.truncate_to(settings.duration_s as f64);
        Ok(output)
    }

    /// Every recorded run, keyed by file name so the bytes do not depend on
    /// map iteration order.
    fn fingerprint(&self) -> Option<Vec<u8>> {
        let ordered: BTreeMap<String, &SimOutput> = self
            .runs
            .iter()
            .map(|(quality, output)| (file_name(quality), output))
            .collect();
        serde_json::to_vec(&ordered).ok()
    }
}

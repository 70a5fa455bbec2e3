//! Query helpers for loaded runs.

use std::str::FromStr;

use cf_analysis::{SensorSummary, summarize_sensors};
use cf_results::{RunManifest, RunTables};

use crate::error::AppError;
use crate::table_io;

/// Summary of a run's time range and table sizes.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub time_range: (f64, f64),
    pub time_steps: usize,
    pub node_count: usize,
    pub injection_count: usize,
    pub detected_pairs: usize,
    pub total_pairs: usize,
    pub total_volume: f64,
}

pub fn get_run_summary(manifest: &RunManifest, tables: &RunTables) -> RunSummary {
    let times = tables.trace.times();
    let detected_pairs = tables
        .detection
        .records()
        .iter()
        .filter(|r| r.detected)
        .count();
    RunSummary {
        time_range: (
            times.first().copied().unwrap_or(0.0),
            times.last().copied().unwrap_or(0.0),
        ),
        time_steps: times.len(),
        node_count: manifest.node_count,
        injection_count: manifest.inj_nodes.len(),
        detected_pairs,
        total_pairs: tables.detection.len(),
        total_volume: tables.volume.records().iter().map(|r| r.volume).sum(),
    }
}

pub fn sensor_summaries(tables: &RunTables) -> Vec<SensorSummary> {
    summarize_sensors(&tables.detection, Some(&tables.volume))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Trace,
    Demand,
    Detection,
    Volume,
    Summary,
}

impl FromStr for TableKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trace" => Ok(Self::Trace),
            "demand" => Ok(Self::Demand),
            "detection" | "det_time" => Ok(Self::Detection),
            "volume" => Ok(Self::Volume),
            "summary" => Ok(Self::Summary),
            _ => Err(AppError::InvalidInput(format!("Unknown table: {}", s))),
        }
    }
}

/// Render one table of a run as CSV.
pub fn export_table(tables: &RunTables, kind: TableKind) -> String {
    match kind {
        TableKind::Trace => table_io::trace_to_csv(&tables.trace),
        TableKind::Demand => table_io::demand_to_csv(&tables.demand),
        TableKind::Detection => table_io::detection_to_csv(&tables.detection),
        TableKind::Volume => table_io::volume_to_csv(&tables.volume),
        TableKind::Summary => table_io::summary_to_csv(&sensor_summaries(tables)),
    }
}

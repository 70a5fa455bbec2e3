//! Long-format tables exchanged between the simulation driver and the analyzers.
//!
//! Every table is a list of rows keyed by simulation time (seconds) and
//! node name. Trace tables carry one concentration column per injection node.

use std::collections::{HashMap, HashSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{CfError, CfResult, Real, ensure_finite, sorted_unique};

/// Hashable key for a simulation time. `-0.0` and `0.0` map to the same key.
#[inline]
pub fn time_key(time_s: Real) -> u64 {
    (time_s + 0.0).to_bits()
}

/// Contaminant trace at one node and time, one value per injection node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceRecord {
    pub time_s: Real,
    pub node: String,
    /// Percentage (0..=100) of water at `node` that originated at each injection node.
    pub concentrations: Vec<Real>,
}

/// Stacked trace results for a set of injection scenarios.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TraceTable {
    inj_nodes: Vec<String>,
    records: Vec<TraceRecord>,
}

impl TraceTable {
    pub fn new(inj_nodes: Vec<String>, records: Vec<TraceRecord>) -> CfResult<Self> {
        validate_trace(&inj_nodes, &records)?;
        Ok(Self { inj_nodes, records })
    }

    pub fn inj_nodes(&self) -> &[String] {
        &self.inj_nodes
    }

    pub fn inj_index(&self, inj_node: &str) -> Option<usize> {
        self.inj_nodes.iter().position(|n| n == inj_node)
    }

    pub fn records(&self) -> &[TraceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted unique simulation times.
    pub fn times(&self) -> Vec<Real> {
        sorted_unique(self.records.iter().map(|r| r.time_s))
    }

    /// Sorted unique observing node names.
    pub fn nodes(&self) -> Vec<&str> {
        let mut nodes: Vec<&str> = self.records.iter().map(|r| r.node.as_str()).collect();
        nodes.sort_unstable();
        nodes.dedup();
        nodes
    }

    pub fn max_time(&self) -> Option<Real> {
        self.records.iter().map(|r| r.time_s).reduce(Real::max)
    }
}

fn validate_trace(inj_nodes: &[String], records: &[TraceRecord]) -> CfResult<()> {
    let mut seen = HashSet::new();
    for node in inj_nodes {
        if !seen.insert(node.as_str()) {
            return Err(CfError::DuplicateInjectionNode { node: node.clone() });
        }
    }

    let mut keys = HashSet::new();
    for (row, record) in records.iter().enumerate() {
        if record.concentrations.len() != inj_nodes.len() {
            return Err(CfError::RaggedRow {
                row,
                expected: inj_nodes.len(),
                found: record.concentrations.len(),
            });
        }
        ensure_finite(record.time_s, "trace time")?;
        for &c in &record.concentrations {
            ensure_finite(c, "trace concentration")?;
        }
        if !keys.insert((time_key(record.time_s), record.node.as_str())) {
            return Err(CfError::DuplicateRow {
                node: record.node.clone(),
                time_s: record.time_s,
            });
        }
    }
    Ok(())
}

/// Water demand at one node and time (m³/s).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DemandRecord {
    pub time_s: Real,
    pub node: String,
    pub demand: Real,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DemandTable {
    records: Vec<DemandRecord>,
}

impl DemandTable {
    pub fn new(records: Vec<DemandRecord>) -> CfResult<Self> {
        validate_demand(&records)?;
        Ok(Self { records })
    }

    pub fn records(&self) -> &[DemandRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn times(&self) -> Vec<Real> {
        sorted_unique(self.records.iter().map(|r| r.time_s))
    }

    /// Build a `(time, node)` lookup over the rows.
    pub fn index(&self) -> DemandIndex<'_> {
        let map = self
            .records
            .iter()
            .map(|r| ((time_key(r.time_s), r.node.as_str()), r.demand))
            .collect();
        DemandIndex { map }
    }
}

fn validate_demand(records: &[DemandRecord]) -> CfResult<()> {
    let mut keys = HashSet::new();
    for record in records {
        ensure_finite(record.time_s, "demand time")?;
        ensure_finite(record.demand, "demand")?;
        if !keys.insert((time_key(record.time_s), record.node.as_str())) {
            return Err(CfError::DuplicateRow {
                node: record.node.clone(),
                time_s: record.time_s,
            });
        }
    }
    Ok(())
}

pub struct DemandIndex<'a> {
    map: HashMap<(u64, &'a str), Real>,
}

impl DemandIndex<'_> {
    pub fn get(&self, time_s: Real, node: &str) -> Option<Real> {
        self.map.get(&(time_key(time_s), node)).copied()
    }
}

/// First time `node` sees contamination injected at `inj_node`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DetectionRecord {
    pub node: String,
    pub inj_node: String,
    pub time_s: Real,
    /// False when `time_s` is the non-detection fallback.
    pub detected: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DetectionTable {
    records: Vec<DetectionRecord>,
}

impl DetectionTable {
    pub fn new(records: Vec<DetectionRecord>) -> CfResult<Self> {
        for record in &records {
            ensure_finite(record.time_s, "detection time")?;
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[DetectionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, node: &str, inj_node: &str) -> Option<&DetectionRecord> {
        self.records
            .iter()
            .find(|r| r.node == node && r.inj_node == inj_node)
    }
}

/// Contaminated water consumed before `node` detects the `inj_node` scenario.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VolumeRecord {
    pub node: String,
    pub inj_node: String,
    pub volume: Real,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct VolumeTable {
    records: Vec<VolumeRecord>,
}

impl VolumeTable {
    pub fn new(records: Vec<VolumeRecord>) -> CfResult<Self> {
        for record in &records {
            ensure_finite(record.volume, "volume")?;
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[VolumeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, node: &str, inj_node: &str) -> Option<&VolumeRecord> {
        self.records
            .iter()
            .find(|r| r.node == node && r.inj_node == inj_node)
    }
}

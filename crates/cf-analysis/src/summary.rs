//! Per-node roll-up of detection results, for comparing candidate sensor locations.

use std::collections::{BTreeMap, HashMap};

use cf_core::{DetectionTable, Real, VolumeTable};

#[derive(Debug, Clone, PartialEq)]
pub struct SensorSummary {
    pub node: String,
    pub scenarios: usize,
    pub detected: usize,
    pub detection_fraction: Real,
    /// Over detected scenarios only.
    pub mean_detection_time_s: Option<Real>,
    pub max_detection_time_s: Option<Real>,
    /// Over all scenarios with a volume row.
    pub mean_volume: Option<Real>,
    pub max_volume: Option<Real>,
}

#[derive(Default)]
struct Acc {
    scenarios: usize,
    detected: usize,
    time_sum: Real,
    time_max: Option<Real>,
    volume_sum: Real,
    volume_count: usize,
    volume_max: Option<Real>,
}

/// Summarize each observing node across injection scenarios.
///
/// Scenarios that fell back to the non-detection time count as missed.
pub fn summarize_sensors(
    detections: &DetectionTable,
    volumes: Option<&VolumeTable>,
) -> Vec<SensorSummary> {
    let volume_of: HashMap<(&str, &str), Real> = volumes
        .map(|v| {
            v.records()
                .iter()
                .map(|r| ((r.node.as_str(), r.inj_node.as_str()), r.volume))
                .collect()
        })
        .unwrap_or_default();

    let mut by_node: BTreeMap<&str, Acc> = BTreeMap::new();
    for det in detections.records() {
        let acc = by_node.entry(det.node.as_str()).or_default();
        acc.scenarios += 1;
        if det.detected {
            acc.detected += 1;
            acc.time_sum += det.time_s;
            acc.time_max = Some(acc.time_max.map_or(det.time_s, |m| m.max(det.time_s)));
        }
        if let Some(&v) = volume_of.get(&(det.node.as_str(), det.inj_node.as_str())) {
            acc.volume_sum += v;
            acc.volume_count += 1;
            acc.volume_max = Some(acc.volume_max.map_or(v, |m| m.max(v)));
        }
    }

    by_node
        .into_iter()
        .map(|(node, acc)| SensorSummary {
            node: node.to_string(),
            scenarios: acc.scenarios,
            detected: acc.detected,
            detection_fraction: acc.detected as Real / acc.scenarios as Real,
            mean_detection_time_s: (acc.detected > 0).then(|| acc.time_sum / acc.detected as Real),
            max_detection_time_s: acc.time_max,
            mean_volume: (acc.volume_count > 0)
                .then(|| acc.volume_sum / acc.volume_count as Real),
            max_volume: acc.volume_max,
        })
        .collect()
}

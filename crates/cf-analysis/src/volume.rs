//! Contaminated volume consumed before detection.

use std::collections::HashMap;

use cf_core::{
    DemandTable, DetectionTable, Real, TraceTable, VolumeRecord, VolumeTable, VolumeRate, as_m3,
    as_m3ps, m3ps, percent, s, time_key,
};

use crate::error::{AnalysisError, AnalysisResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VolumeMethod {
    /// Network-wide contaminated demand at the detection step itself.
    #[default]
    DetectionStep,
    /// Volume consumed network-wide over `[t0, t_detection)`, each report
    /// step's contaminated demand held until the next report time.
    Integrated,
}

/// For each detection row, the contaminated water consumed across the whole
/// network before the observing node detects that injection.
///
/// Contaminated demand at `(t, n)` is `trace% * demand`, joined by
/// `(time, node)`. Detection times past the last simulated step (the
/// non-detection sentinel) are clamped to it. Output rows follow the
/// detection table order.
pub fn contaminated_volume(
    trace: &TraceTable,
    demand: &DemandTable,
    detections: &DetectionTable,
    method: VolumeMethod,
) -> AnalysisResult<VolumeTable> {
    if detections.is_empty() {
        return Ok(VolumeTable::default());
    }
    let times = trace.times();
    let Some(&t_max) = times.last() else {
        return Err(AnalysisError::EmptyTrace);
    };
    let time_pos: HashMap<u64, usize> = times
        .iter()
        .enumerate()
        .map(|(i, t)| (time_key(*t), i))
        .collect();

    let rates = contaminated_rates(trace, demand, &time_pos, times.len())?;
    let per_step: Vec<Vec<Real>> = match method {
        VolumeMethod::DetectionStep => rates
            .iter()
            .map(|row| row.iter().map(|r| as_m3ps(*r)).collect())
            .collect(),
        VolumeMethod::Integrated => cumulative_volumes(&times, &rates),
    };

    let mut out = Vec::with_capacity(detections.len());
    for det in detections.records() {
        let j = trace
            .inj_index(&det.inj_node)
            .ok_or_else(|| AnalysisError::UnknownInjectionNode {
                node: det.inj_node.clone(),
            })?;
        let t = det.time_s.min(t_max);
        let k = *time_pos
            .get(&time_key(t))
            .ok_or_else(|| AnalysisError::DetectionTimeOffAxis {
                node: det.node.clone(),
                inj_node: det.inj_node.clone(),
                time_s: det.time_s,
            })?;
        out.push(VolumeRecord {
            node: det.node.clone(),
            inj_node: det.inj_node.clone(),
            volume: per_step[k][j],
        });
    }

    tracing::debug!(rows = out.len(), ?method, "contaminated volumes computed");
    Ok(VolumeTable::new(out)?)
}

/// Network-wide contaminated demand, indexed `[time step][injection]`.
fn contaminated_rates(
    trace: &TraceTable,
    demand: &DemandTable,
    time_pos: &HashMap<u64, usize>,
    steps: usize,
) -> AnalysisResult<Vec<Vec<VolumeRate>>> {
    let demand_at = demand.index();
    let n_inj = trace.inj_nodes().len();
    let mut rates = vec![vec![m3ps(0.0); n_inj]; steps];

    for record in trace.records() {
        let d = demand_at
            .get(record.time_s, &record.node)
            .ok_or_else(|| AnalysisError::MissingDemand {
                node: record.node.clone(),
                time_s: record.time_s,
            })?;
        let row = &mut rates[time_pos[&time_key(record.time_s)]];
        for (rate, &c) in row.iter_mut().zip(&record.concentrations) {
            *rate += m3ps(d) * percent(c);
        }
    }
    Ok(rates)
}

/// Volume consumed strictly before each report time, indexed `[time step][injection]`.
fn cumulative_volumes(times: &[Real], rates: &[Vec<VolumeRate>]) -> Vec<Vec<Real>> {
    let n_inj = rates.first().map_or(0, Vec::len);
    let mut acc = vec![0.0; n_inj];
    let mut out = Vec::with_capacity(times.len());
    out.push(acc.clone());
    for k in 1..times.len() {
        let dt = s(times[k] - times[k - 1]);
        for (v, rate) in acc.iter_mut().zip(&rates[k - 1]) {
            *v += as_m3(*rate * dt);
        }
        out.push(acc.clone());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cumulative_holds_rate_until_next_step() {
        let times = [0.0, 10.0, 30.0];
        let rates = vec![vec![m3ps(1.0)], vec![m3ps(2.0)], vec![m3ps(100.0)]];
        let v = cumulative_volumes(&times, &rates);
        assert_eq!(v.len(), 3);
        assert!((v[0][0] - 0.0).abs() < 1e-12);
        assert!((v[1][0] - 10.0).abs() < 1e-9);
        assert!((v[2][0] - 50.0).abs() < 1e-9);
    }
}

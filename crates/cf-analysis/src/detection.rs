//! First-exceedance detection times.

use std::collections::HashMap;

use cf_core::{DetectionRecord, DetectionTable, Real, TraceTable};
use rayon::prelude::*;

use crate::error::{AnalysisError, AnalysisResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionOptions {
    /// Concentration (percent) that must be strictly exceeded.
    pub sensitivity: Real,
    /// Reported for pairs never detected within the horizon.
    /// Defaults to one step past the last simulated time.
    pub non_detection_s: Option<Real>,
}

impl Default for DetectionOptions {
    fn default() -> Self {
        Self {
            sensitivity: 1.0,
            non_detection_s: None,
        }
    }
}

/// One time step past the end of the horizon: `t_last + (t_last - t_prev)`.
pub fn default_non_detection_time(times: &[Real]) -> AnalysisResult<Real> {
    match times {
        [.., prev, last] => Ok(last + (last - prev)),
        _ => Err(AnalysisError::SentinelUndefined { times: times.len() }),
    }
}

/// For each pair (observing node, injection node), the earliest time at which
/// the trace at the node strictly exceeds `sensitivity`.
///
/// Rows are ordered by node name, then by injection node in trace column order.
pub fn detection_time(
    trace: &TraceTable,
    options: &DetectionOptions,
) -> AnalysisResult<DetectionTable> {
    if !options.sensitivity.is_finite() {
        return Err(AnalysisError::InvalidArg {
            what: "sensitivity must be finite",
        });
    }
    if trace.is_empty() {
        return Ok(DetectionTable::default());
    }

    let non_detection = match options.non_detection_s {
        Some(t) if t.is_finite() => t,
        Some(_) => {
            return Err(AnalysisError::InvalidArg {
                what: "non-detection time must be finite",
            });
        }
        None => default_non_detection_time(&trace.times())?,
    };

    let nodes = trace.nodes();
    let node_pos: HashMap<&str, usize> = nodes.iter().enumerate().map(|(i, n)| (*n, i)).collect();
    let records = trace.records();

    // first[inj][node]
    let first: Vec<Vec<Option<Real>>> = (0..trace.inj_nodes().len())
        .into_par_iter()
        .map(|j| {
            let mut earliest = vec![None; nodes.len()];
            for record in records {
                if record.concentrations[j] > options.sensitivity {
                    let slot: &mut Option<Real> = &mut earliest[node_pos[record.node.as_str()]];
                    *slot = Some(slot.map_or(record.time_s, |t| t.min(record.time_s)));
                }
            }
            earliest
        })
        .collect();

    let mut out = Vec::with_capacity(nodes.len() * trace.inj_nodes().len());
    let mut undetected = 0usize;
    for (ni, node) in nodes.iter().enumerate() {
        for (j, inj_node) in trace.inj_nodes().iter().enumerate() {
            let detected = first[j][ni];
            if detected.is_none() {
                undetected += 1;
            }
            out.push(DetectionRecord {
                node: node.to_string(),
                inj_node: inj_node.clone(),
                time_s: detected.unwrap_or(non_detection),
                detected: detected.is_some(),
            });
        }
    }

    tracing::debug!(
        pairs = out.len(),
        undetected,
        sensitivity = options.sensitivity,
        non_detection_s = non_detection,
        "detection times computed"
    );
    Ok(DetectionTable::new(out)?)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use cf_core::TraceRecord;
    use proptest::prelude::*;

    fn single_node_trace(values: &[Real]) -> TraceTable {
        TraceTable::new(
            vec!["J1".into()],
            values
                .iter()
                .enumerate()
                .map(|(i, c)| TraceRecord {
                    time_s: i as Real * 60.0,
                    node: "N".into(),
                    concentrations: vec![*c],
                })
                .collect(),
        )
        .unwrap()
    }

    proptest! {
        #[test]
        fn raising_sensitivity_never_detects_earlier(
            values in prop::collection::vec(0.0_f64..100.0, 2..20),
            low in 0.0_f64..50.0,
            extra in 0.0_f64..50.0,
        ) {
            let trace = single_node_trace(&values);
            let at = |sensitivity| {
                detection_time(&trace, &DetectionOptions { sensitivity, non_detection_s: None })
                    .unwrap()
                    .records()[0]
                    .time_s
            };
            prop_assert!(at(low) <= at(low + extra));
        }

        #[test]
        fn detection_is_a_step_or_the_sentinel(
            values in prop::collection::vec(0.0_f64..100.0, 2..20),
            sensitivity in 0.0_f64..100.0,
        ) {
            let trace = single_node_trace(&values);
            let times = trace.times();
            let sentinel = default_non_detection_time(&times).unwrap();
            let t = detection_time(&trace, &DetectionOptions { sensitivity, non_detection_s: None })
                .unwrap()
                .records()[0]
                .time_s;
            prop_assert!(t == sentinel || times.contains(&t));
            if t != sentinel {
                let k = times.iter().position(|x| *x == t).unwrap();
                prop_assert!(values[k] > sensitivity);
                prop_assert!(values[..k].iter().all(|v| *v <= sensitivity));
            }
        }
    }
}

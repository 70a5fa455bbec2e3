//! The seam around the external hydraulic/water-quality engine.

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::network::NetworkModel;
use crate::settings::{RunOptions, SimSettings};

/// Node results of one engine run, indexed `[time][node]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimOutput {
    pub times_s: Vec<f64>,
    pub nodes: Vec<String>,
    /// Demand (m³/s).
    pub demand: Vec<Vec<f64>>,
    /// Quality values; trace runs report percentages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<Vec<Vec<f64>>>,
    #[serde(default = "default_converged")]
    pub converged: bool,
}

fn default_converged() -> bool {
    true
}

impl SimOutput {
    pub fn validate(&self) -> SimResult<()> {
        check_matrix("demand", &self.demand, self.times_s.len(), self.nodes.len())?;
        if let Some(quality) = &self.quality {
            check_matrix("quality", quality, self.times_s.len(), self.nodes.len())?;
        }
        if self.times_s.windows(2).any(|w| w[1] <= w[0]) {
            return Err(SimError::MalformedOutput {
                what: "report times are not strictly increasing".to_string(),
            });
        }
        Ok(())
    }

    /// Drop report steps after `duration_s`.
    pub fn truncate_to(&mut self, duration_s: f64) {
        let keep = self.times_s.iter().take_while(|t| **t <= duration_s).count();
        self.times_s.truncate(keep);
        self.demand.truncate(keep);
        if let Some(q) = self.quality.as_mut() {
            q.truncate(keep);
        }
    }
}

fn check_matrix(what: &str, m: &[Vec<f64>], rows: usize, cols: usize) -> SimResult<()> {
    if m.len() != rows {
        return Err(SimError::MalformedOutput {
            what: format!("{} has {} rows for {} report times", what, m.len(), rows),
        });
    }
    if let Some((i, row)) = m.iter().enumerate().find(|(_, r)| r.len() != cols) {
        return Err(SimError::MalformedOutput {
            what: format!("{} row {} has {} values for {} nodes", what, i, row.len(), cols),
        });
    }
    Ok(())
}

/// A hydraulic/water-quality engine. Each call is one full extended-period run.
pub trait QualitySimulator {
    fn run(
        &self,
        network: &NetworkModel,
        settings: &SimSettings,
        options: &RunOptions,
    ) -> SimResult<SimOutput>;

    /// Stable bytes identifying engine state beyond the network model, such
    /// as recorded outputs. Changes whenever `run` could return something else.
    fn fingerprint(&self) -> Option<Vec<u8>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output() -> SimOutput {
        SimOutput {
            times_s: vec![0.0, 3600.0, 7200.0],
            nodes: vec!["J1".into(), "J2".into()],
            demand: vec![vec![0.1, 0.2]; 3],
            quality: Some(vec![vec![0.0, 0.0]; 3]),
            converged: true,
        }
    }

    #[test]
    fn validate_accepts_consistent_output() {
        output().validate().unwrap();
    }

    #[test]
    fn validate_rejects_short_quality_row() {
        let mut out = output();
        out.quality.as_mut().unwrap()[1].pop();
        let err = out.validate().unwrap_err();
        assert!(err.to_string().contains("quality row 1"));
    }

    #[test]
    fn validate_rejects_unsorted_times() {
        let mut out = output();
        out.times_s.swap(0, 1);
        assert!(out.validate().is_err());
    }

    #[test]
    fn truncate_drops_late_steps() {
        let mut out = output();
        out.truncate_to(3600.0);
        assert_eq!(out.times_s, vec![0.0, 3600.0]);
        assert_eq!(out.demand.len(), 2);
        assert_eq!(out.quality.as_ref().map(Vec::len), Some(2));
    }
}

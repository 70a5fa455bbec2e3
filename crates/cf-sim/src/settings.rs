//! Engine time configuration and passthrough options.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DemandModel {
    /// Demands are met regardless of pressure.
    #[default]
    DemandDriven,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HeadlossFormula {
    #[default]
    HazenWilliams,
}

/// What the quality solver tracks during a run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum QualityParameter {
    /// Hydraulics only.
    #[default]
    None,
    /// Percentage of water at each node originating from `node`.
    Trace { node: String },
}

/// Time and hydraulic configuration applied to every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimSettings {
    pub duration_s: u64,
    /// Used for the hydraulic, quality and report steps alike.
    pub timestep_s: u64,
    pub demand_model: DemandModel,
    pub headloss: HeadlossFormula,
    pub quality: QualityParameter,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            duration_s: 24 * 3600,
            timestep_s: 3600,
            demand_model: DemandModel::default(),
            headloss: HeadlossFormula::default(),
            quality: QualityParameter::None,
        }
    }
}

impl SimSettings {
    pub fn new(duration_s: u64, timestep_s: u64) -> Self {
        Self {
            duration_s,
            timestep_s,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.timestep_s == 0 {
            return Err(SimError::InvalidArg {
                what: "timestep_s must be positive",
            });
        }
        if self.duration_s < self.timestep_s {
            return Err(SimError::InvalidArg {
                what: "duration_s must cover at least one timestep",
            });
        }
        Ok(())
    }

    /// Number of report steps including t = 0.
    pub fn report_steps(&self) -> usize {
        (self.duration_s / self.timestep_s.max(1)) as usize + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EngineVersion {
    V2_0,
    #[default]
    V2_2,
}

/// Options forwarded untouched to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunOptions {
    /// Prefix for the engine's `.inp`, `.bin`, `.hyd` and `.rpt` files.
    pub file_prefix: String,
    pub use_hyd: bool,
    pub save_hyd: bool,
    pub hydfile: Option<PathBuf>,
    pub version: EngineVersion,
    /// Fail on non-convergence instead of returning partial results.
    pub convergence_error: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            file_prefix: "temp".to_string(),
            use_hyd: false,
            save_hyd: false,
            hydfile: None,
            version: EngineVersion::default(),
            convergence_error: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_one_day_hourly() {
        let s = SimSettings::default();
        assert_eq!(s.duration_s, 86_400);
        assert_eq!(s.timestep_s, 3_600);
        assert_eq!(s.report_steps(), 25);
        assert_eq!(s.demand_model, DemandModel::DemandDriven);
        assert_eq!(s.headloss, HeadlossFormula::HazenWilliams);
        s.validate().unwrap();
    }

    #[test]
    fn zero_timestep_is_invalid() {
        assert!(SimSettings::new(3600, 0).validate().is_err());
        assert!(SimSettings::new(600, 3600).validate().is_err());
    }

    #[test]
    fn run_options_default_prefix() {
        let o = RunOptions::default();
        assert_eq!(o.file_prefix, "temp");
        assert_eq!(o.version, EngineVersion::V2_2);
        assert!(!o.convergence_error);
    }
}

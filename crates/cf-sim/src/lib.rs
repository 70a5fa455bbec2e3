//! Water-quality simulation driver for contamflow.
//!
//! Provides:
//! - Engine settings and passthrough run options
//! - The [`QualitySimulator`] seam around an external hydraulic/quality engine
//! - A replaying simulator for engine outputs recorded ahead of time
//! - Scenario drivers stacking per-injection trace runs and demand runs into tables
//! - Engine temp-file cleanup

pub mod driver;
pub mod error;
pub mod network;
pub mod recorded;
pub mod settings;
pub mod simulator;
pub mod temp_files;

// Re-exports for public API
pub use driver::{contamination, water_demand};
pub use error::{SimError, SimResult};
pub use network::{NetworkModel, NetworkNode, NetworkNodeKind};
pub use recorded::RecordedSimulator;
pub use settings::{
    DemandModel, EngineVersion, HeadlossFormula, QualityParameter, RunOptions, SimSettings,
};
pub use simulator::{QualitySimulator, SimOutput};
pub use temp_files::{TEMP_FILE_EXTENSIONS, TempFileGuard, clean_temp_files};

//! Contamination impact metrics over stacked trace and demand tables.
//!
//! - [`detection_time`]: first time each node sees each injection above a threshold
//! - [`contaminated_volume`]: contaminated water consumed before that detection
//! - [`summarize_sensors`]: per-node roll-up across injection scenarios

pub mod detection;
pub mod error;
pub mod summary;
pub mod volume;

pub use detection::{DetectionOptions, default_non_detection_time, detection_time};
pub use error::{AnalysisError, AnalysisResult};
pub use summary::{SensorSummary, summarize_sensors};
pub use volume::{VolumeMethod, contaminated_volume};

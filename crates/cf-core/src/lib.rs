//! cf-core: stable foundation for contamflow.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + tolerances + float helpers)
//! - table (trace, demand, detection and volume tables)
//! - timing (wall-clock timers for run summaries)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod table;
pub mod timing;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CfError, CfResult};
pub use numeric::*;
pub use table::*;
pub use units::*;

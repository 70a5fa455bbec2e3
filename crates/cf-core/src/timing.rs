//! Lightweight wall-clock timing for analysis runs.
//!
//! Timing output is opt-in: set `CF_TIMING` or call [`enable_timing`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

static ENABLED: AtomicBool = AtomicBool::new(false);

/// Enable performance timing globally.
pub fn enable_timing() {
    ENABLED.store(true, Ordering::Relaxed);
}

/// Check if timing is enabled.
pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed) || std::env::var("CF_TIMING").is_ok()
}

/// Measures elapsed wall time from construction.
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed seconds since start; the timer keeps running.
    pub fn elapsed_s(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Stage timings for a single analysis run.
#[derive(Debug, Clone, Default)]
pub struct PerfStats {
    pub simulate_time_s: f64,
    pub simulation_runs: usize,
    pub detection_time_s: f64,
    pub volume_time_s: f64,
    pub save_time_s: f64,
    pub load_time_s: f64,
    pub total_time_s: f64,
}

impl PerfStats {
    /// Print a formatted summary if timing is enabled.
    pub fn print_summary(&self) {
        if !is_enabled() {
            return;
        }

        println!("\n=== Performance Summary ===");
        if self.simulation_runs > 0 {
            println!(
                "Simulation:          {} runs, {:.3}s total, {:.4}s avg",
                self.simulation_runs,
                self.simulate_time_s,
                self.simulate_time_s / self.simulation_runs as f64
            );
        }
        println!("Detection times:     {:.3}s", self.detection_time_s);
        println!("Contaminated volume: {:.3}s", self.volume_time_s);
        if self.save_time_s > 0.0 {
            println!("Run save time:       {:.3}s", self.save_time_s);
        }
        if self.load_time_s > 0.0 {
            println!("Run load time:       {:.3}s", self.load_time_s);
        }
        println!("Total:               {:.3}s", self.total_time_s);
        println!("==========================\n");
    }
}

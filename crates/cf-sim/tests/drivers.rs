//! Integration tests for the scenario drivers.

use std::cell::RefCell;

use cf_sim::*;

fn network() -> NetworkModel {
    NetworkModel::new("three-node")
        .with_node("R1", NetworkNodeKind::Reservoir)
        .with_node("J1", NetworkNodeKind::Junction)
        .with_node("J2", NetworkNodeKind::Junction)
}

/// Trace at node `n` for injection at `inj` is `10 * step` when n == inj, else `step`.
fn synthetic_trace(inj: &str, steps: usize) -> SimOutput {
    let nodes = vec!["R1".to_string(), "J1".to_string(), "J2".to_string()];
    let quality = (0..steps)
        .map(|step| {
            nodes
                .iter()
                .map(|n| {
                    if n == inj {
                        10.0 * step as f64
                    } else {
                        step as f64
                    }
                })
                .collect()
        })
        .collect();
    SimOutput {
        times_s: (0..steps).map(|i| i as f64 * 3600.0).collect(),
        nodes,
        demand: vec![vec![0.0, 0.01, 0.02]; steps],
        quality: Some(quality),
        converged: true,
    }
}

/// Records every quality parameter it is asked to run.
struct ScriptedSim {
    calls: RefCell<Vec<QualityParameter>>,
    converged: bool,
}

impl ScriptedSim {
    fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            converged: true,
        }
    }
}

impl QualitySimulator for ScriptedSim {
    fn run(
        &self,
        _network: &NetworkModel,
        settings: &SimSettings,
        _options: &RunOptions,
    ) -> SimResult<SimOutput> {
        self.calls.borrow_mut().push(settings.quality.clone());
        let steps = settings.report_steps();
        let mut out = match &settings.quality {
            QualityParameter::Trace { node } => synthetic_trace(node, steps),
            QualityParameter::None => {
                let mut out = synthetic_trace("", steps);
                out.quality = None;
                out
            }
        };
        out.converged = self.converged;
        Ok(out)
    }
}

fn settings() -> SimSettings {
    SimSettings::new(2 * 3600, 3600)
}

#[test]
fn contamination_defaults_to_all_junctions() {
    let sim = ScriptedSim::new();
    let trace = contamination(&sim, &network(), None, &settings(), &RunOptions::default()).unwrap();

    assert_eq!(trace.inj_nodes(), &["J1".to_string(), "J2".to_string()]);
    assert_eq!(
        *sim.calls.borrow(),
        vec![
            QualityParameter::Trace { node: "J1".into() },
            QualityParameter::Trace { node: "J2".into() },
        ]
    );
    // 3 report steps x 3 nodes
    assert_eq!(trace.len(), 9);
}

#[test]
fn contamination_rows_are_time_major_with_one_column_per_injection() {
    let sim = ScriptedSim::new();
    let inj = vec!["J2".to_string(), "J1".to_string()];
    let trace =
        contamination(&sim, &network(), Some(&inj), &settings(), &RunOptions::default()).unwrap();

    let rows = trace.records();
    assert_eq!(rows[0].time_s, 0.0);
    assert_eq!(rows[0].node, "R1");
    assert_eq!(rows[3].time_s, 3600.0);
    assert_eq!(rows[4].node, "J1");
    // step 1, node J1: injection J2 -> 1.0, injection J1 -> 10.0
    assert_eq!(rows[4].concentrations, vec![1.0, 10.0]);
    // step 2, node J2: injection J2 -> 20.0, injection J1 -> 2.0
    assert_eq!(rows[8].concentrations, vec![20.0, 2.0]);
}

#[test]
fn contamination_rejects_unknown_injection_node() {
    let sim = ScriptedSim::new();
    let inj = vec!["J9".to_string()];
    let err = contamination(&sim, &network(), Some(&inj), &settings(), &RunOptions::default())
        .unwrap_err();
    assert!(matches!(err, SimError::UnknownNode { ref node } if node == "J9"));
    assert!(sim.calls.borrow().is_empty());
}

#[test]
fn contamination_requires_quality_results() {
    let recorded = RecordedSimulator::new().with_trace("J1", {
        let mut out = synthetic_trace("J1", 3);
        out.quality = None;
        out
    });
    let inj = vec!["J1".to_string()];
    let err = contamination(
        &recorded,
        &network(),
        Some(&inj),
        &settings(),
        &RunOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, SimError::MissingQuality { .. }));
}

#[test]
fn contamination_detects_axis_mismatch() {
    let recorded = RecordedSimulator::new()
        .with_trace("J1", synthetic_trace("J1", 3))
        .with_trace("J2", {
            let mut out = synthetic_trace("J2", 3);
            out.nodes.swap(1, 2);
            out
        });
    let err = contamination(&recorded, &network(), None, &settings(), &RunOptions::default())
        .unwrap_err();
    assert!(matches!(err, SimError::AxisMismatch { ref node } if node == "J2"));
}

#[test]
fn non_convergence_is_fatal_only_when_requested() {
    let mut sim = ScriptedSim::new();
    sim.converged = false;

    let lenient = RunOptions::default();
    contamination(&sim, &network(), None, &settings(), &lenient).unwrap();

    let strict = RunOptions {
        convergence_error: true,
        ..RunOptions::default()
    };
    let err = contamination(&sim, &network(), None, &settings(), &strict).unwrap_err();
    assert!(matches!(err, SimError::ConvergenceFailed { .. }));
}

#[test]
fn water_demand_stacks_hydraulic_run() {
    let sim = ScriptedSim::new();
    let demand = water_demand(&sim, &network(), &settings(), &RunOptions::default()).unwrap();

    assert_eq!(*sim.calls.borrow(), vec![QualityParameter::None]);
    assert_eq!(demand.len(), 9);
    assert_eq!(demand.times(), vec![0.0, 3600.0, 7200.0]);
    assert_eq!(demand.index().get(3600.0, "J2"), Some(0.02));
}

#[test]
fn temp_files_removed_even_when_run_fails() {
    let prefix = std::env::temp_dir()
        .join(format!("cf_sim_driver_{}", std::process::id()))
        .to_string_lossy()
        .to_string();
    std::fs::write(format!("{}.inp", prefix), "scratch").unwrap();

    let options = RunOptions {
        file_prefix: prefix.clone(),
        ..RunOptions::default()
    };
    let empty = RecordedSimulator::new();
    assert!(water_demand(&empty, &network(), &settings(), &options).is_err());
    assert!(!std::path::Path::new(&format!("{}.inp", prefix)).exists());
}

#[test]
fn recorded_runs_survive_a_directory_roundtrip() {
    let dir = std::env::temp_dir().join(format!("cf_sim_recorded_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);

    let recorded = RecordedSimulator::new()
        .with_hydraulics({
            let mut out = synthetic_trace("", 3);
            out.quality = None;
            out
        })
        .with_trace("J1", synthetic_trace("J1", 3))
        .with_trace("J2", synthetic_trace("J2", 3));
    recorded.save_dir(&dir).unwrap();

    let loaded = RecordedSimulator::from_dir(&dir).unwrap();
    assert_eq!(loaded.len(), 3);

    let trace = contamination(&loaded, &network(), None, &settings(), &RunOptions::default())
        .unwrap();
    assert_eq!(trace.inj_nodes().len(), 2);
}

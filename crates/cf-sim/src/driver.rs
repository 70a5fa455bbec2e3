//! Scenario drivers: run the engine and stack node results into tables.

use cf_core::{DemandRecord, DemandTable, TraceRecord, TraceTable};

use crate::error::{SimError, SimResult};
use crate::network::NetworkModel;
use crate::settings::{QualityParameter, RunOptions, SimSettings};
use crate::simulator::{QualitySimulator, SimOutput};
use crate::temp_files::TempFileGuard;

/// Simulate a contaminant injected at t = 0 in each of `inj_nodes`.
///
/// Runs the engine once per injection node in trace mode and stacks the
/// results: one row per `(time, node)`, time-major in engine node order, one
/// concentration column per injection node. When `inj_nodes` is `None` every
/// junction of the network is an injection point.
pub fn contamination<S: QualitySimulator + ?Sized>(
    sim: &S,
    network: &NetworkModel,
    inj_nodes: Option<&[String]>,
    settings: &SimSettings,
    options: &RunOptions,
) -> SimResult<TraceTable> {
    settings.validate()?;
    let _cleanup = TempFileGuard::new(options.file_prefix.clone());

    let inj_nodes: Vec<String> = match inj_nodes {
        Some(nodes) => nodes.to_vec(),
        None => network.junction_names(),
    };
    if inj_nodes.is_empty() {
        return Err(SimError::InvalidArg {
            what: "no injection nodes",
        });
    }
    if let Some(unknown) = inj_nodes.iter().find(|n| !network.contains(n)) {
        return Err(SimError::UnknownNode {
            node: unknown.clone(),
        });
    }

    tracing::info!(
        network = %network.name,
        scenarios = inj_nodes.len(),
        duration_s = settings.duration_s,
        timestep_s = settings.timestep_s,
        "running contamination scenarios"
    );

    let mut run_settings = settings.clone();
    let mut axis: Option<(Vec<f64>, Vec<String>)> = None;
    let mut columns: Vec<Vec<f64>> = Vec::with_capacity(inj_nodes.len());

    for (i, node) in inj_nodes.iter().enumerate() {
        run_settings.quality = QualityParameter::Trace { node: node.clone() };
        tracing::debug!(scenario = i, inj_node = %node, "trace run");

        let output = sim.run(network, &run_settings, options)?;
        output.validate()?;
        check_convergence(&output, options, node)?;

        let SimOutput {
            times_s,
            nodes,
            quality,
            ..
        } = output;
        let quality = quality.ok_or_else(|| SimError::MissingQuality { node: node.clone() })?;

        match &axis {
            None => axis = Some((times_s, nodes)),
            Some((t0, n0)) => {
                if *t0 != times_s || *n0 != nodes {
                    return Err(SimError::AxisMismatch { node: node.clone() });
                }
            }
        }
        columns.push(quality.into_iter().flatten().collect());
    }

    let (times, nodes) = axis.unwrap_or_default();
    let mut records = Vec::with_capacity(times.len() * nodes.len());
    for (ti, &time_s) in times.iter().enumerate() {
        for (ni, node) in nodes.iter().enumerate() {
            let flat = ti * nodes.len() + ni;
            records.push(TraceRecord {
                time_s,
                node: node.clone(),
                concentrations: columns.iter().map(|c| c[flat]).collect(),
            });
        }
    }

    let table = TraceTable::new(inj_nodes, records)?;
    tracing::info!(rows = table.len(), "contamination scenarios stacked");
    Ok(table)
}

/// Run the engine once (hydraulics only) and stack node demand by `(time, node)`.
pub fn water_demand<S: QualitySimulator + ?Sized>(
    sim: &S,
    network: &NetworkModel,
    settings: &SimSettings,
    options: &RunOptions,
) -> SimResult<DemandTable> {
    settings.validate()?;
    let _cleanup = TempFileGuard::new(options.file_prefix.clone());

    let mut run_settings = settings.clone();
    run_settings.quality = QualityParameter::None;
    tracing::info!(network = %network.name, "running demand simulation");

    let output = sim.run(network, &run_settings, options)?;
    output.validate()?;
    check_convergence(&output, options, "hydraulics")?;

    let mut records = Vec::with_capacity(output.times_s.len() * output.nodes.len());
    for (row, &time_s) in output.demand.iter().zip(&output.times_s) {
        for (node, &demand) in output.nodes.iter().zip(row) {
            records.push(DemandRecord {
                time_s,
                node: node.clone(),
                demand,
            });
        }
    }
    Ok(DemandTable::new(records)?)
}

fn check_convergence(output: &SimOutput, options: &RunOptions, run: &str) -> SimResult<()> {
    if output.converged {
        return Ok(());
    }
    if options.convergence_error {
        return Err(SimError::ConvergenceFailed {
            what: format!("engine run '{}' did not converge", run),
        });
    }
    tracing::warn!(run, "engine run did not converge; using partial results");
    Ok(())
}

//! Analysis run execution and caching service.

use std::path::{Path, PathBuf};

use cf_analysis::{contaminated_volume, detection_time};
use cf_core::timing::{PerfStats, Timer};
use cf_core::TraceTable;
use cf_project::schema::Project;
use cf_results::{RunManifest, RunSource, RunStore, RunTables, now_timestamp};
use cf_sim::{QualitySimulator, RecordedSimulator};

use crate::error::{AppError, AppResult};
use crate::project_service;
use crate::runtime_config;
use crate::table_io;

/// Where the trace and demand tables of a run come from.
#[derive(Debug, Clone)]
pub enum RunMode {
    /// Drive the engine configured in the project.
    Simulate,
    /// Read precomputed tables from CSV files.
    Import {
        trace_path: PathBuf,
        demand_path: PathBuf,
    },
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub use_cache: bool,
    pub tool_version: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

pub struct RunRequest<'a> {
    pub project_path: &'a Path,
    pub mode: RunMode,
    pub options: RunOptions,
}

#[derive(Debug, Clone)]
pub struct RunResponse {
    pub run_id: String,
    pub manifest: RunManifest,
    pub loaded_from_cache: bool,
    pub timing: PerfStats,
}

/// Execute or load a run. In simulate mode the engine is the recording named
/// by `simulation.recorded_dir`.
pub fn ensure_run(request: &RunRequest) -> AppResult<RunResponse> {
    match &request.mode {
        RunMode::Simulate => {
            let project = project_service::load_project(request.project_path)?;
            let recorded_dir = project.simulation.recorded_dir.as_ref().ok_or_else(|| {
                AppError::NoEngine {
                    message: "set simulation.recorded_dir or import tables".to_string(),
                }
            })?;
            let dir = runtime_config::resolve(project_dir(request.project_path), recorded_dir);
            let sim = RecordedSimulator::from_dir(&dir)?;
            ensure_run_with_simulator(request, &sim)
        }
        RunMode::Import { .. } => ensure_run_with_simulator(request, &RecordedSimulator::new()),
    }
}

/// Execute or load a run, driving `sim` in simulate mode.
pub fn ensure_run_with_simulator(
    request: &RunRequest,
    sim: &dyn QualitySimulator,
) -> AppResult<RunResponse> {
    let total = Timer::start();
    let mut timing = PerfStats::default();

    let project = project_service::load_project(request.project_path)?;
    let project_dir = project_dir(request.project_path);

    // Inputs outside the project file are digested up front: they are part of the run id.
    let (source, imported) = match &request.mode {
        RunMode::Simulate => (simulated_source(&project, project_dir, sim)?, None),
        RunMode::Import {
            trace_path,
            demand_path,
        } => {
            let trace_csv = table_io::read_file(trace_path)?;
            let demand_csv = table_io::read_file(demand_path)?;
            let source = RunSource::Imported {
                trace_sha256: cf_results::digest_bytes(trace_csv.as_bytes()),
                demand_sha256: cf_results::digest_bytes(demand_csv.as_bytes()),
            };
            let tables = (
                table_io::parse_trace_csv(trace_path, &trace_csv)?,
                table_io::parse_demand_csv(demand_path, &demand_csv)?,
            );
            (source, Some(tables))
        }
    };

    let run_id = cf_results::compute_run_id(&project, &source, &request.options.tool_version);
    let store = RunStore::for_project(request.project_path)?;

    if request.options.use_cache && store.has_run(&run_id) {
        let load = Timer::start();
        let manifest = store.load_manifest(&run_id)?;
        timing.load_time_s = load.elapsed_s();
        timing.total_time_s = total.elapsed_s();
        tracing::info!(%run_id, "loaded cached analysis run");
        return Ok(RunResponse {
            run_id,
            manifest,
            loaded_from_cache: true,
            timing,
        });
    }

    let (trace, demand) = match imported {
        Some(tables) => tables,
        None => {
            let clock = Timer::start();
            let network = runtime_config::network_model(&project, project_dir);
            let settings = runtime_config::sim_settings(&project);
            let engine = runtime_config::engine_options(&project, project_dir);
            let trace = cf_sim::contamination(
                sim,
                &network,
                project.analysis.injection_nodes.as_deref(),
                &settings,
                &engine,
            )?;
            let demand = cf_sim::water_demand(sim, &network, &settings, &engine)?;
            timing.simulate_time_s = clock.elapsed_s();
            timing.simulation_runs = trace.inj_nodes().len() + 1;
            (trace, demand)
        }
    };

    let clock = Timer::start();
    let detection = detection_time(&trace, &runtime_config::detection_options(&project))?;
    timing.detection_time_s = clock.elapsed_s();

    let clock = Timer::start();
    let volume = contaminated_volume(
        &trace,
        &demand,
        &detection,
        runtime_config::volume_method(&project),
    )?;
    timing.volume_time_s = clock.elapsed_s();

    let manifest = build_manifest(&project, &run_id, source, &request.options, &trace);
    let tables = RunTables {
        trace,
        demand,
        detection,
        volume,
    };

    let clock = Timer::start();
    store.save_run(&manifest, &tables)?;
    timing.save_time_s = clock.elapsed_s();
    timing.total_time_s = total.elapsed_s();

    tracing::info!(%run_id, pairs = tables.detection.len(), "analysis run saved");
    Ok(RunResponse {
        run_id,
        manifest,
        loaded_from_cache: false,
        timing,
    })
}

pub fn list_runs(project_path: &Path) -> AppResult<Vec<RunManifest>> {
    let store = RunStore::for_project(project_path)?;
    Ok(store.list_runs()?)
}

pub fn load_run(project_path: &Path, run_id: &str) -> AppResult<(RunManifest, RunTables)> {
    let store = RunStore::for_project(project_path)?;
    Ok(store.load_tables(run_id)?)
}

pub fn delete_run(project_path: &Path, run_id: &str) -> AppResult<()> {
    let store = RunStore::for_project(project_path)?;
    if !store.has_run(run_id) {
        return Err(AppError::Results(format!("Run not found: {}", run_id)));
    }
    Ok(store.delete_run(run_id)?)
}

fn build_manifest(
    project: &Project,
    run_id: &str,
    source: RunSource,
    options: &RunOptions,
    trace: &TraceTable,
) -> RunManifest {
    RunManifest {
        run_id: run_id.to_string(),
        project_name: project.name.clone(),
        network_id: project.network.id.clone(),
        timestamp: now_timestamp(),
        source,
        simulation: project.simulation.clone(),
        analysis: project.analysis.clone(),
        tool_version: options.tool_version.clone(),
        inj_nodes: trace.inj_nodes().to_vec(),
        node_count: trace.nodes().len(),
        time_steps: trace.times().len(),
        horizon_s: trace.max_time().unwrap_or(0.0),
    }
}

fn simulated_source(
    project: &Project,
    project_dir: &Path,
    sim: &dyn QualitySimulator,
) -> AppResult<RunSource> {
    let inp_sha256 = match &project.network.inp_path {
        Some(inp) => {
            let path = runtime_config::resolve(project_dir, inp);
            if path.exists() {
                let bytes = std::fs::read(&path).map_err(|e| AppError::FileRead {
                    path: path.clone(),
                    source: e,
                })?;
                Some(cf_results::digest_bytes(&bytes))
            } else {
                None
            }
        }
        None => None,
    };
    Ok(RunSource::Simulated {
        engine_sha256: sim.fingerprint().map(|bytes| cf_results::digest_bytes(&bytes)),
        inp_sha256,
    })
}

fn project_dir(project_path: &Path) -> &Path {
    project_path.parent().unwrap_or_else(|| Path::new("."))
}

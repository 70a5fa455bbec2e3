use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use cf_app::{
    AppResult, RunMode, RunOptions, RunRequest, TableKind, analysis_service, project_service,
    query,
};

#[derive(Parser)]
#[command(name = "cf-cli")]
#[command(about = "contamflow CLI - contaminant detection analysis for water networks", long_about = None)]
struct Cli {
    /// Print a stage timing breakdown after runs
    #[arg(long, global = true)]
    timing: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate project file syntax and structure
    Validate {
        /// Path to the project YAML file
        project_path: PathBuf,
    },
    /// Run every injection scenario through the engine and analyze the results
    Simulate {
        /// Path to the project YAML file
        project_path: PathBuf,
        /// Skip cache and force re-run
        #[arg(long)]
        no_cache: bool,
    },
    /// Analyze trace and demand tables produced elsewhere
    Analyze {
        /// Path to the project YAML file
        project_path: PathBuf,
        /// Trace CSV: time,node,<inj_node>...
        #[arg(long)]
        trace: PathBuf,
        /// Demand CSV: time,node,demand
        #[arg(long)]
        demand: PathBuf,
        /// Skip cache and force re-run
        #[arg(long)]
        no_cache: bool,
    },
    /// List cached runs for a project
    Runs {
        /// Path to the project YAML file
        project_path: PathBuf,
    },
    /// Show details of a cached run
    ShowRun {
        /// Path to the project YAML file
        project_path: PathBuf,
        /// Run ID to display
        run_id: String,
    },
    /// Delete a cached run
    DeleteRun {
        /// Path to the project YAML file
        project_path: PathBuf,
        /// Run ID to delete
        run_id: String,
    },
    /// Export a table from a run as CSV
    Export {
        /// Path to the project YAML file
        project_path: PathBuf,
        /// Run ID
        run_id: String,
        /// Table: trace, demand, detection, volume or summary
        table: String,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.timing {
        cf_core::timing::enable_timing();
    }

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Simulate {
            project_path,
            no_cache,
        } => cmd_run(&project_path, RunMode::Simulate, !no_cache),
        Commands::Analyze {
            project_path,
            trace,
            demand,
            no_cache,
        } => cmd_run(
            &project_path,
            RunMode::Import {
                trace_path: trace,
                demand_path: demand,
            },
            !no_cache,
        ),
        Commands::Runs { project_path } => cmd_runs(&project_path),
        Commands::ShowRun {
            project_path,
            run_id,
        } => cmd_show_run(&project_path, &run_id),
        Commands::DeleteRun {
            project_path,
            run_id,
        } => {
            analysis_service::delete_run(&project_path, &run_id)?;
            println!("✓ Deleted run {}", run_id);
            Ok(())
        }
        Commands::Export {
            project_path,
            run_id,
            table,
            output,
        } => cmd_export(&project_path, &run_id, &table, output.as_deref()),
    }
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = project_service::load_project(project_path)?;
    let net = project_service::summarize_network(&project);
    println!("✓ Project is valid");
    println!(
        "  Network {}: {} junctions, {} tanks, {} reservoirs",
        net.id, net.junctions, net.tanks, net.reservoirs
    );
    println!("  Injection scenarios: {}", net.injection_nodes);
    Ok(())
}

fn cmd_run(project_path: &Path, mode: RunMode, use_cache: bool) -> AppResult<()> {
    match &mode {
        RunMode::Simulate => println!("Simulating contamination scenarios"),
        RunMode::Import { trace_path, .. } => {
            println!("Analyzing imported tables: {}", trace_path.display())
        }
    }

    let request = RunRequest {
        project_path,
        mode,
        options: RunOptions {
            use_cache,
            ..RunOptions::default()
        },
    };
    let response = analysis_service::ensure_run(&request)?;

    if response.loaded_from_cache {
        println!("✓ Loaded from cache: {}", response.run_id);
    } else {
        println!("✓ Analysis completed: {}", response.run_id);
    }
    response.timing.print_summary();

    let (manifest, tables) = analysis_service::load_run(project_path, &response.run_id)?;
    print_run_summary(&query::get_run_summary(&manifest, &tables));
    Ok(())
}

fn cmd_runs(project_path: &Path) -> AppResult<()> {
    let runs = analysis_service::list_runs(project_path)?;

    if runs.is_empty() {
        println!("No cached runs found");
    } else {
        println!("Cached runs:");
        for manifest in runs {
            println!(
                "  {} ({}, {} scenarios)",
                manifest.run_id,
                manifest.timestamp,
                manifest.inj_nodes.len()
            );
        }
    }
    Ok(())
}

fn cmd_show_run(project_path: &Path, run_id: &str) -> AppResult<()> {
    println!("Loading run: {}", run_id);

    let (manifest, tables) = analysis_service::load_run(project_path, run_id)?;
    println!("\nProject: {} (network {})", manifest.project_name, manifest.network_id);
    println!(
        "Sensitivity: {}%  Volume method: {:?}",
        manifest.analysis.sensitivity, manifest.analysis.volume_method
    );
    print_run_summary(&query::get_run_summary(&manifest, &tables));

    println!("\nSensors:");
    println!(
        "  {:<16} {:>9} {:>10} {:>14} {:>14}",
        "node", "detected", "fraction", "mean t (s)", "mean volume"
    );
    for s in query::sensor_summaries(&tables) {
        println!(
            "  {:<16} {:>4}/{:<4} {:>10.3} {:>14} {:>14}",
            s.node,
            s.detected,
            s.scenarios,
            s.detection_fraction,
            s.mean_detection_time_s
                .map(|t| format!("{:.0}", t))
                .unwrap_or_else(|| "-".to_string()),
            s.mean_volume
                .map(|v| format!("{:.3}", v))
                .unwrap_or_else(|| "-".to_string()),
        );
    }

    Ok(())
}

fn cmd_export(
    project_path: &Path,
    run_id: &str,
    table: &str,
    output: Option<&Path>,
) -> AppResult<()> {
    let kind: TableKind = table.parse()?;
    let (_, tables) = analysis_service::load_run(project_path, run_id)?;
    let csv = query::export_table(&tables, kind);

    if let Some(path) = output {
        std::fs::write(path, &csv)?;
        println!(
            "✓ Exported {} rows to {}",
            csv.lines().count().saturating_sub(1),
            path.display()
        );
    } else {
        print!("{}", csv);
    }

    Ok(())
}

fn print_run_summary(summary: &query::RunSummary) {
    println!(
        "  Time range: {:.0} - {:.0} s ({} steps)",
        summary.time_range.0, summary.time_range.1, summary.time_steps
    );
    println!("  Nodes: {}", summary.node_count);
    println!("  Injection scenarios: {}", summary.injection_count);
    println!(
        "  Detected pairs: {}/{}",
        summary.detected_pairs, summary.total_pairs
    );
    println!("  Total contaminated volume: {:.3}", summary.total_volume);
}

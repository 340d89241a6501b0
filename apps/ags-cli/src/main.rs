use ags_app::{
    AppError, AppResult, PerformanceResult, RunOptions, RunRequest, case_service, run_service,
};
use ags_core::timing;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ags")]
#[command(about = "AGSFlow CLI - closed-loop geothermal well performance", long_about = None)]
struct Cli {
    /// Log phase timings at debug level
    #[arg(long, global = true)]
    timing: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a case file and report every out-of-range input
    Validate {
        /// Path to the case YAML or JSON file
        case_path: PathBuf,
    },
    /// Run a case
    Run {
        /// Path to the case YAML or JSON file
        case_path: PathBuf,
        /// Skip cache and force re-run
        #[arg(long)]
        no_cache: bool,
    },
    /// List cached runs for a case
    Runs {
        /// Path to the case YAML or JSON file
        case_path: PathBuf,
    },
    /// Show details of a cached run
    ShowRun {
        /// Path to the case YAML or JSON file
        case_path: PathBuf,
        /// Run ID to display
        run_id: String,
    },
    /// Export the time series of a cached run
    Export {
        /// Path to the case YAML or JSON file
        case_path: PathBuf,
        /// Run ID
        run_id: String,
        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Csv,
    Json,
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    if cli.timing {
        timing::enable_timing();
    }

    match cli.command {
        Commands::Validate { case_path } => cmd_validate(&case_path),
        Commands::Run {
            case_path,
            no_cache,
        } => cmd_run(&case_path, !no_cache),
        Commands::Runs { case_path } => cmd_runs(&case_path),
        Commands::ShowRun { case_path, run_id } => cmd_show_run(&case_path, &run_id),
        Commands::Export {
            case_path,
            run_id,
            format,
            output,
        } => cmd_export(&case_path, &run_id, format, output.as_deref()),
    }
}

fn cmd_validate(case_path: &Path) -> AppResult<()> {
    println!("Validating case: {}", case_path.display());
    let case = case_service::load_case(case_path)?;
    let report = case_service::validate_case(&case);
    if !report.is_ok() {
        for violation in &report.violations {
            println!("  ✗ {}", violation);
        }
        return Err(AppError::Validation(report));
    }
    let geometry = case.geometry();
    let solver = ags_app::select_solver(case.initial_temperature(), geometry.lateral_count);
    println!("✓ Case is valid ({} solver)", solver);
    Ok(())
}

fn cmd_run(case_path: &Path, use_cache: bool) -> AppResult<()> {
    println!("Running case: {}", case_path.display());

    let request = RunRequest {
        case_path,
        options: RunOptions {
            use_cache,
            ..RunOptions::default()
        },
    };
    let response = run_service::ensure_run(&request)?;

    if response.loaded_from_cache {
        println!("✓ Loaded from cache: {}", response.run_id);
    } else {
        println!("✓ Calculation completed: {}", response.run_id);
    }
    print_result(&response.result);
    println!("  Elapsed: {:.3} s", response.elapsed_s);
    Ok(())
}

fn print_result(result: &PerformanceResult) {
    let n = result.time_years.len();
    println!("\nResult ({} solver, {} samples):", result.solver, n);
    if let (Some(first), Some(last)) = (
        result.produced_temperature_k.first(),
        result.produced_temperature_k.last(),
    ) {
        println!(
            "  Produced temperature: {:.2} °C → {:.2} °C",
            first - 273.15,
            last - 273.15
        );
    }
    if let Some(peak) = result.pumping_power_w.iter().copied().reduce(f64::max) {
        println!("  Peak pumping power: {:.1} kW", peak / 1e3);
    }
    if let Some(kw) = result.average_thermal_kw {
        println!("  Average thermal power: {:.1} kW", kw);
    }
    if let Some(kw) = result.average_electric_kw {
        println!("  Average electric power: {:.1} kW", kw);
    }
}

fn cmd_runs(case_path: &Path) -> AppResult<()> {
    let case = case_service::load_case(case_path)?;
    let runs = run_service::list_runs(case_path, &case.name)?;

    if runs.is_empty() {
        println!("No cached runs found for case: {}", case.name);
    } else {
        println!("Cached runs for case '{}':", case.name);
        for manifest in runs {
            println!(
                "  {} ({}, {})",
                manifest.run_id, manifest.solver, manifest.timestamp
            );
        }
    }
    Ok(())
}

fn cmd_show_run(case_path: &Path, run_id: &str) -> AppResult<()> {
    println!("Loading run: {}", run_id);
    let (manifest, _records) = run_service::load_run(case_path, run_id)?;
    println!("  Case: {}", manifest.case_name);
    println!("  Timestamp: {}", manifest.timestamp);
    println!("  Engine version: {}", manifest.engine_version);

    let result = run_service::load_result(case_path, run_id)?;
    print_result(&result);
    Ok(())
}

fn cmd_export(
    case_path: &Path,
    run_id: &str,
    format: ExportFormat,
    output: Option<&Path>,
) -> AppResult<()> {
    let result = run_service::load_result(case_path, run_id)?;

    let content = match format {
        ExportFormat::Csv => {
            let mut csv =
                String::from("time_years,produced_temperature_k,pressure_drop_pa,pumping_power_w\n");
            for i in 0..result.time_years.len() {
                csv.push_str(&format!(
                    "{},{},{},{}\n",
                    result.time_years[i],
                    result.produced_temperature_k[i],
                    result.pressure_drop_pa[i],
                    result.pumping_power_w[i]
                ));
            }
            csv
        }
        ExportFormat::Json => serde_json::to_string_pretty(&result)
            .map_err(|e| AppError::Results(format!("Failed to serialize result: {}", e)))?,
    };

    if let Some(path) = output {
        std::fs::write(path, content)?;
        println!(
            "✓ Exported {} samples to {}",
            result.time_years.len(),
            path.display()
        );
    } else {
        print!("{}", content);
    }

    Ok(())
}

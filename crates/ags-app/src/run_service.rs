//! Run execution and caching service.

use std::path::Path;
use std::time::Instant;

use ags_results::{RunManifest, RunStore, TimeseriesRecord};

use crate::calculate::{Orchestrator, PerformanceResult};
use crate::case_service;
use crate::error::{AppError, AppResult};
use crate::solver::SolverKind;

/// Options for running a case.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub use_cache: bool,
    pub engine_version: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Request to execute a run.
pub struct RunRequest<'a> {
    pub case_path: &'a Path,
    pub options: RunOptions,
}

/// Response from a run execution.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub run_id: String,
    pub manifest: RunManifest,
    pub result: PerformanceResult,
    pub loaded_from_cache: bool,
    pub elapsed_s: f64,
}

fn parse_solver(manifest: &RunManifest) -> AppResult<SolverKind> {
    match manifest.solver.as_str() {
        "tabulated" => Ok(SolverKind::Tabulated),
        "analytical" => Ok(SolverKind::Analytical),
        other => Err(AppError::Results(format!(
            "run {} has unknown solver '{}'",
            manifest.run_id, other
        ))),
    }
}

/// Execute a case, or load the stored result of an identical earlier run.
pub fn ensure_run(request: &RunRequest) -> AppResult<RunResponse> {
    let started = Instant::now();

    let case = case_service::load_case(request.case_path)?;
    let run_id = ags_results::compute_run_id(&case, &request.options.engine_version);
    let store = RunStore::for_case(request.case_path)?;

    if request.options.use_cache && store.has_run(&run_id) {
        let manifest = store.load_manifest(&run_id)?;
        let records = store.load_timeseries(&run_id)?;
        let result = PerformanceResult::from_records(
            manifest.case_name.clone(),
            parse_solver(&manifest)?,
            &manifest.summary,
            &records,
        );
        tracing::info!(%run_id, case = %case.name, "loaded cached run");
        return Ok(RunResponse {
            run_id,
            manifest,
            result,
            loaded_from_cache: true,
            elapsed_s: started.elapsed().as_secs_f64(),
        });
    }

    let base_dir = request.case_path.parent().unwrap_or_else(|| Path::new("."));
    let mut orchestrator = Orchestrator::for_case(&case, base_dir)?;
    let result = orchestrator.calculate(&case)?;

    let manifest = RunManifest::new(
        run_id.clone(),
        case.name.clone(),
        result.solver.key(),
        request.options.engine_version.clone(),
        result.summary(),
    );
    store.save_run(&manifest, &result.to_records())?;
    tracing::info!(%run_id, case = %case.name, solver = %result.solver, "run stored");

    Ok(RunResponse {
        run_id,
        manifest,
        result,
        loaded_from_cache: false,
        elapsed_s: started.elapsed().as_secs_f64(),
    })
}

/// Stored runs of `case_name`, most recent first.
pub fn list_runs(case_path: &Path, case_name: &str) -> AppResult<Vec<RunManifest>> {
    let store = RunStore::for_case(case_path)?;
    Ok(store.list_runs(case_name)?)
}

/// Load a specific run.
pub fn load_run(case_path: &Path, run_id: &str) -> AppResult<(RunManifest, Vec<TimeseriesRecord>)> {
    let store = RunStore::for_case(case_path)?;

    let manifest = store.load_manifest(run_id)?;
    let records = store.load_timeseries(run_id)?;

    Ok((manifest, records))
}

/// Load a stored run as a [`PerformanceResult`].
pub fn load_result(case_path: &Path, run_id: &str) -> AppResult<PerformanceResult> {
    let (manifest, records) = load_run(case_path, run_id)?;
    Ok(PerformanceResult::from_records(
        manifest.case_name.clone(),
        parse_solver(&manifest)?,
        &manifest.summary,
        &records,
    ))
}

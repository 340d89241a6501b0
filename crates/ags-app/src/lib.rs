//! Application service layer for agsflow.
//!
//! Loads case files, checks their inputs, picks the tabulated or analytical
//! produced-temperature solver, combines it with the loop hydraulics and
//! caches results in the run store. The CLI is a thin layer over this crate.

pub mod calculate;
pub mod case;
pub mod case_service;
pub mod error;
pub mod run_service;
pub mod solver;
pub mod timeline;
pub mod validate;

pub use calculate::{
    Orchestrator, PerformanceResult, apply_initial_correction, build_fluid_model, build_heat_loss,
};
pub use case::{Case, FluidModelDef, HeatLossDef, NumericsDef, WellGeometry};
pub use case_service::{load_case, save_case, validate_case};
pub use error::{AppError, AppResult};
pub use run_service::{
    RunOptions, RunRequest, RunResponse, ensure_run, list_runs, load_result, load_run,
};
pub use solver::{
    AnalyticalSolver, SolveContext, SolverKind, TabulatedSolver, ThermalOutput,
    ThermalPerformanceSolver, select_solver,
};
pub use timeline::SimulationTimeline;
pub use validate::{ValidationReport, Violation, verify, verify_operating_point};

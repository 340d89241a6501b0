use std::path::PathBuf;

use ags_app::{SolverKind, case_service, select_solver};

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../demos/cases")
        .join(name)
}

#[test]
fn demo_cases_load_and_validate() {
    let expected = [
        ("multilateral_coaxial.yaml", SolverKind::Analytical),
        ("single_lateral_utube.yaml", SolverKind::Tabulated),
        ("supercritical_co2_hot_rock.yaml", SolverKind::Analytical),
    ];
    for (file, solver) in expected {
        let path = demo(file);
        let case = case_service::load_case(&path)
            .unwrap_or_else(|e| panic!("{} failed to load: {e}", path.display()));
        let report = case_service::validate_case(&case);
        assert!(report.is_ok(), "{file}: {report}");
        assert_eq!(
            select_solver(case.initial_temperature(), case.well.lateral_count),
            solver,
            "{file}"
        );
    }
}

#[test]
fn multilateral_demo_runs_without_database() {
    let mut case = case_service::load_case(&demo("multilateral_coaxial.yaml")).unwrap();
    case.timeline.plant_lifetime_years = 3;
    case.timeline.timesteps_per_year = 1;

    let mut orchestrator = ags_app::Orchestrator::for_case(&case, &demo("")).unwrap();
    let result = orchestrator.calculate(&case).unwrap();
    assert_eq!(result.solver, SolverKind::Analytical);
    assert!(result.pumping_power_w.iter().all(|p| p.is_finite() && *p >= 0.0));
}

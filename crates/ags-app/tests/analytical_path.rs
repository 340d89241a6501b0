mod common;

use ags_app::{AppError, HeatLossDef, Orchestrator, SolverKind};
use ags_fluids::TabulatedFluid;
use ags_hydraulics::DarcyVerticalWells;
use common::base_case;

fn orchestrator() -> Orchestrator {
    Orchestrator::new(
        Box::new(TabulatedFluid::water()),
        Box::new(DarcyVerticalWells::default()),
    )
}

fn multilateral_case() -> ags_app::Case {
    let mut case = base_case();
    case.well.lateral_count = 2;
    case.operation.mass_flow_kg_s = 30.0;
    case.timeline.plant_lifetime_years = 10;
    case.timeline.timesteps_per_year = 1;
    case
}

#[test]
fn multilateral_case_runs_analytically() {
    let result = orchestrator().calculate(&multilateral_case()).unwrap();

    assert_eq!(result.solver, SolverKind::Analytical);
    assert_eq!(result.time_years.len(), 11);
    assert_eq!(result.produced_temperature_k[0], result.produced_temperature_k[1]);
    assert!(result.outlet_pressure_pa.is_none());
    assert!(result.average_thermal_kw.is_none());

    let t = &result.produced_temperature_k;
    assert!(t[10] < t[1], "no drawdown: {t:?}");
    // Produced fluid stays between injection and rock temperature.
    assert!(t.iter().all(|v| *v > 313.15 && *v < 438.15), "{t:?}");
    assert!(result.pumping_power_w.iter().all(|p| *p >= 0.0));
    assert!(result.pressure_drop_pa.iter().all(|dp| *dp > 0.0));
}

#[test]
fn hot_rock_skips_tabulated_ranges() {
    let mut case = base_case();
    case.well.vertical_depth_m = 5000.0;
    case.rock.gradient_k_per_m = 0.08;
    case.timeline.plant_lifetime_years = 5;
    case.timeline.timesteps_per_year = 1;

    let result = orchestrator().calculate(&case).unwrap();
    assert_eq!(result.solver, SolverKind::Analytical);
    assert_eq!(result.produced_temperature_k[0], result.produced_temperature_k[1]);
}

#[test]
fn wellbore_heat_loss_cools_produced_fluid() {
    let mut lossless = multilateral_case();
    lossless.numerics.heat_loss = HeatLossDef::None;
    let with_loss = orchestrator().calculate(&multilateral_case()).unwrap();
    let without = orchestrator().calculate(&lossless).unwrap();
    for (a, b) in with_loss
        .produced_temperature_k
        .iter()
        .zip(&without.produced_temperature_k)
    {
        assert!(a < b);
    }
}

#[test]
fn fluid_model_must_match_case() {
    let mut orch = Orchestrator::new(
        Box::new(TabulatedFluid::carbon_dioxide()),
        Box::new(DarcyVerticalWells::default()),
    );
    assert!(matches!(
        orch.calculate(&multilateral_case()),
        Err(AppError::InvalidInput(_))
    ));
}

#[test]
fn structural_problems_are_collected() {
    let mut case = multilateral_case();
    case.well.lateral_count = 0;
    case.operation.pump_efficiency = 1.5;
    match orchestrator().calculate(&case) {
        Err(AppError::Validation(report)) => assert_eq!(report.len(), 2, "{report}"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

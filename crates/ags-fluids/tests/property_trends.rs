//! Property trend checks for the built-in fluid models.
//!
//! Broad tolerances: the tables are reference approximations, but the trends
//! the hydraulics depend on must hold.

use ags_core::units::degc;
use ags_fluids::{FluidProperties, TabulatedFluid, WorkingFluid};

#[test]
fn water_viscosity_falls_with_temperature() {
    let water = TabulatedFluid::for_fluid(WorkingFluid::Water);
    let cold = water.mu(degc(40.0)).unwrap().value;
    let hot = water.mu(degc(200.0)).unwrap().value;
    assert!(cold > 3.0 * hot, "mu(40C) = {cold}, mu(200C) = {hot}");
}

#[test]
fn both_fluids_report_positive_properties_over_operating_range() {
    for fluid in WorkingFluid::ALL {
        let model = TabulatedFluid::for_fluid(fluid);
        assert_eq!(model.fluid(), fluid);
        for t in [30.0, 60.0, 120.0, 250.0, 350.0] {
            let rho = model.rho(degc(t)).unwrap().value;
            let mu = model.mu(degc(t)).unwrap().value;
            let cp = model.cp(degc(t)).unwrap();
            assert!(rho > 50.0 && rho < 1100.0, "{fluid}: rho({t}) = {rho}");
            assert!(mu > 1e-6 && mu < 2e-3, "{fluid}: mu({t}) = {mu}");
            assert!(cp > 800.0 && cp < 20000.0, "{fluid}: cp({t}) = {cp}");
        }
    }
}

#[test]
fn water_is_denser_than_co2_at_injection_temperature() {
    let water = TabulatedFluid::water();
    let co2 = TabulatedFluid::carbon_dioxide();
    assert!(water.rho(degc(50.0)).unwrap().value > co2.rho(degc(50.0)).unwrap().value);
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn water_density_falls_with_temperature(t in 20.0f64..340.0, dt in 1.0f64..20.0) {
            let water = TabulatedFluid::water();
            let rho_cold = water.rho(degc(t)).unwrap().value;
            let rho_hot = water.rho(degc(t + dt)).unwrap().value;
            prop_assert!(rho_hot < rho_cold);
        }
    }
}

//! Built-in tabulated property models for water and supercritical CO2.
//!
//! Water uses saturated-liquid reference data for density and heat capacity
//! and the Vogel equation for viscosity. CO2 uses an approximate isobar at
//! 15 MPa, representative of closed-loop operating pressures. Queries outside
//! a table's temperature range are clamped to the nearest end point and
//! logged at warn level.

use crate::error::FluidResult;
use crate::fluid::WorkingFluid;
use crate::model::{FluidProperties, validation};
use ags_core::numeric::LinearSeries;
use ags_core::units::{
    Density, DynVisc, SpecHeatCapacity, Temperature, degc, kg_per_m3, pa_s, to_degc,
};

/// Saturated liquid water: T [°C], ρ [kg/m³], cp [J/(kg·K)].
const WATER_TABLE: [(f64, f64, f64); 19] = [
    (0.0, 999.8, 4220.0),
    (20.0, 998.2, 4182.0),
    (40.0, 992.2, 4179.0),
    (60.0, 983.2, 4185.0),
    (80.0, 971.8, 4197.0),
    (100.0, 958.4, 4216.0),
    (120.0, 943.1, 4245.0),
    (140.0, 926.1, 4285.0),
    (160.0, 907.4, 4340.0),
    (180.0, 887.0, 4410.0),
    (200.0, 864.7, 4497.0),
    (220.0, 840.2, 4607.0),
    (240.0, 813.4, 4756.0),
    (260.0, 783.6, 4966.0),
    (280.0, 750.3, 5280.0),
    (300.0, 712.1, 5750.0),
    (320.0, 667.1, 6540.0),
    (340.0, 610.7, 8240.0),
    (360.0, 527.6, 14690.0),
];

/// CO2 at 15 MPa: T [°C], ρ [kg/m³], μ [Pa·s], cp [J/(kg·K)].
const CO2_TABLE: [(f64, f64, f64, f64); 16] = [
    (20.0, 890.0, 9.0e-5, 2200.0),
    (30.0, 850.0, 7.9e-5, 2400.0),
    (40.0, 810.0, 7.1e-5, 2700.0),
    (50.0, 755.0, 6.2e-5, 3100.0),
    (60.0, 695.0, 5.5e-5, 3400.0),
    (70.0, 626.0, 4.8e-5, 3600.0),
    (80.0, 555.0, 4.1e-5, 3500.0),
    (90.0, 488.0, 3.6e-5, 3100.0),
    (100.0, 431.0, 3.2e-5, 2700.0),
    (125.0, 330.0, 2.7e-5, 2000.0),
    (150.0, 275.0, 2.5e-5, 1700.0),
    (200.0, 210.0, 2.5e-5, 1450.0),
    (250.0, 175.0, 2.6e-5, 1330.0),
    (300.0, 150.0, 2.8e-5, 1270.0),
    (400.0, 118.0, 3.2e-5, 1220.0),
    (500.0, 98.0, 3.6e-5, 1220.0),
];

/// Vogel equation for liquid water viscosity [Pa·s], `t_k` in kelvin.
pub fn water_viscosity_vogel(t_k: f64) -> f64 {
    2.414e-5 * 10f64.powf(247.8 / (t_k - 140.0))
}

/// Property columns sampled on a common temperature axis [°C].
#[derive(Debug, Clone)]
struct PropertyTable {
    t_c: Vec<f64>,
    rho: Vec<f64>,
    mu: Option<Vec<f64>>,
    cp: Vec<f64>,
}

impl PropertyTable {
    fn range(&self) -> (f64, f64) {
        (self.t_c[0], self.t_c[self.t_c.len() - 1])
    }

    fn clamp_t(&self, t_c: f64) -> f64 {
        let (lo, hi) = self.range();
        if t_c < lo || t_c > hi {
            tracing::warn!(t_c, lo, hi, "fluid table query clamped to table range");
        }
        t_c.clamp(lo, hi)
    }

    fn lookup(&self, column: &[f64], t_c: f64) -> FluidResult<f64> {
        let t_c = self.clamp_t(t_c);
        Ok(LinearSeries::clamped(&self.t_c, column)?.eval(t_c)?)
    }
}

/// Tabulated property model for one working fluid.
#[derive(Debug, Clone)]
pub struct TabulatedFluid {
    fluid: WorkingFluid,
    table: PropertyTable,
}

impl TabulatedFluid {
    /// Built-in water model.
    pub fn water() -> Self {
        Self {
            fluid: WorkingFluid::Water,
            table: PropertyTable {
                t_c: WATER_TABLE.iter().map(|r| r.0).collect(),
                rho: WATER_TABLE.iter().map(|r| r.1).collect(),
                mu: None,
                cp: WATER_TABLE.iter().map(|r| r.2).collect(),
            },
        }
    }

    /// Built-in supercritical CO2 model.
    pub fn carbon_dioxide() -> Self {
        Self {
            fluid: WorkingFluid::CarbonDioxide,
            table: PropertyTable {
                t_c: CO2_TABLE.iter().map(|r| r.0).collect(),
                rho: CO2_TABLE.iter().map(|r| r.1).collect(),
                mu: Some(CO2_TABLE.iter().map(|r| r.2).collect()),
                cp: CO2_TABLE.iter().map(|r| r.3).collect(),
            },
        }
    }

    /// Built-in model for `fluid`.
    pub fn for_fluid(fluid: WorkingFluid) -> Self {
        match fluid {
            WorkingFluid::Water => Self::water(),
            WorkingFluid::CarbonDioxide => Self::carbon_dioxide(),
        }
    }

    /// Temperatures spanned by the table; properties are held constant
    /// outside them.
    pub fn temperature_range(&self) -> (Temperature, Temperature) {
        let (lo, hi) = self.table.range();
        (degc(lo), degc(hi))
    }

    pub fn covers(&self, t: Temperature) -> bool {
        let (lo, hi) = self.table.range();
        (lo..=hi).contains(&to_degc(t))
    }
}

impl FluidProperties for TabulatedFluid {
    fn name(&self) -> &str {
        match self.fluid {
            WorkingFluid::Water => "tabulated-water",
            WorkingFluid::CarbonDioxide => "tabulated-sco2",
        }
    }

    fn fluid(&self) -> WorkingFluid {
        self.fluid
    }

    fn rho(&self, t: Temperature) -> FluidResult<Density> {
        validation::validate_temperature(t)?;
        let rho = kg_per_m3(self.table.lookup(&self.table.rho, to_degc(t))?);
        validation::validate_density(rho)?;
        Ok(rho)
    }

    fn mu(&self, t: Temperature) -> FluidResult<DynVisc> {
        validation::validate_temperature(t)?;
        let mu = match &self.table.mu {
            Some(column) => pa_s(self.table.lookup(column, to_degc(t))?),
            None => {
                let t_c = self.table.clamp_t(to_degc(t));
                pa_s(water_viscosity_vogel(t_c + 273.15))
            }
        };
        validation::validate_viscosity(mu)?;
        Ok(mu)
    }

    fn cp(&self, t: Temperature) -> FluidResult<SpecHeatCapacity> {
        validation::validate_temperature(t)?;
        let cp = self.table.lookup(&self.table.cp, to_degc(t))?;
        validation::validate_cp(cp)?;
        Ok(cp)
    }
}

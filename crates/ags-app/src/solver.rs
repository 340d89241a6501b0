//! Produced-temperature solvers and the policy choosing between them.

use crate::calculate::apply_initial_correction;
use crate::case::WellGeometry;
use crate::error::{AppError, AppResult};
use ags_conduction::{AnalyticalHeatConductionModel, LateralBranch};
use ags_core::numeric::resample;
use ags_core::units::{MassRate, Temperature, ThermalConductivity, k, kgps, m, to_degc};
use ags_database::{PerformanceDatabase, PowerChannel, QueryPoint};
use ags_fluids::FluidProperties;
use ags_hydraulics::WellboreHeatLoss;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Rock temperature above which the tabulated simulations do not apply [°C].
pub const TABULATED_TEMPERATURE_LIMIT_C: f64 = 375.0;

/// Which produced-temperature solver a case runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverKind {
    Tabulated,
    Analytical,
}

impl SolverKind {
    pub fn key(self) -> &'static str {
        match self {
            SolverKind::Tabulated => "tabulated",
            SolverKind::Analytical => "analytical",
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Tabulated lookups cover single-lateral wells in rock up to 375 °C;
/// anything hotter or with several laterals goes to the analytical model.
pub fn select_solver(initial_temperature: Temperature, lateral_count: usize) -> SolverKind {
    if to_degc(initial_temperature) > TABULATED_TEMPERATURE_LIMIT_C || lateral_count > 1 {
        SolverKind::Analytical
    } else {
        SolverKind::Tabulated
    }
}

/// Operating state shared by both solvers.
pub struct SolveContext<'a> {
    pub geometry: WellGeometry,
    pub fluid: &'a dyn FluidProperties,
    /// Total circulating flow.
    pub mass_flow: MassRate,
    pub injection_temperature: Temperature,
    /// Undisturbed rock temperature at lateral depth.
    pub initial_temperature: Temperature,
    /// K/m.
    pub gradient: f64,
    pub rock_conductivity: ThermalConductivity,
}

/// Produced-fluid states on the simulation grid.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ThermalOutput {
    /// Produced temperature [K].
    pub temperature: Vec<f64>,
    /// Outlet pressure [Pa], when the solver provides one.
    pub pressure: Option<Vec<f64>>,
    /// Pressure at the injection wellhead [Pa], paired with `pressure`.
    pub injection_pressure: Option<f64>,
    pub average_thermal_kw: Option<f64>,
    pub average_electric_kw: Option<f64>,
}

/// Produces the produced-fluid temperature series for a well.
pub trait ThermalPerformanceSolver {
    fn kind(&self) -> SolverKind;

    /// States at each `time` sample [years].
    fn produced_states(&self, ctx: &SolveContext<'_>, time: &[f64]) -> AppResult<ThermalOutput>;
}

/// Lookup in the precomputed performance database.
#[derive(Debug, Clone)]
pub struct TabulatedSolver {
    database: Arc<PerformanceDatabase>,
}

impl TabulatedSolver {
    pub fn new(database: Arc<PerformanceDatabase>) -> Self {
        Self { database }
    }

    fn query_point(ctx: &SolveContext<'_>) -> QueryPoint {
        QueryPoint {
            mdot: ctx.mass_flow.value,
            lateral_length: ctx.geometry.lateral_length.value,
            vertical_depth: ctx.geometry.vertical_depth.value,
            gradient: ctx.gradient,
            diameter: ctx.geometry.lateral_diameter.value,
            injection_temperature: ctx.injection_temperature.value,
            rock_conductivity: ctx.rock_conductivity.value,
        }
    }
}

impl ThermalPerformanceSolver for TabulatedSolver {
    fn kind(&self) -> SolverKind {
        SolverKind::Tabulated
    }

    fn produced_states(&self, ctx: &SolveContext<'_>, time: &[f64]) -> AppResult<ThermalOutput> {
        let point = Self::query_point(ctx);
        let mut states = self.database.interp_outlet_states(&point)?;

        let horizon = states.time[states.time.len() - 1];
        if let Some(&end) = time.last() {
            if end > horizon {
                return Err(AppError::InvalidInput(format!(
                    "plant lifetime of {end} years exceeds the database horizon of {horizon} years"
                )));
            }
        }
        if states
            .temperature
            .iter()
            .chain(&states.pressure)
            .any(|v| !v.is_finite())
        {
            return Err(AppError::InvalidInput(
                "operating point falls on failed runs in the performance database".to_string(),
            ));
        }

        // Both channels drop their start-up sample before resampling.
        apply_initial_correction(&mut states.temperature);
        apply_initial_correction(&mut states.pressure);

        let temperature = resample(time, &states.time, &states.temperature)?;
        let pressure = resample(time, &states.time, &states.pressure)?;

        Ok(ThermalOutput {
            temperature,
            pressure: Some(pressure),
            injection_pressure: Some(self.database.injection_pressure().value),
            average_thermal_kw: Some(
                self.database
                    .interp_average_power(&point, PowerChannel::Thermal)?,
            ),
            average_electric_kw: Some(
                self.database
                    .interp_average_power(&point, PowerChannel::Electric)?,
            ),
        })
    }
}

/// Laplace-space conduction model followed by wellbore heat loss.
pub struct AnalyticalSolver {
    model: AnalyticalHeatConductionModel,
    heat_loss: Option<Box<dyn WellboreHeatLoss>>,
}

impl AnalyticalSolver {
    pub fn new(
        model: AnalyticalHeatConductionModel,
        heat_loss: Option<Box<dyn WellboreHeatLoss>>,
    ) -> Self {
        Self { model, heat_loss }
    }

    /// Lateral operating state; heat capacity at the mean of injection and
    /// rock temperature.
    fn branch(&self, ctx: &SolveContext<'_>) -> AppResult<LateralBranch> {
        let mean = k(0.5 * (ctx.injection_temperature.value + ctx.initial_temperature.value));
        let lateral_count = ctx.geometry.lateral_count.max(1) as f64;
        Ok(LateralBranch {
            length: ctx.geometry.lateral_length,
            mass_flow: kgps(ctx.mass_flow.value / lateral_count),
            fluid_cp: ctx.fluid.cp(mean)?,
            injection_temperature: ctx.injection_temperature,
            initial_temperature: ctx.initial_temperature,
            wellbore_radius: m(0.5 * ctx.geometry.lateral_diameter.value),
        })
    }
}

impl ThermalPerformanceSolver for AnalyticalSolver {
    fn kind(&self) -> SolverKind {
        SolverKind::Analytical
    }

    fn produced_states(&self, ctx: &SolveContext<'_>, time: &[f64]) -> AppResult<ThermalOutput> {
        let branch = self.branch(ctx)?;
        let bottom = self.model.outlet_temperatures(&branch, time)?;
        let temperature = match &self.heat_loss {
            Some(heat_loss) => heat_loss.produced_temperature(ctx.fluid, time, &bottom)?,
            None => bottom,
        };
        Ok(ThermalOutput {
            temperature,
            ..ThermalOutput::default()
        })
    }
}

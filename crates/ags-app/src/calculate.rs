//! The performance calculation: solver choice, produced temperature and
//! loop pumping power.

use crate::case::{Case, FluidModelDef, HeatLossDef};
use crate::error::{AppError, AppResult};
use crate::solver::{
    AnalyticalSolver, SolveContext, SolverKind, TabulatedSolver, ThermalOutput,
    ThermalPerformanceSolver, select_solver,
};
use crate::validate::{validate_case, verify, verify_operating_point};
use ags_conduction::AnalyticalHeatConductionModel;
use ags_core::numeric::clamp_non_negative;
use ags_core::timing::Timer;
use ags_core::units::{TempInterval, to_degc};
use ags_database::DatabaseCatalog;
use ags_fluids::{FluidProperties, TabulatedFluid};
use ags_hydraulics::{
    ConstantTemperatureDrop, DarcyVerticalWells, LateralSection, PressureDropEngine,
    RameyHeatLoss, VerticalLegs, VerticalWellHydraulics, WellboreHeatLoss, total_pumping_power,
};
use ags_results::{RunSummary, TimeseriesRecord};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uom::si::temperature_interval::kelvin as delta_kelvin;

/// Final per-timestep series of one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceResult {
    pub case_name: String,
    pub solver: SolverKind,
    pub time_years: Vec<f64>,
    pub produced_temperature_k: Vec<f64>,
    /// Tabulated path only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outlet_pressure_pa: Option<Vec<f64>>,
    pub pressure_drop_pa: Vec<f64>,
    /// Never negative.
    pub pumping_power_w: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_thermal_kw: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_electric_kw: Option<f64>,
}

impl PerformanceResult {
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            average_thermal_kw: self.average_thermal_kw,
            average_electric_kw: self.average_electric_kw,
            final_temperature_k: self.produced_temperature_k.last().copied(),
            peak_pumping_power_w: self.pumping_power_w.iter().copied().reduce(f64::max),
        }
    }

    pub fn to_records(&self) -> Vec<TimeseriesRecord> {
        (0..self.time_years.len())
            .map(|i| TimeseriesRecord {
                time_years: self.time_years[i],
                produced_temperature_k: self.produced_temperature_k[i],
                outlet_pressure_pa: self.outlet_pressure_pa.as_ref().map(|p| p[i]),
                pressure_drop_pa: self.pressure_drop_pa[i],
                pumping_power_w: self.pumping_power_w[i],
            })
            .collect()
    }

    /// Rebuild a result from stored records.
    pub fn from_records(
        case_name: impl Into<String>,
        solver: SolverKind,
        summary: &RunSummary,
        records: &[TimeseriesRecord],
    ) -> Self {
        let outlet_pressure_pa = records
            .iter()
            .map(|r| r.outlet_pressure_pa)
            .collect::<Option<Vec<f64>>>()
            .filter(|p| !p.is_empty());
        Self {
            case_name: case_name.into(),
            solver,
            time_years: records.iter().map(|r| r.time_years).collect(),
            produced_temperature_k: records.iter().map(|r| r.produced_temperature_k).collect(),
            outlet_pressure_pa,
            pressure_drop_pa: records.iter().map(|r| r.pressure_drop_pa).collect(),
            pumping_power_w: records.iter().map(|r| r.pumping_power_w).collect(),
            average_thermal_kw: summary.average_thermal_kw,
            average_electric_kw: summary.average_electric_kw,
        }
    }
}

/// Replace the start-up sample with the first operating sample.
pub fn apply_initial_correction(series: &mut [f64]) {
    if series.len() > 1 {
        series[0] = series[1];
    }
}

/// Fluid property model selected by the case.
pub fn build_fluid_model(case: &Case) -> AppResult<Box<dyn FluidProperties>> {
    match case.numerics.fluid_model {
        FluidModelDef::Tabulated => Ok(Box::new(TabulatedFluid::for_fluid(case.fluid))),
        #[cfg(feature = "coolprop")]
        FluidModelDef::CoolProp { pressure_mpa } => Ok(Box::new(
            ags_fluids::CoolPropProperties::new(case.fluid, ags_core::units::pa(pressure_mpa * 1e6)),
        )),
        #[cfg(not(feature = "coolprop"))]
        FluidModelDef::CoolProp { .. } => Err(AppError::Unsupported {
            message: "CoolProp fluid model requires the `coolprop` feature".to_string(),
        }),
    }
}

/// Wellbore heat loss model selected by the case.
pub fn build_heat_loss(case: &Case) -> Option<Box<dyn WellboreHeatLoss>> {
    match case.numerics.heat_loss {
        HeatLossDef::Ramey => {
            let rock = case.rock_properties();
            let geometry = case.geometry();
            Some(Box::new(RameyHeatLoss {
                depth: geometry.vertical_depth,
                diameter: geometry.vertical_diameter,
                mass_flow: case.mass_flow(),
                rock_conductivity: rock.conductivity,
                rock_diffusivity: rock.conductivity.value / rock.volumetric_heat_capacity(),
                gradient: case.rock.gradient_k_per_m,
                bottom_rock_temperature: case.initial_temperature(),
                utilization: case.operation.utilization,
            }))
        }
        HeatLossDef::Constant { drop_k } => Some(Box::new(ConstantTemperatureDrop {
            drop: TempInterval::new::<delta_kelvin>(drop_k),
        })),
        HeatLossDef::None => None,
    }
}

/// Runs cases against a fixed set of collaborators.
///
/// The database catalog is only consulted on the tabulated path, so an
/// orchestrator without one can still solve analytical cases.
pub struct Orchestrator {
    fluid: Box<dyn FluidProperties>,
    vertical: Box<dyn VerticalWellHydraulics>,
    catalog: Option<DatabaseCatalog>,
}

impl Orchestrator {
    pub fn new(fluid: Box<dyn FluidProperties>, vertical: Box<dyn VerticalWellHydraulics>) -> Self {
        Self {
            fluid,
            vertical,
            catalog: None,
        }
    }

    pub fn with_catalog(mut self, catalog: DatabaseCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Default collaborators for `case`; a relative database path is
    /// resolved against `base_dir`.
    pub fn for_case(case: &Case, base_dir: &Path) -> AppResult<Self> {
        let vertical = DarcyVerticalWells {
            friction: case.numerics.friction,
            pump_efficiency: case.operation.pump_efficiency,
        };
        let orchestrator = Self::new(build_fluid_model(case)?, Box::new(vertical));
        Ok(match &case.database {
            Some(path) => orchestrator.with_catalog(DatabaseCatalog::open(&base_dir.join(path))),
            None => orchestrator,
        })
    }

    pub fn catalog(&self) -> Option<&DatabaseCatalog> {
        self.catalog.as_ref()
    }

    /// Solve `case` over its timeline.
    pub fn calculate(&mut self, case: &Case) -> AppResult<PerformanceResult> {
        let timer = Timer::start("calculate");
        validate_case(case)
            .into_result()
            .map_err(AppError::Validation)?;
        if self.fluid.fluid() != case.fluid {
            return Err(AppError::InvalidInput(format!(
                "fluid model describes {} but the case circulates {}",
                self.fluid.fluid().key(),
                case.fluid.key()
            )));
        }

        let geometry = case.geometry();
        let initial_temperature = case.initial_temperature();
        let kind = select_solver(initial_temperature, geometry.lateral_count);
        tracing::debug!(
            case = %case.name,
            solver = %kind,
            initial_temperature_c = to_degc(initial_temperature),
            laterals = geometry.lateral_count,
            "solver selected"
        );

        let solver: Box<dyn ThermalPerformanceSolver> = match kind {
            SolverKind::Tabulated => {
                let mut report = verify(
                    &geometry,
                    case.injection_temperature(),
                    case.rock_conductivity(),
                );
                report.merge(verify_operating_point(
                    &geometry,
                    case.rock.gradient_k_per_m,
                    case.mass_flow(),
                ));
                report.into_result().map_err(AppError::Validation)?;
                let catalog = self.catalog.as_mut().ok_or_else(|| {
                    AppError::InvalidInput(
                        "case needs a performance database but none is configured".to_string(),
                    )
                })?;
                Box::new(TabulatedSolver::new(catalog.get(case.configuration, case.fluid)?))
            }
            SolverKind::Analytical => {
                let model = AnalyticalHeatConductionModel::new(
                    case.numerics.conduction.clone(),
                    case.rock_properties(),
                    case.domain_boundaries(),
                )?;
                Box::new(AnalyticalSolver::new(model, build_heat_loss(case)))
            }
        };

        let time = case.timeline.time_vector();
        let ctx = SolveContext {
            geometry,
            fluid: self.fluid.as_ref(),
            mass_flow: case.mass_flow(),
            injection_temperature: case.injection_temperature(),
            initial_temperature,
            gradient: case.rock.gradient_k_per_m,
            rock_conductivity: case.rock_conductivity(),
        };
        let ThermalOutput {
            mut temperature,
            pressure,
            injection_pressure,
            average_thermal_kw,
            average_electric_kw,
        } = solver.produced_states(&ctx, &time)?;
        apply_initial_correction(&mut temperature);

        let (pressure_drop_pa, pumping_power_w) = match (solver.kind(), &pressure, injection_pressure)
        {
            (SolverKind::Tabulated, Some(outlet), Some(p_inj)) => {
                self.tabulated_pumping(case, outlet, p_inj)?
            }
            (SolverKind::Tabulated, _, _) => {
                return Err(AppError::InvalidInput(
                    "tabulated solver returned no outlet pressure".to_string(),
                ));
            }
            (SolverKind::Analytical, _, _) => self.loop_pumping(case, &time, &temperature)?,
        };

        tracing::info!(
            case = %case.name,
            solver = %kind,
            final_temperature_c = temperature.last().map(|t| t - 273.15),
            peak_pumping_kw = pumping_power_w.iter().copied().reduce(f64::max).map(|p| p / 1e3),
            "calculation finished"
        );
        timer.stop_and_log();

        Ok(PerformanceResult {
            case_name: case.name.clone(),
            solver: kind,
            time_years: time,
            produced_temperature_k: temperature,
            outlet_pressure_pa: pressure,
            pressure_drop_pa,
            pumping_power_w,
            average_thermal_kw,
            average_electric_kw,
        })
    }

    /// Pressure lost between injection and production wellheads, converted to
    /// pump work with the injection density.
    fn tabulated_pumping(
        &self,
        case: &Case,
        outlet_pressure: &[f64],
        injection_pressure: f64,
    ) -> AppResult<(Vec<f64>, Vec<f64>)> {
        let rho = self.fluid.rho(case.injection_temperature())?.value;
        let mdot = case.mass_flow().value;
        let pressure_drop: Vec<f64> = outlet_pressure
            .iter()
            .map(|p_out| injection_pressure - p_out)
            .collect();
        let mut power: Vec<f64> = pressure_drop
            .iter()
            .map(|dp| mdot * dp / (rho * case.operation.pump_efficiency))
            .collect();
        clamp_non_negative(&mut power);
        Ok((pressure_drop, power))
    }

    /// Lateral friction plus both vertical legs.
    fn loop_pumping(
        &self,
        case: &Case,
        time: &[f64],
        temperature: &[f64],
    ) -> AppResult<(Vec<f64>, Vec<f64>)> {
        let geometry = case.geometry();
        let engine = PressureDropEngine::new(case.numerics.friction, case.operation.pump_efficiency)?;
        let section = LateralSection {
            length: geometry.lateral_length,
            diameter: geometry.lateral_diameter,
            lateral_count: geometry.lateral_count,
            total_mass_flow: case.mass_flow(),
            casing: geometry.casing,
        };
        let nonvertical = engine.compute(self.fluid.as_ref(), &section, time, temperature)?;

        let legs = VerticalLegs {
            depth: geometry.vertical_depth,
            diameter: geometry.vertical_diameter,
            total_mass_flow: case.mass_flow(),
            injection_temperature: case.injection_temperature(),
        };
        let leg_powers = self.vertical.leg_powers(self.fluid.as_ref(), &legs, temperature)?;
        let total = total_pumping_power(&nonvertical.pumping_power, &leg_powers)?;
        Ok((nonvertical.pressure_drop, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_correction_copies_second_sample() {
        let mut t = vec![500.0, 440.0, 430.0];
        apply_initial_correction(&mut t);
        assert_eq!(t, vec![440.0, 440.0, 430.0]);

        let mut single = vec![500.0];
        apply_initial_correction(&mut single);
        assert_eq!(single, vec![500.0]);
    }

    #[test]
    fn records_round_trip_through_result() {
        let result = PerformanceResult {
            case_name: "c".to_string(),
            solver: SolverKind::Tabulated,
            time_years: vec![0.0, 1.0],
            produced_temperature_k: vec![400.0, 400.0],
            outlet_pressure_pa: Some(vec![9.0e6, 9.1e6]),
            pressure_drop_pa: vec![1.0e6, 0.9e6],
            pumping_power_w: vec![3.0e4, 2.7e4],
            average_thermal_kw: Some(1500.0),
            average_electric_kw: Some(120.0),
        };
        let summary = result.summary();
        assert_eq!(summary.peak_pumping_power_w, Some(3.0e4));
        assert_eq!(summary.final_temperature_k, Some(400.0));

        let back = PerformanceResult::from_records(
            "c",
            SolverKind::Tabulated,
            &summary,
            &result.to_records(),
        );
        assert_eq!(back, result);
    }

    #[test]
    fn analytical_records_have_no_outlet_pressure() {
        let records = vec![TimeseriesRecord {
            time_years: 0.0,
            produced_temperature_k: 400.0,
            outlet_pressure_pa: None,
            pressure_drop_pa: 1.0,
            pumping_power_w: 0.0,
        }];
        let back = PerformanceResult::from_records(
            "c",
            SolverKind::Analytical,
            &RunSummary::default(),
            &records,
        );
        assert!(back.outlet_pressure_pa.is_none());
    }
}

//! Frictional pressure drop and pumping power in the nonvertical section.

use crate::error::{HydraulicsError, HydraulicsResult};
use crate::friction::{Casing, FrictionConfig, turbulent_friction_factor};
use ags_core::numeric::{LinearSeries, clamp_non_negative, ensure_finite, resample};
use ags_core::units::{Length, MassRate, k};
use ags_fluids::FluidProperties;
use std::f64::consts::PI;

/// Geometry and flow of the nonvertical (lateral) section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LateralSection {
    /// Length of each lateral.
    pub length: Length,
    pub diameter: Length,
    /// Number of parallel laterals sharing the flow.
    pub lateral_count: usize,
    /// Total circulating mass flow.
    pub total_mass_flow: MassRate,
    pub casing: Casing,
}

impl LateralSection {
    pub fn mass_flow_per_lateral(&self) -> f64 {
        self.total_mass_flow.value / self.lateral_count as f64
    }

    fn validate(&self) -> HydraulicsResult<()> {
        if self.lateral_count == 0 {
            return Err(HydraulicsError::InvalidArg {
                what: "lateral count must be at least one",
            });
        }
        for (value, what) in [
            (self.length.value, "lateral length must be positive"),
            (self.diameter.value, "lateral diameter must be positive"),
            (self.total_mass_flow.value, "mass flow must be positive"),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(HydraulicsError::InvalidArg { what });
            }
        }
        Ok(())
    }
}

/// Darcy-Weisbach pressure drop along one lateral.
pub fn darcy_weisbach_drop(
    mass_flow: f64,
    density: f64,
    viscosity: f64,
    length: f64,
    diameter: f64,
    casing: Casing,
    config: &FrictionConfig,
) -> HydraulicsResult<f64> {
    let area = PI * diameter * diameter / 4.0;
    let velocity = mass_flow / (density * area);
    let reynolds = ensure_finite(
        4.0 * mass_flow / (viscosity * PI * diameter),
        "Reynolds number",
    )?;
    let f = turbulent_friction_factor(reynolds, casing.relative_roughness(diameter), config);
    Ok(ensure_finite(
        f.value * length / diameter * 0.5 * density * velocity * velocity,
        "pressure drop",
    )?)
}

/// Pressure drop and pumping power on the simulation time grid.
#[derive(Debug, Clone, PartialEq)]
pub struct PressureDropSeries {
    /// Years at which the pressure drop was evaluated.
    pub yearly_time: Vec<f64>,
    /// Pa, one entry per `yearly_time`.
    pub yearly_pressure_drop: Vec<f64>,
    /// Pa, on the simulation grid.
    pub pressure_drop: Vec<f64>,
    /// W, on the simulation grid, never negative.
    pub pumping_power: Vec<f64>,
}

/// Nonvertical pressure drop engine.
#[derive(Debug, Clone, PartialEq)]
pub struct PressureDropEngine {
    pub friction: FrictionConfig,
    /// Pump efficiency in (0, 1].
    pub pump_efficiency: f64,
}

impl Default for PressureDropEngine {
    fn default() -> Self {
        Self {
            friction: FrictionConfig::default(),
            pump_efficiency: 0.75,
        }
    }
}

impl PressureDropEngine {
    pub fn new(friction: FrictionConfig, pump_efficiency: f64) -> HydraulicsResult<Self> {
        if !(pump_efficiency > 0.0 && pump_efficiency <= 1.0) {
            return Err(HydraulicsError::InvalidArg {
                what: "pump efficiency must be in (0, 1]",
            });
        }
        Ok(Self {
            friction,
            pump_efficiency,
        })
    }

    /// Evaluate the lateral pressure drop once per simulated year at that
    /// year's produced temperature, then resample to `time` with linear
    /// interpolation (linear extrapolation past the last whole year).
    ///
    /// `time` is in years and `produced_temperature` in kelvin, one entry
    /// per time sample.
    pub fn compute(
        &self,
        fluid: &dyn FluidProperties,
        section: &LateralSection,
        time: &[f64],
        produced_temperature: &[f64],
    ) -> HydraulicsResult<PressureDropSeries> {
        section.validate()?;
        if time.len() != produced_temperature.len() || time.len() < 2 {
            return Err(HydraulicsError::InvalidArg {
                what: "time and temperature series must match and hold at least two samples",
            });
        }

        let horizon = time[time.len() - 1];
        let whole_years = horizon.floor().max(0.0) as usize;
        let yearly_time: Vec<f64> = if whole_years >= 2 {
            (0..whole_years).map(|y| y as f64).collect()
        } else {
            time.to_vec()
        };

        let produced = LinearSeries::new(time, produced_temperature)?;
        let per_lateral = section.mass_flow_per_lateral();
        let mut yearly_pressure_drop = Vec::with_capacity(yearly_time.len());
        let mut yearly_density = Vec::with_capacity(yearly_time.len());
        for &year in &yearly_time {
            let t = k(produced.eval(year)?);
            let rho = fluid.rho(t)?.value;
            let mu = fluid.mu(t)?.value;
            yearly_pressure_drop.push(darcy_weisbach_drop(
                per_lateral,
                rho,
                mu,
                section.length.value,
                section.diameter.value,
                section.casing,
                &self.friction,
            )?);
            yearly_density.push(rho);
        }

        let pressure_drop = resample(time, &yearly_time, &yearly_pressure_drop)?;
        let density = resample(time, &yearly_time, &yearly_density)?;
        let mut pumping_power: Vec<f64> = pressure_drop
            .iter()
            .zip(&density)
            .map(|(dp, rho)| section.total_mass_flow.value * dp / (rho * self.pump_efficiency))
            .collect();
        clamp_non_negative(&mut pumping_power);

        tracing::debug!(
            years = yearly_time.len(),
            first_dp_pa = yearly_pressure_drop.first().copied(),
            last_dp_pa = yearly_pressure_drop.last().copied(),
            "nonvertical pressure drop evaluated"
        );

        Ok(PressureDropSeries {
            yearly_time,
            yearly_pressure_drop,
            pressure_drop,
            pumping_power,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ags_core::numeric::linspace;
    use ags_core::units::{kgps, m};
    use ags_fluids::TabulatedFluid;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn section(flow: f64) -> LateralSection {
        LateralSection {
            length: m(3000.0),
            diameter: m(0.3),
            lateral_count: 1,
            total_mass_flow: kgps(flow),
            casing: Casing::Cased,
        }
    }

    fn grid() -> (Vec<f64>, Vec<f64>) {
        let time = linspace(0.0, 30.0, 121);
        let temps = time.iter().map(|t| 473.15 - 2.0 * t).collect();
        (time, temps)
    }

    #[test]
    fn doubling_flow_roughly_quadruples_drop() {
        let engine = PressureDropEngine::default();
        let water = TabulatedFluid::water();
        let (time, temps) = grid();
        let low = engine.compute(&water, &section(20.0), &time, &temps).unwrap();
        let high = engine.compute(&water, &section(40.0), &time, &temps).unwrap();
        let ratio = high.pressure_drop[10] / low.pressure_drop[10];
        // Turbulent friction falls slightly with Re, so the ratio sits just
        // under four.
        assert!(ratio > 3.5 && ratio < 4.0, "ratio = {ratio}");
    }

    #[test]
    fn yearly_values_are_resampled_onto_grid() {
        let engine = PressureDropEngine::default();
        let water = TabulatedFluid::water();
        let (time, temps) = grid();
        let out = engine.compute(&water, &section(30.0), &time, &temps).unwrap();
        assert_eq!(out.yearly_time.len(), 30);
        assert_eq!(out.pressure_drop.len(), time.len());
        // Grid index 4 is exactly one year.
        assert_relative_eq!(out.pressure_drop[4], out.yearly_pressure_drop[1], max_relative = 1e-12);
    }

    #[test]
    fn laterals_share_flow() {
        let engine = PressureDropEngine::default();
        let water = TabulatedFluid::water();
        let (time, temps) = grid();
        let single = engine.compute(&water, &section(20.0), &time, &temps).unwrap();
        let split = LateralSection {
            lateral_count: 2,
            ..section(40.0)
        };
        let double = engine.compute(&water, &split, &time, &temps).unwrap();
        assert_relative_eq!(double.pressure_drop[8], single.pressure_drop[8], max_relative = 1e-12);
        assert_relative_eq!(
            double.pumping_power[8],
            2.0 * single.pumping_power[8],
            max_relative = 1e-9
        );
    }

    #[test]
    fn rejects_zero_laterals_and_bad_efficiency() {
        let engine = PressureDropEngine::default();
        let water = TabulatedFluid::water();
        let (time, temps) = grid();
        let bad = LateralSection {
            lateral_count: 0,
            ..section(20.0)
        };
        assert!(engine.compute(&water, &bad, &time, &temps).is_err());
        assert!(PressureDropEngine::new(FrictionConfig::default(), 0.0).is_err());
    }

    proptest! {
        #[test]
        fn pumping_power_never_negative(flow in 5.0f64..300.0, t_c in 40.0f64..300.0) {
            let engine = PressureDropEngine::default();
            let water = TabulatedFluid::water();
            let time = linspace(0.0, 5.0, 21);
            let temps = vec![t_c + 273.15; time.len()];
            let out = engine.compute(&water, &section(flow), &time, &temps).unwrap();
            prop_assert!(out.pumping_power.iter().all(|p| *p >= 0.0));
        }
    }
}

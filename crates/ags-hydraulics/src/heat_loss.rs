//! Heat loss in the production well between the lateral outlet and surface.

use crate::error::{HydraulicsError, HydraulicsResult};
use ags_core::units::constants::SECONDS_PER_YEAR;
use ags_core::units::{Length, MassRate, TempInterval, Temperature, ThermalConductivity, k};
use ags_fluids::FluidProperties;
use std::f64::consts::PI;

/// Maps bottom-hole temperatures to produced (wellhead) temperatures.
pub trait WellboreHeatLoss {
    /// `bottom_temperature` in kelvin, one entry per `time` sample [years].
    fn produced_temperature(
        &self,
        fluid: &dyn FluidProperties,
        time: &[f64],
        bottom_temperature: &[f64],
    ) -> HydraulicsResult<Vec<f64>>;
}

/// Ramey's transient wellbore heat transmission model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RameyHeatLoss {
    pub depth: Length,
    pub diameter: Length,
    /// Flow in one production well.
    pub mass_flow: MassRate,
    pub rock_conductivity: ThermalConductivity,
    /// Rock thermal diffusivity [m²/s].
    pub rock_diffusivity: f64,
    /// Geothermal gradient [K/m].
    pub gradient: f64,
    /// Undisturbed rock temperature at `depth`.
    pub bottom_rock_temperature: Temperature,
    /// Fraction of the year the well flows.
    pub utilization: f64,
}

impl RameyHeatLoss {
    /// Ramey's dimensionless time function `f(t)` for each sample; the first
    /// sample reuses the second time so start-up stays finite.
    fn time_function(&self, time: &[f64]) -> Vec<f64> {
        let radius = 0.5 * self.diameter.value;
        let f = |years: f64| {
            let seconds = years * SECONDS_PER_YEAR * self.utilization;
            -(1.1 * radius / (4.0 * self.rock_diffusivity * seconds).sqrt()).ln() - 0.29
        };
        time.iter()
            .enumerate()
            .map(|(i, &t)| {
                if i == 0 && time.len() > 1 {
                    f(time[1])
                } else {
                    f(t)
                }
            })
            .collect()
    }
}

impl WellboreHeatLoss for RameyHeatLoss {
    fn produced_temperature(
        &self,
        fluid: &dyn FluidProperties,
        time: &[f64],
        bottom_temperature: &[f64],
    ) -> HydraulicsResult<Vec<f64>> {
        if time.len() != bottom_temperature.len() {
            return Err(HydraulicsError::InvalidArg {
                what: "time and temperature series must match",
            });
        }
        if !(self.rock_diffusivity > 0.0 && self.utilization > 0.0 && self.mass_flow.value > 0.0) {
            return Err(HydraulicsError::InvalidArg {
                what: "diffusivity, utilization and flow must be positive",
            });
        }

        let depth = self.depth.value;
        let t_rock = self.bottom_rock_temperature.value;
        let g = self.gradient;

        self.time_function(time)
            .into_iter()
            .zip(bottom_temperature)
            .map(|(framey, &t_res)| {
                let cp = fluid.cp(k(t_res))?;
                let a = self.mass_flow.value * cp * framey / (2.0 * PI * self.rock_conductivity.value);
                let drop = -((t_rock - t_res) - g * (depth - a)
                    + (t_res - g * a - t_rock) * (-depth / a).exp());
                Ok(t_res - drop)
            })
            .collect()
    }
}

/// Fixed temperature loss between bottom hole and surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantTemperatureDrop {
    pub drop: TempInterval,
}

impl WellboreHeatLoss for ConstantTemperatureDrop {
    fn produced_temperature(
        &self,
        _fluid: &dyn FluidProperties,
        time: &[f64],
        bottom_temperature: &[f64],
    ) -> HydraulicsResult<Vec<f64>> {
        if time.len() != bottom_temperature.len() {
            return Err(HydraulicsError::InvalidArg {
                what: "time and temperature series must match",
            });
        }
        Ok(bottom_temperature.iter().map(|t| t - self.drop.value).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ags_core::units::{degc, kgps, m, w_per_m_k};
    use ags_fluids::TabulatedFluid;
    use uom::si::temperature_interval::kelvin as dk;

    fn ramey(flow: f64) -> RameyHeatLoss {
        RameyHeatLoss {
            depth: m(3000.0),
            diameter: m(0.3),
            mass_flow: kgps(flow),
            rock_conductivity: w_per_m_k(3.0),
            rock_diffusivity: 1.4e-6,
            gradient: 0.05,
            bottom_rock_temperature: degc(165.0),
            utilization: 0.9,
        }
    }

    #[test]
    fn fluid_cools_on_the_way_up() {
        let water = TabulatedFluid::water();
        let time = [0.0, 1.0, 10.0, 30.0];
        let bottom = [438.15; 4];
        let out = ramey(40.0).produced_temperature(&water, &time, &bottom).unwrap();
        for t in &out {
            assert!(*t < 438.15 && *t > 288.15, "t = {t}");
        }
        // The wellbore warms up, so losses shrink with time.
        assert!(out[3] > out[1]);
        assert_eq!(out[0], out[1]);
    }

    #[test]
    fn faster_flow_loses_less() {
        let water = TabulatedFluid::water();
        let time = [0.0, 5.0];
        let bottom = [438.15; 2];
        let slow = ramey(10.0).produced_temperature(&water, &time, &bottom).unwrap();
        let fast = ramey(80.0).produced_temperature(&water, &time, &bottom).unwrap();
        assert!(fast[1] > slow[1]);
    }

    #[test]
    fn constant_drop_subtracts() {
        let water = TabulatedFluid::water();
        let loss = ConstantTemperatureDrop {
            drop: TempInterval::new::<dk>(5.0),
        };
        let out = loss.produced_temperature(&water, &[0.0, 1.0], &[400.0, 390.0]).unwrap();
        assert_eq!(out, vec![395.0, 385.0]);
    }
}

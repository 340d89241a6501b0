//! Tabulated closed-loop performance database.

use crate::axes::{IndependentVariableAxes, QueryPoint};
use crate::channel::{CompressedChannel, valid_mask};
use crate::container::ContainerSource;
use crate::error::{DatabaseError, DatabaseResult};
use crate::interp::GridInterpolator;
use ags_core::timing::Timer;
use ags_core::units::constants::{DAYS_PER_YEAR, SECONDS_PER_DAY};
use ags_core::units::{Pressure, Temperature, k, pa};
use ags_fluids::WorkingFluid;
use ndarray::ArrayD;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed-loop wellbore layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Configuration {
    /// Concentric injection annulus and production tubing.
    #[serde(rename = "coaxial")]
    Coaxial,
    /// Separate injection and production wells joined by laterals.
    #[serde(rename = "utube")]
    ULoop,
}

impl Configuration {
    pub const ALL: [Configuration; 2] = [Configuration::Coaxial, Configuration::ULoop];

    /// Group key used in database containers.
    pub fn key(self) -> &'static str {
        match self {
            Configuration::Coaxial => "coaxial",
            Configuration::ULoop => "utube",
        }
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Configuration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "coaxial" => Ok(Configuration::Coaxial),
            "utube" | "u-loop" | "uloop" => Ok(Configuration::ULoop),
            other => Err(format!("unknown configuration '{other}'")),
        }
    }
}

/// Aggregate energy channel of the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerChannel {
    Thermal,
    Electric,
}

/// Produced-fluid states along the database time axis.
#[derive(Debug, Clone, PartialEq)]
pub struct OutletStates {
    /// Years.
    pub time: Vec<f64>,
    /// Kelvin.
    pub temperature: Vec<f64>,
    /// Pascal.
    pub pressure: Vec<f64>,
}

/// One (configuration, fluid) slice of the precomputed simulation results.
///
/// Immutable after loading.
#[derive(Debug)]
pub struct PerformanceDatabase {
    configuration: Configuration,
    fluid: WorkingFluid,
    axes: IndependentVariableAxes,
    injection_pressure: f64,
    ambient_temperature: f64,
    valid_runs: usize,
    outlet_temperature: GridInterpolator,
    outlet_pressure: GridInterpolator,
    thermal_energy: GridInterpolator,
    electric_energy: GridInterpolator,
}

impl PerformanceDatabase {
    /// Load and decompress the `{configuration}/{fluid}` slice of `source`.
    pub fn load(
        source: &dyn ContainerSource,
        configuration: Configuration,
        fluid: WorkingFluid,
    ) -> DatabaseResult<Self> {
        let timer = Timer::start("database_load");
        let case = configuration.key();
        let prefix = format!("{case}/{}", fluid.key());

        let scalar = |name: &str| -> DatabaseResult<f64> {
            let path = format!("{case}/fixed_params/{name}");
            source.dataset(&path)?.as_scalar(&path)
        };
        let injection_pressure = scalar("Pinj")?;
        let ambient_temperature = scalar("Tamb")?;

        let axes = IndependentVariableAxes::load(source, &format!("{prefix}/input"))?;
        let parameter_shape = axes.parameter_shape();

        let aggregate = |name: &str| -> DatabaseResult<ArrayD<f64>> {
            let path = format!("{prefix}/output/{name}");
            let array = source.dataset(&path)?.into_array(&path)?;
            if array.shape() != parameter_shape.as_slice() {
                return Err(DatabaseError::load(
                    path,
                    format!(
                        "shape {:?} does not match axes {:?}",
                        array.shape(),
                        parameter_shape
                    ),
                ));
            }
            Ok(array)
        };
        let wt = aggregate("Wt")?;
        let we = aggregate("We")?;
        let valid = valid_mask(&we);
        let valid_runs = valid.iter().filter(|v| **v).count();

        let channel = |name: &str| -> DatabaseResult<ArrayD<f64>> {
            let path = format!("{prefix}/output/{name}");
            let compressed = CompressedChannel::load(source, &path)?;
            if compressed.time_samples() != axes.time().len() {
                return Err(DatabaseError::load(
                    path,
                    format!(
                        "{} time samples, time axis has {}",
                        compressed.time_samples(),
                        axes.time().len()
                    ),
                ));
            }
            compressed
                .decompress(&parameter_shape, &valid)
                .map_err(|e| DatabaseError::load(path, e.to_string()))
        };
        let tout = channel("Tout")?;
        let pout = channel("Pout")?;

        let outlet_temperature = GridInterpolator::new(axes.full_grid(), tout)?;
        let outlet_pressure = GridInterpolator::new(axes.full_grid(), pout)?;
        let thermal_energy = GridInterpolator::new(axes.parameter_grid(), wt)?;
        let electric_energy = GridInterpolator::new(axes.parameter_grid(), we)?;

        tracing::debug!(
            configuration = %configuration,
            fluid = %fluid,
            shape = ?axes.full_shape(),
            valid_runs,
            combinations = axes.combination_count(),
            "performance database loaded"
        );
        timer.stop_and_log();

        Ok(Self {
            configuration,
            fluid,
            axes,
            injection_pressure,
            ambient_temperature,
            valid_runs,
            outlet_temperature,
            outlet_pressure,
            thermal_energy,
            electric_energy,
        })
    }

    pub fn configuration(&self) -> Configuration {
        self.configuration
    }

    pub fn fluid(&self) -> WorkingFluid {
        self.fluid
    }

    pub fn axes(&self) -> &IndependentVariableAxes {
        &self.axes
    }

    /// Number of parameter combinations with a successful upstream run.
    pub fn valid_runs(&self) -> usize {
        self.valid_runs
    }

    /// Fixed injection pressure the database was generated with.
    pub fn injection_pressure(&self) -> Pressure {
        pa(self.injection_pressure)
    }

    /// Fixed ambient temperature the database was generated with.
    pub fn ambient_temperature(&self) -> Temperature {
        k(self.ambient_temperature)
    }

    /// Outlet temperature and pressure at `point` for every database time
    /// sample.
    ///
    /// Fails with `OutOfRange` if any coordinate lies outside its axis.
    /// Samples touching a failed upstream run come back as NaN.
    pub fn interp_outlet_states(&self, point: &QueryPoint) -> DatabaseResult<OutletStates> {
        self.axes.check_bounds(point)?;

        let mut coords = [0.0; 8];
        coords[..7].copy_from_slice(&point.as_array());

        let time = self.axes.time().to_vec();
        let mut temperature = Vec::with_capacity(time.len());
        let mut pressure = Vec::with_capacity(time.len());
        for &t in &time {
            coords[7] = t;
            temperature.push(self.outlet_temperature.eval(&coords)?);
            pressure.push(self.outlet_pressure.eval(&coords)?);
        }

        Ok(OutletStates {
            time,
            temperature,
            pressure,
        })
    }

    /// Lifetime-average power [kW] at `point` from the aggregate energy
    /// tables (GWh over the database time horizon).
    pub fn interp_average_power(&self, point: &QueryPoint, channel: PowerChannel) -> DatabaseResult<f64> {
        self.axes.check_bounds(point)?;
        let coords = point.as_array();
        let energy_gwh = match channel {
            PowerChannel::Thermal => self.thermal_energy.eval(&coords)?,
            PowerChannel::Electric => self.electric_energy.eval(&coords)?,
        };
        let horizon_years = self.axes.time()[self.axes.time().len() - 1];
        Ok(average_power_kw(energy_gwh, horizon_years))
    }
}

/// Average power [kW] delivering `energy_gwh` over `years`.
pub fn average_power_kw(energy_gwh: f64, years: f64) -> f64 {
    energy_gwh * 1e6 * 3.6e6 / (1000.0 * years * SECONDS_PER_DAY * DAYS_PER_YEAR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn database_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PerformanceDatabase>();
    }

    #[test]
    fn configuration_keys_round_trip() {
        for c in Configuration::ALL {
            assert_eq!(c.key().parse::<Configuration>().unwrap(), c);
        }
        assert!("spiral".parse::<Configuration>().is_err());
    }

    #[test]
    fn average_power_of_one_gwh_per_year() {
        // 1 GWh spread over one 365-day year.
        assert_relative_eq!(average_power_kw(1.0, 1.0), 1e6 / 8760.0, max_relative = 1e-12);
    }
}

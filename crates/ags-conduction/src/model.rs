//! Semi-analytical conduction model for a closed-loop lateral.
//!
//! The rock around a lateral is treated as an infinite line of point sources
//! in a medium bounded by periodic image planes: half the lateral spacing
//! across (`y`) and a configurable half-height (`z`). The time-integrated
//! kernel is evaluated in Laplace space, turned into an effective transit
//! time for the circulating fluid, and inverted with Stehfest's algorithm.
//!
//! Internally time is in days, diffusivity in m²/day and the Laplace
//! variable in 1/day.

use crate::chebyshev::chebyshev_quadrature;
use crate::config::ConductionConfig;
use crate::error::{ConductionError, ConductionResult};
use crate::images::image_sum;
use crate::stehfest::{stehfest_invert_with, stehfest_weights};
use ags_core::units::constants::{DAYS_PER_YEAR, SECONDS_PER_DAY};
use ags_core::units::{Density, Length, MassRate, SpecHeatCapacity, Temperature, ThermalConductivity};

/// Thermal properties of the host rock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RockProperties {
    pub density: Density,
    /// J/(kg·K).
    pub heat_capacity: SpecHeatCapacity,
    pub conductivity: ThermalConductivity,
}

impl RockProperties {
    /// Volumetric heat capacity ρc [J/(m³·K)].
    pub fn volumetric_heat_capacity(&self) -> f64 {
        self.density.value * self.heat_capacity
    }

    /// Thermal diffusivity [m²/day].
    pub fn diffusivity_per_day(&self) -> f64 {
        self.conductivity.value / self.volumetric_heat_capacity() * SECONDS_PER_DAY
    }
}

/// Distances from the lateral axis to the image planes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainBoundaries {
    /// Half the horizontal spacing between neighbouring laterals.
    pub half_spacing: Length,
    /// Vertical half-height of the heated rock slab.
    pub half_height: Length,
}

/// Operating state of one lateral.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LateralBranch {
    /// Nonvertical length of the lateral.
    pub length: Length,
    /// Mass flow through this lateral.
    pub mass_flow: MassRate,
    /// Fluid heat capacity, J/(kg·K).
    pub fluid_cp: SpecHeatCapacity,
    pub injection_temperature: Temperature,
    /// Undisturbed rock temperature at lateral depth.
    pub initial_temperature: Temperature,
    pub wellbore_radius: Length,
}

/// Laplace-space conduction model with cached Stehfest weights.
#[derive(Debug, Clone)]
pub struct AnalyticalHeatConductionModel {
    config: ConductionConfig,
    rock: RockProperties,
    boundaries: DomainBoundaries,
    weights: Vec<f64>,
}

impl AnalyticalHeatConductionModel {
    pub fn new(
        config: ConductionConfig,
        rock: RockProperties,
        boundaries: DomainBoundaries,
    ) -> ConductionResult<Self> {
        config.validate()?;
        if !(rock.volumetric_heat_capacity() > 0.0 && rock.conductivity.value > 0.0) {
            return Err(ConductionError::InvalidArg {
                what: "rock density, heat capacity and conductivity must be positive",
            });
        }
        if !(boundaries.half_spacing.value > 0.0 && boundaries.half_height.value > 0.0) {
            return Err(ConductionError::InvalidArg {
                what: "domain boundaries must be positive",
            });
        }
        let weights = stehfest_weights(config.stehfest_samples)?;
        Ok(Self {
            config,
            rock,
            boundaries,
            weights,
        })
    }

    pub fn config(&self) -> &ConductionConfig {
        &self.config
    }

    pub fn rock(&self) -> &RockProperties {
        &self.rock
    }

    /// Image-series sum along one axis, with the model's truncation settings.
    pub fn image_sum(&self, offset: f64, boundary_separation: f64, time_days: f64) -> f64 {
        image_sum(
            offset,
            boundary_separation,
            self.rock.diffusivity_per_day(),
            time_days,
            self.config.truncation_tolerance,
            self.config.max_images,
        )
    }

    /// Damped point-source kernel `1/(4ρc) · θ_y · θ_z · e^(-s t)` for an
    /// observer at `(dy, dz)` from the source [m].
    pub fn point_source_kernel(&self, dy: f64, dz: f64, s: f64, time_days: f64) -> f64 {
        let theta_y = self.image_sum(dy, self.boundaries.half_spacing.value, time_days);
        let theta_z = self.image_sum(dz, self.boundaries.half_height.value, time_days);
        theta_y * theta_z * (-s * time_days).exp() / (4.0 * self.rock.volumetric_heat_capacity())
    }

    /// Late-time plateau of the undamped kernel.
    fn kernel_plateau(&self) -> f64 {
        1.0 / (4.0 * self.rock.volumetric_heat_capacity())
            / (2.0 * self.boundaries.half_spacing.value)
            / (2.0 * self.boundaries.half_height.value)
    }

    /// `∫_0^∞ kernel dt`: decade-wise Chebyshev quadrature plus the
    /// closed-form tail beyond the last decade.
    pub fn chebyshev_integral(&self, dy: f64, dz: f64, s: f64) -> f64 {
        let nodes = self.config.chebyshev_nodes;
        let mut total = 0.0;
        for n in self.config.first_decade..=self.config.last_decade {
            let a = 10f64.powi(n);
            let b = 10f64.powi(n + 1);
            total += chebyshev_quadrature(a, b, nodes, |t| self.point_source_kernel(dy, dz, s, t));
        }
        let tail_start = self.config.tail_start_days();
        let tail_end = self.config.tail_end_days;
        total + self.kernel_plateau() * ((-s * tail_start).exp() - (-s * tail_end).exp()) / s
    }

    /// Effective fluid transit time [days] through `branch` at Laplace
    /// parameter `s`.
    pub fn transit_time(&self, s: f64, branch: &LateralBranch) -> f64 {
        let g = self.chebyshev_integral(0.0, branch.wellbore_radius.value, s);
        branch.length.value / (branch.mass_flow.value * branch.fluid_cp * SECONDS_PER_DAY * s * g)
    }

    /// Laplace transform of the outlet temperature drawdown.
    pub fn laplace_domain_response(&self, s: f64, branch: &LateralBranch) -> ConductionResult<f64> {
        if !(s > 0.0 && s.is_finite()) {
            return Err(ConductionError::InvalidArg {
                what: "Laplace parameter must be positive and finite",
            });
        }
        let delta_t = branch.initial_temperature.value - branch.injection_temperature.value;
        Ok(delta_t / s * (-s * self.transit_time(s, branch)).exp())
    }

    /// Outlet temperature [K] of `branch` after `time_days` of operation,
    /// inverted with `sample_count` Stehfest terms.
    pub fn invert_laplace(
        &self,
        sample_count: usize,
        branch: &LateralBranch,
        time_days: f64,
    ) -> ConductionResult<f64> {
        validate_branch(branch)?;
        let response = |s: f64| self.laplace_domain_response(s, branch);
        let drawdown = if sample_count == self.config.stehfest_samples {
            stehfest_invert_with(response, time_days, &self.weights)?
        } else {
            stehfest_invert_with(response, time_days, &stehfest_weights(sample_count)?)?
        };
        if !drawdown.is_finite() {
            return Err(ConductionError::NonFinite {
                what: "outlet temperature drawdown",
                value: drawdown,
            });
        }
        Ok(branch.initial_temperature.value - drawdown)
    }

    /// Outlet temperature [K] at each time [years] with the configured
    /// sample count. Times at or before start-up return the rock temperature.
    pub fn outlet_temperatures(
        &self,
        branch: &LateralBranch,
        times_years: &[f64],
    ) -> ConductionResult<Vec<f64>> {
        let samples = self.config.stehfest_samples;
        let temperatures = times_years
            .iter()
            .map(|&years| {
                if years <= 0.0 {
                    Ok(branch.initial_temperature.value)
                } else {
                    self.invert_laplace(samples, branch, years * DAYS_PER_YEAR)
                }
            })
            .collect::<ConductionResult<Vec<f64>>>()?;

        tracing::debug!(
            samples = times_years.len(),
            first_k = temperatures.first().copied(),
            last_k = temperatures.last().copied(),
            "analytical outlet temperatures evaluated"
        );
        Ok(temperatures)
    }
}

fn validate_branch(branch: &LateralBranch) -> ConductionResult<()> {
    let positive = [
        (branch.length.value, "lateral length must be positive"),
        (branch.mass_flow.value, "lateral mass flow must be positive"),
        (branch.fluid_cp, "fluid heat capacity must be positive"),
        (branch.wellbore_radius.value, "wellbore radius must be positive"),
    ];
    for (value, what) in positive {
        if !(value.is_finite() && value > 0.0) {
            return Err(ConductionError::InvalidArg { what });
        }
    }
    Ok(())
}

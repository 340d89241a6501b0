//! Input range checks.
//!
//! Checks never abort: every violation is collected into a
//! [`ValidationReport`] so callers can show all problems at once.

use crate::case::{Case, LATEST_VERSION, WellGeometry};
use ags_core::units::{MassRate, Temperature, ThermalConductivity, to_degc};
use std::fmt;

/// Lateral length range of the tabulated simulations [m].
pub const LATERAL_LENGTH_RANGE: (f64, f64) = (1000.0, 20000.0);
/// Injection temperature range [°C].
pub const INJECTION_TEMPERATURE_RANGE: (f64, f64) = (30.0, 60.0);
/// Rock thermal conductivity range [W/(m·K)].
pub const ROCK_CONDUCTIVITY_RANGE: (f64, f64) = (1.5, 4.5);
/// Vertical depth range [m].
pub const VERTICAL_DEPTH_RANGE: (f64, f64) = (1000.0, 5000.0);
/// Geothermal gradient range [K/m].
pub const GRADIENT_RANGE: (f64, f64) = (0.03, 0.07);
/// Wellbore diameter range [m].
pub const DIAMETER_RANGE: (f64, f64) = (0.2159, 0.4445);
/// Total mass flow range [kg/s].
pub const MASS_FLOW_RANGE: (f64, f64) = (5.0, 300.0);

/// A single input problem.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    Invalid {
        field: &'static str,
        reason: String,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "{field} = {value} is outside [{min}, {max}]"),
            Violation::Invalid { field, reason } => write!(f, "{field}: {reason}"),
        }
    }
}

/// Every violation found by a check.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn check_range(&mut self, field: &'static str, value: f64, (min, max): (f64, f64)) {
        if !(min..=max).contains(&value) {
            self.violations.push(Violation::OutOfRange {
                field,
                value,
                min,
                max,
            });
        }
    }

    fn check_positive(&mut self, field: &'static str, value: f64) {
        if !(value.is_finite() && value > 0.0) {
            self.violations.push(Violation::Invalid {
                field,
                reason: format!("must be positive, got {value}"),
            });
        }
    }

    pub fn merge(&mut self, other: ValidationReport) {
        self.violations.extend(other.violations);
    }

    /// The report as a `Result`, for callers that stop on any violation.
    pub fn into_result(self) -> Result<(), ValidationReport> {
        if self.is_ok() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.violations.is_empty() {
            return f.write_str("no violations");
        }
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

/// Range checks on the inputs the tabulated simulations were run over:
/// lateral length, injection temperature and rock conductivity.
pub fn verify(
    geometry: &WellGeometry,
    injection_temperature: Temperature,
    rock_conductivity: ThermalConductivity,
) -> ValidationReport {
    let mut report = ValidationReport::default();
    report.check_range(
        "lateral_length_m",
        geometry.lateral_length.value,
        LATERAL_LENGTH_RANGE,
    );
    report.check_range(
        "injection_temperature_c",
        to_degc(injection_temperature),
        INJECTION_TEMPERATURE_RANGE,
    );
    report.check_range(
        "conductivity_w_m_k",
        rock_conductivity.value,
        ROCK_CONDUCTIVITY_RANGE,
    );
    report
}

/// Remaining tabulated axis bounds: depth, gradient, diameter and flow.
pub fn verify_operating_point(
    geometry: &WellGeometry,
    gradient: f64,
    mass_flow: MassRate,
) -> ValidationReport {
    let mut report = ValidationReport::default();
    report.check_range(
        "vertical_depth_m",
        geometry.vertical_depth.value,
        VERTICAL_DEPTH_RANGE,
    );
    report.check_range("gradient_k_per_m", gradient, GRADIENT_RANGE);
    report.check_range(
        "lateral_diameter_m",
        geometry.lateral_diameter.value,
        DIAMETER_RANGE,
    );
    report.check_range("mass_flow_kg_s", mass_flow.value, MASS_FLOW_RANGE);
    report
}

/// Structural checks every case must pass, whichever path solves it.
pub fn validate_case(case: &Case) -> ValidationReport {
    let mut report = ValidationReport::default();

    if case.version > LATEST_VERSION {
        report.violations.push(Violation::Invalid {
            field: "version",
            reason: format!("unsupported version {}", case.version),
        });
    }
    if case.name.trim().is_empty() {
        report.violations.push(Violation::Invalid {
            field: "name",
            reason: "must not be empty".to_string(),
        });
    }

    let well = &case.well;
    report.check_positive("vertical_depth_m", well.vertical_depth_m);
    report.check_positive("lateral_length_m", well.lateral_length_m);
    report.check_positive("lateral_diameter_m", well.lateral_diameter_m);
    if let Some(d) = well.vertical_diameter_m {
        report.check_positive("vertical_diameter_m", d);
    }
    report.check_positive("lateral_spacing_m", well.lateral_spacing_m);
    if well.lateral_count == 0 {
        report.violations.push(Violation::Invalid {
            field: "lateral_count",
            reason: "at least one lateral is required".to_string(),
        });
    }

    let op = &case.operation;
    report.check_positive("mass_flow_kg_s", op.mass_flow_kg_s);
    if !(op.pump_efficiency > 0.0 && op.pump_efficiency <= 1.0) {
        report.violations.push(Violation::Invalid {
            field: "pump_efficiency",
            reason: format!("must be in (0, 1], got {}", op.pump_efficiency),
        });
    }
    if !(op.utilization > 0.0 && op.utilization <= 1.0) {
        report.violations.push(Violation::Invalid {
            field: "utilization",
            reason: format!("must be in (0, 1], got {}", op.utilization),
        });
    }
    let t_init = to_degc(case.initial_temperature());
    if op.injection_temperature_c >= t_init {
        report.violations.push(Violation::Invalid {
            field: "injection_temperature_c",
            reason: format!("must be below the rock temperature {t_init:.1} °C"),
        });
    }

    let rock = &case.rock;
    report.check_positive("gradient_k_per_m", rock.gradient_k_per_m);
    report.check_positive("conductivity_w_m_k", rock.conductivity_w_m_k);
    report.check_positive("density_kg_m3", rock.density_kg_m3);
    report.check_positive("heat_capacity_j_kg_k", rock.heat_capacity_j_kg_k);
    report.check_positive("slab_half_height_m", rock.slab_half_height_m);

    if case.timeline.plant_lifetime_years == 0 || case.timeline.timesteps_per_year == 0 {
        report.violations.push(Violation::Invalid {
            field: "timeline",
            reason: "lifetime and timesteps per year must be at least one".to_string(),
        });
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use ags_core::units::{degc, m, w_per_m_k};
    use ags_database::Configuration;
    use ags_hydraulics::Casing;

    fn geometry(lateral_length: f64) -> WellGeometry {
        WellGeometry {
            vertical_depth: m(3000.0),
            lateral_length: m(lateral_length),
            lateral_count: 1,
            lateral_diameter: m(0.35),
            vertical_diameter: m(0.35),
            casing: Casing::Cased,
            configuration: Configuration::Coaxial,
            lateral_spacing: m(100.0),
        }
    }

    #[test]
    fn in_range_inputs_pass() {
        let report = verify(&geometry(5000.0), degc(40.0), w_per_m_k(3.0));
        assert!(report.is_ok());
        assert_eq!(report.to_string(), "no violations");
    }

    #[test]
    fn every_violation_is_listed() {
        let report = verify(&geometry(25000.0), degc(80.0), w_per_m_k(1.0));
        assert_eq!(report.len(), 3);
        let text = report.to_string();
        assert!(text.contains("lateral_length_m"));
        assert!(text.contains("injection_temperature_c"));
        assert!(text.contains("conductivity_w_m_k"));
    }

    #[test]
    fn range_ends_are_inclusive() {
        let report = verify(&geometry(1000.0), degc(60.0), w_per_m_k(4.5));
        assert!(report.is_ok(), "{report}");
    }

    #[test]
    fn operating_point_bounds() {
        let report = verify_operating_point(&geometry(5000.0), 0.08, ags_core::units::kgps(400.0));
        assert_eq!(report.len(), 2);
        assert!(report.into_result().is_err());
    }
}

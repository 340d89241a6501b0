//! Darcy friction factor for wellbore flow.

use serde::{Deserialize, Serialize};

/// Reynolds number below which flow is treated as laminar.
pub const LAMINAR_LIMIT: f64 = 2300.0;

/// Wall condition of a wellbore section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Casing {
    #[default]
    Cased,
    Uncased,
}

impl Casing {
    /// Relative roughness ε/D: 1e-4 m over D when cased, 0.02 m over D
    /// for open hole.
    pub fn relative_roughness(self, diameter: f64) -> f64 {
        match self {
            Casing::Cased => 1e-4 / diameter,
            Casing::Uncased => 0.02 / diameter,
        }
    }
}

/// Colebrook-White iteration settings.
///
/// The default runs exactly six fixed-point passes from the Swamee-Jain
/// estimate, which agrees with the converged root to better than 1e-6
/// relative for Re ≥ 1e4. Setting `tolerance` stops early once successive
/// iterates agree to that relative tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrictionConfig {
    pub iterations: usize,
    pub tolerance: Option<f64>,
}

impl Default for FrictionConfig {
    fn default() -> Self {
        Self {
            iterations: 6,
            tolerance: None,
        }
    }
}

/// Friction factor with iteration diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrictionFactor {
    pub value: f64,
    pub iterations: usize,
    /// Last relative change met the configured tolerance (always true when
    /// no tolerance is set).
    pub converged: bool,
}

/// Explicit Swamee-Jain approximation to Colebrook-White.
pub fn swamee_jain(reynolds: f64, relative_roughness: f64) -> f64 {
    let a = relative_roughness / 3.7;
    let b = 5.74 / reynolds.powf(0.9);
    0.25 / (a + b).log10().powi(2)
}

/// One Colebrook-White fixed-point pass.
pub fn colebrook_update(f: f64, reynolds: f64, relative_roughness: f64) -> f64 {
    let rhs = -2.0 * (relative_roughness / 3.7 + 2.51 / (reynolds * f.sqrt())).log10();
    1.0 / (rhs * rhs)
}

/// Turbulent Darcy friction factor by Colebrook-White substitution.
pub fn turbulent_friction_factor(
    reynolds: f64,
    relative_roughness: f64,
    config: &FrictionConfig,
) -> FrictionFactor {
    let mut f = swamee_jain(reynolds, relative_roughness);
    let mut last_change = f64::INFINITY;
    let mut iterations = 0;

    while iterations < config.iterations {
        let next = colebrook_update(f, reynolds, relative_roughness);
        last_change = ((next - f) / next).abs();
        f = next;
        iterations += 1;
        if config.tolerance.is_some_and(|tol| last_change <= tol) {
            break;
        }
    }

    let converged = match config.tolerance {
        Some(tol) => last_change <= tol,
        None => true,
    };
    if !converged {
        tracing::warn!(
            reynolds,
            relative_roughness,
            iterations,
            last_change,
            "Colebrook-White iteration did not reach tolerance"
        );
    }

    FrictionFactor {
        value: f,
        iterations,
        converged,
    }
}

/// Darcy friction factor with a laminar branch (`64/Re` below
/// [`LAMINAR_LIMIT`]).
pub fn darcy_friction_factor(
    reynolds: f64,
    relative_roughness: f64,
    config: &FrictionConfig,
) -> FrictionFactor {
    if reynolds < LAMINAR_LIMIT {
        FrictionFactor {
            value: 64.0 / reynolds,
            iterations: 0,
            converged: true,
        }
    } else {
        turbulent_friction_factor(reynolds, relative_roughness, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn converged(re: f64, eps: f64) -> f64 {
        let cfg = FrictionConfig {
            iterations: 200,
            tolerance: Some(1e-15),
        };
        turbulent_friction_factor(re, eps, &cfg).value
    }

    #[test]
    fn default_runs_six_passes() {
        let f = turbulent_friction_factor(1e5, 1e-4, &FrictionConfig::default());
        assert_eq!(f.iterations, 6);
        assert!(f.converged);
    }

    #[test]
    fn moody_chart_reference_point() {
        // Re = 1e5, ε/D = 1e-4 reads about 0.0185 on the Moody chart.
        let f = turbulent_friction_factor(1e5, 1e-4, &FrictionConfig::default());
        assert!((f.value - 0.0185).abs() < 5e-4, "f = {}", f.value);
    }

    #[test]
    fn tolerance_exits_early() {
        let cfg = FrictionConfig {
            iterations: 50,
            tolerance: Some(1e-10),
        };
        let f = turbulent_friction_factor(1e6, 1e-3, &cfg);
        assert!(f.converged);
        assert!(f.iterations < 50);
    }

    #[test]
    fn unmet_tolerance_is_reported() {
        let cfg = FrictionConfig {
            iterations: 1,
            tolerance: Some(1e-15),
        };
        let f = turbulent_friction_factor(1e4, 1e-5, &cfg);
        assert!(!f.converged);
    }

    #[test]
    fn laminar_branch() {
        let f = darcy_friction_factor(1000.0, 1e-4, &FrictionConfig::default());
        assert_relative_eq!(f.value, 0.064);
    }

    #[test]
    fn roughness_by_casing() {
        assert_relative_eq!(Casing::Cased.relative_roughness(0.2), 5e-4);
        assert_relative_eq!(Casing::Uncased.relative_roughness(0.2), 0.1);
    }

    proptest! {
        #[test]
        fn turbulent_factor_in_physical_band(
            log_re in 4.0f64..7.0,
            log_eps in -5.0f64..-1.0,
        ) {
            let f = turbulent_friction_factor(
                10f64.powf(log_re),
                10f64.powf(log_eps),
                &FrictionConfig::default(),
            );
            // Colebrook tops out near 0.102 for ε/D = 0.1.
            prop_assert!(f.value > 0.005 && f.value < 0.11, "f = {}", f.value);
        }

        #[test]
        fn six_passes_match_converged_root(
            log_re in 4.0f64..7.0,
            log_eps in -5.0f64..-1.0,
        ) {
            let re = 10f64.powf(log_re);
            let eps = 10f64.powf(log_eps);
            let fixed = turbulent_friction_factor(re, eps, &FrictionConfig::default()).value;
            let exact = converged(re, eps);
            prop_assert!(((fixed - exact) / exact).abs() < 1e-6);
        }
    }
}

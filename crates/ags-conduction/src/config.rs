//! Numerical settings for the conduction model.

use crate::error::{ConductionError, ConductionResult};
use serde::{Deserialize, Serialize};

/// Tuning parameters for the Laplace-space conduction solution.
///
/// Defaults reproduce the reference behaviour: image sums truncated at
/// 1e-10, 32-node Chebyshev fits on each decade from 1e-8 to 1e5 days, and
/// 16-term Stehfest inversion. With 16 terms the inversion is accurate to
/// roughly six significant digits for smooth transforms; raising the count
/// beyond about 20 loses accuracy to cancellation in double precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConductionConfig {
    /// Image-series terms smaller than this end the series.
    pub truncation_tolerance: f64,
    /// Nodes per Chebyshev fit.
    pub chebyshev_nodes: usize,
    /// Default Stehfest sample count (must be even).
    pub stehfest_samples: usize,
    /// Integration starts at `10^first_decade` days.
    pub first_decade: i32,
    /// Quadrature covers decades up to `10^(last_decade + 1)` days; the
    /// remainder is integrated in closed form.
    pub last_decade: i32,
    /// Upper limit of the closed-form tail [days].
    pub tail_end_days: f64,
    /// Maximum images summed in each direction.
    pub max_images: usize,
}

impl Default for ConductionConfig {
    fn default() -> Self {
        Self {
            truncation_tolerance: 1e-10,
            chebyshev_nodes: 32,
            stehfest_samples: 16,
            first_decade: -8,
            last_decade: 4,
            tail_end_days: 1e30,
            max_images: 100_000,
        }
    }
}

impl ConductionConfig {
    pub fn validate(&self) -> ConductionResult<()> {
        if self.truncation_tolerance.is_nan() || self.truncation_tolerance <= 0.0 {
            return Err(ConductionError::InvalidArg {
                what: "truncation_tolerance must be positive",
            });
        }
        if self.chebyshev_nodes < 2 {
            return Err(ConductionError::InvalidArg {
                what: "chebyshev_nodes must be at least 2",
            });
        }
        if self.stehfest_samples == 0 || self.stehfest_samples % 2 != 0 {
            return Err(ConductionError::InvalidArg {
                what: "stehfest_samples must be even and positive",
            });
        }
        if self.first_decade > self.last_decade {
            return Err(ConductionError::InvalidArg {
                what: "first_decade must not exceed last_decade",
            });
        }
        if self.max_images == 0 {
            return Err(ConductionError::InvalidArg {
                what: "max_images must be positive",
            });
        }
        Ok(())
    }

    /// Start of the closed-form tail [days].
    pub fn tail_start_days(&self) -> f64 {
        10f64.powi(self.last_decade + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let c = ConductionConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.tail_start_days(), 1e5);
    }

    #[test]
    fn odd_sample_count_rejected() {
        let c = ConductionConfig {
            stehfest_samples: 15,
            ..Default::default()
        };
        assert!(c.validate().is_err());
    }
}

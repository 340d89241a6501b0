//! Gaver-Stehfest numerical Laplace inversion.

use crate::error::{ConductionError, ConductionResult};
use std::f64::consts::LN_2;

fn factorial(n: usize) -> f64 {
    (1..=n).map(|k| k as f64).product()
}

/// Stehfest weights `V_1..V_N` for an even sample count `n`.
pub fn stehfest_weights(n: usize) -> ConductionResult<Vec<f64>> {
    if n == 0 || n % 2 != 0 {
        return Err(ConductionError::InvalidArg {
            what: "Stehfest sample count must be even and positive",
        });
    }
    let half = n / 2;
    let weights = (1..=n)
        .map(|i| {
            let lower = i.div_ceil(2);
            let upper = i.min(half);
            let sum: f64 = (lower..=upper)
                .map(|k| {
                    (k as f64).powi(half as i32) * factorial(2 * k)
                        / (factorial(half - k)
                            * factorial(k)
                            * factorial(k - 1)
                            * factorial(i - k)
                            * factorial(2 * k - i))
                })
                .sum();
            let sign = if (i + half) % 2 == 0 { 1.0 } else { -1.0 };
            sign * sum
        })
        .collect();
    Ok(weights)
}

/// Evaluate the inverse transform of `transform` at `t > 0` with
/// precomputed `weights`: `(ln2/t) · Σ V_k · F(k·ln2/t)`.
pub fn stehfest_invert_with<F>(transform: F, t: f64, weights: &[f64]) -> ConductionResult<f64>
where
    F: Fn(f64) -> ConductionResult<f64>,
{
    if !(t.is_finite() && t > 0.0) {
        return Err(ConductionError::InvalidArg {
            what: "inversion time must be positive and finite",
        });
    }
    let a = LN_2 / t;
    let mut sum = 0.0;
    for (k, v) in weights.iter().enumerate() {
        sum += v * transform((k + 1) as f64 * a)?;
    }
    Ok(a * sum)
}

/// Evaluate the inverse Laplace transform of `transform` at `t` with
/// `n` Stehfest samples.
pub fn stehfest_invert<F>(transform: F, t: f64, n: usize) -> ConductionResult<f64>
where
    F: Fn(f64) -> ConductionResult<f64>,
{
    stehfest_invert_with(transform, t, &stehfest_weights(n)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn weights_sum_to_zero() {
        for n in [8, 12, 16] {
            let v = stehfest_weights(n).unwrap();
            let scale = v.iter().map(|x| x.abs()).fold(0.0, f64::max);
            let sum: f64 = v.iter().sum();
            assert!(sum.abs() < 1e-9 * scale, "n={n}: sum={sum}");
        }
    }

    #[test]
    fn known_weights_for_n4() {
        let v = stehfest_weights(4).unwrap();
        let expected = [-2.0, 26.0, -48.0, 24.0];
        for (a, b) in v.iter().zip(expected) {
            assert_relative_eq!(*a, b, max_relative = 1e-12);
        }
    }

    #[test]
    fn odd_or_zero_count_rejected() {
        assert!(stehfest_weights(15).is_err());
        assert!(stehfest_weights(0).is_err());
    }

    #[test]
    fn recovers_constant_from_c_over_s() {
        let c = 7.5;
        for t in [0.01, 1.0, 365.0, 1.0e4] {
            let f = stehfest_invert(|s| Ok(c / s), t, 16).unwrap();
            assert_relative_eq!(f, c, max_relative = 0.01);
        }
    }

    #[test]
    fn recovers_exponential_decay() {
        // L{e^{-a t}} = 1 / (s + a)
        let a = 0.5;
        let t = 2.0;
        let f = stehfest_invert(|s| Ok(1.0 / (s + a)), t, 16).unwrap();
        assert_relative_eq!(f, (-a * t).exp(), max_relative = 1e-4);
    }

    #[test]
    fn rejects_non_positive_time() {
        assert!(stehfest_invert(|s| Ok(1.0 / s), 0.0, 16).is_err());
    }
}

//! Chebyshev-series quadrature.

use std::f64::consts::PI;

/// Chebyshev coefficients of `f` on `[a, b]` from `n` Gauss-Chebyshev nodes.
fn chebyshev_fit<F: Fn(f64) -> f64>(a: f64, b: f64, n: usize, f: F) -> Vec<f64> {
    let half_width = 0.5 * (b - a);
    let mid = 0.5 * (b + a);
    let samples: Vec<f64> = (0..n)
        .map(|k| {
            let y = (PI * (k as f64 + 0.5) / n as f64).cos();
            f(y * half_width + mid)
        })
        .collect();

    let scale = 2.0 / n as f64;
    (0..n)
        .map(|j| {
            let sum: f64 = samples
                .iter()
                .enumerate()
                .map(|(k, fk)| fk * (PI * j as f64 * (k as f64 + 0.5) / n as f64).cos())
                .sum();
            scale * sum
        })
        .collect()
}

/// Coefficients of the antiderivative that vanishes at `a`.
fn integrate_series(a: f64, b: f64, c: &[f64]) -> Vec<f64> {
    let n = c.len();
    let con = 0.25 * (b - a);
    let mut out = vec![0.0; n];
    let mut sum = 0.0;
    let mut sign = 1.0;
    for j in 1..n - 1 {
        out[j] = con * (c[j - 1] - c[j + 1]) / j as f64;
        sum += sign * out[j];
        sign = -sign;
    }
    out[n - 1] = con * c[n - 2] / (n - 1) as f64;
    sum += sign * out[n - 1];
    out[0] = 2.0 * sum;
    out
}

/// Clenshaw evaluation at the right end of the interval (`y = 1`).
fn evaluate_at_right_end(c: &[f64]) -> f64 {
    let mut d = 0.0;
    let mut dd = 0.0;
    for &cj in c[1..].iter().rev() {
        let sv = d;
        d = 2.0 * d - dd + cj;
        dd = sv;
    }
    d - dd + 0.5 * c[0]
}

/// `∫_a^b f(t) dt` by fitting `f` with `node_count` Chebyshev polynomials
/// and integrating the series term by term.
///
/// Exact for polynomials of degree below `node_count`; for smooth functions
/// the error falls geometrically with `node_count`. `node_count` must be at
/// least 2.
pub fn chebyshev_quadrature<F: Fn(f64) -> f64>(a: f64, b: f64, node_count: usize, f: F) -> f64 {
    let coefficients = chebyshev_fit(a, b, node_count, f);
    let integral = integrate_series(a, b, &coefficients);
    evaluate_at_right_end(&integral)
}

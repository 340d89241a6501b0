use crate::{CoreError, CoreResult};
use ndarray::Array1;
use ninterp::interpolator::Extrapolate;
use ninterp::prelude::{Interp1DOwned, Interpolator};
use ninterp::strategy::Linear;

pub fn ensure_finite(v: f64, what: &'static str) -> CoreResult<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// `n` evenly spaced samples over `[start, stop]`, both ends included.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// True if every element is finite and strictly greater than its predecessor.
pub fn is_strictly_increasing(xs: &[f64]) -> bool {
    xs.iter().all(|x| x.is_finite()) && xs.windows(2).all(|w| w[1] > w[0])
}

/// Piecewise-linear series `f(x)` over strictly increasing knots.
pub struct LinearSeries {
    inner: Interp1DOwned<f64, Linear>,
}

impl std::fmt::Debug for LinearSeries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinearSeries").finish_non_exhaustive()
    }
}

impl LinearSeries {
    /// Series that extends its first and last segments past the knots.
    pub fn new(xp: &[f64], fp: &[f64]) -> CoreResult<Self> {
        Self::build(xp, fp, Extrapolate::Enable)
    }

    /// Series that holds its end values past the knots.
    pub fn clamped(xp: &[f64], fp: &[f64]) -> CoreResult<Self> {
        Self::build(xp, fp, Extrapolate::Clamp)
    }

    fn build(xp: &[f64], fp: &[f64], extrapolate: Extrapolate<f64>) -> CoreResult<Self> {
        if xp.len() != fp.len() {
            return Err(CoreError::InvalidArg {
                what: "linear series: knot and value lengths differ",
            });
        }
        if xp.len() < 2 {
            return Err(CoreError::InvalidArg {
                what: "linear series: need at least two knots",
            });
        }
        if !is_strictly_increasing(xp) {
            return Err(CoreError::InvalidArg {
                what: "linear series: knots must be strictly increasing",
            });
        }
        let inner = Interp1DOwned::new(
            Array1::from(xp.to_vec()),
            Array1::from(fp.to_vec()),
            Linear,
            extrapolate,
        )
        .map_err(|e| CoreError::Interpolation {
            message: e.to_string(),
        })?;
        Ok(Self { inner })
    }

    pub fn eval(&self, x: f64) -> CoreResult<f64> {
        self.inner
            .interpolate(&[x])
            .map_err(|e| CoreError::Interpolation {
                message: e.to_string(),
            })
    }

    /// Evaluate at every point of `xs`.
    pub fn resample(&self, xs: &[f64]) -> CoreResult<Vec<f64>> {
        xs.iter().map(|&x| self.eval(x)).collect()
    }
}

/// Resample a series defined on `xp` onto `xs`, extrapolating linearly past
/// the end knots.
pub fn resample(xs: &[f64], xp: &[f64], fp: &[f64]) -> CoreResult<Vec<f64>> {
    LinearSeries::new(xp, fp)?.resample(xs)
}

/// Replace negative entries with zero.
pub fn clamp_non_negative(values: &mut [f64]) {
    for v in values.iter_mut() {
        if *v < 0.0 {
            *v = 0.0;
        }
    }
}

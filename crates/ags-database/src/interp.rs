use crate::error::DatabaseResult;
use ndarray::{Array1, ArrayD};
use ninterp::prelude::{InterpNDOwned, Interpolator};
use ninterp::strategy::Linear;

/// Multilinear interpolation over a rectilinear grid.
///
/// Points outside the grid are an error; callers check bounds first so the
/// failing axis can be named.
pub struct GridInterpolator {
    inner: InterpNDOwned<f64, Linear>,
    ndim: usize,
}

impl std::fmt::Debug for GridInterpolator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridInterpolator")
            .field("ndim", &self.ndim)
            .finish()
    }
}

impl GridInterpolator {
    pub fn new(grid: Vec<Array1<f64>>, values: ArrayD<f64>) -> DatabaseResult<Self> {
        let ndim = grid.len();
        let inner = InterpNDOwned::new(
            grid,
            values,
            Linear,
            ninterp::interpolator::Extrapolate::Error,
        )?;
        Ok(Self { inner, ndim })
    }

    pub fn eval(&self, point: &[f64]) -> DatabaseResult<f64> {
        Ok(self.inner.interpolate(point)?)
    }
}

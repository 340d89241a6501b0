//! Independent-variable axes spanned by a performance database.

use crate::container::ContainerSource;
use crate::error::{DatabaseError, DatabaseResult};
use ags_core::numeric::is_strictly_increasing;
use ndarray::Array1;

/// Names of the seven parameter axes in storage order.
pub const PARAMETER_AXES: [&str; 7] = ["mdot", "L2", "L1", "grad", "D", "T_i", "k_rock"];

/// Name of the time axis (years).
pub const TIME_AXIS: &str = "time";

/// A point in the seven-dimensional parameter space, in storage units:
/// kg/s, m, m, K/m, m, K, W/(m·K).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryPoint {
    pub mdot: f64,
    pub lateral_length: f64,
    pub vertical_depth: f64,
    pub gradient: f64,
    pub diameter: f64,
    pub injection_temperature: f64,
    pub rock_conductivity: f64,
}

impl QueryPoint {
    pub fn as_array(&self) -> [f64; 7] {
        [
            self.mdot,
            self.lateral_length,
            self.vertical_depth,
            self.gradient,
            self.diameter,
            self.injection_temperature,
            self.rock_conductivity,
        ]
    }
}

/// Sample locations of the database along every axis.
///
/// Each axis is strictly increasing with at least two points, and the
/// tabulated span of each axis is the valid query domain.
#[derive(Debug, Clone, PartialEq)]
pub struct IndependentVariableAxes {
    parameters: [Vec<f64>; 7],
    time: Vec<f64>,
}

impl IndependentVariableAxes {
    pub fn new(parameters: [Vec<f64>; 7], time: Vec<f64>) -> DatabaseResult<Self> {
        for (name, axis) in PARAMETER_AXES.iter().zip(parameters.iter()) {
            check_axis(name, axis)?;
        }
        check_axis(TIME_AXIS, &time)?;
        Ok(Self { parameters, time })
    }

    /// Read all eight axes from `{prefix}/{name}`.
    pub fn load(source: &dyn ContainerSource, prefix: &str) -> DatabaseResult<Self> {
        let read = |name: &str| -> DatabaseResult<Vec<f64>> {
            let path = format!("{prefix}/{name}");
            source.dataset(&path)?.into_vector(&path)
        };
        let parameters = [
            read(PARAMETER_AXES[0])?,
            read(PARAMETER_AXES[1])?,
            read(PARAMETER_AXES[2])?,
            read(PARAMETER_AXES[3])?,
            read(PARAMETER_AXES[4])?,
            read(PARAMETER_AXES[5])?,
            read(PARAMETER_AXES[6])?,
        ];
        let time = read(TIME_AXIS)?;
        Self::new(parameters, time).map_err(|e| match e {
            DatabaseError::DataLoad { path, reason } => DatabaseError::DataLoad {
                path: format!("{prefix}/{path}"),
                reason,
            },
            other => other,
        })
    }

    pub fn parameter(&self, index: usize) -> &[f64] {
        &self.parameters[index]
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// Number of samples along each parameter axis.
    pub fn parameter_shape(&self) -> Vec<usize> {
        self.parameters.iter().map(Vec::len).collect()
    }

    /// Parameter shape with the time axis appended.
    pub fn full_shape(&self) -> Vec<usize> {
        let mut shape = self.parameter_shape();
        shape.push(self.time.len());
        shape
    }

    /// Number of flattened parameter combinations.
    pub fn combination_count(&self) -> usize {
        self.parameters.iter().map(Vec::len).product()
    }

    /// Grid for a 7-D interpolator.
    pub fn parameter_grid(&self) -> Vec<Array1<f64>> {
        self.parameters
            .iter()
            .map(|a| Array1::from_vec(a.clone()))
            .collect()
    }

    /// Grid for an 8-D interpolator (parameters then time).
    pub fn full_grid(&self) -> Vec<Array1<f64>> {
        let mut grid = self.parameter_grid();
        grid.push(Array1::from_vec(self.time.clone()));
        grid
    }

    /// Fail with `OutOfRange` naming the first coordinate outside its axis.
    pub fn check_bounds(&self, point: &QueryPoint) -> DatabaseResult<()> {
        for ((name, axis), value) in PARAMETER_AXES
            .iter()
            .zip(self.parameters.iter())
            .zip(point.as_array())
        {
            let min = axis[0];
            let max = axis[axis.len() - 1];
            if !(min..=max).contains(&value) {
                return Err(DatabaseError::OutOfRange {
                    axis: name,
                    value,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }
}

fn check_axis(name: &str, axis: &[f64]) -> DatabaseResult<()> {
    if axis.len() < 2 {
        return Err(DatabaseError::load(name, "axis needs at least two points"));
    }
    if axis.iter().any(|v| !v.is_finite()) || !is_strictly_increasing(axis) {
        return Err(DatabaseError::load(name, "axis must be finite and strictly increasing"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axes() -> IndependentVariableAxes {
        IndependentVariableAxes::new(
            [
                vec![5.0, 300.0],
                vec![1000.0, 20000.0],
                vec![1000.0, 5000.0],
                vec![0.03, 0.07],
                vec![0.2159, 0.4445],
                vec![303.15, 333.15],
                vec![1.5, 4.5],
            ],
            vec![0.0, 20.0, 40.0],
        )
        .unwrap()
    }

    fn inside() -> QueryPoint {
        QueryPoint {
            mdot: 20.0,
            lateral_length: 3000.0,
            vertical_depth: 3500.0,
            gradient: 0.05,
            diameter: 0.35,
            injection_temperature: 313.15,
            rock_conductivity: 3.0,
        }
    }

    #[test]
    fn shapes_follow_axis_lengths() {
        let a = axes();
        assert_eq!(a.parameter_shape(), vec![2; 7]);
        assert_eq!(a.full_shape().last(), Some(&3));
        assert_eq!(a.combination_count(), 128);
    }

    #[test]
    fn bounds_accept_interior_and_edges() {
        let a = axes();
        assert!(a.check_bounds(&inside()).is_ok());
        let edge = QueryPoint {
            mdot: 5.0,
            ..inside()
        };
        assert!(a.check_bounds(&edge).is_ok());
    }

    #[test]
    fn bounds_name_offending_axis() {
        let a = axes();
        let p = QueryPoint {
            rock_conductivity: 5.0,
            ..inside()
        };
        match a.check_bounds(&p) {
            Err(DatabaseError::OutOfRange { axis, .. }) => assert_eq!(axis, "k_rock"),
            other => panic!("expected OutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn rejects_short_or_unsorted_axes() {
        let mut params = axes().parameters.clone();
        params[2] = vec![1000.0];
        assert!(IndependentVariableAxes::new(params, vec![0.0, 1.0]).is_err());

        let mut params = axes().parameters.clone();
        params[0] = vec![10.0, 5.0];
        assert!(IndependentVariableAxes::new(params, vec![0.0, 1.0]).is_err());
    }
}

//! SVD-compressed time-series channels.
//!
//! A channel stores a `(time, valid combinations)` matrix as its factors
//! `U`, `σ` and `Vᵀ`. Only parameter combinations whose upstream simulation
//! produced a finite energy total are kept; the remaining combinations are
//! restored as NaN when the channel is expanded.

use crate::container::{ContainerSource, Dataset};
use crate::error::{DatabaseError, DatabaseResult};
use nalgebra::{DMatrix, DVector};
use ndarray::{ArrayD, IxDyn};

/// Validity mask for flattened parameter combinations: true where the
/// aggregate energy of that combination is finite.
pub fn valid_mask(aggregate: &ArrayD<f64>) -> Vec<bool> {
    aggregate.iter().map(|v| v.is_finite()).collect()
}

/// Factored form of a channel matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressedChannel {
    /// Left singular vectors, one row per time sample.
    pub u: DMatrix<f64>,
    pub sigma: DVector<f64>,
    /// Right singular vectors, one column per valid combination.
    pub vt: DMatrix<f64>,
}

impl CompressedChannel {
    pub fn new(u: DMatrix<f64>, sigma: DVector<f64>, vt: DMatrix<f64>) -> DatabaseResult<Self> {
        let rank = sigma.len();
        if u.ncols() != rank {
            return Err(DatabaseError::Shape {
                what: "U columns".to_string(),
                expected: vec![rank],
                found: vec![u.ncols()],
            });
        }
        if vt.nrows() != rank {
            return Err(DatabaseError::Shape {
                what: "Vt rows".to_string(),
                expected: vec![rank],
                found: vec![vt.nrows()],
            });
        }
        Ok(Self { u, sigma, vt })
    }

    /// Read `{prefix}/U`, `{prefix}/sigma` and `{prefix}/Vt`.
    pub fn load(source: &dyn ContainerSource, prefix: &str) -> DatabaseResult<Self> {
        let u_path = format!("{prefix}/U");
        let s_path = format!("{prefix}/sigma");
        let vt_path = format!("{prefix}/Vt");
        let u = source.dataset(&u_path)?.into_matrix(&u_path)?;
        let sigma = source.dataset(&s_path)?.into_dvector(&s_path)?;
        let vt = source.dataset(&vt_path)?.into_matrix(&vt_path)?;
        Self::new(u, sigma, vt).map_err(|e| DatabaseError::load(prefix, e.to_string()))
    }

    /// Write the three factors under `prefix`.
    pub fn datasets(&self, prefix: &str) -> Vec<(String, Dataset)> {
        vec![
            (format!("{prefix}/U"), Dataset::from_matrix(&self.u)),
            (
                format!("{prefix}/sigma"),
                Dataset::vector(self.sigma.as_slice().to_vec()),
            ),
            (format!("{prefix}/Vt"), Dataset::from_matrix(&self.vt)),
        ]
    }

    pub fn time_samples(&self) -> usize {
        self.u.nrows()
    }

    pub fn valid_columns(&self) -> usize {
        self.vt.ncols()
    }

    /// `U · diag(σ) · Vᵀ`, shape `(time, valid combinations)`.
    pub fn reconstruct(&self) -> DMatrix<f64> {
        let mut us = self.u.clone();
        for (mut col, s) in us.column_iter_mut().zip(self.sigma.iter()) {
            col *= *s;
        }
        us * &self.vt
    }

    /// Expand to an array of shape `parameter_shape ++ [time]`.
    ///
    /// `valid` flags each flattened parameter combination (row-major); its
    /// true entries must match the channel's column count.
    pub fn decompress(&self, parameter_shape: &[usize], valid: &[bool]) -> DatabaseResult<ArrayD<f64>> {
        let combinations: usize = parameter_shape.iter().product();
        if valid.len() != combinations {
            return Err(DatabaseError::Shape {
                what: "validity mask".to_string(),
                expected: vec![combinations],
                found: vec![valid.len()],
            });
        }
        let n_valid = valid.iter().filter(|v| **v).count();
        if n_valid != self.valid_columns() {
            return Err(DatabaseError::Shape {
                what: "valid combinations".to_string(),
                expected: vec![n_valid],
                found: vec![self.valid_columns()],
            });
        }

        let nt = self.time_samples();
        let dense = self.reconstruct();

        // Combination-major layout puts time on the fastest axis.
        let mut flat = Vec::with_capacity(combinations * nt);
        let mut column = 0;
        for &ok in valid {
            if ok {
                flat.extend(dense.column(column).iter().copied());
                column += 1;
            } else {
                flat.extend(std::iter::repeat_n(f64::NAN, nt));
            }
        }

        let mut shape = parameter_shape.to_vec();
        shape.push(nt);
        ArrayD::from_shape_vec(IxDyn(&shape), flat).map_err(|e| DatabaseError::Shape {
            what: format!("decompressed channel ({e})"),
            expected: shape.clone(),
            found: vec![combinations * nt],
        })
    }

    /// Factor a dense channel array (time on the last axis), keeping the
    /// `rank` largest singular triplets when given.
    ///
    /// Combinations flagged invalid are dropped before factoring.
    pub fn from_dense(full: &ArrayD<f64>, valid: &[bool], rank: Option<usize>) -> DatabaseResult<Self> {
        let Some((&nt, parameter_shape)) = full.shape().split_last() else {
            return Err(DatabaseError::Shape {
                what: "dense channel".to_string(),
                expected: vec![1],
                found: Vec::new(),
            });
        };
        let combinations: usize = parameter_shape.iter().product();
        if valid.len() != combinations {
            return Err(DatabaseError::Shape {
                what: "validity mask".to_string(),
                expected: vec![combinations],
                found: vec![valid.len()],
            });
        }

        let flat: Vec<f64> = full.iter().copied().collect();
        let columns: Vec<usize> = (0..combinations).filter(|&c| valid[c]).collect();
        let m = DMatrix::from_fn(nt, columns.len(), |t, j| flat[columns[j] * nt + t]);

        let svd = m.svd(true, true);
        let (Some(u), Some(vt)) = (svd.u, svd.v_t) else {
            return Err(DatabaseError::Interpolation {
                message: "SVD did not produce singular vectors".to_string(),
            });
        };

        let mut order: Vec<usize> = (0..svd.singular_values.len()).collect();
        order.sort_by(|&a, &b| svd.singular_values[b].total_cmp(&svd.singular_values[a]));
        let keep = rank.map_or(order.len(), |r| r.min(order.len()));
        order.truncate(keep);

        let u = DMatrix::from_fn(nt, keep, |t, j| u[(t, order[j])]);
        let sigma = DVector::from_fn(keep, |j, _| svd.singular_values[order[j]]);
        let vt = DMatrix::from_fn(keep, columns.len(), |j, c| vt[(order[j], c)]);
        Self::new(u, sigma, vt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::Dimension;

    fn dense(shape: &[usize], nt: usize) -> ArrayD<f64> {
        let mut full_shape = shape.to_vec();
        full_shape.push(nt);
        ArrayD::from_shape_fn(IxDyn(&full_shape), |idx| {
            let t = idx[idx.ndim() - 1] as f64;
            let c: f64 = (0..idx.ndim() - 1).map(|d| (d + 1) as f64 * idx[d] as f64).sum();
            400.0 - 2.0 * t + 10.0 * c + 0.5 * c * t
        })
    }

    #[test]
    fn factor_then_expand_reproduces_valid_entries() {
        let shape = [2, 3, 2];
        let full = dense(&shape, 5);
        let mut valid = vec![true; 12];
        valid[4] = false;
        valid[9] = false;

        let channel = CompressedChannel::from_dense(&full, &valid, None).unwrap();
        assert_eq!(channel.valid_columns(), 10);

        let back = channel.decompress(&shape, &valid).unwrap();
        assert_eq!(back.shape(), full.shape());

        for (i, (a, b)) in back.iter().zip(full.iter()).enumerate() {
            let combination = i / 5;
            if valid[combination] {
                assert_relative_eq!(*a, *b, max_relative = 1e-9);
            } else {
                assert!(a.is_nan());
            }
        }
    }

    #[test]
    fn truncated_rank_keeps_dominant_structure() {
        let shape = [3, 3];
        let full = dense(&shape, 6);
        let valid = vec![true; 9];
        // The synthetic field is rank two: a separable term plus a bilinear one.
        let channel = CompressedChannel::from_dense(&full, &valid, Some(2)).unwrap();
        assert_eq!(channel.sigma.len(), 2);
        let back = channel.decompress(&shape, &valid).unwrap();
        for (a, b) in back.iter().zip(full.iter()) {
            assert_relative_eq!(*a, *b, max_relative = 1e-8);
        }
    }

    #[test]
    fn mask_length_must_match_shape() {
        let full = dense(&[2, 2], 3);
        let channel = CompressedChannel::from_dense(&full, &[true; 4], None).unwrap();
        assert!(matches!(
            channel.decompress(&[2, 3], &[true; 6]),
            Err(DatabaseError::Shape { .. })
        ));
    }

    #[test]
    fn mismatched_factors_are_rejected() {
        let u = DMatrix::zeros(4, 2);
        let sigma = DVector::zeros(3);
        let vt = DMatrix::zeros(3, 5);
        assert!(CompressedChannel::new(u, sigma, vt).is_err());
    }

    #[test]
    fn valid_mask_flags_non_finite() {
        let we = ArrayD::from_shape_vec(IxDyn(&[2, 2]), vec![1.0, f64::NAN, 3.0, f64::INFINITY])
            .unwrap();
        assert_eq!(valid_mask(&we), vec![true, false, true, false]);
    }
}

//! Method-of-images Green's function along one axis.

use std::f64::consts::PI;

/// One-dimensional Gaussian kernel summed over images of the source
/// reflected at spacing `2 · boundary_separation`:
///
/// `Σ_j (4π α t)^(-1/2) · exp(-(offset + 2 j b)² / (4 α t))`
///
/// Forward (`j ≥ 0`) and backward (`j < 0`) images are summed independently.
/// Each direction stops once its terms are below `tolerance` and moving away
/// from the observer, or after `max_images` terms. Returns 0 for `t ≤ 0`.
///
/// `diffusivity` and `time` must use the same time unit.
pub fn image_sum(
    offset: f64,
    boundary_separation: f64,
    diffusivity: f64,
    time: f64,
    tolerance: f64,
    max_images: usize,
) -> f64 {
    if time <= 0.0 {
        return 0.0;
    }
    let four_at = 4.0 * diffusivity * time;
    let prefactor = (PI * four_at).sqrt().recip();
    let term = |j: f64| {
        let d = offset + 2.0 * j * boundary_separation;
        prefactor * (-(d * d) / four_at).exp()
    };

    let sum_direction = |step: f64, first: f64| -> f64 {
        let mut total = 0.0;
        let mut previous_distance = f64::INFINITY;
        let mut j = first;
        for _ in 0..max_images {
            let distance = (offset + 2.0 * j * boundary_separation).abs();
            let value = term(j);
            total += value;
            if value < tolerance && distance >= previous_distance {
                break;
            }
            previous_distance = distance;
            j += step;
        }
        total
    };

    sum_direction(1.0, 0.0) + sum_direction(-1.0, -1.0)
}

//! Geometric transforms applied to point clouds before batching.
//!
//! All functions are pure: they take slices, return fresh vectors, and draw
//! any randomness from a caller-provided RNG so sampling stays reproducible
//! under a seeded generator.

use glam::Vec3;
use rand::Rng;
use rand_distr::StandardNormal;

/// Default standard deviation of the jitter noise.
pub const JITTER_SIGMA: f32 = 0.01;
/// Default clipping bound of the jitter noise.
pub const JITTER_CLIP: f32 = 0.05;

/// Errors from geometric transforms.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("point cloud is empty")]
    EmptyPointCloud,
    #[error("all points coincide, cannot scale to the unit sphere")]
    ZeroSpread,
    #[error("invalid jitter parameters: sigma {sigma}, clip {clip}")]
    InvalidJitter { sigma: f32, clip: f32 },
}

/// Center a point set on its centroid and scale it uniformly so the farthest
/// point sits on the unit sphere.
///
/// Empty input and degenerate clouds whose points all coincide are rejected
/// instead of dividing by zero.
pub fn normalize_unit_sphere(positions: &[Vec3]) -> Result<Vec<Vec3>, TransformError> {
    if positions.is_empty() {
        return Err(TransformError::EmptyPointCloud);
    }

    let centroid = positions.iter().copied().sum::<Vec3>() / positions.len() as f32;
    let centered: Vec<Vec3> = positions.iter().map(|p| *p - centroid).collect();

    let max_dist = centered.iter().map(|p| p.length()).fold(0.0f32, f32::max);
    if max_dist <= f32::EPSILON {
        return Err(TransformError::ZeroSpread);
    }

    Ok(centered.into_iter().map(|p| p / max_dist).collect())
}

/// Add clipped Gaussian noise to every coordinate:
/// `x + clamp(sigma * n, -clip, clip)` with `n ~ N(0, 1)`.
///
/// Returns a new point set; the input is not mutated. `clip` must be
/// positive and `sigma` non-negative.
pub fn jitter<R: Rng + ?Sized>(
    positions: &[Vec3],
    sigma: f32,
    clip: f32,
    rng: &mut R,
) -> Result<Vec<Vec3>, TransformError> {
    if clip <= 0.0 || sigma < 0.0 {
        return Err(TransformError::InvalidJitter { sigma, clip });
    }

    let mut noise = || (sigma * rng.sample::<f32, _>(StandardNormal)).clamp(-clip, clip);
    Ok(positions
        .iter()
        .map(|p| *p + Vec3::new(noise(), noise(), noise()))
        .collect())
}

/// Draw `npoints` indices uniformly at random, with replacement, from `0..n`.
///
/// Applying the same index sequence to every column of a cloud preserves the
/// point/normal/label correspondence. `n` must be nonzero.
pub fn sample_with_replacement<R: Rng + ?Sized>(
    n: usize,
    npoints: usize,
    rng: &mut R,
) -> Vec<usize> {
    (0..npoints).map(|_| rng.gen_range(0..n)).collect()
}

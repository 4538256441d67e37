use bevy::math::{DVec3, Vec3};
use rand::Rng;
use std::f64::consts::TAU;
use std::num::NonZero;

/// Sample a closed circle of radius `distance` in the XZ plane.
///
/// The result has `segments + 1` points, and the last one is exactly the first.
pub fn orbit_guide(distance: f64, segments: NonZero<usize>) -> Vec<DVec3> {
    let n = segments.get();
    (0..=n)
        .map(|i| {
            let theta = (i % n) as f64 / n as f64 * TAU;
            let (s, c) = theta.sin_cos();
            DVec3::new(c * distance, 0.0, s * distance)
        })
        .collect()
}

/// Scatter `count` points uniformly through the cube `[-spread, spread)³`.
pub fn starfield(rng: &mut impl Rng, count: usize, spread: f32) -> Vec<Vec3> {
    if spread <= 0.0 {
        return vec![Vec3::ZERO; count];
    }
    (0..count)
        .map(|_| {
            Vec3::new(
                rng.gen_range(-spread..spread),
                rng.gen_range(-spread..spread),
                rng.gen_range(-spread..spread),
            )
        })
        .collect()
}

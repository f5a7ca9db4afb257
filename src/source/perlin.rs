//! Gradient lattice (Perlin) noise.

use std::f64::consts::{SQRT_2, TAU};

use glam::DVec2;

use super::{lattice_index, permutation_table, RandomSource, Sampler2D, TABLE_SIZE};
use crate::math::curve::{lerp, quintic_s_curve};

/// 2D Perlin noise.
///
/// Each lattice point hashes through a permutation table to one of 256 unit
/// gradients drawn at construction. Output lies in `[-1, 1]`: unit gradients
/// bound the raw value by `√2 / 2`, which is rescaled by `√2`. The value at
/// every integer lattice point is exactly zero.
#[derive(Clone)]
pub struct PerlinSampler {
    /// Permutation table (256 values, doubled for wrapping).
    perm: [u8; TABLE_SIZE * 2],
    gradients: [DVec2; TABLE_SIZE],
}

impl PerlinSampler {
    /// Build the tables from `rng`. The permutation is drawn first, then one
    /// gradient angle per table entry.
    pub fn new<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        let perm = permutation_table(rng);
        let mut gradients = [DVec2::X; TABLE_SIZE];
        for g in gradients.iter_mut() {
            *g = DVec2::from_angle(rng.uniform_float() * TAU);
        }
        Self { perm, gradients }
    }

    /// Convenience constructor using the default generator.
    pub fn from_seed(seed: i64) -> Self {
        Self::new(&mut super::random::default_source(seed))
    }

    /// Gradient at table slots `xi, yi`, each in `0..=TABLE_SIZE`. The doubled
    /// table makes slot `TABLE_SIZE` alias slot 0.
    #[inline]
    fn gradient(&self, xi: usize, yi: usize) -> DVec2 {
        self.gradients[self.perm[xi + self.perm[yi] as usize] as usize]
    }
}

impl Sampler2D for PerlinSampler {
    fn sample_2d(&self, x: f64, y: f64) -> f64 {
        let x0 = x.floor();
        let y0 = y.floor();

        // Offsets come from the float floor, so they stay in [0, 1] at any scale
        let fx = x - x0;
        let fy = y - y0;

        let xi = lattice_index(x0);
        let yi = lattice_index(y0);

        let n00 = self.gradient(xi, yi).dot(DVec2::new(fx, fy));
        let n10 = self.gradient(xi + 1, yi).dot(DVec2::new(fx - 1.0, fy));
        let n01 = self.gradient(xi, yi + 1).dot(DVec2::new(fx, fy - 1.0));
        let n11 = self.gradient(xi + 1, yi + 1).dot(DVec2::new(fx - 1.0, fy - 1.0));

        let u = quintic_s_curve(fx);
        let v = quintic_s_curve(fy);

        let nx0 = lerp(n00, n10, u);
        let nx1 = lerp(n01, n11, u);
        SQRT_2 * lerp(nx0, nx1, v)
    }
}

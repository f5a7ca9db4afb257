//! Coherent noise sources and the sampling interface every node exposes.
//!
//! A source owns a permutation table derived once from a [`RandomSource`] and
//! afterwards is a pure function of its input coordinate. Combinators in
//! [`crate::modifier`] implement the same [`Sampler2D`] trait, so sources and
//! combinators nest freely.

use std::sync::Arc;

pub mod perlin;
pub mod random;
pub mod simplex;

pub use perlin::PerlinSampler;
pub use random::{DefaultSeedBuilder, SeedBuilder};
pub use simplex::SimplexSampler;

/// Anything that yields a scalar for a 2D coordinate.
///
/// Implementations must be deterministic: identical inputs give bit-identical
/// outputs. `Send + Sync` lets a built graph be shared read-only between
/// threads without locking.
pub trait Sampler2D: Send + Sync {
    fn sample_2d(&self, x: f64, y: f64) -> f64;
}

/// Shared handle to a built sampler, as stored by the graph builder.
pub type SharedSampler = Arc<dyn Sampler2D>;

impl<S: Sampler2D + ?Sized> Sampler2D for &S {
    #[inline]
    fn sample_2d(&self, x: f64, y: f64) -> f64 {
        (**self).sample_2d(x, y)
    }
}

impl<S: Sampler2D + ?Sized> Sampler2D for Box<S> {
    #[inline]
    fn sample_2d(&self, x: f64, y: f64) -> f64 {
        (**self).sample_2d(x, y)
    }
}

impl<S: Sampler2D + ?Sized> Sampler2D for Arc<S> {
    #[inline]
    fn sample_2d(&self, x: f64, y: f64) -> f64 {
        (**self).sample_2d(x, y)
    }
}

/// Random number capability consumed by sources at construction.
///
/// Any `rand::Rng` already implements this (see [`random`]); callers can
/// implement it for their own generator to control table generation.
pub trait RandomSource {
    /// Uniform float in `[0, 1)`.
    fn uniform_float(&mut self) -> f64;

    /// A random permutation of `0..n`.
    fn permutation(&mut self, n: usize) -> Vec<usize>;
}

/// Number of distinct lattice hashes.
pub(crate) const TABLE_SIZE: usize = 256;

/// Build the doubled permutation table used for wrap-free lattice hashing.
///
/// Entries a misbehaving [`RandomSource`] leaves out fall back to identity.
pub(crate) fn permutation_table<R: RandomSource + ?Sized>(rng: &mut R) -> [u8; TABLE_SIZE * 2] {
    let source = rng.permutation(TABLE_SIZE);
    let mut perm = [0u8; TABLE_SIZE * 2];
    for i in 0..TABLE_SIZE {
        let v = (source.get(i).copied().unwrap_or(i) & (TABLE_SIZE - 1)) as u8;
        perm[i] = v;
        perm[i + TABLE_SIZE] = v;
    }
    perm
}

/// Table slot for the lattice cell whose lower corner is `cell`.
///
/// `cell` is an already floored coordinate. The reduction runs in `i64`, so
/// any finite input maps into `0..TABLE_SIZE` and the pattern repeats every
/// 256 cells well past the `i32` range.
#[inline]
pub(crate) fn lattice_index(cell: f64) -> usize {
    (cell as i64).rem_euclid(TABLE_SIZE as i64) as usize
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Sampler that returns a fixed value everywhere.
    #[derive(Debug)]
    pub struct Constant(pub f64);

    impl Sampler2D for Constant {
        fn sample_2d(&self, _x: f64, _y: f64) -> f64 {
            self.0
        }
    }

    /// Sampler that returns its x coordinate, handy as a control signal.
    #[derive(Debug)]
    pub struct RampX;

    impl Sampler2D for RampX {
        fn sample_2d(&self, x: f64, _y: f64) -> f64 {
            x
        }
    }

    /// Sampler that returns `x + 10y`, so scaled coordinates are observable.
    #[derive(Debug)]
    pub struct Linear;

    impl Sampler2D for Linear {
        fn sample_2d(&self, x: f64, y: f64) -> f64 {
            x + 10.0 * y
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_support::Constant;

    struct ShortPermutation;

    impl RandomSource for ShortPermutation {
        fn uniform_float(&mut self) -> f64 {
            0.25
        }

        fn permutation(&mut self, _n: usize) -> Vec<usize> {
            vec![3, 2, 1, 0]
        }
    }

    #[test]
    fn test_permutation_table_is_doubled() {
        let perm = permutation_table(&mut random::default_source(7));
        assert_eq!(&perm[..TABLE_SIZE], &perm[TABLE_SIZE..]);

        let mut seen = [false; TABLE_SIZE];
        for &v in &perm[..TABLE_SIZE] {
            seen[v as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_permutation_table_tolerates_short_source() {
        let perm = permutation_table(&mut ShortPermutation);
        assert_eq!(&perm[..4], &[3, 2, 1, 0]);
        assert_eq!(perm[4], 4);
        assert_eq!(perm[255], 255);
    }

    #[test]
    fn test_lattice_index_wraps() {
        assert_eq!(lattice_index(0.0), 0);
        assert_eq!(lattice_index(255.0), 255);
        assert_eq!(lattice_index(256.0), 0);
        assert_eq!(lattice_index(-1.0), 255);
        assert_eq!(lattice_index(-256.0), 0);
        assert_eq!(lattice_index(3.0e9), 0);
        assert_eq!(lattice_index(3.0e9 + 7.0), 7);
        assert_eq!(lattice_index(-(2f64.powi(40)) - 1.0), 255);
        assert!(lattice_index(1.0e300) < TABLE_SIZE);
        assert!(lattice_index(-1.0e300) < TABLE_SIZE);
    }

    #[test]
    fn test_sampler_handles_forward() {
        let constant = Constant(0.75);
        let boxed: Box<dyn Sampler2D> = Box::new(Constant(0.5));
        let shared: SharedSampler = Arc::new(Constant(-0.5));

        assert_eq!((&constant).sample_2d(1.0, 2.0), 0.75);
        assert_eq!(boxed.sample_2d(1.0, 2.0), 0.5);
        assert_eq!(shared.sample_2d(1.0, 2.0), -0.5);
    }
}

//! Fractal Brownian motion over any source.

use crate::source::Sampler2D;

/// Sums `octaves` copies of `source`, each at `lacunarity` times the previous
/// frequency and `persistence` times the previous amplitude.
///
/// The sum is not normalized: with persistence `p` the magnitude can reach
/// `(1 - pⁿ) / (1 - p)` times the source range. Zero octaves is valid and
/// yields 0.0 everywhere.
#[derive(Clone, Debug)]
pub struct FractalSum<S> {
    source: S,
    octaves: u32,
    persistence: f64,
    lacunarity: f64,
    frequency: f64,
}

impl<S: Sampler2D> FractalSum<S> {
    pub fn new(source: S, octaves: u32, persistence: f64, lacunarity: f64, frequency: f64) -> Self {
        Self {
            source,
            octaves,
            persistence,
            lacunarity,
            frequency,
        }
    }

    pub fn octaves(&self) -> u32 {
        self.octaves
    }

    pub fn persistence(&self) -> f64 {
        self.persistence
    }

    pub fn lacunarity(&self) -> f64 {
        self.lacunarity
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }
}

impl<S: Sampler2D> Sampler2D for FractalSum<S> {
    fn sample_2d(&self, x: f64, y: f64) -> f64 {
        let mut sum = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = self.frequency;

        for _ in 0..self.octaves {
            sum += amplitude * self.source.sample_2d(x * frequency, y * frequency);
            amplitude *= self.persistence;
            frequency *= self.lacunarity;
        }

        sum
    }
}

//! Rasterization of a sampler over a rectangular region.
//!
//! A thin consumer of [`Sampler2D`]: walks a `width x height` grid spanning
//! [`Bounds`] and stores one sample per cell in a row-major [`NoiseMap`].

use std::path::Path;

use image::{GrayImage, Luma};

use crate::source::Sampler2D;

/// Region of the noise plane to rasterize.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }
}

/// Samples a source on a grid.
pub struct NoiseMapBuilder<S> {
    source: S,
    width: usize,
    height: usize,
    bounds: Bounds,
}

impl<S: Sampler2D> NoiseMapBuilder<S> {
    pub fn new(source: S, width: usize, height: usize) -> Self {
        Self {
            source,
            width,
            height,
            bounds: Bounds::default(),
        }
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Sample every cell. Cell `(i, j)` reads the source at
    /// `(min_x + i * step_x, min_y + j * step_y)` with
    /// `step = (max - min) / size`.
    pub fn build(&self) -> NoiseMap {
        let b = self.bounds;
        let step_x = (b.max_x - b.min_x) / self.width.max(1) as f64;
        let step_y = (b.max_y - b.min_y) / self.height.max(1) as f64;

        let mut values = Vec::with_capacity(self.width * self.height);
        for j in 0..self.height {
            let y = b.min_y + j as f64 * step_y;
            for i in 0..self.width {
                let x = b.min_x + i as f64 * step_x;
                values.push(self.source.sample_2d(x, y));
            }
        }

        log::debug!("Rasterized {}x{} noise map over {:?}", self.width, self.height, b);
        NoiseMap {
            width: self.width,
            height: self.height,
            values,
        }
    }
}

/// Row-major grid of samples.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseMap {
    width: usize,
    height: usize,
    values: Vec<f64>,
}

impl NoiseMap {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Sample at column `i`, row `j`.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i >= self.width || j >= self.height {
            return None;
        }
        self.values.get(j * self.width + i).copied()
    }

    /// Smallest and largest sample, or `None` for an empty map.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        let first = *self.values.first()?;
        Some(
            self.values
                .iter()
                .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
        )
    }

    /// Map `[low, high]` linearly onto `0..=255`, clamping outside values.
    pub fn to_grayscale(&self, low: f64, high: f64) -> GrayImage {
        let span = if high > low { high - low } else { 1.0 };
        GrayImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            let v = self.values[y as usize * self.width + x as usize];
            let t = ((v - low) / span).clamp(0.0, 1.0);
            Luma([(t * 255.0).round() as u8])
        })
    }

    /// Write the grayscale rendering to a PNG file.
    pub fn save_png(&self, path: &Path, low: f64, high: f64) -> image::ImageResult<()> {
        self.to_grayscale(low, high).save(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::test_support::{Constant, Linear};
    use crate::source::PerlinSampler;
    use tempfile::TempDir;

    #[test]
    fn test_grid_coordinates() {
        let map = NoiseMapBuilder::new(Linear, 4, 2)
            .with_bounds(Bounds::new(0.0, 0.0, 2.0, 1.0))
            .build();

        assert_eq!(map.width(), 4);
        assert_eq!(map.height(), 2);
        assert_eq!(map.values().len(), 8);
        // x steps by 0.5, y steps by 0.5; Linear is x + 10y
        assert_eq!(map.get(0, 0), Some(0.0));
        assert_eq!(map.get(3, 0), Some(1.5));
        assert_eq!(map.get(1, 1), Some(5.5));
        assert_eq!(map.get(4, 0), None);
        assert_eq!(map.get(0, 2), None);
    }

    #[test]
    fn test_matches_direct_sampling() {
        let perlin = PerlinSampler::from_seed(8);
        let bounds = Bounds::new(-2.0, 1.0, 4.0, 7.0);
        let map = NoiseMapBuilder::new(&perlin, 16, 16).with_bounds(bounds).build();

        for j in 0..16 {
            for i in 0..16 {
                let x = -2.0 + i as f64 * (6.0 / 16.0);
                let y = 1.0 + j as f64 * (6.0 / 16.0);
                assert_eq!(map.get(i, j), Some(perlin.sample_2d(x, y)));
            }
        }
    }

    #[test]
    fn test_min_max() {
        let map = NoiseMapBuilder::new(Linear, 3, 3).build();
        let (lo, hi) = map.min_max().expect("non-empty map");
        assert_eq!(lo, 0.0);
        assert!((hi - (2.0 / 3.0 + 20.0 / 3.0)).abs() < 1e-12);

        let empty = NoiseMapBuilder::new(Linear, 0, 0).build();
        assert!(empty.min_max().is_none());
    }

    #[test]
    fn test_grayscale_mapping() {
        let low = NoiseMapBuilder::new(Constant(-1.0), 2, 2).build().to_grayscale(-1.0, 1.0);
        let mid = NoiseMapBuilder::new(Constant(0.0), 2, 2).build().to_grayscale(-1.0, 1.0);
        let over = NoiseMapBuilder::new(Constant(5.0), 2, 2).build().to_grayscale(-1.0, 1.0);

        assert_eq!(low.get_pixel(0, 0).0, [0]);
        assert_eq!(mid.get_pixel(1, 1).0, [128]);
        assert_eq!(over.get_pixel(1, 0).0, [255]);
    }

    #[test]
    fn test_save_png() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("noise.png");

        let map = NoiseMapBuilder::new(PerlinSampler::from_seed(1), 32, 24)
            .with_bounds(Bounds::new(0.0, 0.0, 4.0, 3.0))
            .build();
        map.save_png(&path, -1.0, 1.0).expect("save failed");

        let decoded = image::open(&path).expect("open failed").to_luma8();
        assert_eq!(decoded.dimensions(), (32, 24));
        assert_eq!(decoded, map.to_grayscale(-1.0, 1.0));
    }
}

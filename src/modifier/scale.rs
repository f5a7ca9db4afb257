//! Linear remap followed by a clamp.

use crate::core::ParamError;
use crate::source::Sampler2D;

/// Outputs `source * scale + bias`, clamped into `[min, max]`.
#[derive(Clone, Debug)]
pub struct Scale<S> {
    source: S,
    scale: f64,
    bias: f64,
    min: f64,
    max: f64,
}

impl<S: Sampler2D> Scale<S> {
    /// Fails if `min > max` or either clamp bound is not finite.
    pub fn new(source: S, scale: f64, bias: f64, min: f64, max: f64) -> Result<Self, ParamError> {
        if !min.is_finite() {
            return Err(ParamError::NotFinite { name: "min", value: min });
        }
        if !max.is_finite() {
            return Err(ParamError::NotFinite { name: "max", value: max });
        }
        if min > max {
            return Err(ParamError::InvertedClamp { min, max });
        }

        Ok(Self {
            source,
            scale,
            bias,
            min,
            max,
        })
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }
}

impl<S: Sampler2D> Sampler2D for Scale<S> {
    #[inline]
    fn sample_2d(&self, x: f64, y: f64) -> f64 {
        let v = self.source.sample_2d(x, y) * self.scale + self.bias;
        self.min.max(self.max.min(v))
    }
}

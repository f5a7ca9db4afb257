//! Threshold selection between two sources driven by a control source.

use crate::core::ParamError;
use crate::math::curve::{lerp, quintic_s_curve};
use crate::source::Sampler2D;

/// Picks between a low and a high branch from the value `c` of a control
/// source.
///
/// Regions of the control value:
/// - `c < lower_bound`: low branch
/// - `lower_bound <= c <= upper_bound`: low branch
/// - `c > upper_bound`: high branch
///
/// With `edge_falloff > 0` each bound gets a band of that width centred on it
/// across which the branches on either side are blended with the quintic
/// S-curve. Both sides of the lower bound are the low branch, so only the
/// upper band produces a visible transition. A falloff of zero or less is a
/// hard step: `c == upper_bound` still selects the low branch. The falloff
/// must be finite.
#[derive(Clone, Debug)]
pub struct Select<C, L, H> {
    control: C,
    low: L,
    high: H,
    lower_bound: f64,
    upper_bound: f64,
    edge_falloff: f64,
}

impl<C: Sampler2D, L: Sampler2D, H: Sampler2D> Select<C, L, H> {
    /// Fails if either bound is not finite, `lower_bound > upper_bound`, or
    /// the falloff is `+inf`. Negative or NaN falloff is stored as zero.
    pub fn new(
        control: C,
        low: L,
        high: H,
        lower_bound: f64,
        upper_bound: f64,
        edge_falloff: f64,
    ) -> Result<Self, ParamError> {
        if !lower_bound.is_finite() {
            return Err(ParamError::NotFinite { name: "lower bound", value: lower_bound });
        }
        if !upper_bound.is_finite() {
            return Err(ParamError::NotFinite { name: "upper bound", value: upper_bound });
        }
        if edge_falloff == f64::INFINITY {
            return Err(ParamError::NotFinite { name: "edge falloff", value: edge_falloff });
        }
        if lower_bound > upper_bound {
            return Err(ParamError::InvertedBounds {
                lower: lower_bound,
                upper: upper_bound,
            });
        }

        Ok(Self {
            control,
            low,
            high,
            lower_bound,
            upper_bound,
            edge_falloff: edge_falloff.max(0.0),
        })
    }

    pub fn lower_bound(&self) -> f64 {
        self.lower_bound
    }

    pub fn upper_bound(&self) -> f64 {
        self.upper_bound
    }

    pub fn edge_falloff(&self) -> f64 {
        self.edge_falloff
    }

    /// Share of the high branch in the output for control value `c`.
    fn high_weight(&self, c: f64) -> f64 {
        if self.edge_falloff <= 0.0 {
            return if c > self.upper_bound { 1.0 } else { 0.0 };
        }

        let half = 0.5 * self.edge_falloff;
        let band_start = self.upper_bound - half;
        if c <= band_start {
            0.0
        } else if c >= self.upper_bound + half {
            1.0
        } else {
            quintic_s_curve((c - band_start) / self.edge_falloff)
        }
    }
}

impl<C: Sampler2D, L: Sampler2D, H: Sampler2D> Sampler2D for Select<C, L, H> {
    fn sample_2d(&self, x: f64, y: f64) -> f64 {
        let weight = self.high_weight(self.control.sample_2d(x, y));

        if weight <= 0.0 {
            self.low.sample_2d(x, y)
        } else if weight >= 1.0 {
            self.high.sample_2d(x, y)
        } else {
            lerp(self.low.sample_2d(x, y), self.high.sample_2d(x, y), weight)
        }
    }
}

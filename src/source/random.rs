//! Default random sources and the seed-to-source builder hook.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::RandomSource;

impl<R: Rng + ?Sized> RandomSource for R {
    fn uniform_float(&mut self) -> f64 {
        self.gen_range(0.0..1.0)
    }

    fn permutation(&mut self, n: usize) -> Vec<usize> {
        let mut values: Vec<usize> = (0..n).collect();
        values.shuffle(self);
        values
    }
}

/// The generator used when no [`SeedBuilder`] is injected.
pub fn default_source(seed: i64) -> StdRng {
    StdRng::seed_from_u64(seed as u64)
}

/// Turns a configured seed value into a [`RandomSource`].
///
/// Implemented for plain closures, so
/// `|s| Box::new(MyRng::new(s)) as Box<dyn RandomSource>` works directly.
pub trait SeedBuilder {
    fn build(&self, seed: i64) -> Box<dyn RandomSource>;
}

impl<F> SeedBuilder for F
where
    F: Fn(i64) -> Box<dyn RandomSource>,
{
    fn build(&self, seed: i64) -> Box<dyn RandomSource> {
        self(seed)
    }
}

/// Seeds a [`StdRng`] from the configured value.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultSeedBuilder;

impl SeedBuilder for DefaultSeedBuilder {
    fn build(&self, seed: i64) -> Box<dyn RandomSource> {
        Box::new(default_source(seed))
    }
}

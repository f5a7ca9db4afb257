//! Simplex noise, configured under the `opensimplex` source type.

use super::{lattice_index, permutation_table, RandomSource, Sampler2D, TABLE_SIZE};

/// 2D simplex noise.
///
/// The plane is skewed onto a triangular lattice; each of the three corners of
/// the containing triangle contributes `(r² - d²)⁴ · (g · offset)` with
/// `r² = 0.5`, and nothing once `d² >= r²`. The sum is scaled by 70 and
/// clamped so the output lies in `[-1, 1]`.
#[derive(Clone)]
pub struct SimplexSampler {
    /// Permutation table (256 values, doubled for wrapping).
    perm: [u8; TABLE_SIZE * 2],
}

impl SimplexSampler {
    /// Skewing factor for 2D: (sqrt(3) - 1) / 2
    const F2: f64 = 0.366_025_403_784_438_6;
    /// Unskewing factor for 2D: (3 - sqrt(3)) / 6
    const G2: f64 = 0.211_324_865_405_187_13;
    /// Squared kernel radius.
    const RADIUS_SQ: f64 = 0.5;
    const SCALE: f64 = 70.0;

    const GRAD2: [[f64; 2]; 12] = [
        [1.0, 1.0],
        [-1.0, 1.0],
        [1.0, -1.0],
        [-1.0, -1.0],
        [1.0, 0.0],
        [-1.0, 0.0],
        [1.0, 0.0],
        [-1.0, 0.0],
        [0.0, 1.0],
        [0.0, -1.0],
        [0.0, 1.0],
        [0.0, -1.0],
    ];

    pub fn new<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        Self {
            perm: permutation_table(rng),
        }
    }

    /// Convenience constructor using the default generator.
    pub fn from_seed(seed: i64) -> Self {
        Self::new(&mut super::random::default_source(seed))
    }

    #[inline]
    fn corner(hash: usize, dx: f64, dy: f64) -> f64 {
        let t = Self::RADIUS_SQ - dx * dx - dy * dy;
        if t <= 0.0 {
            return 0.0;
        }
        let g = &Self::GRAD2[hash % 12];
        let t2 = t * t;
        t2 * t2 * (g[0] * dx + g[1] * dy)
    }
}

impl Sampler2D for SimplexSampler {
    fn sample_2d(&self, x: f64, y: f64) -> f64 {
        // Skew the input space to find the containing cell
        let s = (x + y) * Self::F2;
        let i = (x + s).floor();
        let j = (y + s).floor();

        let t = (i + j) * Self::G2;
        let x0 = x - (i - t);
        let y0 = y - (j - t);

        // Lower or upper triangle of the cell
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - i1 as f64 + Self::G2;
        let y1 = y0 - j1 as f64 + Self::G2;
        let x2 = x0 - 1.0 + 2.0 * Self::G2;
        let y2 = y0 - 1.0 + 2.0 * Self::G2;

        let ii = lattice_index(i);
        let jj = lattice_index(j);
        let perm = &self.perm;

        let h0 = perm[ii + perm[jj] as usize] as usize;
        let h1 = perm[ii + i1 + perm[jj + j1] as usize] as usize;
        let h2 = perm[ii + 1 + perm[jj + 1] as usize] as usize;

        let n = Self::corner(h0, x0, y0) + Self::corner(h1, x1, y1) + Self::corner(h2, x2, y2);
        (Self::SCALE * n).clamp(-1.0, 1.0)
    }
}

//! Interpolation curves shared by the noise kernels and combinators.

/// Cubic S-curve `3v² - 2v³`.
///
/// First derivative is zero at both ends, second derivative is not.
#[inline]
pub fn cubic_s_curve(v: f64) -> f64 {
    v * v * (3.0 - 2.0 * v)
}

/// Quintic S-curve `6v⁵ - 15v⁴ + 10v³`.
///
/// First and second derivatives vanish at 0 and 1, so lattice cell borders
/// stay invisible in the second derivative of the interpolated field.
#[inline]
pub fn quintic_s_curve(v: f64) -> f64 {
    v * v * v * (v * (v * 6.0 - 15.0) + 10.0)
}

/// Linear interpolation `a(1 - t) + bt`.
///
/// Written in the two-product form so `t = 1` returns exactly `b`.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_s_curves_endpoints() {
        assert_eq!(cubic_s_curve(0.0), 0.0);
        assert_eq!(cubic_s_curve(1.0), 1.0);
        assert_eq!(quintic_s_curve(0.0), 0.0);
        assert_eq!(quintic_s_curve(1.0), 1.0);
        assert!((quintic_s_curve(0.5) - 0.5).abs() < 1e-12);
        assert!((cubic_s_curve(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_quintic_matches_polynomial() {
        for i in 0..=20 {
            let v = i as f64 / 20.0;
            let expected = 6.0 * v.powi(5) - 15.0 * v.powi(4) + 10.0 * v.powi(3);
            assert!((quintic_s_curve(v) - expected).abs() < 1e-12, "v = {}", v);
        }
    }

    #[test]
    fn test_quintic_monotonic() {
        let mut prev = quintic_s_curve(0.0);
        for i in 1..=100 {
            let next = quintic_s_curve(i as f64 / 100.0);
            assert!(next >= prev);
            prev = next;
        }
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
        assert_eq!(lerp(2.0, 6.0, 0.25), 3.0);
    }
}

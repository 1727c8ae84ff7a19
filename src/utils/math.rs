//! # Scalar Mathematics
//!
//! Scalar helpers for interpolation, clamping, and angle handling.

use std::f64::consts::{PI, TAU};

/// Compares two floats with a combined absolute and relative tolerance.
///
/// # Examples
///
/// ```
/// use panda_math::approx_eq;
///
/// assert!(approx_eq(0.1 + 0.2, 0.3, 1e-9));
/// assert!(approx_eq(1e12 + 1.0, 1e12, 1e-9));
/// assert!(!approx_eq(1.0, 1.1, 1e-9));
/// ```
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    if a == b {
        return true;
    }
    let diff = (a - b).abs();
    diff <= eps || diff <= eps * a.abs().max(b.abs())
}

/// Clamps `value` into `[min, max]`. Reversed bounds are swapped rather than
/// rejected.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    value.max(lo).min(hi)
}

/// Linear interpolation between `a` and `b`. `t` is not clamped.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Returns the `t` for which `lerp(a, b, t) == value`.
///
/// Returns None if the range is empty.
pub fn inverse_lerp(a: f64, b: f64, value: f64) -> Option<f64> {
    let span = b - a;
    if span.abs() < f64::EPSILON {
        None
    } else {
        Some((value - a) / span)
    }
}

/// Maps `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// Returns None if the input range is empty.
///
/// # Examples
///
/// ```
/// use panda_math::remap;
///
/// assert_eq!(remap(5.0, 0.0, 10.0, 100.0, 200.0), Some(150.0));
/// assert_eq!(remap(5.0, 1.0, 1.0, 0.0, 1.0), None);
/// ```
pub fn remap(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> Option<f64> {
    inverse_lerp(in_min, in_max, value).map(|t| lerp(out_min, out_max, t))
}

/// Hermite smoothstep between two edges, clamped to `[0, 1]`.
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let t = match inverse_lerp(edge0, edge1, x) {
        Some(t) => clamp(t, 0.0, 1.0),
        None => return if x < edge0 { 0.0 } else { 1.0 },
    };
    t * t * (3.0 - 2.0 * t)
}

/// Wraps an angle in radians into `(-π, π]`.
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Converts degrees to radians.
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees.to_radians()
}

/// Converts radians to degrees.
pub fn rad_to_deg(radians: f64) -> f64 {
    radians.to_degrees()
}

/// Rounds `value` to `digits` decimal places. Negative zero becomes zero.
///
/// Values too large to carry `digits` fractional places are returned as is.
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    let scaled = value * factor;
    // Beyond 2^52 every f64 is already an integer.
    if !scaled.is_finite() || scaled.abs() >= 4_503_599_627_370_496.0 {
        return value;
    }
    let rounded = scaled.round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_swaps_bounds() {
        assert_eq!(clamp(5.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-5.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp(0.5, 1.0, 0.0), 0.5);
        assert_eq!(clamp(2.0, 1.0, 0.0), 1.0);
    }

    #[test]
    fn test_lerp_and_inverse() {
        assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
        assert_eq!(lerp(2.0, 4.0, 2.0), 6.0);
        assert_eq!(inverse_lerp(2.0, 4.0, 3.0), Some(0.5));
        assert_eq!(inverse_lerp(2.0, 2.0, 3.0), None);
    }

    #[test]
    fn test_smoothstep() {
        assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
        assert_eq!(smoothstep(0.0, 1.0, 0.5), 0.5);
        assert_eq!(smoothstep(1.0, 1.0, 0.0), 0.0);
        assert_eq!(smoothstep(1.0, 1.0, 1.0), 1.0);
    }

    #[test]
    fn test_wrap_angle() {
        assert!(approx_eq(wrap_angle(2.5 * PI), 0.5 * PI, 1e-12));
        assert!(approx_eq(wrap_angle(-PI), PI, 1e-12));
        assert!(approx_eq(wrap_angle(0.5), 0.5, 1e-12));
        assert!(approx_eq(wrap_angle(-TAU - 0.5), -0.5, 1e-12));
    }

    #[test]
    fn test_angle_conversion() {
        assert!(approx_eq(deg_to_rad(90.0), PI / 2.0, 1e-12));
        assert!(approx_eq(rad_to_deg(PI), 180.0, 1e-12));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(-0.0000001, 3), 0.0);
        assert!(round_to(-0.0000001, 3).is_sign_positive());
    }

    #[test]
    fn test_round_to_large_values() {
        assert_eq!(round_to(1e303, 6), 1e303);
        assert_eq!(round_to(-1e303, 6), -1e303);
        assert_eq!(round_to(f64::MAX, 17), f64::MAX);
        assert_eq!(round_to(123456789.123, 2), 123456789.12);
        assert!(round_to(f64::NAN, 3).is_nan());
    }
}

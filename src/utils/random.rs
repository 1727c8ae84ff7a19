//! # Random Sampling
//!
//! Seeded sampling of directions, points, and rotations for procedural content.

use crate::{MathConfig, Quaternion, Vec2, Vec3, Vector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;

/// Creates a seeded random number generator.
///
/// # Examples
///
/// ```
/// use panda_math::create_rng;
/// use rand::Rng;
///
/// let a: f64 = create_rng(7).gen();
/// let b: f64 = create_rng(7).gen();
/// assert_eq!(a, b);
/// ```
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a random number generator seeded from the config.
pub fn create_rng_from_config(config: &MathConfig) -> StdRng {
    create_rng(config.seed)
}

/// Uniformly distributed direction on the unit circle.
pub fn random_unit_vec2<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    Vec2::from_angle(rng.gen_range(0.0..TAU))
}

/// Uniformly distributed direction on the unit sphere.
pub fn random_unit_vec3<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    // Archimedes: z is uniform on [-1, 1] for a uniform sphere.
    let z: f64 = rng.gen_range(-1.0..=1.0);
    let phi = rng.gen_range(0.0..TAU);
    let r = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(r * phi.cos(), r * phi.sin(), z)
}

/// Uniformly distributed point inside the unit circle.
pub fn random_in_unit_circle<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    loop {
        let p = Vec2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Uniformly distributed point inside the unit sphere.
pub fn random_in_unit_sphere<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let p = Vec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Point with each component drawn uniformly between the matching components
/// of `min` and `max` (bounds may be given in either order).
pub fn random_vec3_in_range<R: Rng + ?Sized>(rng: &mut R, min: Vec3, max: Vec3) -> Vec3 {
    let lo = min.min(max);
    let hi = min.max(max);
    let mut sample = |a: f64, b: f64| if a == b { a } else { rng.gen_range(a..b) };
    Vec3::new(sample(lo.x, hi.x), sample(lo.y, hi.y), sample(lo.z, hi.z))
}

/// Uniformly distributed rotation (Shoemake's subgroup algorithm).
pub fn random_rotation<R: Rng + ?Sized>(rng: &mut R) -> Quaternion {
    let u1: f64 = rng.gen();
    let u2 = rng.gen_range(0.0..TAU);
    let u3 = rng.gen_range(0.0..TAU);
    let a = (1.0 - u1).sqrt();
    let b = u1.sqrt();
    Quaternion::new(a * u2.cos(), a * u2.sin(), b * u3.sin(), b * u3.cos())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_is_deterministic() {
        let mut a = create_rng(12345);
        let mut b = create_rng_from_config(&MathConfig::new(12345));
        for _ in 0..10 {
            assert_eq!(random_unit_vec3(&mut a), random_unit_vec3(&mut b));
        }
    }

    #[test]
    fn test_unit_samples_are_normalized() {
        let mut rng = create_rng(1);
        for _ in 0..100 {
            assert!(random_unit_vec2(&mut rng).is_normalized());
            assert!(random_unit_vec3(&mut rng).is_normalized());
            assert!(random_rotation(&mut rng).is_normalized());
        }
    }

    #[test]
    fn test_samples_inside_unit_ball() {
        let mut rng = create_rng(2);
        for _ in 0..100 {
            assert!(random_in_unit_circle(&mut rng).length() < 1.0);
            assert!(random_in_unit_sphere(&mut rng).length() < 1.0);
        }
    }

    #[test]
    fn test_vec3_in_range() {
        let mut rng = create_rng(3);
        let min = Vec3::new(-1.0, 5.0, 2.0);
        let max = Vec3::new(1.0, 4.0, 2.0);
        for _ in 0..100 {
            let p = random_vec3_in_range(&mut rng, min, max);
            assert!(p.x >= -1.0 && p.x < 1.0);
            assert!(p.y >= 4.0 && p.y < 5.0);
            assert_eq!(p.z, 2.0);
        }
    }

    #[test]
    fn test_unit_vec3_covers_both_hemispheres() {
        let mut rng = create_rng(4);
        let samples: Vec<Vec3> = (0..200).map(|_| random_unit_vec3(&mut rng)).collect();
        assert!(samples.iter().any(|v| v.z > 0.5));
        assert!(samples.iter().any(|v| v.z < -0.5));
    }
}

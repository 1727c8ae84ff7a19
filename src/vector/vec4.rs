//! # Four-Dimensional Vectors
//!
//! Mostly used as homogeneous coordinates for 3D points and directions.

use crate::config::EPSILON;
use crate::vector::Vector;
use crate::{MathResult, PandaMathError, Vec3};
use serde::{Deserialize, Serialize};

/// A homogeneous coordinate or a generic 4-component value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec4 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl_vector_common!(Vec4 { x: 0, y: 1, z: 2, w: 3 }, 4);

impl Vec4 {
    pub const X: Self = Self { x: 1.0, y: 0.0, z: 0.0, w: 0.0 };
    pub const Y: Self = Self { x: 0.0, y: 1.0, z: 0.0, w: 0.0 };
    pub const Z: Self = Self { x: 0.0, y: 0.0, z: 1.0, w: 0.0 };
    pub const W: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    /// Creates a new vector with the given components.
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Drops the W component.
    pub fn truncate(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn xyz(self) -> Vec3 {
        self.truncate()
    }

    /// Converts a homogeneous point to Cartesian coordinates by dividing by W.
    ///
    /// # Examples
    ///
    /// ```
    /// use panda_math::{Vec3, Vec4};
    ///
    /// let p = Vec4::new(2.0, 4.0, 6.0, 2.0).to_cartesian().unwrap();
    /// assert_eq!(p, Vec3::new(1.0, 2.0, 3.0));
    /// assert!(Vec4::new(1.0, 0.0, 0.0, 0.0).to_cartesian().is_err());
    /// ```
    pub fn to_cartesian(self) -> MathResult<Vec3> {
        if self.w.abs() < EPSILON {
            return Err(PandaMathError::InvalidArgument(format!(
                "point at infinity has no Cartesian form: {}",
                self
            )));
        }
        Ok(self.truncate() / self.w)
    }
}

impl From<(f64, f64, f64, f64)> for Vec4 {
    fn from((x, y, z, w): (f64, f64, f64, f64)) -> Self {
        Self::new(x, y, z, w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec4_creation() {
        let v = Vec4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(v.to_array(), [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(Vec4::from((1.0, 2.0, 3.0, 4.0)), v);
        assert_eq!(v.xyz(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_vec4_dot() {
        let v = Vec4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(v.dot(Vec4::ONE), 10.0);
        assert_eq!(v.dot(Vec4::W), 4.0);
        assert_eq!(Vec4::DIM, 4);
    }

    #[test]
    fn test_to_cartesian_near_zero_w() {
        let result = Vec4::new(1.0, 1.0, 1.0, 1e-15).to_cartesian();
        assert!(matches!(result, Err(PandaMathError::InvalidArgument(_))));
    }
}

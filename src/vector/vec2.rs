//! # Two-Dimensional Vectors

use crate::vector::Vector;
use crate::{MathResult, PandaMathError, Vec3};
use serde::{Deserialize, Serialize};

/// A point or direction in the plane.
///
/// # Examples
///
/// ```
/// use panda_math::{Vec2, Vector};
///
/// let v = Vec2::new(3.0, 4.0);
/// assert_eq!(v.length(), 5.0);
/// assert_eq!(v + Vec2::ONE, Vec2::new(4.0, 5.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl_vector_common!(Vec2 { x: 0, y: 1 }, 2);

impl Vec2 {
    /// Unit vector along +X.
    pub const X: Self = Self { x: 1.0, y: 0.0 };
    /// Unit vector along +Y.
    pub const Y: Self = Self { x: 0.0, y: 1.0 };

    /// Creates a new vector with the given components.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the vector rotated a quarter turn counter-clockwise.
    pub fn perp(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Z component of the 3D cross product; positive when `other` lies
    /// counter-clockwise of `self`.
    pub fn perp_dot(self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Angle of the vector from +X in radians, in `(-π, π]`.
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Unit vector at `angle` radians from +X.
    pub fn from_angle(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(cos, sin)
    }

    /// Rotates counter-clockwise by `angle` radians.
    ///
    /// # Examples
    ///
    /// ```
    /// use panda_math::{Vec2, Vector};
    ///
    /// let v = Vec2::X.rotate(std::f64::consts::FRAC_PI_2);
    /// assert!(v.approx_eq(Vec2::Y, 1e-12));
    /// ```
    pub fn rotate(self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Appends a Z component.
    pub fn extend(self, z: f64) -> Vec3 {
        Vec3::new(self.x, self.y, z)
    }
}

impl From<(f64, f64)> for Vec2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

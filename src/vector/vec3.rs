//! # Three-Dimensional Vectors

use crate::vector::Vector;
use crate::{MathResult, PandaMathError, Vec2, Vec4};
use serde::{Deserialize, Serialize};

/// A point or direction in space.
///
/// # Examples
///
/// ```
/// use panda_math::{Vec3, Vector};
///
/// let normal = Vec3::X.cross(Vec3::Y);
/// assert_eq!(normal, Vec3::Z);
/// assert_eq!(normal.dot(Vec3::X), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl_vector_common!(Vec3 { x: 0, y: 1, z: 2 }, 3);

impl Vec3 {
    /// Unit vector along +X.
    pub const X: Self = Self { x: 1.0, y: 0.0, z: 0.0 };
    /// Unit vector along +Y.
    pub const Y: Self = Self { x: 0.0, y: 1.0, z: 0.0 };
    /// Unit vector along +Z.
    pub const Z: Self = Self { x: 0.0, y: 0.0, z: 1.0 };

    /// Creates a new vector with the given components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Right-handed cross product.
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Appends a W component.
    pub fn extend(self, w: f64) -> Vec4 {
        Vec4::new(self.x, self.y, self.z, w)
    }

    /// Drops the Z component.
    pub fn truncate(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn xy(self) -> Vec2 {
        self.truncate()
    }

    /// Rotates around `axis` by `angle` radians using Rodrigues' formula.
    ///
    /// The axis does not need to be normalized but must not be zero.
    pub fn rotate_around(self, axis: Vec3, angle: f64) -> MathResult<Self> {
        let k = axis.normalize()?;
        let (sin, cos) = angle.sin_cos();
        Ok(self * cos + k.cross(self) * sin + k * (k.dot(self) * (1.0 - cos)))
    }

    /// Returns some unit vector perpendicular to `self`.
    ///
    /// Picks the world axis least aligned with `self` so the result is well
    /// conditioned. Fails for the zero vector.
    pub fn any_orthogonal(self) -> MathResult<Self> {
        let abs = self.abs();
        let helper = if abs.x <= abs.y && abs.x <= abs.z {
            Vec3::X
        } else if abs.y <= abs.z {
            Vec3::Y
        } else {
            Vec3::Z
        };
        self.cross(helper).normalize()
    }
}

impl From<(f64, f64, f64)> for Vec3 {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}

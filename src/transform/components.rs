//! # Transform Components
//!
//! Translation-rotation-scale (TRS) transforms for game objects. A transform
//! scales first, then rotates, then translates: `M = T * R * S`.

use super::{planar, spatial};
use crate::config::EPSILON;
use crate::utils::math;
use crate::{MathResult, Matrix, PandaMathError, Quaternion, Vec2, Vec3, Vector};
use serde::{Deserialize, Serialize};

fn check_scale(components: &[f64]) -> MathResult<()> {
    if components.iter().any(|s| s.abs() < EPSILON) {
        return Err(PandaMathError::SingularMatrix(format!(
            "scale {:?} has a zero component",
            components
        )));
    }
    Ok(())
}

/// Position, orientation, and size of an object in the plane.
///
/// # Examples
///
/// ```
/// use panda_math::{Transform2D, Vec2, Vector};
///
/// let t = Transform2D::new(Vec2::new(10.0, 0.0), std::f64::consts::FRAC_PI_2, Vec2::splat(2.0));
/// let p = t.transform_point(Vec2::X);
/// assert!(p.approx_eq(Vec2::new(10.0, 2.0), 1e-12));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    pub translation: Vec2,
    /// Counter-clockwise rotation in radians
    pub rotation: f64,
    pub scale: Vec2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform2D {
    pub const IDENTITY: Self = Self {
        translation: Vec2::ZERO,
        rotation: 0.0,
        scale: Vec2::ONE,
    };

    pub fn new(translation: Vec2, rotation: f64, scale: Vec2) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    pub fn from_translation(translation: Vec2) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn from_rotation(rotation: f64) -> Self {
        Self {
            rotation,
            ..Self::IDENTITY
        }
    }

    pub fn from_scale(scale: Vec2) -> Self {
        Self {
            scale,
            ..Self::IDENTITY
        }
    }

    /// The 3x3 homogeneous matrix `T * R * S`.
    pub fn to_matrix(&self) -> Matrix {
        let (sin, cos) = self.rotation.sin_cos();
        let (sx, sy) = (self.scale.x, self.scale.y);
        Matrix::from_parts(
            3,
            3,
            vec![
                cos * sx, -sin * sy, self.translation.x, //
                sin * sx, cos * sy, self.translation.y, //
                0.0, 0.0, 1.0,
            ],
        )
    }

    pub fn transform_point(&self, point: Vec2) -> Vec2 {
        self.translation + self.transform_vector(point)
    }

    /// Applies scale and rotation only.
    pub fn transform_vector(&self, vector: Vec2) -> Vec2 {
        (vector * self.scale).rotate(self.rotation)
    }

    /// Matrix that undoes this transform. Fails if a scale component is zero.
    pub fn inverse_matrix(&self) -> MathResult<Matrix> {
        check_scale(&self.scale.to_array())?;
        planar::scaling(Vec2::ONE / self.scale)
            .try_mul(&planar::rotation(-self.rotation))?
            .try_mul(&planar::translation(-self.translation))
    }

    /// Matrix applying `other` first, then `self`.
    pub fn compose(&self, other: &Transform2D) -> Matrix {
        self.to_matrix().product(&other.to_matrix())
    }

    /// Interpolates each component; rotation takes the shorter way round.
    pub fn lerp(&self, other: &Transform2D, t: f64) -> Transform2D {
        let delta = math::wrap_angle(other.rotation - self.rotation);
        Transform2D {
            translation: self.translation.lerp(other.translation, t),
            rotation: math::wrap_angle(self.rotation + delta * t),
            scale: self.scale.lerp(other.scale, t),
        }
    }
}

/// Position, orientation, and size of an object in space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub translation: Vec3,
    pub rotation: Quaternion,
    pub scale: Vec3,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform3D {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quaternion::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn new(translation: Vec3, rotation: Quaternion, scale: Vec3) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn from_rotation(rotation: Quaternion) -> Self {
        Self {
            rotation,
            ..Self::IDENTITY
        }
    }

    pub fn from_scale(scale: Vec3) -> Self {
        Self {
            scale,
            ..Self::IDENTITY
        }
    }

    /// An unscaled transform at `eye` whose forward axis (-Z) points at `target`.
    ///
    /// # Examples
    ///
    /// ```
    /// use panda_math::{Transform3D, Vec3, Vector};
    ///
    /// let camera = Transform3D::looking_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y).unwrap();
    /// assert!(camera.forward().approx_eq(-Vec3::Z, 1e-12));
    /// ```
    pub fn looking_at(eye: Vec3, target: Vec3, up: Vec3) -> MathResult<Self> {
        let view = spatial::look_at(eye, target, up)?;
        // The view rotation is the inverse (transpose) of the camera's orientation.
        let orientation = Matrix::from_fn(3, 3, |r, c| view[(c, r)]);
        Ok(Self {
            translation: eye,
            rotation: Quaternion::from_rotation_matrix(&orientation)?,
            scale: Vec3::ONE,
        })
    }

    /// The 4x4 homogeneous matrix `T * R * S`.
    pub fn to_matrix(&self) -> Matrix {
        let r = self.rotation.to_matrix3();
        let scale = self.scale.to_array();
        let translation = self.translation.to_array();
        Matrix::from_fn(4, 4, |row, col| match (row, col) {
            (3, 3) => 1.0,
            (3, _) => 0.0,
            (_, 3) => translation[row],
            _ => r[(row, col)] * scale[col],
        })
    }

    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.translation + self.transform_vector(point)
    }

    /// Applies scale and rotation only.
    pub fn transform_vector(&self, vector: Vec3) -> Vec3 {
        self.rotation.rotate(vector * self.scale)
    }

    /// Matrix that undoes this transform. Fails if a scale component is zero.
    pub fn inverse_matrix(&self) -> MathResult<Matrix> {
        check_scale(&self.scale.to_array())?;
        spatial::scaling(Vec3::ONE / self.scale)
            .try_mul(&spatial::rotation(self.rotation.conjugate()))?
            .try_mul(&spatial::translation(-self.translation))
    }

    /// Matrix applying `other` first, then `self`.
    pub fn compose(&self, other: &Transform3D) -> Matrix {
        self.to_matrix().product(&other.to_matrix())
    }

    /// Local -Z in world space.
    pub fn forward(&self) -> Vec3 {
        self.rotation.rotate(-Vec3::Z)
    }

    /// Local +X in world space.
    pub fn right(&self) -> Vec3 {
        self.rotation.rotate(Vec3::X)
    }

    /// Local +Y in world space.
    pub fn up(&self) -> Vec3 {
        self.rotation.rotate(Vec3::Y)
    }

    /// Interpolates translation and scale linearly and rotation spherically.
    pub fn lerp(&self, other: &Transform3D, t: f64) -> Transform3D {
        Transform3D {
            translation: self.translation.lerp(other.translation, t),
            rotation: self.rotation.slerp(other.rotation, t),
            scale: self.scale.lerp(other.scale, t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Axis, Transformable};
    use std::f64::consts::{FRAC_PI_2, PI};

    fn sample2d() -> Transform2D {
        Transform2D::new(Vec2::new(3.0, -1.0), 0.6, Vec2::new(2.0, 0.5))
    }

    fn sample3d() -> Transform3D {
        Transform3D::new(
            Vec3::new(1.0, 2.0, 3.0),
            Quaternion::from_axis_angle(Vec3::new(1.0, -1.0, 2.0), 0.9).unwrap(),
            Vec3::new(2.0, 0.5, 1.5),
        )
    }

    #[test]
    fn test_identity_defaults() {
        assert_eq!(Transform2D::default(), Transform2D::IDENTITY);
        assert_eq!(Transform3D::default(), Transform3D::IDENTITY);
        assert!(Transform2D::IDENTITY.to_matrix().approx_eq(&Matrix::identity(3), 1e-12));
        assert!(Transform3D::IDENTITY.to_matrix().approx_eq(&Matrix::identity(4), 1e-12));
    }

    #[test]
    fn test_2d_matrix_matches_direct_application() {
        let t = sample2d();
        let p = Vec2::new(-1.5, 4.0);
        let by_matrix = p.transform(&t.to_matrix()).unwrap();
        assert!(by_matrix.approx_eq(t.transform_point(p), 1e-12));

        let v = t.to_matrix().transform_vector2(p).unwrap();
        assert!(v.approx_eq(t.transform_vector(p), 1e-12));
    }

    #[test]
    fn test_2d_matrix_matches_builders() {
        let t = sample2d();
        let built = planar::translation(t.translation)
            .try_mul(&planar::rotation(t.rotation))
            .unwrap()
            .try_mul(&planar::scaling(t.scale))
            .unwrap();
        assert!(t.to_matrix().approx_eq(&built, 1e-12));
    }

    #[test]
    fn test_2d_inverse() {
        let t = sample2d();
        let product = t.inverse_matrix().unwrap().try_mul(&t.to_matrix()).unwrap();
        assert!(product.approx_eq(&Matrix::identity(3), 1e-12));

        let flat = Transform2D::from_scale(Vec2::new(1.0, 0.0));
        assert!(matches!(flat.inverse_matrix(), Err(PandaMathError::SingularMatrix(_))));
    }

    #[test]
    fn test_2d_compose_order() {
        let move_right = Transform2D::from_translation(Vec2::X);
        let turn = Transform2D::from_rotation(FRAC_PI_2);
        // Turn first, then move.
        let m = move_right.compose(&turn);
        let p = Vec2::X.transform(&m).unwrap();
        assert!(p.approx_eq(Vec2::new(1.0, 1.0), 1e-12));
    }

    #[test]
    fn test_2d_lerp_takes_short_way() {
        let a = Transform2D::from_rotation(PI - 0.1);
        let b = Transform2D::from_rotation(-PI + 0.1);
        let mid = a.lerp(&b, 0.5);
        assert!(math::approx_eq(mid.rotation.abs(), PI, 1e-12));
    }

    #[test]
    fn test_3d_matrix_matches_direct_application() {
        let t = sample3d();
        let p = Vec3::new(0.5, -2.0, 1.0);
        let by_matrix = t.to_matrix().transform_point3(p).unwrap();
        assert!(by_matrix.approx_eq(t.transform_point(p), 1e-12));

        let built = spatial::translation(t.translation)
            .try_mul(&spatial::rotation(t.rotation))
            .unwrap()
            .try_mul(&spatial::scaling(t.scale))
            .unwrap();
        assert!(t.to_matrix().approx_eq(&built, 1e-12));
    }

    #[test]
    fn test_3d_inverse() {
        let t = sample3d();
        let product = t.to_matrix().try_mul(&t.inverse_matrix().unwrap()).unwrap();
        assert!(product.approx_eq(&Matrix::identity(4), 1e-12));
        assert!(Transform3D::from_scale(Vec3::ZERO).inverse_matrix().is_err());
    }

    #[test]
    fn test_3d_direction_vectors() {
        let t = Transform3D::from_rotation(Axis::Y.rotation(FRAC_PI_2));
        assert!(t.forward().approx_eq(-Vec3::X, 1e-12));
        assert!(t.right().approx_eq(-Vec3::Z, 1e-12));
        assert!(t.up().approx_eq(Vec3::Y, 1e-12));
    }

    #[test]
    fn test_looking_at() {
        let eye = Vec3::new(4.0, 3.0, -2.0);
        let target = Vec3::new(0.0, 1.0, 1.0);
        let camera = Transform3D::looking_at(eye, target, Vec3::Y).unwrap();
        let expected = (target - eye).normalize().unwrap();
        assert!(camera.forward().approx_eq(expected, 1e-12));
        assert!(camera.up().y > 0.0);

        // The camera's inverse is the view matrix.
        let view = spatial::look_at(eye, target, Vec3::Y).unwrap();
        assert!(camera.inverse_matrix().unwrap().approx_eq(&view, 1e-9));
    }

    #[test]
    fn test_3d_lerp_endpoints() {
        let a = Transform3D::IDENTITY;
        let b = sample3d();
        let start = a.lerp(&b, 0.0);
        let end = a.lerp(&b, 1.0);
        assert!(start.translation.approx_eq(a.translation, 1e-12));
        assert!(end.rotation.approx_eq(b.rotation, 1e-12));
        assert!(end.scale.approx_eq(b.scale, 1e-12));
    }
}

//! # Quaternions
//!
//! Unit quaternions represent rotations without gimbal lock and interpolate
//! smoothly. Components are stored scalar-first (`w, x, y, z`).

use crate::config::EPSILON;
use crate::utils::math;
use crate::{EulerAngles, MathResult, Matrix, PandaMathError, Vec3, Vector};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// Dot product above which slerp falls back to normalized lerp.
const SLERP_THRESHOLD: f64 = 1.0 - 1e-6;

/// `|sin(pitch)|` at or above which roll and yaw can no longer be separated.
const GIMBAL_LOCK_THRESHOLD: f64 = 1.0 - 1e-12;

/// A quaternion `w + xi + yj + zk`.
///
/// # Examples
///
/// ```
/// use panda_math::{Quaternion, Vec3, Vector};
///
/// let q = Quaternion::from_axis_angle(Vec3::Y, std::f64::consts::PI).unwrap();
/// assert!(q.rotate(Vec3::X).approx_eq(-Vec3::X, 1e-12));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    /// The rotation that does nothing.
    pub const IDENTITY: Self = Self {
        w: 1.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Creates a quaternion from raw components. The result is not normalized.
    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    /// Rotation of `angle` radians about `axis`, counter-clockwise when looking
    /// down the axis toward the origin.
    pub fn from_axis_angle(axis: Vec3, angle: f64) -> MathResult<Self> {
        let axis = axis.normalize()?;
        let (sin, cos) = (angle * 0.5).sin_cos();
        Ok(Self::new(cos, axis.x * sin, axis.y * sin, axis.z * sin))
    }

    pub fn from_euler(angles: EulerAngles) -> Self {
        let (sr, cr) = (angles.roll * 0.5).sin_cos();
        let (sp, cp) = (angles.pitch * 0.5).sin_cos();
        let (sy, cy) = (angles.yaw * 0.5).sin_cos();
        Self::new(
            cr * cp * cy + sr * sp * sy,
            sr * cp * cy - cr * sp * sy,
            cr * sp * cy + sr * cp * sy,
            cr * cp * sy - sr * sp * cy,
        )
    }

    /// Converts to roll/pitch/yaw.
    ///
    /// At gimbal lock (pitch of ±90°) only `roll - yaw` (or `roll + yaw` for
    /// -90°) is determined; yaw is set to zero and roll carries the combined
    /// angle.
    pub fn to_euler(self) -> EulerAngles {
        let q = self.normalize().unwrap_or(Self::IDENTITY);
        let sin_pitch = 2.0 * (q.w * q.y - q.z * q.x);
        if sin_pitch.abs() >= GIMBAL_LOCK_THRESHOLD {
            // Here (w, x) = cos/sin of half the combined angle for either sign of pitch.
            let roll = math::wrap_angle(2.0 * q.x.atan2(q.w));
            return EulerAngles::new(roll, FRAC_PI_2.copysign(sin_pitch), 0.0);
        }
        let roll = (2.0 * (q.w * q.x + q.y * q.z)).atan2(1.0 - 2.0 * (q.x * q.x + q.y * q.y));
        let yaw = (2.0 * (q.w * q.z + q.x * q.y)).atan2(1.0 - 2.0 * (q.y * q.y + q.z * q.z));
        EulerAngles::new(roll, sin_pitch.asin(), yaw)
    }

    /// Extracts the rotation from a 3x3 matrix or the upper-left block of a 4x4.
    ///
    /// The block is assumed to be orthonormal; scale is not removed.
    pub fn from_rotation_matrix(matrix: &Matrix) -> MathResult<Self> {
        match matrix.shape() {
            (3, 3) | (4, 4) => {}
            (rows, cols) => {
                return Err(PandaMathError::DimensionMismatch(format!(
                    "rotation must be 3x3 or 4x4, got {}x{}",
                    rows, cols
                )))
            }
        }
        let m = |r: usize, c: usize| matrix[(r, c)];
        let trace = m(0, 0) + m(1, 1) + m(2, 2);

        // Shepperd's method: divide by the largest of the four candidates.
        let q = if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0;
            Self::new(
                0.25 * s,
                (m(2, 1) - m(1, 2)) / s,
                (m(0, 2) - m(2, 0)) / s,
                (m(1, 0) - m(0, 1)) / s,
            )
        } else if m(0, 0) > m(1, 1) && m(0, 0) > m(2, 2) {
            let s = (1.0 + m(0, 0) - m(1, 1) - m(2, 2)).sqrt() * 2.0;
            Self::new(
                (m(2, 1) - m(1, 2)) / s,
                0.25 * s,
                (m(0, 1) + m(1, 0)) / s,
                (m(0, 2) + m(2, 0)) / s,
            )
        } else if m(1, 1) > m(2, 2) {
            let s = (1.0 + m(1, 1) - m(0, 0) - m(2, 2)).sqrt() * 2.0;
            Self::new(
                (m(0, 2) - m(2, 0)) / s,
                (m(0, 1) + m(1, 0)) / s,
                0.25 * s,
                (m(1, 2) + m(2, 1)) / s,
            )
        } else {
            let s = (1.0 + m(2, 2) - m(0, 0) - m(1, 1)).sqrt() * 2.0;
            Self::new(
                (m(1, 0) - m(0, 1)) / s,
                (m(0, 2) + m(2, 0)) / s,
                (m(1, 2) + m(2, 1)) / s,
                0.25 * s,
            )
        };
        q.normalize()
    }

    /// 3x3 rotation matrix. Assumes a unit quaternion.
    pub fn to_matrix3(self) -> Matrix {
        let Self { w, x, y, z } = self;
        Matrix::from_parts(
            3,
            3,
            vec![
                1.0 - 2.0 * (y * y + z * z),
                2.0 * (x * y - w * z),
                2.0 * (x * z + w * y),
                2.0 * (x * y + w * z),
                1.0 - 2.0 * (x * x + z * z),
                2.0 * (y * z - w * x),
                2.0 * (x * z - w * y),
                2.0 * (y * z + w * x),
                1.0 - 2.0 * (x * x + y * y),
            ],
        )
    }

    /// 4x4 homogeneous rotation matrix. Assumes a unit quaternion.
    pub fn to_matrix4(self) -> Matrix {
        let r = self.to_matrix3();
        Matrix::from_fn(4, 4, |row, col| match (row, col) {
            (3, 3) => 1.0,
            (3, _) | (_, 3) => 0.0,
            _ => r[(row, col)],
        })
    }

    pub fn dot(self, other: Self) -> f64 {
        self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn norm(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Scales to unit length. Fails for the zero quaternion.
    pub fn normalize(self) -> MathResult<Self> {
        let norm = self.norm();
        if norm < EPSILON {
            return Err(PandaMathError::ZeroLength(format!(
                "cannot normalize {:?}",
                self
            )));
        }
        Ok(self.scaled(1.0 / norm))
    }

    pub fn is_normalized(self) -> bool {
        math::approx_eq(self.dot(self), 1.0, 1e-6)
    }

    /// Negates the vector part. For unit quaternions this is the inverse rotation.
    pub fn conjugate(self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    /// Multiplicative inverse.
    pub fn inverse(self) -> MathResult<Self> {
        let norm_squared = self.dot(self);
        if norm_squared < EPSILON {
            return Err(PandaMathError::ZeroLength(format!(
                "{:?} has no inverse",
                self
            )));
        }
        Ok(self.conjugate().scaled(1.0 / norm_squared))
    }

    /// Vector part.
    pub fn xyz(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    fn scaled(self, factor: f64) -> Self {
        Self::new(
            self.w * factor,
            self.x * factor,
            self.y * factor,
            self.z * factor,
        )
    }

    /// Rotates a vector. Assumes a unit quaternion.
    pub fn rotate(self, v: Vec3) -> Vec3 {
        let u = self.xyz();
        let t = u.cross(v) * 2.0;
        v + t * self.w + u.cross(t)
    }

    /// Normalized linear interpolation along the shorter arc.
    pub fn nlerp(self, other: Self, t: f64) -> Self {
        let other = if self.dot(other) < 0.0 { other.scaled(-1.0) } else { other };
        let mixed = Self::new(
            math::lerp(self.w, other.w, t),
            math::lerp(self.x, other.x, t),
            math::lerp(self.y, other.y, t),
            math::lerp(self.z, other.z, t),
        );
        mixed.normalize().unwrap_or(self)
    }

    /// Spherical linear interpolation along the shorter arc.
    ///
    /// # Examples
    ///
    /// ```
    /// use panda_math::{Axis, Quaternion};
    ///
    /// let a = Quaternion::IDENTITY;
    /// let b = Axis::Z.rotation(std::f64::consts::FRAC_PI_2);
    /// let half = a.slerp(b, 0.5);
    /// assert!(half.approx_eq(Axis::Z.rotation(std::f64::consts::FRAC_PI_4), 1e-12));
    /// ```
    pub fn slerp(self, other: Self, t: f64) -> Self {
        let mut cos_theta = self.dot(other);
        let other = if cos_theta < 0.0 {
            cos_theta = -cos_theta;
            other.scaled(-1.0)
        } else {
            other
        };

        if cos_theta > SLERP_THRESHOLD {
            log::debug!("slerp: inputs nearly parallel, using nlerp");
            return self.nlerp(other, t);
        }

        let theta = cos_theta.acos();
        let sin_theta = theta.sin();
        let a = ((1.0 - t) * theta).sin() / sin_theta;
        let b = (t * theta).sin() / sin_theta;
        Self::new(
            self.w * a + other.w * b,
            self.x * a + other.x * b,
            self.y * a + other.y * b,
            self.z * a + other.z * b,
        )
    }

    /// Smallest angle in radians that rotates `self` onto `other`.
    pub fn angle_to(self, other: Self) -> f64 {
        2.0 * math::clamp(self.dot(other).abs(), 0.0, 1.0).acos()
    }

    /// Returns the rotation axis and angle. The identity maps to `(X, 0)`.
    pub fn to_axis_angle(self) -> (Vec3, f64) {
        let q = self.normalize().unwrap_or(Self::IDENTITY);
        let w = math::clamp(q.w, -1.0, 1.0);
        let angle = 2.0 * w.acos();
        let s = (1.0 - w * w).sqrt();
        if s < EPSILON {
            (Vec3::X, 0.0)
        } else {
            (q.xyz() / s, angle)
        }
    }

    /// Approximate equality as rotations: `q` and `-q` compare equal.
    pub fn approx_eq(self, other: Self, eps: f64) -> bool {
        let same = |a: Self, b: Self| {
            math::approx_eq(a.w, b.w, eps)
                && math::approx_eq(a.x, b.x, eps)
                && math::approx_eq(a.y, b.y, eps)
                && math::approx_eq(a.z, b.z, eps)
        };
        same(self, other) || same(self, other.scaled(-1.0))
    }
}

/// Hamilton product; `a * b` applies `b` first.
impl std::ops::Mul for Quaternion {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        )
    }
}

impl std::ops::Mul<Vec3> for Quaternion {
    type Output = Vec3;

    fn mul(self, v: Vec3) -> Vec3 {
        self.rotate(v)
    }
}

impl std::fmt::Display for Quaternion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {}, {})", self.w, self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Axis;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    #[test]
    fn test_identity() {
        assert_eq!(Quaternion::default(), Quaternion::IDENTITY);
        assert_eq!(Quaternion::IDENTITY.rotate(Vec3::new(1.0, 2.0, 3.0)), Vec3::new(1.0, 2.0, 3.0));
        assert!(Quaternion::IDENTITY.to_matrix3().approx_eq(&Matrix::identity(3), 1e-12));
    }

    #[test]
    fn test_from_axis_angle_zero_axis() {
        assert!(matches!(
            Quaternion::from_axis_angle(Vec3::ZERO, 1.0),
            Err(PandaMathError::ZeroLength(_))
        ));
    }

    #[test]
    fn test_rotation_matches_matrix() {
        let q = Quaternion::from_axis_angle(Vec3::new(1.0, 2.0, -0.5), 0.9).unwrap();
        let v = Vec3::new(0.3, -1.2, 2.0);
        let by_matrix = q.to_matrix3().mul_vector(&v.to_array()).unwrap();
        let rotated = q.rotate(v);
        assert!(rotated.approx_eq(Vec3::new(by_matrix[0], by_matrix[1], by_matrix[2]), 1e-12));
        assert!(math::approx_eq(rotated.length(), v.length(), 1e-12));
    }

    #[test]
    fn test_composition_order() {
        let rx = Axis::X.rotation(FRAC_PI_2);
        let rz = Axis::Z.rotation(FRAC_PI_2);
        // Rotate about X first, then Z.
        let combined = rz * rx;
        let expected = rz.rotate(rx.rotate(Vec3::Y));
        assert!(combined.rotate(Vec3::Y).approx_eq(expected, 1e-12));
        assert!(expected.approx_eq(Vec3::Z, 1e-12));
    }

    #[test]
    fn test_inverse_and_conjugate() {
        let q = Quaternion::from_axis_angle(Vec3::Y, 1.1).unwrap();
        assert!((q * q.conjugate()).approx_eq(Quaternion::IDENTITY, 1e-12));

        let scaled = Quaternion::new(2.0, 0.0, 0.0, 0.0);
        assert_eq!(scaled.inverse().unwrap(), Quaternion::new(0.5, 0.0, 0.0, 0.0));
        assert!(Quaternion::new(0.0, 0.0, 0.0, 0.0).inverse().is_err());
    }

    #[test]
    fn test_euler_round_trip() {
        let angles = EulerAngles::new(0.4, -0.7, 2.5);
        let back = Quaternion::from_euler(angles).to_euler();
        assert!(math::approx_eq(back.roll, angles.roll, 1e-12));
        assert!(math::approx_eq(back.pitch, angles.pitch, 1e-12));
        assert!(math::approx_eq(back.yaw, angles.yaw, 1e-12));
    }

    #[test]
    fn test_euler_matches_axis_composition() {
        let angles = EulerAngles::new(0.3, 0.5, 0.7);
        let composed = Axis::Z.rotation(0.7) * Axis::Y.rotation(0.5) * Axis::X.rotation(0.3);
        assert!(Quaternion::from_euler(angles).approx_eq(composed, 1e-12));
    }

    #[test]
    fn test_gimbal_lock_pitch_is_clamped() {
        let q = Quaternion::from_euler(EulerAngles::new(0.0, FRAC_PI_2, 0.0));
        let e = q.to_euler();
        assert!(math::approx_eq(e.pitch, FRAC_PI_2, 1e-6));
    }

    #[test]
    fn test_gimbal_lock_keeps_rotation() {
        let cases = [
            EulerAngles::new(0.3, FRAC_PI_2, 0.5),
            EulerAngles::new(0.7, FRAC_PI_2, -1.1),
            EulerAngles::new(0.3, -FRAC_PI_2, 0.5),
            EulerAngles::new(-2.5, -FRAC_PI_2, 1.9),
        ];
        for angles in cases {
            let q = Quaternion::from_euler(angles);
            let e = q.to_euler();
            assert_eq!(e.yaw, 0.0);
            assert!(math::approx_eq(e.pitch, angles.pitch, 1e-12));
            let back = Quaternion::from_euler(e);
            assert!(back.approx_eq(q, 1e-9), "{:?} came back as {:?}", angles, e);

            let v = Vec3::new(1.0, 2.0, 3.0);
            assert!(back.rotate(v).approx_eq(q.rotate(v), 1e-9));
        }
    }

    #[test]
    fn test_matrix_round_trip() {
        for q in [
            Quaternion::from_axis_angle(Vec3::new(1.0, 1.0, 0.0), 2.0).unwrap(),
            Axis::X.rotation(PI),
            Axis::Y.rotation(PI),
            Axis::Z.rotation(PI),
            Quaternion::IDENTITY,
        ] {
            let back = Quaternion::from_rotation_matrix(&q.to_matrix4()).unwrap();
            assert!(back.approx_eq(q, 1e-12), "{} != {}", back, q);
        }
        assert!(Quaternion::from_rotation_matrix(&Matrix::identity(2)).is_err());
    }

    #[test]
    fn test_slerp_endpoints_and_shortest_path() {
        let a = Axis::X.rotation(0.2);
        let b = Axis::Y.rotation(1.3);
        assert!(a.slerp(b, 0.0).approx_eq(a, 1e-12));
        assert!(a.slerp(b, 1.0).approx_eq(b, 1e-12));

        // -b is the same rotation; slerp must not take the long way round.
        let mid = a.slerp(b.scaled(-1.0), 0.5);
        assert!(mid.approx_eq(a.slerp(b, 0.5), 1e-12));
        assert!(mid.is_normalized());
    }

    #[test]
    fn test_slerp_nearly_parallel() {
        let a = Axis::Z.rotation(0.5);
        let b = Axis::Z.rotation(0.5 + 1e-9);
        assert!(a.slerp(b, 0.5).approx_eq(a, 1e-8));
    }

    #[test]
    fn test_angle_to() {
        let a = Quaternion::IDENTITY;
        let b = Axis::Y.rotation(FRAC_PI_4);
        assert!(math::approx_eq(a.angle_to(b), FRAC_PI_4, 1e-12));
        assert!(math::approx_eq(b.angle_to(b.scaled(-1.0)), 0.0, 1e-6));
    }

    #[test]
    fn test_axis_angle_round_trip() {
        let (axis, angle) = Quaternion::from_axis_angle(Vec3::new(0.0, 3.0, 4.0), 1.25)
            .unwrap()
            .to_axis_angle();
        assert!(axis.approx_eq(Vec3::new(0.0, 0.6, 0.8), 1e-12));
        assert!(math::approx_eq(angle, 1.25, 1e-12));
        assert_eq!(Quaternion::IDENTITY.to_axis_angle(), (Vec3::X, 0.0));
    }
}

//! # Spatial Transforms
//!
//! 4x4 homogeneous matrices for 3D geometry, cameras, and projections.
//! Coordinates are right-handed; cameras look down -Z and projections map
//! into OpenGL clip space (depth -1 at the near plane, +1 at the far plane).

use crate::{MathResult, Matrix, PandaMathError, Quaternion, Vec3, Vector};
use std::f64::consts::PI;

/// Moves points by `offset`.
pub fn translation(offset: Vec3) -> Matrix {
    Matrix::from_parts(
        4,
        4,
        vec![
            1.0, 0.0, 0.0, offset.x, //
            0.0, 1.0, 0.0, offset.y, //
            0.0, 0.0, 1.0, offset.z, //
            0.0, 0.0, 0.0, 1.0,
        ],
    )
}

/// Rotates about +X by `angle` radians.
pub fn rotation_x(angle: f64) -> Matrix {
    let (s, c) = angle.sin_cos();
    Matrix::from_parts(
        4,
        4,
        vec![
            1.0, 0.0, 0.0, 0.0, //
            0.0, c, -s, 0.0, //
            0.0, s, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    )
}

/// Rotates about +Y by `angle` radians.
pub fn rotation_y(angle: f64) -> Matrix {
    let (s, c) = angle.sin_cos();
    Matrix::from_parts(
        4,
        4,
        vec![
            c, 0.0, s, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            -s, 0.0, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    )
}

/// Rotates about +Z by `angle` radians.
pub fn rotation_z(angle: f64) -> Matrix {
    let (s, c) = angle.sin_cos();
    Matrix::from_parts(
        4,
        4,
        vec![
            c, -s, 0.0, 0.0, //
            s, c, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    )
}

/// Rotates about an arbitrary `axis` by `angle` radians.
pub fn rotation_axis(axis: Vec3, angle: f64) -> MathResult<Matrix> {
    Ok(Quaternion::from_axis_angle(axis, angle)?.to_matrix4())
}

/// Rotation matrix for a unit quaternion.
pub fn rotation(q: Quaternion) -> Matrix {
    q.to_matrix4()
}

/// Scales along each axis independently.
pub fn scaling(factors: Vec3) -> Matrix {
    Matrix::from_parts(
        4,
        4,
        vec![
            factors.x, 0.0, 0.0, 0.0, //
            0.0, factors.y, 0.0, 0.0, //
            0.0, 0.0, factors.z, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    )
}

pub fn uniform_scaling(factor: f64) -> Matrix {
    scaling(Vec3::splat(factor))
}

/// View matrix for a camera at `eye` looking at `target`.
///
/// After the transform the camera sits at the origin looking down -Z with
/// `up` projected to +Y.
///
/// # Examples
///
/// ```
/// use panda_math::{spatial, Vec3, Vector};
///
/// let view = spatial::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y).unwrap();
/// let p = view.transform_point3(Vec3::ZERO).unwrap();
/// assert!(p.approx_eq(Vec3::new(0.0, 0.0, -5.0), 1e-12));
/// ```
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> MathResult<Matrix> {
    let forward = unit(target - eye).ok_or_else(|| {
        PandaMathError::InvalidArgument(format!("eye and target coincide at {}", eye))
    })?;
    let up = unit(up).ok_or_else(|| {
        PandaMathError::InvalidArgument(format!("up must be a non-zero finite vector, got {}", up))
    })?;
    // Both inputs are unit length, so the cross product's length is the sine between them.
    let side = forward.cross(up).normalize().map_err(|_| {
        PandaMathError::InvalidArgument(format!(
            "up {} is parallel to the view direction {}",
            up, forward
        ))
    })?;
    let up = side.cross(forward);
    Ok(Matrix::from_parts(
        4,
        4,
        vec![
            side.x, side.y, side.z, -side.dot(eye), //
            up.x, up.y, up.z, -up.dot(eye), //
            -forward.x, -forward.y, -forward.z, forward.dot(eye), //
            0.0, 0.0, 0.0, 1.0,
        ],
    ))
}

/// Scales `v` to unit length at any magnitude; `None` for zero or non-finite input.
fn unit(v: Vec3) -> Option<Vec3> {
    let length = v.length();
    (length > 0.0 && length.is_finite()).then(|| v / length)
}

/// Perspective projection with vertical field of view `fov_y` in radians.
///
/// Requires `0 < fov_y < π`, a positive `aspect` (width / height), and
/// `0 < near < far`.
pub fn perspective(fov_y: f64, aspect: f64, near: f64, far: f64) -> MathResult<Matrix> {
    if !(fov_y > 0.0 && fov_y < PI) {
        return Err(PandaMathError::InvalidArgument(format!(
            "field of view must be in (0, π), got {}",
            fov_y
        )));
    }
    if !(aspect > 0.0 && aspect.is_finite()) {
        return Err(PandaMathError::InvalidArgument(format!(
            "aspect ratio must be positive, got {}",
            aspect
        )));
    }
    if !(near > 0.0 && near < far && far.is_finite()) {
        return Err(PandaMathError::InvalidArgument(format!(
            "clip planes must satisfy 0 < near < far, got near={} far={}",
            near, far
        )));
    }
    let f = 1.0 / (fov_y * 0.5).tan();
    let depth = near - far;
    Ok(Matrix::from_parts(
        4,
        4,
        vec![
            f / aspect, 0.0, 0.0, 0.0, //
            0.0, f, 0.0, 0.0, //
            0.0, 0.0, (far + near) / depth, 2.0 * far * near / depth, //
            0.0, 0.0, -1.0, 0.0,
        ],
    ))
}

/// Orthographic projection of the given view box into the unit cube.
pub fn orthographic(
    left: f64,
    right: f64,
    bottom: f64,
    top: f64,
    near: f64,
    far: f64,
) -> MathResult<Matrix> {
    for (name, lo, hi) in [("left/right", left, right), ("bottom/top", bottom, top), ("near/far", near, far)] {
        if lo == hi || !lo.is_finite() || !hi.is_finite() {
            return Err(PandaMathError::InvalidArgument(format!(
                "{} planes must be finite and distinct, got {} and {}",
                name, lo, hi
            )));
        }
    }
    let (w, h, d) = (right - left, top - bottom, far - near);
    Ok(Matrix::from_parts(
        4,
        4,
        vec![
            2.0 / w, 0.0, 0.0, -(right + left) / w, //
            0.0, 2.0 / h, 0.0, -(top + bottom) / h, //
            0.0, 0.0, -2.0 / d, -(far + near) / d, //
            0.0, 0.0, 0.0, 1.0,
        ],
    ))
}

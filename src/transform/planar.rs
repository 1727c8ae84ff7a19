//! # Planar Transforms
//!
//! 3x3 homogeneous matrices for 2D geometry. Points are column vectors
//! `(x, y, 1)`; angles are radians, counter-clockwise positive.

use crate::{MathResult, Matrix, Vec2, Vector};

/// Moves points by `offset`.
pub fn translation(offset: Vec2) -> Matrix {
    Matrix::from_parts(3, 3, vec![1.0, 0.0, offset.x, 0.0, 1.0, offset.y, 0.0, 0.0, 1.0])
}

/// Rotates about the origin by `angle` radians.
pub fn rotation(angle: f64) -> Matrix {
    let (sin, cos) = angle.sin_cos();
    Matrix::from_parts(3, 3, vec![cos, -sin, 0.0, sin, cos, 0.0, 0.0, 0.0, 1.0])
}

/// Rotates about `center` by `angle` radians.
///
/// # Examples
///
/// ```
/// use panda_math::{planar, Transformable, Vec2, Vector};
///
/// let m = planar::rotation_about(Vec2::new(1.0, 1.0), std::f64::consts::PI);
/// let p = Vec2::new(2.0, 1.0).transform(&m).unwrap();
/// assert!(p.approx_eq(Vec2::new(0.0, 1.0), 1e-12));
/// ```
pub fn rotation_about(center: Vec2, angle: f64) -> Matrix {
    let (sin, cos) = angle.sin_cos();
    // T(center) * R(angle) * T(-center), expanded.
    let tx = center.x - cos * center.x + sin * center.y;
    let ty = center.y - sin * center.x - cos * center.y;
    Matrix::from_parts(3, 3, vec![cos, -sin, tx, sin, cos, ty, 0.0, 0.0, 1.0])
}

/// Scales along X and Y independently.
pub fn scaling(factors: Vec2) -> Matrix {
    Matrix::from_parts(3, 3, vec![factors.x, 0.0, 0.0, 0.0, factors.y, 0.0, 0.0, 0.0, 1.0])
}

pub fn uniform_scaling(factor: f64) -> Matrix {
    scaling(Vec2::splat(factor))
}

/// Shears X by `x * y` and Y by `y * x`.
pub fn shear(x: f64, y: f64) -> Matrix {
    Matrix::from_parts(3, 3, vec![1.0, x, 0.0, y, 1.0, 0.0, 0.0, 0.0, 1.0])
}

/// Mirrors across the line through the origin along `direction`.
pub fn reflection(direction: Vec2) -> MathResult<Matrix> {
    let d = direction.normalize()?;
    let (xx, xy, yy) = (d.x * d.x, d.x * d.y, d.y * d.y);
    Ok(Matrix::from_parts(
        3,
        3,
        vec![2.0 * xx - 1.0, 2.0 * xy, 0.0, 2.0 * xy, 2.0 * yy - 1.0, 0.0, 0.0, 0.0, 1.0],
    ))
}

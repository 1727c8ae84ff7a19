//! # Transform Module
//!
//! Geometric transformations built from homogeneous matrices.
//!
//! This module provides:
//! - `planar`: 3x3 builders for 2D translation, rotation, scale, shear, reflection
//! - `spatial`: 4x4 builders for 3D transforms, cameras, and projections
//! - `Transform2D` / `Transform3D`: translation-rotation-scale components
//! - `TransformPipeline`: a serializable list of transform commands
//!
//! Builders are reached through their module (`planar::rotation`,
//! `spatial::rotation_x`) because the 2D and 3D versions share names.

pub mod components;
pub mod pipeline;
pub mod planar;
pub mod spatial;

pub use components::*;
pub use pipeline::*;

use crate::{MathResult, Matrix, PandaMathError, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Number of spatial dimensions a transform operates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    /// Planar; homogeneous matrices are 3x3
    Two,
    /// Spatial; homogeneous matrices are 4x4
    Three,
}

impl Dimension {
    /// Side length of the homogeneous matrix for this dimension.
    pub fn homogeneous_size(self) -> usize {
        match self {
            Dimension::Two => 3,
            Dimension::Three => 4,
        }
    }

    /// Parses `2`, `3`, `2d`, or `3d`.
    pub fn parse(text: &str) -> MathResult<Self> {
        match text.trim().to_lowercase().as_str() {
            "2" | "2d" => Ok(Dimension::Two),
            "3" | "3d" => Ok(Dimension::Three),
            other => Err(PandaMathError::Parse(format!(
                "dimension must be 2 or 3, got '{}'",
                other
            ))),
        }
    }
}

impl std::str::FromStr for Dimension {
    type Err = PandaMathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dimension::Two => write!(f, "2d"),
            Dimension::Three => write!(f, "3d"),
        }
    }
}

/// Values that can be mapped through a matrix.
///
/// Points are treated as positions: homogeneous matrices translate them and
/// apply the perspective divide.
///
/// # Examples
///
/// ```
/// use panda_math::{planar, Transformable, Vec2, Vector};
///
/// let m = planar::rotation(std::f64::consts::FRAC_PI_2);
/// assert!(Vec2::X.transform(&m).unwrap().approx_eq(Vec2::Y, 1e-12));
/// ```
pub trait Transformable: Sized {
    fn transform(&self, matrix: &Matrix) -> MathResult<Self>;
}

impl Transformable for Vec2 {
    /// Accepts a 2x2 linear map or a 3x3 homogeneous matrix.
    fn transform(&self, matrix: &Matrix) -> MathResult<Self> {
        match matrix.shape() {
            (2, 2) => {
                let r = matrix.mul_vector(&self.to_array())?;
                Ok(Vec2::new(r[0], r[1]))
            }
            (3, 3) => matrix.transform_point2(*self),
            (rows, cols) => Err(PandaMathError::DimensionMismatch(format!(
                "Vec2 needs a 2x2 or 3x3 matrix, got {}x{}",
                rows, cols
            ))),
        }
    }
}

impl Transformable for Vec3 {
    /// Accepts a 3x3 linear map or a 4x4 homogeneous matrix.
    fn transform(&self, matrix: &Matrix) -> MathResult<Self> {
        match matrix.shape() {
            (3, 3) => {
                let r = matrix.mul_vector(&self.to_array())?;
                Ok(Vec3::new(r[0], r[1], r[2]))
            }
            (4, 4) => matrix.transform_point3(*self),
            (rows, cols) => Err(PandaMathError::DimensionMismatch(format!(
                "Vec3 needs a 3x3 or 4x4 matrix, got {}x{}",
                rows, cols
            ))),
        }
    }
}

impl Transformable for Vec4 {
    fn transform(&self, matrix: &Matrix) -> MathResult<Self> {
        matrix.mul_vec4(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vector;

    #[test]
    fn test_dimension_parse() {
        assert_eq!(Dimension::parse("2").unwrap(), Dimension::Two);
        assert_eq!(Dimension::parse("3D").unwrap(), Dimension::Three);
        assert!(Dimension::parse("4").is_err());
        assert_eq!(Dimension::Two.homogeneous_size(), 3);
        assert_eq!(Dimension::Three.homogeneous_size(), 4);
        assert_eq!("3".parse::<Dimension>().unwrap(), Dimension::Three);
        assert_eq!(Dimension::Two.to_string().parse::<Dimension>().unwrap(), Dimension::Two);
        assert!(matches!("xyz".parse::<Dimension>(), Err(PandaMathError::Parse(_))));
    }

    #[test]
    fn test_vec2_linear_and_homogeneous() {
        let linear = Matrix::from_rows(&[vec![2.0, 0.0], vec![0.0, 3.0]]).unwrap();
        assert_eq!(Vec2::ONE.transform(&linear).unwrap(), Vec2::new(2.0, 3.0));

        let m = planar::translation(Vec2::new(1.0, -1.0));
        assert_eq!(Vec2::ONE.transform(&m).unwrap(), Vec2::new(2.0, 0.0));
        assert!(Vec2::ONE.transform(&Matrix::identity(4)).is_err());
    }

    #[test]
    fn test_vec3_linear_and_homogeneous() {
        let q = crate::Axis::Z.rotation(std::f64::consts::FRAC_PI_2);
        let rotated = Vec3::X.transform(&q.to_matrix3()).unwrap();
        assert!(rotated.approx_eq(Vec3::Y, 1e-12));

        let m = spatial::translation(Vec3::ONE);
        assert_eq!(Vec3::ZERO.transform(&m).unwrap(), Vec3::ONE);
        assert!(Vec3::ONE.transform(&Matrix::identity(2)).is_err());
    }

    #[test]
    fn test_vec4_requires_4x4() {
        let m = spatial::scaling(Vec3::splat(2.0));
        assert_eq!(
            Vec4::new(1.0, 1.0, 1.0, 1.0).transform(&m).unwrap(),
            Vec4::new(2.0, 2.0, 2.0, 1.0)
        );
        assert!(Vec4::ONE.transform(&Matrix::identity(3)).is_err());
    }
}

//! # Rotation Module
//!
//! Rotation representations for 3D orientation.
//!
//! - `Axis`: the three principal axes
//! - `EulerAngles`: roll/pitch/yaw in the Z-Y-X convention
//! - `Quaternion`: unit quaternions for composition and interpolation

pub mod euler;
pub mod quaternion;

pub use euler::*;
pub use quaternion::*;

use crate::{PandaMathError, Vec3};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A principal coordinate axis.
///
/// # Examples
///
/// ```
/// use panda_math::{Axis, Vec3};
///
/// assert_eq!(Axis::Y.unit(), Vec3::Y);
/// assert_eq!("z".parse::<Axis>().unwrap(), Axis::Z);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    #[default]
    Z,
}

impl Axis {
    /// Unit vector pointing along the axis.
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    /// Rotation of `angle` radians about this axis.
    pub fn rotation(self, angle: f64) -> Quaternion {
        let (sin, cos) = (angle * 0.5).sin_cos();
        let v = self.unit() * sin;
        Quaternion::new(cos, v.x, v.y, v.z)
    }

    /// Returns all three axes.
    pub fn all() -> Vec<Axis> {
        vec![Axis::X, Axis::Y, Axis::Z]
    }
}

impl FromStr for Axis {
    type Err = PandaMathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            other => Err(PandaMathError::Parse(format!("unknown axis '{}'", other))),
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        write!(f, "{}", name)
    }
}

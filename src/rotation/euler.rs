//! # Euler Angles

use crate::Quaternion;
use serde::{Deserialize, Serialize};

/// Roll, pitch, and yaw in radians.
///
/// Applied in the order roll (about X), then pitch (about Y), then yaw
/// (about Z), i.e. `R = Rz(yaw) * Ry(pitch) * Rx(roll)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EulerAngles {
    /// Rotation about X
    pub roll: f64,
    /// Rotation about Y
    pub pitch: f64,
    /// Rotation about Z
    pub yaw: f64,
}

impl EulerAngles {
    pub fn new(roll: f64, pitch: f64, yaw: f64) -> Self {
        Self { roll, pitch, yaw }
    }

    /// Creates angles from degrees.
    pub fn from_degrees(roll: f64, pitch: f64, yaw: f64) -> Self {
        Self::new(roll.to_radians(), pitch.to_radians(), yaw.to_radians())
    }

    /// Returns `[roll, pitch, yaw]` in degrees.
    pub fn to_degrees(self) -> [f64; 3] {
        [
            self.roll.to_degrees(),
            self.pitch.to_degrees(),
            self.yaw.to_degrees(),
        ]
    }

    pub fn to_quaternion(self) -> Quaternion {
        Quaternion::from_euler(self)
    }
}

impl From<Quaternion> for EulerAngles {
    fn from(q: Quaternion) -> Self {
        q.to_euler()
    }
}

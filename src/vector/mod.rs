//! # Vector Module
//!
//! Fixed-size `f64` vectors for 2D, 3D, and homogeneous 4D coordinates.
//!
//! Every vector type implements the [`Vector`] trait, which supplies the
//! geometry shared by all dimensions (length, normalization, projection,
//! interpolation). Component-wise operators are generated per type so each
//! one stays a plain `Copy` struct with public fields.

use crate::config::EPSILON;
use crate::utils::math;
use crate::{MathResult, PandaMathError};
use std::fmt::Debug;
use std::ops::{Add, Mul, Sub};

/// Implements constants, component helpers, operators, and conversions shared
/// by every vector type.
macro_rules! impl_vector_common {
    ($name:ident { $($field:ident: $index:tt),+ }, $dim:expr) => {
        impl $name {
            /// All components zero.
            pub const ZERO: Self = Self { $($field: 0.0),+ };
            /// All components one.
            pub const ONE: Self = Self { $($field: 1.0),+ };

            /// Creates a vector with every component set to `value`.
            pub fn splat(value: f64) -> Self {
                Self { $($field: value),+ }
            }

            /// Component-wise minimum.
            pub fn min(self, other: Self) -> Self {
                Self { $($field: self.$field.min(other.$field)),+ }
            }

            /// Component-wise maximum.
            pub fn max(self, other: Self) -> Self {
                Self { $($field: self.$field.max(other.$field)),+ }
            }

            pub fn abs(self) -> Self {
                Self { $($field: self.$field.abs()),+ }
            }

            pub fn floor(self) -> Self {
                Self { $($field: self.$field.floor()),+ }
            }

            pub fn ceil(self) -> Self {
                Self { $($field: self.$field.ceil()),+ }
            }

            pub fn round(self) -> Self {
                Self { $($field: self.$field.round()),+ }
            }

            /// Smallest component.
            pub fn min_element(self) -> f64 {
                self.to_array().into_iter().fold(f64::INFINITY, f64::min)
            }

            /// Largest component.
            pub fn max_element(self) -> f64 {
                self.to_array().into_iter().fold(f64::NEG_INFINITY, f64::max)
            }

            /// Returns true if no component is NaN or infinite.
            pub fn is_finite(self) -> bool {
                $(self.$field.is_finite())&&+
            }

            /// Scales the vector down so its length is at most `max`.
            pub fn clamp_length(self, max: f64) -> Self {
                let length = Vector::length(self);
                if length > max && length > 0.0 {
                    self * (max / length)
                } else {
                    self
                }
            }

            /// Returns the component at `index`, or None if out of range.
            pub fn get(self, index: usize) -> Option<f64> {
                match index {
                    $($index => Some(self.$field),)+
                    _ => None,
                }
            }

            pub fn to_array(self) -> [f64; $dim] {
                [$(self.$field),+]
            }
        }

        impl Vector for $name {
            const DIM: usize = $dim;

            fn dot(self, other: Self) -> f64 {
                0.0 $(+ self.$field * other.$field)+
            }

            fn to_vec(self) -> Vec<f64> {
                self.to_array().to_vec()
            }

            fn from_slice(values: &[f64]) -> MathResult<Self> {
                if values.len() != $dim {
                    return Err(PandaMathError::DimensionMismatch(format!(
                        "{} needs {} components, got {}",
                        stringify!($name),
                        $dim,
                        values.len()
                    )));
                }
                Ok(Self { $($field: values[$index]),+ })
            }
        }

        impl std::ops::Add for $name {
            type Output = Self;

            fn add(self, other: Self) -> Self {
                Self { $($field: self.$field + other.$field),+ }
            }
        }

        impl std::ops::Sub for $name {
            type Output = Self;

            fn sub(self, other: Self) -> Self {
                Self { $($field: self.$field - other.$field),+ }
            }
        }

        impl std::ops::Mul for $name {
            type Output = Self;

            fn mul(self, other: Self) -> Self {
                Self { $($field: self.$field * other.$field),+ }
            }
        }

        impl std::ops::Div for $name {
            type Output = Self;

            fn div(self, other: Self) -> Self {
                Self { $($field: self.$field / other.$field),+ }
            }
        }

        impl std::ops::Mul<f64> for $name {
            type Output = Self;

            fn mul(self, scalar: f64) -> Self {
                Self { $($field: self.$field * scalar),+ }
            }
        }

        impl std::ops::Mul<$name> for f64 {
            type Output = $name;

            fn mul(self, vector: $name) -> $name {
                vector * self
            }
        }

        impl std::ops::Div<f64> for $name {
            type Output = Self;

            fn div(self, scalar: f64) -> Self {
                Self { $($field: self.$field / scalar),+ }
            }
        }

        impl std::ops::Neg for $name {
            type Output = Self;

            fn neg(self) -> Self {
                Self { $($field: -self.$field),+ }
            }
        }

        impl std::ops::AddAssign for $name {
            fn add_assign(&mut self, other: Self) {
                $(self.$field += other.$field;)+
            }
        }

        impl std::ops::SubAssign for $name {
            fn sub_assign(&mut self, other: Self) {
                $(self.$field -= other.$field;)+
            }
        }

        impl std::ops::MulAssign<f64> for $name {
            fn mul_assign(&mut self, scalar: f64) {
                $(self.$field *= scalar;)+
            }
        }

        impl std::ops::DivAssign<f64> for $name {
            fn div_assign(&mut self, scalar: f64) {
                $(self.$field /= scalar;)+
            }
        }

        /// Panics if `index` is out of range, like array indexing.
        impl std::ops::Index<usize> for $name {
            type Output = f64;

            fn index(&self, index: usize) -> &f64 {
                match index {
                    $($index => &self.$field,)+
                    _ => panic!(
                        "index {} out of range for {}",
                        index,
                        stringify!($name)
                    ),
                }
            }
        }

        impl std::ops::IndexMut<usize> for $name {
            fn index_mut(&mut self, index: usize) -> &mut f64 {
                match index {
                    $($index => &mut self.$field,)+
                    _ => panic!(
                        "index {} out of range for {}",
                        index,
                        stringify!($name)
                    ),
                }
            }
        }

        impl From<[f64; $dim]> for $name {
            fn from(values: [f64; $dim]) -> Self {
                Self { $($field: values[$index]),+ }
            }
        }

        impl From<$name> for [f64; $dim] {
            fn from(vector: $name) -> Self {
                vector.to_array()
            }
        }

        impl std::iter::Sum for $name {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold(Self::ZERO, |acc, v| acc + v)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let parts: Vec<String> = self.to_array().iter().map(|c| c.to_string()).collect();
                write!(f, "({})", parts.join(", "))
            }
        }
    };
}

pub mod vec2;
pub mod vec3;
pub mod vec4;

pub use vec2::*;
pub use vec3::*;
pub use vec4::*;

/// Geometry shared by all vector types.
///
/// Implementors supply the dot product and slice conversions; everything
/// else is derived from them.
///
/// # Examples
///
/// ```
/// use panda_math::{Vec3, Vector};
///
/// let v = Vec3::new(3.0, 0.0, 4.0);
/// assert_eq!(v.length(), 5.0);
/// assert!(v.normalize().unwrap().approx_eq(Vec3::new(0.6, 0.0, 0.8), 1e-12));
/// ```
pub trait Vector:
    Copy + Debug + PartialEq + Add<Output = Self> + Sub<Output = Self> + Mul<f64, Output = Self>
{
    /// Number of components.
    const DIM: usize;

    fn dot(self, other: Self) -> f64;

    /// Components as an owned `Vec`.
    fn to_vec(self) -> Vec<f64>;

    /// Builds a vector from exactly `DIM` components.
    fn from_slice(values: &[f64]) -> MathResult<Self>;

    fn length_squared(self) -> f64 {
        self.dot(self)
    }

    fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    fn distance(self, other: Self) -> f64 {
        (self - other).length()
    }

    fn distance_squared(self, other: Self) -> f64 {
        (self - other).length_squared()
    }

    /// Returns the unit vector in the same direction.
    ///
    /// Fails with `ZeroLength` when the vector is shorter than `EPSILON`.
    fn normalize(self) -> MathResult<Self> {
        let length = self.length();
        if length < EPSILON {
            return Err(PandaMathError::ZeroLength(format!(
                "cannot normalize {:?}",
                self
            )));
        }
        Ok(self * (1.0 / length))
    }

    /// Like [`Vector::normalize`] but returns the zero vector instead of failing.
    fn normalize_or_zero(self) -> Self {
        self.normalize().unwrap_or(self * 0.0)
    }

    fn is_normalized(self) -> bool {
        math::approx_eq(self.length_squared(), 1.0, 1e-6)
    }

    /// Unsigned angle in radians between two vectors, in `[0, π]`.
    fn angle_between(self, other: Self) -> MathResult<f64> {
        let denom = self.length() * other.length();
        if denom < EPSILON {
            return Err(PandaMathError::ZeroLength(format!(
                "angle between {:?} and {:?} is undefined",
                self, other
            )));
        }
        Ok(math::clamp(self.dot(other) / denom, -1.0, 1.0).acos())
    }

    /// Component of `self` parallel to `onto`.
    fn project_onto(self, onto: Self) -> MathResult<Self> {
        let length_squared = onto.length_squared();
        if length_squared < EPSILON {
            return Err(PandaMathError::ZeroLength(format!(
                "cannot project onto {:?}",
                onto
            )));
        }
        Ok(onto * (self.dot(onto) / length_squared))
    }

    /// Component of `self` perpendicular to `from`.
    fn reject_from(self, from: Self) -> MathResult<Self> {
        Ok(self - self.project_onto(from)?)
    }

    /// Reflects `self` off a surface with the given unit `normal`.
    fn reflect(self, normal: Self) -> Self {
        self - normal * (2.0 * self.dot(normal))
    }

    /// Linear interpolation. `t` is not clamped.
    fn lerp(self, other: Self, t: f64) -> Self {
        self + (other - self) * t
    }

    /// Component-wise approximate equality.
    fn approx_eq(self, other: Self, eps: f64) -> bool {
        self.to_vec()
            .into_iter()
            .zip(other.to_vec())
            .all(|(a, b)| math::approx_eq(a, b, eps))
    }
}

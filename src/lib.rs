//! # Panda Math
//!
//! Vector, matrix, and transformation utilities for 2D/3D graphics and game development.
//!
//! ## Architecture Overview
//!
//! The crate is layered from scalars up to full transforms:
//!
//! - **Vectors**: `Vec2`, `Vec3`, `Vec4` with component-wise operators and the `Vector` trait
//! - **Matrices**: a dense, row-major `Matrix` of any shape with LU-based inversion
//! - **Rotations**: `Quaternion`, `EulerAngles`, and the principal `Axis`
//! - **Transforms**: homogeneous 2D (3x3) and 3D (4x4) builders, TRS components,
//!   and serializable transform pipelines
//!
//! ## Conventions
//!
//! All scalars are `f64`. Coordinates are right-handed and vectors are columns,
//! so a matrix is applied as `p' = M * p` and `A.try_mul(&B)` applies `B` first.
//! Points use homogeneous `w = 1`, directions use `w = 0`.
//!
//! ```
//! use panda_math::{spatial, Transformable, Vec3};
//!
//! let m = spatial::translation(Vec3::new(1.0, 2.0, 3.0));
//! let p = Vec3::ZERO.transform(&m).unwrap();
//! assert_eq!(p, Vec3::new(1.0, 2.0, 3.0));
//! ```

pub mod config;
pub mod matrix;
pub mod rotation;
pub mod transform;
pub mod utils;
pub mod vector;

// Core module re-exports
pub use config::*;
pub use matrix::*;
pub use rotation::*;
pub use transform::*;
pub use utils::*;
pub use vector::*;

/// Core error type for panda_math.
#[derive(thiserror::Error, Debug)]
pub enum PandaMathError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Operand shapes are incompatible
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Operation requires a square matrix
    #[error("Matrix is not square: {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    /// Matrix has no inverse
    #[error("Singular matrix: {0}")]
    SingularMatrix(String),

    /// Row or column index outside the matrix
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(String),

    /// Vector has no direction
    #[error("Zero-length vector: {0}")]
    ZeroLength(String),

    /// Argument outside the valid domain
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Textual input could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type used throughout the panda_math codebase.
pub type MathResult<T> = Result<T, PandaMathError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

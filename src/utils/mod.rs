//! # Utilities Module
//!
//! Scalar helpers and seeded random sampling shared by the vector, matrix, and
//! transform modules.

pub mod math;
pub mod random;

pub use math::*;
pub use random::*;

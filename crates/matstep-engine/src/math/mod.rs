//! Dense matrix and vector types used throughout the crate.
//!
//! `Matrix` is a row-major `f64` buffer with a validated rectangular shape
//! (at least 1x1); `Vector` is a plain sequence of `f64`. Both are owned by
//! the caller; engine operations never keep references to them.
pub mod matrix;
pub mod vector;

pub use matrix::{Matrix, Shape, ShapeError};
pub use vector::Vector;

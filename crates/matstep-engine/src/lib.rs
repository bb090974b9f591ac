//! matstep-engine: small dense linear algebra that explains itself.
//!
//! Every operation (addition, subtraction, multiplication, cofactor
//! determinant, Gauss-Jordan inverse, Doolittle LU, Gaussian and
//! Gauss-Jordan elimination with back substitution) returns its result
//! together with a `Trace`, the ordered list of arithmetic steps that
//! produced it.
//!
//! The engine holds no state between calls. Inputs are borrowed, outputs are
//! fresh values, and failures are reported as `LinalgError` without touching
//! the caller's data.
pub mod config;
pub mod engine;
pub mod error;
pub mod math;
pub mod ops;
pub mod render;
pub mod trace;

pub use config::NumericPolicy;
pub use engine::Engine;
pub use error::{LinalgError, Operation, SingularReason, Warning};
pub use math::{Matrix, Shape, ShapeError, Vector};
pub use ops::{EliminationMode, EliminationResult, LuFactorization, Solution, SolvedSystem};
pub use trace::{Trace, Traced};

//! Failure and warning values returned by engine operations.
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::math::Shape;

/// Operation names used to label errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Determinant,
    Inverse,
    Elimination,
    BackSubstitution,
    LuFactorization,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Add => "addition",
            Operation::Subtract => "subtraction",
            Operation::Multiply => "multiplication",
            Operation::Determinant => "determinant",
            Operation::Inverse => "inverse",
            Operation::Elimination => "elimination",
            Operation::BackSubstitution => "back substitution",
            Operation::LuFactorization => "LU factorization",
        };
        f.write_str(name)
    }
}

/// Errors that can occur during engine operations.
///
/// Every variant is a recoverable condition. Operations that fail leave
/// their inputs untouched and return no partial result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LinalgError {
    /// Operand shapes are incompatible for the operation.
    #[error("{op} is not defined for shapes {lhs} and {rhs}")]
    Dimension { op: Operation, lhs: Shape, rhs: Shape },

    /// A square-only operation received a rectangular matrix.
    #[error("{op} requires a square matrix, got {shape}")]
    NotSquare { op: Operation, shape: Shape },

    /// Inverse requested on a matrix with a near-zero determinant, or a pivot
    /// collapsed during Gauss-Jordan inversion.
    #[error("matrix is singular ({reason}), no inverse exists")]
    Singular { reason: SingularReason },

    /// Doolittle factorization hit a near-zero pivot.
    #[error("zero pivot at U[{}][{}] (value: {value}), LU factorization failed", .index + 1, .index + 1)]
    ZeroPivot { index: usize, value: f64 },

    /// Back substitution found a zero row with a non-zero right-hand side.
    #[error("row {} reduces to 0 = {rhs}, the system has no solution", .row + 1)]
    InconsistentSystem { row: usize, rhs: f64 },

    /// A tolerance that would disable every zero test.
    #[error("epsilon must be a positive finite number, got {value}")]
    InvalidEpsilon { value: f64 },
}

/// Why a matrix was declared singular.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SingularReason {
    Determinant(f64),
    Pivot { index: usize, value: f64 },
}

impl fmt::Display for SingularReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SingularReason::Determinant(det) => write!(f, "determinant is {}", det),
            SingularReason::Pivot { index, value } => {
                write!(f, "pivot {} is {}", index + 1, value)
            }
        }
    }
}

/// Non-fatal conditions reported alongside a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Warning {
    /// A zero row with a zero right-hand side: the system has infinitely many
    /// solutions and the matching unknown was left at 0.
    UnderdeterminedSystem { row: usize },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnderdeterminedSystem { row } => write!(
                f,
                "row {} is redundant, the system has infinitely many solutions",
                row + 1
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, LinalgError>;

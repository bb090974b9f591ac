//! Shape extraction and compatibility checks shared by all operations.
use crate::error::{LinalgError, Operation, Result};
use crate::math::{Matrix, Shape, Vector};

pub fn shape(matrix: &Matrix) -> Shape {
    matrix.shape()
}

pub fn ensure_same_shape(op: Operation, lhs: &Matrix, rhs: &Matrix) -> Result<Shape> {
    if lhs.shape() != rhs.shape() {
        return Err(LinalgError::Dimension {
            op,
            lhs: lhs.shape(),
            rhs: rhs.shape(),
        });
    }
    Ok(lhs.shape())
}

/// Checks `cols(lhs) == rows(rhs)` and returns the shape of the product.
pub fn ensure_multipliable(lhs: &Matrix, rhs: &Matrix) -> Result<Shape> {
    if lhs.ncols() != rhs.nrows() {
        return Err(LinalgError::Dimension {
            op: Operation::Multiply,
            lhs: lhs.shape(),
            rhs: rhs.shape(),
        });
    }
    Ok(Shape::new(lhs.nrows(), rhs.ncols()))
}

/// Checks that `matrix` is square and returns its order.
pub fn ensure_square(op: Operation, matrix: &Matrix) -> Result<usize> {
    if !matrix.is_square() {
        return Err(LinalgError::NotSquare {
            op,
            shape: matrix.shape(),
        });
    }
    Ok(matrix.nrows())
}

/// A right-hand side must carry one entry per matrix row.
pub fn ensure_rhs_len(op: Operation, matrix: &Matrix, rhs: &Vector) -> Result<()> {
    if rhs.len() != matrix.nrows() {
        return Err(LinalgError::Dimension {
            op,
            lhs: matrix.shape(),
            rhs: Shape::new(rhs.len(), 1),
        });
    }
    Ok(())
}

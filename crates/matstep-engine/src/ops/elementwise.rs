//! Cell-by-cell addition and subtraction.
use crate::error::{Operation, Result};
use crate::math::Matrix;
use crate::ops::shape::ensure_same_shape;
use crate::trace::{exact, Trace, Traced};

/// `R[i][j] = A[i][j] + B[i][j]`, one trace line per cell in row-major order.
pub fn add(lhs: &Matrix, rhs: &Matrix) -> Result<Traced<Matrix>> {
    elementwise(Operation::Add, lhs, rhs)
}

/// `R[i][j] = A[i][j] - B[i][j]`, one trace line per cell in row-major order.
pub fn subtract(lhs: &Matrix, rhs: &Matrix) -> Result<Traced<Matrix>> {
    elementwise(Operation::Subtract, lhs, rhs)
}

fn elementwise(op: Operation, lhs: &Matrix, rhs: &Matrix) -> Result<Traced<Matrix>> {
    ensure_same_shape(op, lhs, rhs)?;

    let (symbol, apply): (&str, fn(f64, f64) -> f64) = match op {
        Operation::Subtract => ("-", |a, b| a - b),
        _ => ("+", |a, b| a + b),
    };

    let mut trace = Trace::new();
    trace.push(format!("Steps of the {}:", op));

    let mut result = lhs.clone();
    for i in 0..lhs.nrows() {
        for j in 0..lhs.ncols() {
            let (a, b) = (lhs[(i, j)], rhs[(i, j)]);
            let value = apply(a, b);
            trace.push(format!(
                "Element ({},{}) = {} {} {} = {}",
                i + 1,
                j + 1,
                exact(a),
                symbol,
                exact(b),
                exact(value)
            ));
            result[(i, j)] = value;
        }
    }

    Ok(Traced::new(result, trace))
}

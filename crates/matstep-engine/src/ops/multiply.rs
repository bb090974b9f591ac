//! Matrix product.
use crate::error::Result;
use crate::math::Matrix;
use crate::ops::shape::ensure_multipliable;
use crate::trace::{exact, Trace, Traced};

/// `R[i][j] = sum_m A[i][m] * B[m][j]` for `A` (r x k) and `B` (k x c).
///
/// Each output cell gets one trace line listing every product term, the
/// running totals after each term and the final value.
pub fn multiply(lhs: &Matrix, rhs: &Matrix) -> Result<Traced<Matrix>> {
    let out = ensure_multipliable(lhs, rhs)?;
    let inner = lhs.ncols();

    let mut trace = Trace::new();
    trace.push("Steps of the multiplication:");

    let mut data = Vec::with_capacity(out.rows * out.cols);
    for i in 0..out.rows {
        for j in 0..out.cols {
            let mut total = 0.0;
            let mut terms = Vec::with_capacity(inner);
            let mut running = Vec::with_capacity(inner);
            for m in 0..inner {
                let (a, b) = (lhs[(i, m)], rhs[(m, j)]);
                total += a * b;
                terms.push(format!("{} * {}", exact(a), exact(b)));
                running.push(exact(total));
            }

            let mut line = format!("Element ({},{}) = {}", i + 1, j + 1, terms.join(" + "));
            if inner > 1 {
                line.push_str(&format!(" (running: {})", running.join(" -> ")));
            }
            line.push_str(&format!(" = {}", exact(total)));
            trace.push(line);
            data.push(total);
        }
    }

    Ok(Traced::new(Matrix::from_raw(out.rows, out.cols, data), trace))
}

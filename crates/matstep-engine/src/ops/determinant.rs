//! Determinant by cofactor expansion along the first row.
//!
//! The recursion is O(n!) and kept that way: its trace walks through every
//! minor, which is the point for small teaching matrices. A large-matrix
//! determinant belongs in a separate elimination-based routine.
use crate::error::{Operation, Result};
use crate::math::Matrix;
use crate::ops::shape::ensure_square;
use crate::trace::{exact, Trace, Traced};

pub fn determinant(matrix: &Matrix) -> Result<Traced<f64>> {
    ensure_square(Operation::Determinant, matrix)?;

    let mut trace = Trace::new();
    let value = expand(matrix, &mut trace);
    Ok(Traced::new(value, trace))
}

fn expand(matrix: &Matrix, trace: &mut Trace) -> f64 {
    let n = matrix.nrows();

    if n == 1 {
        let value = matrix[(0, 0)];
        trace.push(format!("Determinant of 1x1 matrix = {}", exact(value)));
        return value;
    }

    if n == 2 {
        let (a, b, c, d) = (matrix[(0, 0)], matrix[(0, 1)], matrix[(1, 0)], matrix[(1, 1)]);
        let det = a * d - b * c;
        trace.push(format!(
            "Determinant of 2x2 matrix = ({} * {}) - ({} * {}) = {}",
            exact(a),
            exact(d),
            exact(b),
            exact(c),
            exact(det)
        ));
        return det;
    }

    trace.push(format!(
        "Expanding the {}x{} determinant along the first row:",
        n, n
    ));

    let mut det = 0.0;
    for j in 0..n {
        let minor = match matrix.minor(0, j) {
            Some(minor) => minor,
            None => continue,
        };
        let sign = if j % 2 == 0 { 1.0 } else { -1.0 };
        let sub_det = expand(&minor, trace);
        let term = sign * matrix[(0, j)] * sub_det;
        det += term;
        trace.push(format!(
            "Term {}: {} * {} * {} = {}",
            j + 1,
            if sign > 0.0 { "+1" } else { "-1" },
            exact(matrix[(0, j)]),
            exact(sub_det),
            exact(term)
        ));
    }

    trace.push(format!("Final determinant = {}", exact(det)));
    det
}

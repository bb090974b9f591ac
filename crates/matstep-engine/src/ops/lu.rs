//! Doolittle LU factorization (unit-diagonal `L`, no pivoting).
//!
//! Without row exchanges the factorization fails on any matrix whose leading
//! principal minors vanish, even when the matrix itself is invertible.
use serde::{Deserialize, Serialize};

use crate::config::NumericPolicy;
use crate::error::{LinalgError, Operation, Result};
use crate::math::Matrix;
use crate::ops::multiply::multiply;
use crate::ops::shape::ensure_square;
use crate::trace::{fixed, Trace, Traced};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LuFactorization {
    pub l: Matrix,
    pub u: Matrix,
    /// `L x U`, recomputed for the trace. Informational only.
    pub product: Matrix,
}

pub fn lu_factorization(policy: &NumericPolicy, matrix: &Matrix) -> Result<Traced<LuFactorization>> {
    let n = ensure_square(Operation::LuFactorization, matrix)?;
    let a = matrix;

    let mut trace = Trace::new();
    trace.push("LU factorization (Doolittle method):");
    trace.push_labeled("Original matrix:", a);

    let mut l = Matrix::identity(n);
    let mut u = a.mapv(|_| 0.0);

    for j in 0..n {
        u[(0, j)] = a[(0, j)];
    }

    for i in 1..n {
        check_pivot(policy, &u, 0, &mut trace)?;
        l[(i, 0)] = a[(i, 0)] / u[(0, 0)];
        trace.push(format!(
            "L[{}][1] = {} / {} = {}",
            i + 1,
            fixed(a[(i, 0)]),
            fixed(u[(0, 0)]),
            fixed(l[(i, 0)])
        ));
    }

    for i in 1..n {
        for j in i..n {
            let mut sum = 0.0;
            let mut line = format!("U[{}][{}] = {}", i + 1, j + 1, fixed(a[(i, j)]));
            for k in 0..i {
                sum += l[(i, k)] * u[(k, j)];
                line.push_str(&format!(" - {} * {}", fixed(l[(i, k)]), fixed(u[(k, j)])));
            }
            u[(i, j)] = a[(i, j)] - sum;
            line.push_str(&format!(" = {}", fixed(u[(i, j)])));
            trace.push(line);
        }

        for j in i + 1..n {
            let mut sum = 0.0;
            let mut line = format!("L[{}][{}] = ({}", j + 1, i + 1, fixed(a[(j, i)]));
            for k in 0..i {
                sum += l[(j, k)] * u[(k, i)];
                line.push_str(&format!(" - {} * {}", fixed(l[(j, k)]), fixed(u[(k, i)])));
            }
            check_pivot(policy, &u, i, &mut trace)?;
            l[(j, i)] = (a[(j, i)] - sum) / u[(i, i)];
            line.push_str(&format!(") / {} = {}", fixed(u[(i, i)]), fixed(l[(j, i)])));
            trace.push(line);
        }
    }

    trace.push_labeled("Matrix L:", &l);
    trace.push_labeled("Matrix U:", &u);

    let (product, check) = multiply(&l, &u)?.into_parts();
    trace.push("Verification: L x U should equal A");
    trace.extend(check);
    trace.push_matrix(&product);

    Ok(Traced::new(LuFactorization { l, u, product }, trace))
}

fn check_pivot(policy: &NumericPolicy, u: &Matrix, index: usize, trace: &mut Trace) -> Result<()> {
    let value = u[(index, index)];
    if policy.is_zero(value) {
        trace.push("Zero pivot found. LU factorization failed.");
        return Err(LinalgError::ZeroPivot { index, value });
    }
    Ok(())
}

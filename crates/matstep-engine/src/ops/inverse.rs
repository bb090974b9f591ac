//! Matrix inverse by Gauss-Jordan reduction of `[A|I]`.
use crate::config::NumericPolicy;
use crate::error::{LinalgError, Operation, Result, SingularReason};
use crate::math::Matrix;
use crate::ops::determinant::determinant;
use crate::ops::elimination::{EliminationMode, RowReducer};
use crate::ops::shape::ensure_square;
use crate::trace::Traced;

/// Invert a square matrix.
///
/// The determinant is checked first so singular input costs no elimination
/// work. The reduction itself runs strict (a near-zero pivot fails with
/// `Singular` even after the determinant passed, since the two can disagree
/// near the singular boundary) and snaps every written cell to 0 or to the
/// nearest integer when within epsilon.
pub fn inverse(policy: &NumericPolicy, matrix: &Matrix) -> Result<Traced<Matrix>> {
    let n = ensure_square(Operation::Inverse, matrix)?;

    let (det, mut trace) = determinant(matrix)?.into_parts();
    if policy.is_zero(det) {
        trace.push("The determinant is zero: the matrix is singular and has no inverse.");
        log::debug!("inverse rejected, determinant {}", det);
        return Err(LinalgError::Singular {
            reason: SingularReason::Determinant(det),
        });
    }

    let identity = Matrix::identity(n);
    trace.push("Computing the inverse with Gauss-Jordan elimination");
    trace.push_labeled("Original matrix (A):", matrix);
    trace.push_labeled("Identity matrix (I):", &identity);

    let mut work = matrix.augment(&identity);
    trace.push_labeled("Augmented matrix [A|I]:", &work);

    RowReducer::new(policy, EliminationMode::Reduced, n)
        .snapping()
        .strict()
        .run(&mut work, &mut trace)?;

    let inverse = work.select_columns(n..2 * n);
    trace.push_labeled("Inverse matrix:", &inverse);

    Ok(Traced::new(inverse, trace))
}

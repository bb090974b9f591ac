//! Partial-pivoting row reduction, back substitution and the two system solvers.
//!
//! `RowReducer` is the shared primitive: plain (Gaussian) mode zeroes the
//! entries below each pivot, reduced (Gauss-Jordan) mode scales each pivot
//! to 1 and zeroes the rest of its column. A near-zero pivot does not stop
//! the reduction; the column is skipped and the zero rows it leaves behind
//! are interpreted by whoever consumes the result.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::NumericPolicy;
use crate::error::{LinalgError, Operation, Result, SingularReason, Warning};
use crate::math::{Matrix, Vector};
use crate::ops::shape::{ensure_rhs_len, ensure_square};
use crate::render::{format_vector, DEFAULT_PRECISION};
use crate::trace::{fixed, Trace, Traced};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EliminationMode {
    /// Forward elimination to echelon form.
    Plain,
    /// Full reduction to reduced echelon form.
    Reduced,
}

impl fmt::Display for EliminationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EliminationMode::Plain => write!(f, "Gaussian elimination"),
            EliminationMode::Reduced => write!(f, "Gauss-Jordan elimination"),
        }
    }
}

/// Output of `eliminate`: the transformed matrix and, when a right-hand side
/// was supplied, the same row operations applied to it.
#[derive(Debug, Clone, PartialEq)]
pub struct EliminationResult {
    pub matrix: Matrix,
    pub rhs: Option<Vector>,
}

/// Solution vector of a square system.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub values: Vector,
    /// Non-empty when some equations were redundant; the affected unknowns
    /// were left at 0.
    pub warnings: Vec<Warning>,
}

impl Solution {
    pub fn is_unique(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Result of `solve_gaussian` / `solve_gauss_jordan`.
#[derive(Debug, Clone, PartialEq)]
pub struct SolvedSystem {
    pub elimination: EliminationResult,
    pub solution: Solution,
}

pub(crate) struct RowReducer<'a> {
    policy: &'a NumericPolicy,
    mode: EliminationMode,
    /// Columns that may hold pivots; augmented columns sit to the right of these.
    pivot_columns: usize,
    /// Apply `NumericPolicy::snap` to every cell a row operation writes.
    snap: bool,
    /// Fail with `Singular` instead of skipping a near-zero pivot.
    strict: bool,
}

impl<'a> RowReducer<'a> {
    pub(crate) fn new(policy: &'a NumericPolicy, mode: EliminationMode, pivot_columns: usize) -> Self {
        Self {
            policy,
            mode,
            pivot_columns,
            snap: false,
            strict: false,
        }
    }

    pub(crate) fn snapping(mut self) -> Self {
        self.snap = true;
        self
    }

    pub(crate) fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    pub(crate) fn run(&self, work: &mut Matrix, trace: &mut Trace) -> Result<()> {
        let steps = work.nrows().min(self.pivot_columns);

        for i in 0..steps {
            let max_row = self.pivot_row(work, i);
            if max_row != i {
                work.swap_rows(i, max_row);
                trace.push_labeled(format!("Swap rows R{} and R{}:", i + 1, max_row + 1), work);
            }

            let pivot = work[(i, i)];
            if self.policy.is_zero(pivot) {
                if self.strict {
                    trace.push(format!(
                        "Pivot at ({},{}) is zero: the matrix is singular.",
                        i + 1,
                        i + 1
                    ));
                    return Err(LinalgError::Singular {
                        reason: SingularReason::Pivot { index: i, value: pivot },
                    });
                }
                log::debug!("near-zero pivot in column {}, skipping", i);
                trace.push(format!(
                    "Pivot at ({},{}) is zero, skipping elimination for this column.",
                    i + 1,
                    i + 1
                ));
                continue;
            }

            match self.mode {
                EliminationMode::Plain => self.eliminate_below(work, i, trace),
                EliminationMode::Reduced => {
                    self.normalize(work, i, trace);
                    self.eliminate_others(work, i, trace);
                }
            }
        }

        Ok(())
    }

    /// Largest `|A[k][col]|` for `k >= col`; ties go to the lowest row.
    fn pivot_row(&self, work: &Matrix, col: usize) -> usize {
        let mut max_row = col;
        for k in col + 1..work.nrows() {
            if work[(k, col)].abs() > work[(max_row, col)].abs() {
                max_row = k;
            }
        }
        max_row
    }

    fn write(&self, work: &mut Matrix, at: (usize, usize), value: f64) {
        work[at] = if self.snap { self.policy.snap(value) } else { value };
    }

    /// `R_target -= factor * R_pivot` over columns `pivot..`.
    fn subtract_row(&self, work: &mut Matrix, target: usize, pivot: usize, factor: f64) {
        for k in pivot..work.ncols() {
            let value = work[(target, k)] - factor * work[(pivot, k)];
            self.write(work, (target, k), value);
        }
    }

    fn eliminate_below(&self, work: &mut Matrix, i: usize, trace: &mut Trace) {
        for j in i + 1..work.nrows() {
            let factor = work[(j, i)] / work[(i, i)];
            let visible = !self.policy.is_zero(factor);
            if visible {
                trace.push(format!("R{} = R{} - {} * R{}", j + 1, j + 1, fixed(factor), i + 1));
            }
            self.subtract_row(work, j, i, factor);
            if visible {
                trace.push_matrix(work);
            }
        }
    }

    fn normalize(&self, work: &mut Matrix, i: usize, trace: &mut Trace) {
        let pivot = work[(i, i)];
        for k in i..work.ncols() {
            let value = work[(i, k)] / pivot;
            self.write(work, (i, k), value);
        }
        trace.push_labeled(format!("R{} = R{} / {}", i + 1, i + 1, fixed(pivot)), work);
    }

    fn eliminate_others(&self, work: &mut Matrix, i: usize, trace: &mut Trace) {
        for j in (0..work.nrows()).filter(|&j| j != i) {
            let factor = work[(j, i)];
            if self.policy.is_zero(factor) {
                continue;
            }
            trace.push(format!("R{} = R{} - {} * R{}", j + 1, j + 1, fixed(factor), i + 1));
            self.subtract_row(work, j, i, factor);
            trace.push_matrix(work);
        }
    }
}

/// Row-reduce `matrix` (optionally augmented with `rhs`) in the given mode.
///
/// Never reports rank deficiency itself: singular inputs come back with zero
/// rows for the caller to interpret.
pub fn eliminate(
    policy: &NumericPolicy,
    matrix: &Matrix,
    rhs: Option<&Vector>,
    mode: EliminationMode,
) -> Result<Traced<EliminationResult>> {
    if let Some(rhs) = rhs {
        ensure_rhs_len(Operation::Elimination, matrix, rhs)?;
    }

    let mut work = match rhs {
        Some(rhs) => matrix.augment_column(rhs),
        None => matrix.clone(),
    };

    let mut trace = Trace::new();
    trace.push(format!("Starting {}:", mode));
    if rhs.is_some() {
        trace.push("Augmented matrix:");
    }
    trace.push_matrix(&work);

    RowReducer::new(policy, mode, matrix.ncols()).run(&mut work, &mut trace)?;

    let result = match rhs {
        Some(_) => {
            let (matrix, rhs) = work.split_last_column();
            EliminationResult {
                matrix,
                rhs: Some(rhs),
            }
        }
        None => EliminationResult {
            matrix: work,
            rhs: None,
        },
    };

    let label = match mode {
        EliminationMode::Plain => "Echelon form:",
        EliminationMode::Reduced => "Reduced echelon form:",
    };
    trace.push_labeled(label, &result.matrix);
    if let Some(rhs) = &result.rhs {
        trace.push(format!(
            "Transformed right-hand side: {}",
            format_vector(rhs, DEFAULT_PRECISION)
        ));
    }

    Ok(Traced::new(result, trace))
}

/// Solve `A x = b` for an echelon-form `A` produced by plain elimination.
///
/// `A` is not checked for being upper triangular. A zero row with a zero
/// right-hand side adds an `UnderdeterminedSystem` warning and leaves the
/// unknown at 0; a zero row with a non-zero right-hand side fails with
/// `InconsistentSystem`.
pub fn back_substitute(
    policy: &NumericPolicy,
    matrix: &Matrix,
    rhs: &Vector,
) -> Result<Traced<Solution>> {
    ensure_square(Operation::BackSubstitution, matrix)?;
    ensure_rhs_len(Operation::BackSubstitution, matrix, rhs)?;

    let mut trace = Trace::new();
    trace.push("Back substitution:");
    let solution = substitute(policy, matrix, rhs, &mut trace)?;
    Ok(Traced::new(solution, trace))
}

fn substitute(
    policy: &NumericPolicy,
    matrix: &Matrix,
    rhs: &Vector,
    trace: &mut Trace,
) -> Result<Solution> {
    let n = matrix.nrows();
    let mut x = Vector::zeros(n);
    let mut warnings = Vec::new();

    for i in (0..n).rev() {
        let pivot_col = (0..n).find(|&j| !policy.is_zero(matrix[(i, j)]));

        let p = match pivot_col {
            Some(p) => p,
            None if policy.is_zero(rhs[i]) => {
                trace.push(format!(
                    "Row {} is all zeros with a zero right-hand side (infinitely many solutions).",
                    i + 1
                ));
                warnings.push(Warning::UnderdeterminedSystem { row: i });
                continue;
            }
            None => {
                trace.push(format!(
                    "Row {} is all zeros with a non-zero right-hand side (no solution).",
                    i + 1
                ));
                return Err(LinalgError::InconsistentSystem { row: i, rhs: rhs[i] });
            }
        };

        let mut sum = 0.0;
        let mut line = format!("x{} = ({}", p + 1, fixed(rhs[i]));
        for j in p + 1..n {
            let coefficient = matrix[(i, j)];
            if !policy.is_zero(coefficient) {
                sum += coefficient * x[j];
                line.push_str(&format!(" - {} * {}", fixed(coefficient), fixed(x[j])));
            }
        }
        x[p] = (rhs[i] - sum) / matrix[(i, p)];
        line.push_str(&format!(") / {} = {}", fixed(matrix[(i, p)]), fixed(x[p])));
        trace.push(line);
    }

    Ok(Solution { values: x, warnings })
}

/// Gaussian elimination followed by back substitution.
pub fn solve_gaussian(
    policy: &NumericPolicy,
    matrix: &Matrix,
    rhs: &Vector,
) -> Result<Traced<SolvedSystem>> {
    solve(policy, matrix, rhs, EliminationMode::Plain)
}

/// Gauss-Jordan reduction; the transformed right-hand side is the solution.
///
/// Zero rows left by a singular matrix are read the same way back
/// substitution reads them.
pub fn solve_gauss_jordan(
    policy: &NumericPolicy,
    matrix: &Matrix,
    rhs: &Vector,
) -> Result<Traced<SolvedSystem>> {
    solve(policy, matrix, rhs, EliminationMode::Reduced)
}

fn solve(
    policy: &NumericPolicy,
    matrix: &Matrix,
    rhs: &Vector,
    mode: EliminationMode,
) -> Result<Traced<SolvedSystem>> {
    let op = match mode {
        EliminationMode::Plain => Operation::BackSubstitution,
        EliminationMode::Reduced => Operation::Elimination,
    };
    ensure_square(op, matrix)?;
    ensure_rhs_len(op, matrix, rhs)?;

    let (elimination, mut trace) = eliminate(policy, matrix, Some(rhs), mode)?.into_parts();
    let transformed = elimination
        .rhs
        .clone()
        .unwrap_or_else(|| rhs.clone());

    match mode {
        EliminationMode::Plain => trace.push("Back substitution:"),
        EliminationMode::Reduced => trace.push("Reading the solution from the reduced system:"),
    }
    let solution = substitute(policy, &elimination.matrix, &transformed, &mut trace)?;

    Ok(Traced::new(
        SolvedSystem {
            elimination,
            solution,
        },
        trace,
    ))
}

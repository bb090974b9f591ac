//! `Engine` bundles a `NumericPolicy` with every operation so callers do not
//! have to thread the policy through each call.
use crate::config::NumericPolicy;
use crate::error::Result;
use crate::math::{Matrix, Vector};
use crate::ops::{
    self, EliminationMode, EliminationResult, LuFactorization, Solution, SolvedSystem,
};
use crate::trace::Traced;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Engine {
    policy: NumericPolicy,
}

impl Engine {
    pub fn new(policy: NumericPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &NumericPolicy {
        &self.policy
    }

    pub fn add(&self, lhs: &Matrix, rhs: &Matrix) -> Result<Traced<Matrix>> {
        ops::add(lhs, rhs)
    }

    pub fn subtract(&self, lhs: &Matrix, rhs: &Matrix) -> Result<Traced<Matrix>> {
        ops::subtract(lhs, rhs)
    }

    pub fn multiply(&self, lhs: &Matrix, rhs: &Matrix) -> Result<Traced<Matrix>> {
        ops::multiply(lhs, rhs)
    }

    pub fn determinant(&self, matrix: &Matrix) -> Result<Traced<f64>> {
        ops::determinant(matrix)
    }

    pub fn inverse(&self, matrix: &Matrix) -> Result<Traced<Matrix>> {
        ops::inverse(&self.policy, matrix)
    }

    pub fn eliminate(
        &self,
        matrix: &Matrix,
        rhs: Option<&Vector>,
        mode: EliminationMode,
    ) -> Result<Traced<EliminationResult>> {
        ops::eliminate(&self.policy, matrix, rhs, mode)
    }

    pub fn back_substitute(&self, matrix: &Matrix, rhs: &Vector) -> Result<Traced<Solution>> {
        ops::back_substitute(&self.policy, matrix, rhs)
    }

    pub fn solve_gaussian(&self, matrix: &Matrix, rhs: &Vector) -> Result<Traced<SolvedSystem>> {
        ops::solve_gaussian(&self.policy, matrix, rhs)
    }

    pub fn solve_gauss_jordan(&self, matrix: &Matrix, rhs: &Vector) -> Result<Traced<SolvedSystem>> {
        ops::solve_gauss_jordan(&self.policy, matrix, rhs)
    }

    /// Dispatch to the solver matching `mode`.
    pub fn solve(
        &self,
        matrix: &Matrix,
        rhs: &Vector,
        mode: EliminationMode,
    ) -> Result<Traced<SolvedSystem>> {
        match mode {
            EliminationMode::Plain => self.solve_gaussian(matrix, rhs),
            EliminationMode::Reduced => self.solve_gauss_jordan(matrix, rhs),
        }
    }

    pub fn lu_factorization(&self, matrix: &Matrix) -> Result<Traced<LuFactorization>> {
        ops::lu_factorization(&self.policy, matrix)
    }
}

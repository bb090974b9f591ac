//! The numeric algorithms. Each public function validates shapes, works on a
//! private copy of its inputs and returns the result with its trace.
pub mod determinant;
pub mod elementwise;
pub mod elimination;
pub mod inverse;
pub mod lu;
pub mod multiply;
pub mod shape;

pub use determinant::determinant;
pub use elementwise::{add, subtract};
pub use elimination::{
    back_substitute, eliminate, solve_gauss_jordan, solve_gaussian, EliminationMode,
    EliminationResult, Solution, SolvedSystem,
};
pub use inverse::inverse;
pub use lu::{lu_factorization, LuFactorization};
pub use multiply::multiply;

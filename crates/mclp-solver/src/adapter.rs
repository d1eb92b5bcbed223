//! Solver adapter contract.

use mclp_core::{Model, Result, SolveStatus};

/// A MILP backend able to solve a binary [`Model`] to proven optimality.
///
/// Implementations must:
/// - return a value for every declared variable on [`SolveStatus::Optimal`],
/// - enforce integrality of binary variables,
/// - report backend failures as [`MclpError::Solver`](mclp_core::MclpError::Solver),
///   never as [`SolveStatus::Infeasible`].
pub trait SolverAdapter: Send + Sync {
    /// Short backend name used in logs.
    fn name(&self) -> &'static str;

    /// Solves the model, blocking until the backend returns.
    fn solve(&self, model: &Model) -> Result<SolveStatus>;
}

impl<A: SolverAdapter + ?Sized> SolverAdapter for Box<A> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn solve(&self, model: &Model) -> Result<SolveStatus> {
        (**self).solve(model)
    }
}

impl<A: SolverAdapter + ?Sized> SolverAdapter for std::sync::Arc<A> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn solve(&self, model: &Model) -> Result<SolveStatus> {
        (**self).solve(model)
    }
}

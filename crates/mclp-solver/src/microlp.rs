//! Exact backend: `good_lp` modelling front-end over the `microlp` solver.

use std::panic::{self, AssertUnwindSafe};

use good_lp::{
    variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel, Variable,
};
use mclp_core::{
    Assignment, ConstraintOp, LinearExpr, MclpError, Model, Result, Sense, SolveStatus, VarDomain,
};
use tracing::debug;

use crate::adapter::SolverAdapter;

/// Solves models with microlp's branch-and-bound, which proves optimality of
/// the returned integer solution.
///
/// # Example
///
/// ```
/// use mclp_core::{build, ProblemData, SolveStatus};
/// use mclp_solver::{MicrolpAdapter, SolverAdapter};
///
/// let data = ProblemData::from_coverage(
///     vec!["A".into(), "B".into()],
///     vec![vec![1, 1], vec![0, 1]],
///     1,
///     1,
/// )
/// .unwrap();
/// let model = build(&data);
///
/// match MicrolpAdapter::new().solve(&model).unwrap() {
///     SolveStatus::Optimal { objective_value, .. } => assert_eq!(objective_value, 2.0),
///     other => panic!("unexpected status {other:?}"),
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MicrolpAdapter;

impl MicrolpAdapter {
    pub fn new() -> Self {
        Self
    }
}

fn to_expression(expr: &LinearExpr, handles: &[Variable]) -> Expression {
    expr.terms()
        .iter()
        .map(|t| t.coefficient * handles[t.var.index()])
        .sum()
}

fn solve_with_microlp(model: &Model) -> Result<SolveStatus> {
    let mut vars = ProblemVariables::new();
    let handles: Vec<Variable> = model
        .variables()
        .iter()
        .map(|v| match v.domain {
            VarDomain::Binary => vars.add(variable().binary().name(v.name.clone())),
        })
        .collect();

    let objective = to_expression(&model.objective().expr, &handles);
    let unsolved = match model.objective().sense {
        Sense::Maximize => vars.maximise(objective),
        Sense::Minimize => vars.minimise(objective),
    };
    let mut problem = unsolved.using(good_lp::microlp);

    for constraint in model.constraints() {
        let lhs = to_expression(&constraint.expr, &handles);
        let row = match constraint.op {
            ConstraintOp::Le => lhs.leq(constraint.rhs),
            ConstraintOp::Ge => lhs.geq(constraint.rhs),
            ConstraintOp::Eq => lhs.eq(constraint.rhs),
        };
        problem.add_constraint(row);
    }

    match problem.solve() {
        Ok(solution) => {
            let assignment: Assignment = model
                .variables()
                .iter()
                .map(|v| (v.id, solution.value(handles[v.id.index()])))
                .collect();
            let objective_value = model.objective_value(&assignment);
            Ok(SolveStatus::Optimal {
                assignment,
                objective_value,
            })
        }
        Err(ResolutionError::Infeasible) => Ok(SolveStatus::Infeasible),
        Err(ResolutionError::Unbounded) => Ok(SolveStatus::Unbounded),
        Err(other) => Err(MclpError::Solver(format!("microlp: {other}"))),
    }
}

impl SolverAdapter for MicrolpAdapter {
    fn name(&self) -> &'static str {
        "microlp"
    }

    fn solve(&self, model: &Model) -> Result<SolveStatus> {
        debug!(
            event = "backend_solve",
            backend = self.name(),
            variable_count = model.variable_count(),
            constraint_count = model.constraint_count(),
        );

        panic::catch_unwind(AssertUnwindSafe(|| solve_with_microlp(model))).unwrap_or_else(
            |payload| {
                let reason = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                Err(MclpError::Solver(format!("microlp crashed: {reason}")))
            },
        )
    }
}

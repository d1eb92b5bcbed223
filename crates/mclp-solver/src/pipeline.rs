//! Build → solve → interpret.

use std::time::{Duration, Instant};

use mclp_config::SolverConfig;
use mclp_core::{
    build_with, interpret_with_tolerance, Assignment, MclpError, Model, ProblemData, Report,
    Result, SolveStatus,
};
use tracing::{error, info, warn};

use crate::adapter::SolverAdapter;

/// Result of a completed pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Proven optimum, interpreted onto the instance.
    Optimal(Report),
    /// The model admits no feasible solution.
    Infeasible,
}

impl Outcome {
    pub fn report(&self) -> Option<&Report> {
        match self {
            Outcome::Optimal(report) => Some(report),
            Outcome::Infeasible => None,
        }
    }
}

/// Everything a caller may want to inspect after solving.
#[derive(Debug, Clone)]
pub struct SolveRun {
    pub model: Model,
    pub outcome: Outcome,
    pub solve_time: Duration,
}

/// Builds the configured model, solves it with `adapter` and interprets the
/// result.
///
/// # Errors
///
/// - [`MclpError::MalformedInput`] if the formulation needs missing data;
///   the adapter is not called.
/// - [`MclpError::Solver`] for backend failures and for an unbounded status.
/// - [`MclpError::InvalidAssignment`] if the returned assignment is missing
///   values, is not binary, or violates a model constraint.
pub fn solve_instance(
    data: &ProblemData,
    adapter: &dyn SolverAdapter,
    config: &SolverConfig,
) -> Result<SolveRun> {
    let model = build_with(data, &config.formulation)?;
    info!(
        event = "model_built",
        site_count = model.site_count(),
        variable_count = model.variable_count(),
        constraint_count = model.constraint_count(),
        max_facilities = data.max_facilities(),
        threshold = data.threshold(),
    );

    info!(
        event = "solve_start",
        backend = adapter.name(),
        time_limit_ms = config.time_limit().map_or(0, |d| d.as_millis() as u64),
    );
    let start = Instant::now();
    let status = adapter.solve(&model);
    let solve_time = start.elapsed();
    let duration_ms = solve_time.as_millis() as u64;

    let status = status.inspect_err(|e| {
        error!(event = "solve_failed", backend = adapter.name(), error = %e);
    })?;

    let outcome = match status {
        SolveStatus::Optimal {
            assignment,
            objective_value,
        } => {
            let report = interpret_with_tolerance(data, &model, &assignment, config.tolerance())?;
            check_feasible(&model, &assignment)?;

            if (report.objective_value - objective_value).abs() > config.tolerance() {
                warn!(
                    event = "objective_mismatch",
                    reported = objective_value,
                    recomputed = report.objective_value,
                );
            }
            info!(
                event = "solve_end",
                status = "optimal",
                objective = report.objective_value,
                open_count = report.open_facilities.len() as u64,
                covered_count = report.covered_count() as u64,
                duration_ms,
            );
            Outcome::Optimal(report)
        }
        SolveStatus::Infeasible => {
            info!(event = "solve_end", status = "infeasible", duration_ms);
            Outcome::Infeasible
        }
        SolveStatus::Unbounded => {
            error!(event = "solve_failed", backend = adapter.name(), error = "unbounded");
            return Err(MclpError::Solver(
                "backend reported an unbounded objective for a binary model".to_string(),
            ));
        }
    };

    Ok(SolveRun {
        model,
        outcome,
        solve_time,
    })
}

// Values already passed the integrality check, so rounding is exact.
fn check_feasible(model: &Model, assignment: &Assignment) -> Result<()> {
    let rounded: Assignment = assignment.iter().map(|(v, x)| (v, x.round())).collect();
    let violated = model.violated_constraints(&rounded, 1e-9);
    if violated.is_empty() {
        Ok(())
    } else {
        Err(MclpError::InvalidAssignment(format!(
            "assignment violates {}",
            violated.join(", ")
        )))
    }
}

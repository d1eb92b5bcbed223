//! MCLP Forge Core - Model building and solution interpretation
//!
//! This crate provides the backend-independent parts of the Maximal Covering
//! Location Problem pipeline:
//! - Validated problem data (demand points, candidate sites, covering matrix)
//! - The abstract binary integer-programming model and its builder
//! - Solver-facing result types (assignments and solve status)
//! - The solution interpreter producing a coverage report

pub mod data;
pub mod error;
pub mod model;
pub mod report;
pub mod solution;

pub use data::{CoverageMatrix, DemandPoint, FacilitySite, ProblemData, RawProblemData};
pub use error::{MclpError, Result};
pub use model::{
    build, build_with, BudgetMode, Constraint, ConstraintOp, FormulationOptions, LinearExpr,
    Model, Objective, ObjectiveWeighting, Sense, Term, VarDomain, VarId, VarRole, Variable,
};
pub use report::{
    interpret, interpret_with_tolerance, DemandCoverage, FacilityRef, Report,
    DEFAULT_INTEGRALITY_TOLERANCE,
};
pub use solution::{Assignment, SolveStatus};

//! MCLP Forge Solver
//!
//! This crate connects the abstract covering model to an exact MILP backend:
//! - `SolverAdapter`, the narrow contract every backend implements
//! - `MicrolpAdapter`, branch-and-bound through `good_lp` and `microlp`
//! - `StubAdapter`, canned responses for tests
//! - `TimeLimitAdapter`, wall-clock limit around any adapter
//! - `solve_instance`, the build → solve → interpret pipeline
//!
//! Logging levels:
//! - **INFO**: model built, solve start/end
//! - **DEBUG**: backend translation details
//! - **WARN**: timeouts, objective mismatches

mod adapter;
mod factory;
mod microlp;
mod pipeline;
mod stub;
mod time_limit;

pub use adapter::SolverAdapter;
pub use factory::adapter_from_config;
pub use microlp::MicrolpAdapter;
pub use pipeline::{solve_instance, Outcome, SolveRun};
pub use stub::StubAdapter;
pub use time_limit::TimeLimitAdapter;

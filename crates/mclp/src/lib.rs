//! MCLP Forge - maximal covering location models solved in Rust
//!
//! Load an instance, pick an adapter from configuration and get a coverage
//! report back.
//!
//! # Example
//!
//! ```rust
//! use mclp::prelude::*;
//!
//! let data = ProblemData::from_coverage(
//!     vec!["North".into(), "Center".into(), "South".into()],
//!     vec![vec![1, 0, 0], vec![0, 1, 1], vec![0, 0, 1]],
//!     1,
//!     1,
//! )
//! .unwrap();
//!
//! let run = mclp::run_with_config(&data, &SolverConfig::default()).unwrap();
//! let report = run.outcome.report().unwrap();
//! assert_eq!(report.objective_value, 2.0);
//! assert!(report.is_open(1));
//! ```

// Problem data and model
pub use mclp_core::{
    build, build_with, BudgetMode, CoverageMatrix, FormulationOptions, MclpError, Model,
    ObjectiveWeighting, ProblemData, RawProblemData, Result,
};

// Solving and results
pub use mclp_core::{interpret, Assignment, Report, SolveStatus};
pub use mclp_solver::{
    adapter_from_config, solve_instance, MicrolpAdapter, Outcome, SolveRun, SolverAdapter,
    StubAdapter, TimeLimitAdapter,
};

// Configuration
pub use mclp_config::{ConfigError, SolverConfig, TerminationConfig};

#[cfg(feature = "console")]
pub use mclp_console as console;

mod solver;
pub use solver::{load_config, run, run_with_config, CONFIG_FILE};

pub mod prelude {
    pub use super::{
        BudgetMode, FormulationOptions, MclpError, ObjectiveWeighting, Outcome, ProblemData,
        Report, SolverAdapter, SolverConfig,
    };
}

//! Solver entry point that hides adapter wiring.

use std::path::Path;

use mclp_config::{ConfigError, SolverConfig};
use mclp_core::{ProblemData, Result};
use mclp_solver::{adapter_from_config, solve_instance, SolveRun};
use tracing::debug;

/// Configuration file picked up from the working directory by [`run`].
pub const CONFIG_FILE: &str = "mclp.toml";

/// Loads `path`, or [`CONFIG_FILE`] when no path is given.
///
/// A missing or unreadable default file yields the default configuration;
/// an explicitly named file must load.
pub fn load_config(path: Option<&Path>) -> std::result::Result<SolverConfig, ConfigError> {
    match path {
        Some(path) => SolverConfig::load(path),
        None => Ok(SolverConfig::load(CONFIG_FILE).unwrap_or_default()),
    }
}

/// Solves `data` with the configuration found in [`CONFIG_FILE`], if any.
pub fn run(data: &ProblemData) -> Result<SolveRun> {
    let config = SolverConfig::load(CONFIG_FILE).unwrap_or_default();
    run_with_config(data, &config)
}

/// Solves `data` with the adapter stack described by `config`.
pub fn run_with_config(data: &ProblemData, config: &SolverConfig) -> Result<SolveRun> {
    let adapter = adapter_from_config(config);
    debug!(event = "run", backend = adapter.name(), sites = data.len());
    solve_instance(data, adapter.as_ref(), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mclp_test::{ring, scenario_b};
    use std::io::Write;

    #[test]
    fn test_run_with_config_scenario_b() {
        let run = run_with_config(&scenario_b(), &SolverConfig::default()).unwrap();
        assert_eq!(run.outcome.report().unwrap().objective_value, 0.0);
    }

    #[test]
    fn test_run_with_time_limit() {
        let config = SolverConfig::new().with_termination_seconds(30);
        let run = run_with_config(&ring(6, 3, 1), &config).unwrap();
        assert_eq!(run.outcome.report().unwrap().objective_value, 6.0);
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let err = load_config(Some(Path::new("/nonexistent/mclp.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_explicit_config_is_loaded() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[termination]\nseconds_spent_limit = 4").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.time_limit(), Some(std::time::Duration::from_secs(4)));
    }
}

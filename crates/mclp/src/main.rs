use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use mclp::{
    build_with, console, load_config, run_with_config, BudgetMode, MclpError, ObjectiveWeighting,
    Outcome, ProblemData, SolverConfig, TerminationConfig,
};

const EXIT_INFEASIBLE: u8 = 1;
const EXIT_INPUT: u8 = 2;
const EXIT_SOLVER: u8 = 3;

#[derive(Parser, Debug)]
#[command(
    name = "mclp",
    version,
    about = "Solve a maximal covering location problem and report which facilities to open"
)]
struct Cli {
    /// Instance file (JSON, TOML or YAML by extension)
    instance: PathBuf,

    /// Solver configuration file (defaults to ./mclp.toml when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Wall-clock limit for the solver, overriding the configuration
    #[arg(long, value_name = "SECS")]
    time_limit: Option<u64>,

    /// Objective weighting, overriding the configuration
    #[arg(long, value_enum)]
    objective: Option<ObjectiveArg>,

    /// Add the budget constraint on opening costs
    #[arg(long)]
    enforce_budget: bool,

    /// Write the model in LP format before solving
    #[arg(long, value_name = "FILE")]
    write_lp: Option<PathBuf>,

    /// Uncolored report and log output
    #[arg(long)]
    plain: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ObjectiveArg {
    Count,
    #[value(name = "population2022")]
    Population2022,
    #[value(name = "population2030")]
    Population2030,
}

impl From<ObjectiveArg> for ObjectiveWeighting {
    fn from(arg: ObjectiveArg) -> Self {
        match arg {
            ObjectiveArg::Count => ObjectiveWeighting::Count,
            ObjectiveArg::Population2022 => ObjectiveWeighting::Population2022,
            ObjectiveArg::Population2030 => ObjectiveWeighting::Population2030,
        }
    }
}

impl Cli {
    fn apply_overrides(&self, mut config: SolverConfig) -> SolverConfig {
        if let Some(secs) = self.time_limit {
            config.termination = Some(TerminationConfig {
                seconds_spent_limit: Some(secs),
                millis_spent_limit: None,
            });
        }
        if let Some(objective) = self.objective {
            config.formulation = config.formulation.with_objective(objective.into());
        }
        if self.enforce_budget {
            config.formulation = config.formulation.with_budget(BudgetMode::Enforce);
        }
        config
    }
}

fn exit_code(err: &MclpError) -> u8 {
    match err {
        MclpError::MalformedInput { .. } | MclpError::Io(_) | MclpError::Parse { .. } => {
            EXIT_INPUT
        }
        MclpError::Solver(_) | MclpError::InvalidAssignment(_) => EXIT_SOLVER,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.plain {
        console::init_plain();
    } else {
        console::init();
    }

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => cli.apply_overrides(config),
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(EXIT_INPUT);
        }
    };

    match solve(&cli, &config) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(exit_code(&e))
        }
    }
}

fn solve(cli: &Cli, config: &SolverConfig) -> mclp::Result<u8> {
    let data = ProblemData::load(&cli.instance)?;

    if let Some(path) = &cli.write_lp {
        let model = build_with(&data, &config.formulation)?;
        fs::write(path, model.to_string())?;
    }

    let run = run_with_config(&data, config)?;
    match run.outcome {
        Outcome::Optimal(report) => {
            if cli.plain {
                print!("{report}");
            } else {
                console::print_report(&report);
            }
            Ok(0)
        }
        Outcome::Infeasible => {
            eprintln!("The model is infeasible; no facilities can be opened.");
            Ok(EXIT_INFEASIBLE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let cli = Cli::try_parse_from(["mclp", "instance.json"]).unwrap();
        assert_eq!(cli.instance, PathBuf::from("instance.json"));
        assert!(!cli.plain);
        assert!(cli.objective.is_none());
    }

    #[test]
    fn test_overrides_replace_configuration() {
        let cli = Cli::try_parse_from([
            "mclp",
            "instance.toml",
            "--time-limit",
            "7",
            "--objective",
            "population2030",
            "--enforce-budget",
        ])
        .unwrap();

        let config = cli.apply_overrides(SolverConfig::new().with_termination_millis(500));

        assert_eq!(config.time_limit(), Some(std::time::Duration::from_secs(7)));
        assert_eq!(
            config.formulation.objective,
            ObjectiveWeighting::Population2030
        );
        assert_eq!(config.formulation.budget, BudgetMode::Enforce);
    }

    #[test]
    fn test_unknown_objective_rejected() {
        assert!(Cli::try_parse_from(["mclp", "x.json", "--objective", "area"]).is_err());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(&MclpError::malformed("p", "is negative")), EXIT_INPUT);
        assert_eq!(
            exit_code(&MclpError::Parse {
                format: "JSON",
                message: "eof".into()
            }),
            EXIT_INPUT
        );
        assert_eq!(exit_code(&MclpError::Solver("timeout".into())), EXIT_SOLVER);
        assert_eq!(
            exit_code(&MclpError::InvalidAssignment("missing".into())),
            EXIT_SOLVER
        );
    }
}

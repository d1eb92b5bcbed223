//! End-to-end solves with the microlp backend.

use mclp_config::SolverConfig;
use mclp_core::{
    build, BudgetMode, FormulationOptions, ObjectiveWeighting, ProblemData, SolveStatus,
};
use mclp_solver::{adapter_from_config, solve_instance, MicrolpAdapter, Outcome, SolverAdapter};
use mclp_test::{
    coverage_support, municipality_instance, open_count, ring, scenario_a, scenario_b, scenario_c,
};

fn optimal_objective(data: &ProblemData) -> f64 {
    let run = solve_instance(data, &MicrolpAdapter::new(), &SolverConfig::default()).unwrap();
    match run.outcome {
        Outcome::Optimal(report) => report.objective_value,
        Outcome::Infeasible => panic!("covering models are always feasible"),
    }
}

fn assert_solution_properties(data: &ProblemData) {
    let model = build(data);
    let status = MicrolpAdapter::new().solve(&model).unwrap();
    let SolveStatus::Optimal { assignment, .. } = status else {
        panic!("expected optimal status, got {status:?}");
    };

    assert!(open_count(&model, &assignment) <= data.max_facilities());

    let support = coverage_support(data, &model, &assignment);
    for (j, &count) in support.iter().enumerate() {
        if assignment.get(model.coverage_var(j)).unwrap() > 0.5 {
            assert!(
                count >= data.threshold(),
                "z[{j}] = 1 with support {count} < b = {}",
                data.threshold()
            );
        }
    }
}

#[test]
fn test_scenario_a() {
    let run = solve_instance(&scenario_a(), &MicrolpAdapter::new(), &SolverConfig::default())
        .unwrap();

    let report = run.outcome.report().unwrap();
    assert_eq!(report.objective_value, 2.0);
    assert_eq!(report.open_facilities.len(), 1);
    assert_eq!(report.open_facilities[0].index, 1);
    let covered: Vec<_> = report
        .demand
        .iter()
        .filter(|d| d.covered)
        .map(|d| d.index)
        .collect();
    assert_eq!(covered, vec![1, 2]);
}

#[test]
fn test_scenario_b_nothing_open() {
    let run = solve_instance(&scenario_b(), &MicrolpAdapter::new(), &SolverConfig::default())
        .unwrap();

    let report = run.outcome.report().unwrap();
    assert_eq!(report.objective_value, 0.0);
    assert!(report.open_facilities.is_empty());
    assert!(report.demand.iter().all(|d| !d.covered));
}

#[test]
fn test_scenario_c_no_coverage_possible() {
    for p in 1..=3 {
        assert_eq!(optimal_objective(&scenario_c(p)), 0.0);
    }
}

#[test]
fn test_threshold_above_one() {
    // Each point needs both of its ring neighbours open.
    assert_eq!(optimal_objective(&ring(4, 2, 2)), 1.0);
    assert_eq!(optimal_objective(&ring(4, 4, 2)), 4.0);
}

#[test]
fn test_coverage_is_monotone_in_p() {
    let base = ring(6, 0, 1);
    let objectives: Vec<f64> = (0..=6)
        .map(|p| optimal_objective(&base.with_max_facilities(p).unwrap()))
        .collect();

    assert_eq!(objectives, vec![0.0, 2.0, 4.0, 6.0, 6.0, 6.0, 6.0]);
    assert!(objectives.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_cardinality_and_covering_hold() {
    for data in [
        scenario_a(),
        scenario_b(),
        scenario_c(2),
        ring(5, 2, 1),
        ring(5, 3, 2),
        municipality_instance().validate().unwrap(),
    ] {
        assert_solution_properties(&data);
    }
}

#[test]
fn test_budget_changes_optimum() {
    let data = municipality_instance().validate().unwrap();

    assert_eq!(optimal_objective(&data), 5.0);

    let enforce = FormulationOptions::default().with_budget(BudgetMode::Enforce);
    let config = SolverConfig::new().with_formulation(enforce);
    let run = solve_instance(&data, &MicrolpAdapter::new(), &config).unwrap();
    let report = run.outcome.report().unwrap();
    assert_eq!(report.objective_value, 5.0);
    assert_eq!(report.open_fixed_cost, Some(40.0));

    // Hub costs 45 with its extra price, above the budget of 42.
    let config = SolverConfig::new().with_formulation(enforce.with_extra_price(true));
    let run = solve_instance(&data, &MicrolpAdapter::new(), &config).unwrap();
    let report = run.outcome.report().unwrap();
    assert_eq!(report.objective_value, 4.0);
    assert!(!report.is_open(2));
}

#[test]
fn test_population_weighted_objective() {
    let data = municipality_instance().validate().unwrap();
    let config = SolverConfig::new().with_formulation(
        FormulationOptions::default().with_objective(ObjectiveWeighting::Population2030),
    );

    let run = solve_instance(&data, &MicrolpAdapter::new(), &config).unwrap();
    let report = run.outcome.report().unwrap();

    assert_eq!(report.objective_value, 2130.0);
    assert_eq!(report.covered_population_2030(), Some(2130.0));
}

#[test]
fn test_configured_adapter_with_time_limit() {
    let config = SolverConfig::new().with_termination_seconds(30);
    let adapter = adapter_from_config(&config);

    let run = solve_instance(&scenario_a(), adapter.as_ref(), &config).unwrap();
    assert_eq!(run.outcome.report().unwrap().objective_value, 2.0);
}

#[test]
fn test_repeated_solves_agree() {
    let data = ring(7, 3, 1);
    let first = solve_instance(&data, &MicrolpAdapter::new(), &SolverConfig::default()).unwrap();
    let second = solve_instance(&data, &MicrolpAdapter::new(), &SolverConfig::default()).unwrap();

    assert_eq!(first.model, second.model);
    assert_eq!(
        first.outcome.report().unwrap().objective_value,
        second.outcome.report().unwrap().objective_value
    );
}

//! Tests for the solution interpreter.

use super::*;
use crate::data::RawProblemData;
use crate::model::build;

fn scenario() -> ProblemData {
    RawProblemData::new(
        vec!["North".into(), "Center".into(), "South".into()],
        vec![vec![1, 0, 0], vec![0, 1, 1], vec![0, 0, 1]],
        1,
        1,
    )
    .with_basis_price(vec![10.0, 20.0, 30.0])
    .with_populations(vec![1.0, 2.0, 4.0], vec![1.5, 2.5, 4.5])
    .validate()
    .unwrap()
}

// y = [0, 1, 0], z = [0, 1, 1]
fn optimal_assignment() -> Assignment {
    Assignment::from_dense([0.0, 1.0, 0.0, 0.0, 1.0, 1.0])
}

#[test]
fn test_interpret_open_facilities_and_coverage() {
    let data = scenario();
    let model = build(&data);

    let report = interpret(&data, &model, &optimal_assignment()).unwrap();

    assert_eq!(report.objective_value, 2.0);
    assert_eq!(
        report.open_facilities,
        vec![FacilityRef {
            index: 1,
            name: "Center".into()
        }]
    );
    assert_eq!(report.covered_count(), 2);
    assert!(!report.demand[0].covered);
    assert!(report.demand[0].covering_facilities.is_empty());
    assert_eq!(report.demand[2].covering_facilities[0].name, "Center");
    assert!(report.is_open(1));
    assert!(!report.is_open(0));
}

#[test]
fn test_structural_coverage_kept_separate_from_z() {
    let data = scenario();
    let model = build(&data);
    // Center open but the solver left z[2] = 0.
    let assignment = Assignment::from_dense([0.0, 1.0, 0.0, 0.0, 1.0, 0.0]);

    let report = interpret(&data, &model, &assignment).unwrap();

    let south = &report.demand[2];
    assert!(!south.covered);
    assert!(south.is_coverable());
    let auditable: Vec<_> = report.auditable().map(|d| d.index).collect();
    assert_eq!(auditable, vec![2]);
    assert_eq!(report.objective_value, 1.0);
}

#[test]
fn test_near_binary_values_accepted() {
    let data = scenario();
    let model = build(&data);
    let assignment = Assignment::from_dense([1e-9, 0.9999999, 0.0, 0.0, 1.0, 1.0 + 1e-8]);

    let report = interpret(&data, &model, &assignment).unwrap();
    assert_eq!(report.open_facilities.len(), 1);
    assert_eq!(report.objective_value, 2.0);
}

#[test]
fn test_missing_variable_rejected() {
    let data = scenario();
    let model = build(&data);
    let mut assignment = optimal_assignment();
    assignment.remove(model.coverage_var(1));

    let err = interpret(&data, &model, &assignment).unwrap_err();
    match err {
        MclpError::InvalidAssignment(msg) => assert!(msg.contains("z[1]")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_fractional_value_rejected() {
    let data = scenario();
    let model = build(&data);
    let assignment = optimal_assignment().with(model.facility_var(0), 0.5);

    let err = interpret(&data, &model, &assignment).unwrap_err();
    assert!(matches!(err, MclpError::InvalidAssignment(_)));
}

#[test]
fn test_non_finite_value_rejected() {
    let data = scenario();
    let model = build(&data);
    let assignment = optimal_assignment().with(model.facility_var(2), f64::NAN);

    assert!(interpret(&data, &model, &assignment).is_err());
}

#[test]
fn test_undeclared_variable_rejected() {
    let data = scenario();
    let model = build(&data);
    let assignment = optimal_assignment().with(crate::VarId(6), 0.0);

    let err = interpret(&data, &model, &assignment).unwrap_err();
    assert!(err.to_string().contains("undeclared"));
}

#[test]
fn test_model_for_other_instance_rejected() {
    let data = scenario();
    let other = ProblemData::from_coverage(vec!["A".into()], vec![vec![1]], 1, 1).unwrap();
    let model = build(&other);

    let err = interpret(&data, &model, &optimal_assignment()).unwrap_err();
    assert!(matches!(err, MclpError::InvalidAssignment(_)));
}

#[test]
fn test_costs_and_populations_summarized() {
    let data = scenario();
    let model = build(&data);

    let report = interpret(&data, &model, &optimal_assignment()).unwrap();

    assert_eq!(report.open_fixed_cost, Some(20.0));
    assert_eq!(report.covered_population_2022(), Some(6.0));
    assert_eq!(report.covered_population_2030(), Some(7.0));
}

#[test]
fn test_summaries_absent_without_data() {
    let data = ProblemData::from_coverage(vec!["A".into()], vec![vec![1]], 1, 1).unwrap();
    let model = build(&data);

    let report = interpret(&data, &model, &Assignment::from_dense([1.0, 1.0])).unwrap();

    assert_eq!(report.open_fixed_cost, None);
    assert_eq!(report.covered_population_2022(), None);
}

#[test]
fn test_interpret_is_pure() {
    let data = scenario();
    let model = build(&data);
    let before = (data.clone(), model.clone());

    let first = interpret(&data, &model, &optimal_assignment()).unwrap();
    let second = interpret(&data, &model, &optimal_assignment()).unwrap();

    assert_eq!(first, second);
    assert_eq!(before, (data, model));
}

#[test]
fn test_display_lists_facilities_and_status() {
    let data = scenario();
    let model = build(&data);
    let report = interpret(&data, &model, &optimal_assignment()).unwrap();

    let text = report.to_string();
    assert!(text.contains("Optimal objective function value is 2"));
    assert!(text.contains("[1] Center"));
    assert!(text.contains("uncovered"));
    assert!(text.contains("-> Center"));
    assert!(text.contains("Fixed cost of open facilities: 20"));
}

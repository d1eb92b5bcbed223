//! Tests for problem data validation and loading.

use super::*;
use crate::MclpError;

fn names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("M{i}")).collect()
}

fn scenario_matrix() -> Vec<Vec<i64>> {
    vec![vec![1, 0, 0], vec![0, 1, 1], vec![0, 0, 1]]
}

fn field_of(result: crate::Result<ProblemData>) -> String {
    match result {
        Err(MclpError::MalformedInput { field, .. }) => field,
        other => panic!("expected malformed input, got {other:?}"),
    }
}

#[test]
fn test_valid_minimal_instance() {
    let data = ProblemData::from_coverage(names(3), scenario_matrix(), 1, 1).unwrap();

    assert_eq!(data.len(), 3);
    assert_eq!(data.max_facilities(), 1);
    assert_eq!(data.threshold(), 1);
    assert_eq!(data.name(2), "M2");
    assert_eq!(data.demand_points()[1].index, 1);
    assert_eq!(data.sites()[1].name, "M1");
    assert!(data.budget().is_none());
}

#[test]
fn test_coverage_matrix_queries() {
    let data = ProblemData::from_coverage(names(3), scenario_matrix(), 1, 1).unwrap();
    let a = data.coverage();

    assert!(a.covers(1, 2));
    assert!(!a.covers(2, 1));
    assert_eq!(a.covering_sites(2).collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(a.covered_by(1).collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(a.support(0), 1);
}

#[test]
fn test_empty_municipalities_rejected() {
    let result = ProblemData::from_coverage(vec![], vec![], 0, 1);
    assert_eq!(field_of(result), "municipalities");
}

#[test]
fn test_non_square_matrix_rejected() {
    let result = ProblemData::from_coverage(names(3), vec![vec![1, 0, 0], vec![0, 1]], 1, 1);
    assert_eq!(field_of(result), "a");

    let result =
        ProblemData::from_coverage(names(2), vec![vec![1, 0], vec![0, 1, 1]], 1, 1);
    assert_eq!(field_of(result), "a");
}

#[test]
fn test_non_binary_entry_rejected() {
    let result = ProblemData::from_coverage(names(2), vec![vec![1, 2], vec![0, 1]], 1, 1);
    let err = result.unwrap_err();
    assert_eq!(err.field(), Some("a"));
    assert!(err.to_string().contains("[0][1]"));
}

#[test]
fn test_negative_p_rejected() {
    let result = ProblemData::from_coverage(names(3), scenario_matrix(), -1, 1);
    assert_eq!(field_of(result), "p");
}

#[test]
fn test_p_above_site_count_rejected() {
    let result = ProblemData::from_coverage(names(3), scenario_matrix(), 4, 1);
    assert_eq!(field_of(result), "p");
}

#[test]
fn test_zero_threshold_rejected() {
    let result = ProblemData::from_coverage(names(3), scenario_matrix(), 1, 0);
    assert_eq!(field_of(result), "b");
}

#[test]
fn test_threshold_above_site_count_rejected() {
    let result = ProblemData::from_coverage(names(3), scenario_matrix(), 3, 4);
    assert_eq!(field_of(result), "b");
}

#[test]
fn test_p_zero_is_valid() {
    let data = ProblemData::from_coverage(names(3), scenario_matrix(), 0, 1).unwrap();
    assert_eq!(data.max_facilities(), 0);
}

#[test]
fn test_optional_vectors_validated() {
    let raw = RawProblemData::new(names(3), scenario_matrix(), 1, 1).with_basis_price(vec![1.0]);
    assert_eq!(field_of(raw.validate()), "basis_price");

    let raw = RawProblemData::new(names(3), scenario_matrix(), 1, 1)
        .with_populations(vec![1.0, 2.0, -3.0], vec![1.0, 2.0, 3.0]);
    assert_eq!(field_of(raw.validate()), "inhab2022");

    let raw = RawProblemData::new(names(3), scenario_matrix(), 1, 1).with_budget(f64::NAN);
    assert_eq!(field_of(raw.validate()), "budget");
}

#[test]
fn test_distance_matrix_shape_validated() {
    let mut raw = RawProblemData::new(names(2), vec![vec![1, 0], vec![0, 1]], 1, 1);
    raw.distances = Some(vec![vec![0.0, 1.0]]);
    assert_eq!(field_of(raw.validate()), "distances");
}

#[test]
fn test_site_costs_and_populations_attached() {
    let data = RawProblemData::new(names(3), scenario_matrix(), 1, 1)
        .with_basis_price(vec![10.0, 20.0, 30.0])
        .with_ext_price(vec![1.0, 2.0, 3.0])
        .with_populations(vec![100.0, 200.0, 300.0], vec![110.0, 220.0, 330.0])
        .validate()
        .unwrap();

    assert_eq!(data.sites()[1].opening_cost(false), Some(20.0));
    assert_eq!(data.sites()[1].opening_cost(true), Some(22.0));
    assert_eq!(data.demand_points()[2].population_2030, Some(330.0));
}

#[test]
fn test_with_max_facilities() {
    let data = ProblemData::from_coverage(names(3), scenario_matrix(), 1, 1).unwrap();

    assert_eq!(data.with_max_facilities(3).unwrap().max_facilities(), 3);
    assert!(data.with_max_facilities(4).is_err());
}

#[test]
fn test_json_parsing_uses_input_keys() {
    let json = r#"{
        "municipalities": ["Aarhus", "Randers", "Silkeborg"],
        "a": [[1, 0, 0], [0, 1, 1], [0, 0, 1]],
        "p": 1,
        "basis_price": [5.0, 6.0, 7.0],
        "inhab2022": [350000, 98000, 96000],
        "inhab2030": [370000, 99000, 99000],
        "budget": 12.5
    }"#;

    let data = ProblemData::from_json_str(json).unwrap();
    assert_eq!(data.threshold(), 1);
    assert_eq!(data.name(1), "Randers");
    assert_eq!(data.budget(), Some(12.5));
    assert_eq!(data.demand_points()[0].population_2022, Some(350000.0));
}

#[test]
fn test_negative_p_in_json_is_malformed_not_parse_error() {
    let json = r#"{"municipalities": ["A"], "a": [[1]], "p": -2}"#;
    assert_eq!(field_of(ProblemData::from_json_str(json)), "p");
}

#[test]
fn test_parse_error_reports_format() {
    let err = ProblemData::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, MclpError::Parse { format: "JSON", .. }));
}

#[test]
fn test_yaml_and_toml_parsing() {
    let yaml = "municipalities: [A, B]\na: [[1, 1], [0, 1]]\np: 1\nb: 1\n";
    let raw = RawProblemData::from_str_as(yaml, InputFormat::Yaml).unwrap();
    assert_eq!(raw.municipalities, vec!["A", "B"]);

    let toml = "municipalities = [\"A\", \"B\"]\na = [[1, 1], [0, 1]]\np = 2\n";
    let raw = RawProblemData::from_str_as(toml, InputFormat::Toml).unwrap();
    assert_eq!(raw.p, 2);
    assert_eq!(raw.b, 1);
}

#[test]
fn test_format_from_extension() {
    use std::path::Path;

    assert_eq!(InputFormat::from_path(Path::new("x.toml")), InputFormat::Toml);
    assert_eq!(InputFormat::from_path(Path::new("x.YML")), InputFormat::Yaml);
    assert_eq!(InputFormat::from_path(Path::new("Data")), InputFormat::Json);
}

#[test]
fn test_load_from_file() {
    use std::io::Write;

    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"{{"municipalities": ["A", "B"], "a": [[1, 0], [0, 1]], "p": 1}}"#
    )
    .unwrap();

    let data = ProblemData::load(file.path()).unwrap();
    assert_eq!(data.len(), 2);
}

#[test]
fn test_missing_file_is_io_error() {
    let err = ProblemData::load("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, MclpError::Io(_)));
}

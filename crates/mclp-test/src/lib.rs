//! Shared test fixtures for MCLP Forge crates.
//!
//! This crate provides small, hand-checkable instances and helpers:
//!
//! - [`scenario_a`], [`scenario_b`], [`scenario_c`] - the reference instances
//! - [`ring`] - a parameterised instance for property-style tests
//! - [`municipality_instance`] - an instance carrying prices and populations
//! - [`coverage_support`] - recomputes `Σ_i a[i][j]·y[i]` for an assignment
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! mclp-test = { workspace = true }
//! ```

use mclp_core::{Assignment, Model, ProblemData, RawProblemData};

/// Covering matrix shared by scenarios A and B.
pub const SCENARIO_A_MATRIX: [[i64; 3]; 3] = [[1, 0, 0], [0, 1, 1], [0, 0, 1]];

/// Optimal `[y0, y1, y2, z0, z1, z2]` of scenario A.
pub const SCENARIO_A_OPTIMUM: [f64; 6] = [0.0, 1.0, 0.0, 0.0, 1.0, 1.0];

fn names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("M{i}")).collect()
}

fn scenario_rows() -> Vec<Vec<i64>> {
    SCENARIO_A_MATRIX.iter().map(|row| row.to_vec()).collect()
}

fn validated(raw: RawProblemData) -> ProblemData {
    match raw.validate() {
        Ok(data) => data,
        Err(e) => panic!("fixture is invalid: {e}"),
    }
}

/// `n = 3`, `p = 1`, `b = 1`; optimum 2 by opening site 1.
pub fn scenario_a() -> ProblemData {
    validated(RawProblemData::new(names(3), scenario_rows(), 1, 1))
}

/// Scenario A with `p = 0`; optimum 0 with nothing open.
pub fn scenario_b() -> ProblemData {
    validated(RawProblemData::new(names(3), scenario_rows(), 0, 1))
}

/// All-zero covering matrix with `n = 3`, the given `p` and `b = 1`.
pub fn scenario_c(p: i64) -> ProblemData {
    validated(RawProblemData::new(names(3), vec![vec![0; 3]; 3], p, 1))
}

/// Site `i` covers demand points `i` and `i + 1 (mod n)`.
pub fn ring(n: usize, p: i64, b: i64) -> ProblemData {
    let rows = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| i64::from(j == i || j == (i + 1) % n))
                .collect()
        })
        .collect();
    validated(RawProblemData::new(names(n), rows, p, b))
}

/// Five municipalities with prices, populations and a budget.
///
/// Site 2 ("Hub") covers everything but is the most expensive; the budget
/// only allows it when extra prices are ignored.
pub fn municipality_instance() -> RawProblemData {
    RawProblemData::new(
        vec![
            "Harbor".into(),
            "Mill".into(),
            "Hub".into(),
            "Orchard".into(),
            "Ridge".into(),
        ],
        vec![
            vec![1, 1, 0, 0, 0],
            vec![0, 1, 1, 0, 0],
            vec![1, 1, 1, 1, 1],
            vec![0, 0, 0, 1, 1],
            vec![0, 0, 0, 0, 1],
        ],
        2,
        1,
    )
    .with_basis_price(vec![10.0, 10.0, 40.0, 10.0, 5.0])
    .with_ext_price(vec![1.0, 1.0, 5.0, 1.0, 1.0])
    .with_populations(
        vec![500.0, 300.0, 900.0, 200.0, 100.0],
        vec![520.0, 310.0, 950.0, 260.0, 90.0],
    )
    .with_budget(42.0)
}

/// Number of open sites covering each demand point under `assignment`.
pub fn coverage_support(data: &ProblemData, model: &Model, assignment: &Assignment) -> Vec<usize> {
    (0..data.len())
        .map(|j| {
            data.coverage()
                .covering_sites(j)
                .filter(|&i| assignment.get(model.facility_var(i)).unwrap_or(0.0) > 0.5)
                .count()
        })
        .collect()
}

/// Number of open sites under `assignment`.
pub fn open_count(model: &Model, assignment: &Assignment) -> usize {
    (0..model.site_count())
        .filter(|&i| assignment.get(model.facility_var(i)).unwrap_or(0.0) > 0.5)
        .count()
}

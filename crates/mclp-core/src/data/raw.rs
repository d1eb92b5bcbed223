//! Loosely typed instance record and its validation into [`ProblemData`].

use serde::{Deserialize, Serialize};

use super::{CoverageMatrix, DemandPoint, FacilitySite, ProblemData, SquareMatrix};
use crate::error::{MclpError, Result};

fn default_threshold() -> i64 {
    1
}

/// Instance record as it appears in the input file.
///
/// Cardinalities are signed so that negative values are reported as
/// malformed fields instead of parse failures.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawProblemData {
    pub municipalities: Vec<String>,

    /// Covering matrix `a[i][j]`.
    pub a: Vec<Vec<i64>>,

    /// Maximum number of facilities to open.
    pub p: i64,

    /// Covering threshold.
    #[serde(default = "default_threshold")]
    pub b: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basis_price: Option<Vec<f64>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext_price: Option<Vec<f64>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basis_capacity: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inhab2022: Option<Vec<f64>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inhab2030: Option<Vec<f64>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distances: Option<Vec<Vec<f64>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_times: Option<Vec<Vec<f64>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
}

impl RawProblemData {
    /// Creates a record with only the fields the covering model needs.
    pub fn new(municipalities: Vec<String>, a: Vec<Vec<i64>>, p: i64, b: i64) -> Self {
        Self {
            municipalities,
            a,
            p,
            b,
            ..Self::default()
        }
    }

    /// Sets the per-site fixed prices.
    pub fn with_basis_price(mut self, prices: Vec<f64>) -> Self {
        self.basis_price = Some(prices);
        self
    }

    /// Sets the per-site extra prices.
    pub fn with_ext_price(mut self, prices: Vec<f64>) -> Self {
        self.ext_price = Some(prices);
        self
    }

    /// Sets both population epochs.
    pub fn with_populations(mut self, inhab2022: Vec<f64>, inhab2030: Vec<f64>) -> Self {
        self.inhab2022 = Some(inhab2022);
        self.inhab2030 = Some(inhab2030);
        self
    }

    /// Sets the budget limit.
    pub fn with_budget(mut self, budget: f64) -> Self {
        self.budget = Some(budget);
        self
    }

    /// Validates the record into a [`ProblemData`], failing on the first
    /// offending field.
    pub fn validate(self) -> Result<ProblemData> {
        ProblemData::try_from(self)
    }
}

impl TryFrom<RawProblemData> for ProblemData {
    type Error = MclpError;

    fn try_from(raw: RawProblemData) -> Result<Self> {
        let n = raw.municipalities.len();
        if n == 0 {
            return Err(MclpError::malformed(
                "municipalities",
                "must list at least one municipality",
            ));
        }

        check_coverage(&raw.a, n)?;
        let max_facilities = check_cardinality(raw.p, n)?;
        let threshold = check_threshold(raw.b, n)?;

        let fixed = check_vector("basis_price", raw.basis_price, n)?;
        let extra = check_vector("ext_price", raw.ext_price, n)?;
        let pop_2022 = check_vector("inhab2022", raw.inhab2022, n)?;
        let pop_2030 = check_vector("inhab2030", raw.inhab2030, n)?;
        let base_capacity = check_scalar("basis_capacity", raw.basis_capacity)?;
        let budget = check_scalar("budget", raw.budget)?;
        let distances = check_matrix("distances", raw.distances, n)?;
        let travel_times = check_matrix("travel_times", raw.travel_times, n)?;

        let at = |values: &Option<Vec<f64>>, idx: usize| values.as_ref().map(|v| v[idx]);

        let demand_points = raw
            .municipalities
            .iter()
            .enumerate()
            .map(|(index, name)| DemandPoint {
                index,
                name: name.clone(),
                population_2022: at(&pop_2022, index),
                population_2030: at(&pop_2030, index),
            })
            .collect();

        let sites = raw
            .municipalities
            .into_iter()
            .enumerate()
            .map(|(index, name)| FacilitySite {
                index,
                name,
                fixed_cost: at(&fixed, index),
                extra_cost: at(&extra, index),
            })
            .collect();

        Ok(ProblemData {
            demand_points,
            sites,
            coverage: CoverageMatrix::from_rows(&raw.a),
            max_facilities,
            threshold,
            budget,
            base_capacity,
            distances,
            travel_times,
        })
    }
}

fn check_coverage(a: &[Vec<i64>], n: usize) -> Result<()> {
    if a.len() != n {
        return Err(MclpError::malformed(
            "a",
            format!("has {} rows, expected {n} (one per municipality)", a.len()),
        ));
    }
    for (i, row) in a.iter().enumerate() {
        if row.len() != n {
            return Err(MclpError::malformed(
                "a",
                format!("row {i} has {} columns, expected {n}", row.len()),
            ));
        }
        if let Some((j, value)) = row.iter().enumerate().find(|(_, &v)| v != 0 && v != 1) {
            return Err(MclpError::malformed(
                "a",
                format!("entry [{i}][{j}] is {value}, expected 0 or 1"),
            ));
        }
    }
    Ok(())
}

fn check_cardinality(p: i64, n: usize) -> Result<usize> {
    let p = usize::try_from(p)
        .map_err(|_| MclpError::malformed("p", format!("must be non-negative, got {p}")))?;
    if p > n {
        return Err(MclpError::malformed(
            "p",
            format!("must not exceed the number of candidate sites ({n}), got {p}"),
        ));
    }
    Ok(p)
}

// b = 0 would make every covering constraint vacuous, so it is rejected.
fn check_threshold(b: i64, n: usize) -> Result<usize> {
    if b < 1 {
        return Err(MclpError::malformed(
            "b",
            format!("must be at least 1, got {b}"),
        ));
    }
    let b = usize::try_from(b).unwrap_or(usize::MAX);
    if b > n {
        return Err(MclpError::malformed(
            "b",
            format!("exceeds the number of candidate sites ({n}), got {b}; no demand point could ever be covered"),
        ));
    }
    Ok(b)
}

fn check_value(field: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(MclpError::malformed(
            field,
            format!("must be finite and non-negative, got {value}"),
        ));
    }
    Ok(value)
}

fn check_scalar(field: &str, value: Option<f64>) -> Result<Option<f64>> {
    value.map(|v| check_value(field, v)).transpose()
}

fn check_vector(field: &str, values: Option<Vec<f64>>, n: usize) -> Result<Option<Vec<f64>>> {
    let Some(values) = values else {
        return Ok(None);
    };
    if values.len() != n {
        return Err(MclpError::malformed(
            field,
            format!("has {} entries, expected {n}", values.len()),
        ));
    }
    for &value in &values {
        check_value(field, value)?;
    }
    Ok(Some(values))
}

fn check_matrix(
    field: &str,
    rows: Option<Vec<Vec<f64>>>,
    n: usize,
) -> Result<Option<SquareMatrix>> {
    let Some(rows) = rows else {
        return Ok(None);
    };
    if rows.len() != n || rows.iter().any(|row| row.len() != n) {
        return Err(MclpError::malformed(
            field,
            format!("must be a {n}x{n} matrix"),
        ));
    }
    for &value in rows.iter().flatten() {
        check_value(field, value)?;
    }
    Ok(Some(SquareMatrix::from_rows(rows)))
}

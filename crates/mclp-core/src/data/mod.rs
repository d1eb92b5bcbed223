//! Validated problem data.
//!
//! [`ProblemData`] is the strongly typed, immutable view of an instance. It
//! can only be obtained through validation of a [`RawProblemData`] record, so
//! every consumer (model builder, interpreter) may rely on its invariants:
//!
//! - at least one municipality,
//! - a square `n × n` binary covering matrix,
//! - `0 <= p <= n` and `1 <= b <= n`,
//! - optional per-site vectors of length `n` and optional `n × n` matrices,
//!   all finite and non-negative.

mod loading;
mod raw;

#[cfg(test)]
mod tests;

pub use loading::InputFormat;
pub use raw::RawProblemData;

/// A demand point `j`: a municipality whose coverage is counted.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandPoint {
    pub index: usize,
    pub name: String,
    pub population_2022: Option<f64>,
    pub population_2030: Option<f64>,
}

/// A candidate facility site `i`.
///
/// Sites share the index space of demand points but are a distinct role.
#[derive(Debug, Clone, PartialEq)]
pub struct FacilitySite {
    pub index: usize,
    pub name: String,
    pub fixed_cost: Option<f64>,
    pub extra_cost: Option<f64>,
}

impl FacilitySite {
    /// Opening cost of the site, optionally including its extra price.
    ///
    /// Returns `None` when the fixed price is not part of the instance.
    pub fn opening_cost(&self, include_extra: bool) -> Option<f64> {
        let fixed = self.fixed_cost?;
        if include_extra {
            Some(fixed + self.extra_cost.unwrap_or(0.0))
        } else {
            Some(fixed)
        }
    }
}

/// Square binary matrix `a[i][j]`: opening site `i` covers demand point `j`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageMatrix {
    size: usize,
    cells: Vec<bool>,
}

impl CoverageMatrix {
    pub(crate) fn from_rows(rows: &[Vec<i64>]) -> Self {
        let size = rows.len();
        let cells = rows.iter().flatten().map(|&v| v == 1).collect();
        Self { size, cells }
    }

    /// Side length `n` of the matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns whether site `site` covers demand point `demand`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn covers(&self, site: usize, demand: usize) -> bool {
        assert!(site < self.size && demand < self.size, "index out of range");
        self.cells[site * self.size + demand]
    }

    /// Sites covering `demand`, in ascending index order.
    pub fn covering_sites(&self, demand: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.size).filter(move |&site| self.covers(site, demand))
    }

    /// Number of sites covering `demand` (column sum).
    pub fn support(&self, demand: usize) -> usize {
        self.covering_sites(demand).count()
    }

    /// Demand points covered by `site`, in ascending index order.
    pub fn covered_by(&self, site: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.size).filter(move |&demand| self.covers(site, demand))
    }
}

/// Dense square matrix of non-negative reals (distances, travel times).
#[derive(Debug, Clone, PartialEq)]
pub struct SquareMatrix {
    size: usize,
    cells: Vec<f64>,
}

impl SquareMatrix {
    pub(crate) fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        let size = rows.len();
        Self {
            size,
            cells: rows.into_iter().flatten().collect(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.cells[row * self.size + col]
    }
}

/// Immutable, validated MCLP instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemData {
    demand_points: Vec<DemandPoint>,
    sites: Vec<FacilitySite>,
    coverage: CoverageMatrix,
    max_facilities: usize,
    threshold: usize,
    budget: Option<f64>,
    base_capacity: Option<f64>,
    distances: Option<SquareMatrix>,
    travel_times: Option<SquareMatrix>,
}

impl ProblemData {
    /// Validates a minimal instance made of names, covering matrix, `p` and `b`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mclp_core::ProblemData;
    ///
    /// let data = ProblemData::from_coverage(
    ///     vec!["A".into(), "B".into()],
    ///     vec![vec![1, 0], vec![1, 1]],
    ///     1,
    ///     1,
    /// )
    /// .unwrap();
    /// assert_eq!(data.len(), 2);
    /// assert_eq!(data.coverage().support(1), 1);
    ///
    /// let err = ProblemData::from_coverage(vec!["A".into()], vec![vec![1]], -1, 1);
    /// assert_eq!(err.unwrap_err().field(), Some("p"));
    /// ```
    pub fn from_coverage(
        names: Vec<String>,
        coverage: Vec<Vec<i64>>,
        p: i64,
        b: i64,
    ) -> crate::Result<Self> {
        RawProblemData::new(names, coverage, p, b).validate()
    }

    /// Number of municipalities `n`.
    pub fn len(&self) -> usize {
        self.demand_points.len()
    }

    /// Always `false` for validated data; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.demand_points.is_empty()
    }

    pub fn demand_points(&self) -> &[DemandPoint] {
        &self.demand_points
    }

    pub fn sites(&self) -> &[FacilitySite] {
        &self.sites
    }

    /// Municipality name for index `index` (shared by site and demand roles).
    pub fn name(&self, index: usize) -> &str {
        &self.sites[index].name
    }

    pub fn coverage(&self) -> &CoverageMatrix {
        &self.coverage
    }

    /// Maximum number of open facilities `p`.
    pub fn max_facilities(&self) -> usize {
        self.max_facilities
    }

    /// Covering threshold `b`.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn budget(&self) -> Option<f64> {
        self.budget
    }

    pub fn base_capacity(&self) -> Option<f64> {
        self.base_capacity
    }

    pub fn distances(&self) -> Option<&SquareMatrix> {
        self.distances.as_ref()
    }

    pub fn travel_times(&self) -> Option<&SquareMatrix> {
        self.travel_times.as_ref()
    }

    /// Returns a copy with a different facility limit `p`, re-validated.
    pub fn with_max_facilities(&self, p: usize) -> crate::Result<Self> {
        if p > self.len() {
            return Err(crate::MclpError::malformed(
                "p",
                format!(
                    "must not exceed the number of candidate sites ({}), got {p}",
                    self.len()
                ),
            ));
        }
        Ok(Self {
            max_facilities: p,
            ..self.clone()
        })
    }
}

//! Solution interpretation.
//!
//! [`interpret`] maps a raw [`Assignment`] back onto municipalities. For each
//! demand point the report keeps two separate facts:
//!
//! - `covered`: the value of `z[j]` chosen by the solver,
//! - `covering_facilities`: the open sites with `a[i][j] = 1`.
//!
//! They can disagree (a point may be structurally coverable yet have
//! `z[j] = 0`, e.g. when `b > 1`); [`Report::auditable`] lists those points.

#[cfg(test)]
mod tests;

use std::fmt;

use crate::data::ProblemData;
use crate::error::{MclpError, Result};
use crate::model::{Model, VarRole};
use crate::solution::Assignment;

/// Largest distance from 0 or 1 accepted for a binary value.
pub const DEFAULT_INTEGRALITY_TOLERANCE: f64 = 1e-6;

/// A municipality referenced in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacilityRef {
    pub index: usize,
    pub name: String,
}

/// Coverage status of a single demand point.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandCoverage {
    pub index: usize,
    pub name: String,
    /// `z[j] == 1` in the assignment.
    pub covered: bool,
    /// Open facilities `i` with `a[i][j] == 1`, in index order.
    pub covering_facilities: Vec<FacilityRef>,
    pub population_2022: Option<f64>,
    pub population_2030: Option<f64>,
}

impl DemandCoverage {
    /// At least one open facility covers the point.
    pub fn is_coverable(&self) -> bool {
        !self.covering_facilities.is_empty()
    }
}

/// Domain view of an optimal assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub objective_value: f64,
    pub open_facilities: Vec<FacilityRef>,
    pub demand: Vec<DemandCoverage>,
    /// Sum of `basis_price` over open facilities, when prices are known.
    pub open_fixed_cost: Option<f64>,
}

impl Report {
    pub fn covered_count(&self) -> usize {
        self.demand.iter().filter(|d| d.covered).count()
    }

    pub fn uncovered(&self) -> impl Iterator<Item = &DemandCoverage> {
        self.demand.iter().filter(|d| !d.covered)
    }

    /// Uncovered points that nonetheless have an open covering facility.
    pub fn auditable(&self) -> impl Iterator<Item = &DemandCoverage> {
        self.uncovered().filter(|d| d.is_coverable())
    }

    pub fn is_open(&self, site: usize) -> bool {
        self.open_facilities.iter().any(|f| f.index == site)
    }

    pub fn covered_population_2022(&self) -> Option<f64> {
        covered_population(&self.demand, |d| d.population_2022)
    }

    pub fn covered_population_2030(&self) -> Option<f64> {
        covered_population(&self.demand, |d| d.population_2030)
    }
}

fn covered_population(
    demand: &[DemandCoverage],
    population: impl Fn(&DemandCoverage) -> Option<f64>,
) -> Option<f64> {
    population(demand.first()?)?;
    Some(
        demand
            .iter()
            .filter(|d| d.covered)
            .filter_map(population)
            .sum(),
    )
}

/// Interprets an assignment with [`DEFAULT_INTEGRALITY_TOLERANCE`].
pub fn interpret(data: &ProblemData, model: &Model, assignment: &Assignment) -> Result<Report> {
    interpret_with_tolerance(data, model, assignment, DEFAULT_INTEGRALITY_TOLERANCE)
}

/// Interprets an assignment, accepting values within `tolerance` of 0 or 1.
///
/// # Errors
///
/// Returns [`MclpError::InvalidAssignment`] when the assignment misses a
/// declared variable, names an undeclared one, holds a non-binary value, or
/// when `model` was not built for `data`.
pub fn interpret_with_tolerance(
    data: &ProblemData,
    model: &Model,
    assignment: &Assignment,
    tolerance: f64,
) -> Result<Report> {
    let n = data.len();
    if model.site_count() != n {
        return Err(MclpError::InvalidAssignment(format!(
            "model was built for {} sites but the problem has {n}",
            model.site_count()
        )));
    }

    if let Some((var, _)) = assignment
        .iter()
        .find(|(var, _)| model.variable(*var).is_none())
    {
        return Err(MclpError::InvalidAssignment(format!(
            "value for undeclared variable {var}"
        )));
    }

    let mut open = vec![false; n];
    let mut covered = vec![false; n];
    let mut rounded = Assignment::new();

    for variable in model.variables() {
        let value = assignment.get(variable.id).ok_or_else(|| {
            MclpError::InvalidAssignment(format!("missing value for {}", variable.name))
        })?;
        let bit = to_binary(value, tolerance).ok_or_else(|| {
            MclpError::InvalidAssignment(format!(
                "{} = {value} is not binary (tolerance {tolerance})",
                variable.name
            ))
        })?;
        rounded.insert(variable.id, if bit { 1.0 } else { 0.0 });
        match variable.role {
            VarRole::FacilityOpen(i) => open[i] = bit,
            VarRole::DemandCovered(j) => covered[j] = bit,
        }
    }

    let facility = |i: usize| FacilityRef {
        index: i,
        name: data.name(i).to_string(),
    };

    let open_facilities: Vec<FacilityRef> = (0..n).filter(|&i| open[i]).map(facility).collect();

    let coverage = data.coverage();
    let demand = data
        .demand_points()
        .iter()
        .map(|point| DemandCoverage {
            index: point.index,
            name: point.name.clone(),
            covered: covered[point.index],
            covering_facilities: coverage
                .covering_sites(point.index)
                .filter(|&i| open[i])
                .map(facility)
                .collect(),
            population_2022: point.population_2022,
            population_2030: point.population_2030,
        })
        .collect();

    let open_fixed_cost = data.sites()[0].fixed_cost.map(|_| {
        open_facilities
            .iter()
            .filter_map(|f| data.sites()[f.index].fixed_cost)
            .sum()
    });

    Ok(Report {
        objective_value: model.objective_value(&rounded),
        open_facilities,
        demand,
        open_fixed_cost,
    })
}

fn to_binary(value: f64, tolerance: f64) -> Option<bool> {
    if !value.is_finite() {
        return None;
    }
    if value.abs() <= tolerance {
        Some(false)
    } else if (value - 1.0).abs() <= tolerance {
        Some(true)
    } else {
        None
    }
}

fn join_names(facilities: &[FacilityRef]) -> String {
    facilities
        .iter()
        .map(|f| f.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Optimal objective function value is {}", self.objective_value)?;
        writeln!(
            f,
            "Covered demand points: {} of {}",
            self.covered_count(),
            self.demand.len()
        )?;

        writeln!(f, "The following facilities are open:")?;
        if self.open_facilities.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for facility in &self.open_facilities {
            writeln!(f, "  [{}] {}", facility.index, facility.name)?;
        }

        writeln!(f, "Customers are covered as follows:")?;
        let width = self.demand.iter().map(|d| d.name.len()).max().unwrap_or(0);
        for point in &self.demand {
            let status = if point.covered { "covered" } else { "uncovered" };
            let by = if point.is_coverable() {
                join_names(&point.covering_facilities)
            } else {
                "-".to_string()
            };
            writeln!(f, "  {:<9} {:<width$} -> {by}", status, point.name)?;
        }

        if let Some(cost) = self.open_fixed_cost {
            writeln!(f, "Fixed cost of open facilities: {cost}")?;
        }
        Ok(())
    }
}

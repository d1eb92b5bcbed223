//! Translation of problem data into the covering model.
//!
//! The canonical formulation is
//!
//! ```text
//! max   Σ_j z[j]
//! s.t.  Σ_i a[i][j]·y[i] − b·z[j] ≥ 0     for every demand point j   (covering[j])
//!       Σ_i y[i] ≤ p                                                 (cardinality)
//!       y, z binary
//! ```
//!
//! [`FormulationOptions`] opt into a population-weighted objective and a
//! budget row `Σ_i cost[i]·y[i] ≤ budget`.

use serde::{Deserialize, Serialize};

use super::{
    Constraint, ConstraintOp, LinearExpr, Model, Objective, Sense, VarDomain, VarId, VarRole,
    Variable,
};
use crate::data::ProblemData;
use crate::error::{MclpError, Result};

/// Coefficients of the coverage variables in the objective.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveWeighting {
    /// Every covered demand point counts 1.
    #[default]
    Count,
    /// Covered demand points count their 2022 population.
    Population2022,
    /// Covered demand points count their 2030 population.
    Population2030,
}

/// Whether the budget row is part of the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetMode {
    #[default]
    Ignore,
    Enforce,
}

/// Formulation variant selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct FormulationOptions {
    pub objective: ObjectiveWeighting,
    pub budget: BudgetMode,
    /// Adds `ext_price` to `basis_price` in the budget row.
    pub include_extra_price: bool,
}

impl FormulationOptions {
    pub fn with_objective(mut self, objective: ObjectiveWeighting) -> Self {
        self.objective = objective;
        self
    }

    pub fn with_budget(mut self, budget: BudgetMode) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_extra_price(mut self, include: bool) -> Self {
        self.include_extra_price = include;
        self
    }
}

/// Builds the canonical covering model.
///
/// # Examples
///
/// ```
/// use mclp_core::{build, ConstraintOp, ProblemData};
///
/// let data = ProblemData::from_coverage(
///     vec!["A".into(), "B".into(), "C".into()],
///     vec![vec![1, 0, 0], vec![0, 1, 1], vec![0, 0, 1]],
///     1,
///     1,
/// )
/// .unwrap();
///
/// let model = build(&data);
/// assert_eq!(model.variable_count(), 6);
/// assert_eq!(model.constraint_count(), 4);
///
/// let cardinality = model.constraint("cardinality").unwrap();
/// assert_eq!(cardinality.op, ConstraintOp::Le);
/// assert_eq!(cardinality.rhs, 1.0);
/// ```
pub fn build(data: &ProblemData) -> Model {
    assemble(data, None, None)
}

/// Builds the model variant selected by `options`.
///
/// # Errors
///
/// Returns [`MclpError::MalformedInput`] when a selected variant needs data
/// the instance does not carry (populations, prices, budget).
pub fn build_with(data: &ProblemData, options: &FormulationOptions) -> Result<Model> {
    let weights = objective_weights(data, options.objective)?;
    let budget = match options.budget {
        BudgetMode::Ignore => None,
        BudgetMode::Enforce => Some(budget_row(data, options.include_extra_price)?),
    };
    Ok(assemble(data, weights, budget))
}

fn objective_weights(
    data: &ProblemData,
    weighting: ObjectiveWeighting,
) -> Result<Option<Vec<f64>>> {
    let field = match weighting {
        ObjectiveWeighting::Count => return Ok(None),
        ObjectiveWeighting::Population2022 => "inhab2022",
        ObjectiveWeighting::Population2030 => "inhab2030",
    };
    data.demand_points()
        .iter()
        .map(|d| {
            let population = if weighting == ObjectiveWeighting::Population2022 {
                d.population_2022
            } else {
                d.population_2030
            };
            population.ok_or_else(|| {
                MclpError::malformed(field, "is required for a population-weighted objective")
            })
        })
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

fn budget_row(data: &ProblemData, include_extra: bool) -> Result<(Vec<f64>, f64)> {
    let budget = data
        .budget()
        .ok_or_else(|| MclpError::malformed("budget", "is required when the budget is enforced"))?;
    let costs = data
        .sites()
        .iter()
        .map(|site| {
            site.opening_cost(include_extra).ok_or_else(|| {
                MclpError::malformed("basis_price", "is required when the budget is enforced")
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok((costs, budget))
}

fn assemble(
    data: &ProblemData,
    weights: Option<Vec<f64>>,
    budget: Option<(Vec<f64>, f64)>,
) -> Model {
    let n = data.len();
    let y = |i: usize| VarId(i);
    let z = |j: usize| VarId(n + j);

    let mut variables = Vec::with_capacity(2 * n);
    for i in 0..n {
        variables.push(Variable {
            id: y(i),
            name: format!("y[{i}]"),
            role: VarRole::FacilityOpen(i),
            domain: VarDomain::Binary,
        });
    }
    for j in 0..n {
        variables.push(Variable {
            id: z(j),
            name: format!("z[{j}]"),
            role: VarRole::DemandCovered(j),
            domain: VarDomain::Binary,
        });
    }

    let mut objective = LinearExpr::new();
    for j in 0..n {
        let weight = weights.as_ref().map_or(1.0, |w| w[j]);
        objective.add_term(z(j), weight);
    }

    let coverage = data.coverage();
    let threshold = data.threshold() as f64;
    let mut constraints = Vec::with_capacity(n + 2);

    for j in 0..n {
        let mut expr = LinearExpr::new();
        for i in coverage.covering_sites(j) {
            expr.add_term(y(i), 1.0);
        }
        expr.add_term(z(j), -threshold);
        constraints.push(Constraint {
            name: format!("covering[{j}]"),
            expr,
            op: ConstraintOp::Ge,
            rhs: 0.0,
        });
    }

    let mut cardinality = LinearExpr::new();
    for i in 0..n {
        cardinality.add_term(y(i), 1.0);
    }
    constraints.push(Constraint {
        name: "cardinality".to_string(),
        expr: cardinality,
        op: ConstraintOp::Le,
        rhs: data.max_facilities() as f64,
    });

    if let Some((costs, limit)) = budget {
        let mut expr = LinearExpr::new();
        for (i, cost) in costs.into_iter().enumerate() {
            expr.add_term(y(i), cost);
        }
        constraints.push(Constraint {
            name: "budget".to_string(),
            expr,
            op: ConstraintOp::Le,
            rhs: limit,
        });
    }

    Model {
        site_count: n,
        variables,
        objective: Objective {
            sense: Sense::Maximize,
            expr: objective,
        },
        constraints,
    }
}

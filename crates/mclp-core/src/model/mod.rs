//! Abstract binary integer-programming model.
//!
//! A [`Model`] is a plain value: variables with their domains and roles, a
//! linear objective and a list of linear constraints. It carries no solver
//! state and can be handed to any solver adapter.
//!
//! Variable layout for an instance with `n` municipalities:
//!
//! | ids | variable | role |
//! |---|---|---|
//! | `0..n` | `y[i]` | site `i` is opened |
//! | `n..2n` | `z[j]` | demand point `j` is counted as covered |

mod builder;
mod lp_format;


use std::fmt;

use serde::{Deserialize, Serialize};

use crate::solution::Assignment;

pub use builder::{build, build_with, BudgetMode, FormulationOptions, ObjectiveWeighting};

/// Dense identifier of a model variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(pub usize);

impl VarId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// Domain of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarDomain {
    Binary,
}

/// What a variable means in the covering formulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarRole {
    /// `y[i]`: facility site `i` is opened.
    FacilityOpen(usize),
    /// `z[j]`: demand point `j` is counted as covered.
    DemandCovered(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub id: VarId,
    pub name: String,
    pub role: VarRole,
    pub domain: VarDomain,
}

/// `coefficient * variable`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Term {
    pub var: VarId,
    pub coefficient: f64,
}

/// Sum of terms, ordered by ascending variable id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    terms: Vec<Term>,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `coefficient * var`, merging with an existing term for `var`.
    ///
    /// Zero coefficients are dropped so that equal models stay equal.
    pub fn add_term(&mut self, var: VarId, coefficient: f64) {
        if coefficient == 0.0 {
            return;
        }
        match self.terms.binary_search_by_key(&var, |t| t.var) {
            Ok(pos) => {
                self.terms[pos].coefficient += coefficient;
                if self.terms[pos].coefficient == 0.0 {
                    self.terms.remove(pos);
                }
            }
            Err(pos) => self.terms.insert(pos, Term { var, coefficient }),
        }
    }

    pub fn with_term(mut self, var: VarId, coefficient: f64) -> Self {
        self.add_term(var, coefficient);
        self
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Coefficient of `var`, zero if absent.
    pub fn coefficient(&self, var: VarId) -> f64 {
        self.terms
            .binary_search_by_key(&var, |t| t.var)
            .map(|pos| self.terms[pos].coefficient)
            .unwrap_or(0.0)
    }

    /// Evaluates the expression; variables missing from the assignment count as zero.
    pub fn evaluate(&self, assignment: &Assignment) -> f64 {
        self.terms
            .iter()
            .map(|t| t.coefficient * assignment.get(t.var).unwrap_or(0.0))
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintOp {
    Le,
    Ge,
    Eq,
}

impl ConstraintOp {
    pub fn symbol(self) -> &'static str {
        match self {
            ConstraintOp::Le => "<=",
            ConstraintOp::Ge => ">=",
            ConstraintOp::Eq => "=",
        }
    }
}

/// `expr op rhs`
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub name: String,
    pub expr: LinearExpr,
    pub op: ConstraintOp,
    pub rhs: f64,
}

impl Constraint {
    /// Checks the constraint against an assignment with absolute tolerance `tolerance`.
    pub fn is_satisfied_by(&self, assignment: &Assignment, tolerance: f64) -> bool {
        let lhs = self.expr.evaluate(assignment);
        match self.op {
            ConstraintOp::Le => lhs <= self.rhs + tolerance,
            ConstraintOp::Ge => lhs >= self.rhs - tolerance,
            ConstraintOp::Eq => (lhs - self.rhs).abs() <= tolerance,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sense {
    Maximize,
    Minimize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Objective {
    pub sense: Sense,
    pub expr: LinearExpr,
}

/// Immutable covering model built from [`ProblemData`](crate::ProblemData).
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    site_count: usize,
    variables: Vec<Variable>,
    objective: Objective,
    constraints: Vec<Constraint>,
}

impl Model {
    /// Number of municipalities `n` the model was built for.
    pub fn site_count(&self) -> usize {
        self.site_count
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, id: VarId) -> Option<&Variable> {
        self.variables.get(id.0)
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Looks up a constraint by name (`cardinality`, `budget`, `covering[j]`).
    pub fn constraint(&self, name: &str) -> Option<&Constraint> {
        self.constraints.iter().find(|c| c.name == name)
    }

    /// Variable `y[site]`.
    pub fn facility_var(&self, site: usize) -> VarId {
        assert!(site < self.site_count, "site index out of range");
        VarId(site)
    }

    /// Variable `z[demand]`.
    pub fn coverage_var(&self, demand: usize) -> VarId {
        assert!(demand < self.site_count, "demand index out of range");
        VarId(self.site_count + demand)
    }

    /// Objective value of an assignment.
    pub fn objective_value(&self, assignment: &Assignment) -> f64 {
        self.objective.expr.evaluate(assignment)
    }

    /// Names of constraints violated by the assignment.
    pub fn violated_constraints(&self, assignment: &Assignment, tolerance: f64) -> Vec<&str> {
        self.constraints
            .iter()
            .filter(|c| !c.is_satisfied_by(assignment, tolerance))
            .map(|c| c.name.as_str())
            .collect()
    }
}

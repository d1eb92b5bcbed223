//! Solver-facing result types.

use std::collections::BTreeMap;

use crate::model::VarId;

/// Raw variable values returned by a solver adapter.
///
/// Values are kept as reported; integrality is checked by the interpreter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assignment {
    values: BTreeMap<VarId, f64>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an assignment where entry `k` is the value of `VarId(k)`.
    pub fn from_dense(values: impl IntoIterator<Item = f64>) -> Self {
        values
            .into_iter()
            .enumerate()
            .map(|(k, v)| (VarId(k), v))
            .collect()
    }

    pub fn insert(&mut self, var: VarId, value: f64) {
        self.values.insert(var, value);
    }

    pub fn with(mut self, var: VarId, value: f64) -> Self {
        self.insert(var, value);
        self
    }

    pub fn get(&self, var: VarId) -> Option<f64> {
        self.values.get(&var).copied()
    }

    pub fn remove(&mut self, var: VarId) -> Option<f64> {
        self.values.remove(&var)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entries in ascending variable order.
    pub fn iter(&self) -> impl Iterator<Item = (VarId, f64)> + '_ {
        self.values.iter().map(|(&k, &v)| (k, v))
    }
}

impl FromIterator<(VarId, f64)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (VarId, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Outcome of a completed solver run.
///
/// Backend failures (crash, timeout) are not a status; adapters report them
/// as [`MclpError::Solver`](crate::MclpError::Solver).
#[derive(Debug, Clone, PartialEq)]
pub enum SolveStatus {
    /// Proven optimal integer solution.
    Optimal {
        assignment: Assignment,
        objective_value: f64,
    },
    /// No assignment satisfies every constraint.
    Infeasible,
    /// Objective unbounded; impossible for a binary model.
    Unbounded,
}

impl SolveStatus {
    pub fn is_optimal(&self) -> bool {
        matches!(self, SolveStatus::Optimal { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            SolveStatus::Optimal { .. } => "optimal",
            SolveStatus::Infeasible => "infeasible",
            SolveStatus::Unbounded => "unbounded",
        }
    }
}

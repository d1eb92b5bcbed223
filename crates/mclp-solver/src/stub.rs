//! Adapter returning a canned response.

use std::sync::atomic::{AtomicUsize, Ordering};

use mclp_core::{MclpError, Model, Result, SolveStatus};

/// Test double for [`SolverAdapter`](crate::SolverAdapter).
///
/// Returns the same status (or solver error) on every call and counts calls,
/// so tests can assert the backend was never reached.
#[derive(Debug)]
pub struct StubAdapter {
    response: std::result::Result<SolveStatus, String>,
    calls: AtomicUsize,
}

impl StubAdapter {
    pub fn returning(status: SolveStatus) -> Self {
        Self {
            response: Ok(status),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            response: Err(message.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `solve` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl crate::SolverAdapter for StubAdapter {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn solve(&self, _model: &Model) -> Result<SolveStatus> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.response.clone().map_err(MclpError::Solver)
    }
}

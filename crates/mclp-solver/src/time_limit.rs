//! Wall-clock limit around a solver adapter.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam::channel::{self, RecvTimeoutError};
use mclp_core::{MclpError, Model, Result, SolveStatus};
use tracing::warn;

use crate::adapter::SolverAdapter;

/// Runs the inner adapter on a worker thread and gives up after `limit`.
///
/// Expiry is reported as `MclpError::Solver("timeout ...")`. The worker
/// cannot be interrupted; it is detached and its late result dropped.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use mclp_solver::{MicrolpAdapter, SolverAdapter, TimeLimitAdapter};
///
/// let adapter = TimeLimitAdapter::new(MicrolpAdapter::new(), Duration::from_secs(30));
/// assert_eq!(adapter.limit(), Duration::from_secs(30));
/// assert_eq!(adapter.name(), "microlp");
/// ```
#[derive(Debug)]
pub struct TimeLimitAdapter<A> {
    inner: Arc<A>,
    limit: Duration,
}

impl<A: SolverAdapter + 'static> TimeLimitAdapter<A> {
    pub fn new(inner: A, limit: Duration) -> Self {
        Self {
            inner: Arc::new(inner),
            limit,
        }
    }

    pub fn millis(inner: A, ms: u64) -> Self {
        Self::new(inner, Duration::from_millis(ms))
    }

    pub fn seconds(inner: A, secs: u64) -> Self {
        Self::new(inner, Duration::from_secs(secs))
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }
}

impl<A: SolverAdapter + 'static> SolverAdapter for TimeLimitAdapter<A> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn solve(&self, model: &Model) -> Result<SolveStatus> {
        let (sender, receiver) = channel::bounded(1);
        let inner = Arc::clone(&self.inner);
        let model = model.clone();

        thread::Builder::new()
            .name("mclp-solve".to_string())
            .spawn(move || {
                // Receiver is gone after a timeout.
                let _ = sender.send(inner.solve(&model));
            })
            .map_err(|e| MclpError::Solver(format!("failed to start solver thread: {e}")))?;

        match receiver.recv_timeout(self.limit) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => {
                warn!(
                    event = "solve_timeout",
                    backend = self.name(),
                    limit_ms = self.limit.as_millis() as u64,
                );
                Err(MclpError::Solver(format!(
                    "timeout after {} ms",
                    self.limit.as_millis()
                )))
            }
            Err(RecvTimeoutError::Disconnected) => Err(MclpError::Solver(
                "solver thread terminated without a result".to_string(),
            )),
        }
    }
}

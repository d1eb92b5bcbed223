//! Adapter construction from configuration.

use mclp_config::SolverConfig;
use tracing::debug;

use crate::{MicrolpAdapter, SolverAdapter, TimeLimitAdapter};

/// Builds the configured adapter stack: microlp, wrapped in a
/// [`TimeLimitAdapter`] when a time limit is set.
pub fn adapter_from_config(config: &SolverConfig) -> Box<dyn SolverAdapter> {
    match config.time_limit() {
        Some(limit) => {
            debug!(
                event = "adapter_configured",
                backend = "microlp",
                time_limit_ms = limit.as_millis() as u64,
            );
            Box::new(TimeLimitAdapter::new(MicrolpAdapter::new(), limit))
        }
        None => {
            debug!(event = "adapter_configured", backend = "microlp");
            Box::new(MicrolpAdapter::new())
        }
    }
}

//! Error reporters.
//!
//! Reports are structured `tracing` events on the `playforge::telemetry`
//! target, so any subscriber (or a filter like
//! `RUST_LOG=playforge::telemetry=error`) can pick them up.

use std::sync::Arc;

use tracing::error;

use playforge_core::{application::ports::ErrorReporter, error::PlayforgeError};

/// Records each reported error as a `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, err: &PlayforgeError) {
        error!(
            target: "playforge::telemetry",
            category = ?err.category(),
            error = %err,
            "Playbook run failed"
        );
    }
}

/// Drops every report. Used when telemetry is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl ErrorReporter for NoopReporter {
    fn report(&self, _err: &PlayforgeError) {}
}

/// Pick a reporter for the telemetry setting.
pub fn reporter(enabled: bool) -> Arc<dyn ErrorReporter> {
    if enabled {
        Arc::new(TracingReporter)
    } else {
        Arc::new(NoopReporter)
    }
}

//! Diagnostics routed into `tracing`

use core::fmt::Arguments;

use mira_hal::Diagnostics;

/// Forwards loader diagnostics to the `tracing` subscriber
///
/// Events are emitted under the `mira` target so they can be filtered
/// separately, e.g. `RUST_LOG=mira=debug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn error(&self, args: Arguments<'_>) {
        tracing::error!(target: "mira", "{}", args);
    }

    fn debug(&self, args: Arguments<'_>) {
        tracing::debug!(target: "mira", "{}", args);
    }
}

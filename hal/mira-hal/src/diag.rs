//! Diagnostic sink
//!
//! Single-line messages with enough context (pin index, pattern, raw line)
//! for a human to find the offending map entry. Nothing is returned to the
//! caller; a sink may drop messages.

use core::fmt::Arguments;

/// Diagnostic message sink
pub trait Diagnostics {
    /// Report an error
    fn error(&self, args: Arguments<'_>);

    /// Report a debug trace
    ///
    /// Defaults to discarding the message.
    fn debug(&self, args: Arguments<'_>) {
        let _ = args;
    }
}

impl<T: Diagnostics + ?Sized> Diagnostics for &T {
    fn error(&self, args: Arguments<'_>) {
        (**self).error(args)
    }

    fn debug(&self, args: Arguments<'_>) {
        (**self).debug(args)
    }
}

/// Sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDiagnostics;

impl Diagnostics for NullDiagnostics {
    fn error(&self, _args: Arguments<'_>) {}
}

//! Linux host support for the Mira board loader
//!
//! This crate provides Linux implementations of the shared `mira-hal`
//! traits:
//!
//! - Sysfs device lookup through shell-style patterns ([`GlobMatcher`])
//! - Diagnostics routed into `tracing` ([`TracingDiagnostics`])

#![deny(unsafe_code)]

pub mod diag;
pub mod sysfs;

pub use diag::TracingDiagnostics;
pub use sysfs::{GlobMatcher, MatchError};

// Re-export shared traits from mira-hal for convenience
pub use mira_hal::{Diagnostics, PathMatcher};

//! Mira Host Abstraction Layer
//!
//! This crate defines the traits the board loader uses to reach the
//! outside world. The loader itself never touches the filesystem or a
//! log subsystem directly; host crates implement these traits (Linux
//! sysfs + `tracing`, or in-memory doubles for tests).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (mira-board)               │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  mira-hal (this crate - traits)         │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ mira-hal-     │       │  test doubles │
//! │    linux      │       │               │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`sysfs::PathMatcher`] - Filesystem pattern expansion
//! - [`diag::Diagnostics`] - Fire-and-forget diagnostic sink

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

pub mod diag;
pub mod sysfs;

// Re-export key traits at crate root for convenience
pub use diag::{Diagnostics, NullDiagnostics};
pub use sysfs::PathMatcher;

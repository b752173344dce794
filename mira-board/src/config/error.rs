//! Pin map errors
//!
//! Every error aborts the load. [`ErrorKind`] groups them into the
//! categories callers care about.

use std::io;

use mira_core::PinError;
use thiserror::Error;

use super::line::RecordKind;

/// Error category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed record (field count, number syntax, device name shape)
    Format,
    /// Index outside a fixed table bound
    Range,
    /// Index already assigned
    Duplicate,
    /// Device pattern did not resolve to exactly one entry
    Resolution,
    /// Pin table growth failed
    Allocation,
    /// Reading the pin map failed
    Io,
}

/// Sysfs pattern resolution failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Matcher failed (bad pattern, unreadable directory)
    #[error("failed to expand '{pattern}': {reason}")]
    Lookup { pattern: String, reason: String },
    /// Zero or several matches
    #[error("bad count {count} of matches for '{pattern}'")]
    MatchCount { pattern: String, count: usize },
    /// Matched path has no directory part
    #[error("strange sysfs name '{path}'")]
    NoSeparator { path: String },
    /// Matched path ends in a separator
    #[error("invalid sysfs '{path}'; trailing slash?")]
    TrailingSeparator { path: String },
}

/// Malformed record details
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Wrong number of fields
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: &'static str, found: usize },
    /// Field is not an unsigned decimal number
    #[error("invalid {field} '{value}'")]
    InvalidNumber { field: &'static str, value: String },
    /// Resolved device has an unexpected name
    #[error("device '{found}' does not match '{expected}'")]
    DeviceName { expected: &'static str, found: String },
}

/// Failure of a single record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Record is malformed
    #[error("malformed {kind} record: {reason}")]
    Format { kind: RecordKind, reason: FormatError },
    /// Value outside its allowed range
    #[error("{what} {value} out of range {min}..={max}")]
    OutOfRange {
        what: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
    /// Slot already assigned
    #[error("{what} #{index} already defined ({current})")]
    Duplicate {
        what: &'static str,
        index: u32,
        current: String,
    },
    /// Device pattern resolution failed
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    /// Pin reservation failed
    #[error(transparent)]
    Pin(#[from] PinError),
}

impl RecordError {
    /// Error category
    pub fn kind(&self) -> ErrorKind {
        match self {
            RecordError::Format { .. } => ErrorKind::Format,
            RecordError::OutOfRange { .. } => ErrorKind::Range,
            RecordError::Duplicate { .. } => ErrorKind::Duplicate,
            RecordError::Resolve(_) => ErrorKind::Resolution,
            RecordError::Pin(PinError::InvalidRange { .. }) => ErrorKind::Range,
            RecordError::Pin(PinError::AlreadyReserved { .. }) => ErrorKind::Duplicate,
            RecordError::Pin(PinError::Allocation { .. }) => ErrorKind::Allocation,
        }
    }
}

/// Pin map loading failure
#[derive(Debug, Error)]
pub enum LoadError {
    /// Reading the file failed
    #[error("failed to read pin map: {0}")]
    Io(#[from] io::Error),
    /// Line does not start with a known keyword
    #[error("failed to parse '{content}' (line {line}): unknown record")]
    UnknownRecord { line: usize, content: String },
    /// Record could not be applied
    #[error("failed to parse '{content}' (line {line}): {source}")]
    Record {
        line: usize,
        content: String,
        source: RecordError,
    },
}

impl LoadError {
    /// Error category
    pub fn kind(&self) -> ErrorKind {
        match self {
            LoadError::Io(_) => ErrorKind::Io,
            LoadError::UnknownRecord { .. } => ErrorKind::Format,
            LoadError::Record { source, .. } => source.kind(),
        }
    }

    /// 1-based line the error was found on, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            LoadError::Io(_) => None,
            LoadError::UnknownRecord { line, .. } | LoadError::Record { line, .. } => Some(*line),
        }
    }
}

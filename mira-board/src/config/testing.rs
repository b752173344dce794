//! Test doubles for the host traits

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Arguments;

use mira_hal::{Diagnostics, PathMatcher};

/// Matcher answering from a fixed pattern table
///
/// Unknown patterns match nothing.
#[derive(Debug, Default)]
pub struct StaticMatcher {
    table: HashMap<String, Result<Vec<String>, String>>,
}

impl StaticMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, pattern: &str, paths: &[&str]) -> Self {
        let paths = paths.iter().map(|p| p.to_string()).collect();
        self.table.insert(pattern.into(), Ok(paths));
        self
    }

    pub fn failing(mut self, pattern: &str, reason: &str) -> Self {
        self.table.insert(pattern.into(), Err(reason.into()));
        self
    }
}

impl PathMatcher for StaticMatcher {
    type Error = String;

    fn match_paths(&self, pattern: &str) -> Result<Vec<String>, Self::Error> {
        self.table.get(pattern).cloned().unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Sink keeping every message
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    pub errors: RefCell<Vec<String>>,
    pub debug: RefCell<Vec<String>>,
}

impl Diagnostics for RecordingDiagnostics {
    fn error(&self, args: Arguments<'_>) {
        self.errors.borrow_mut().push(args.to_string());
    }

    fn debug(&self, args: Arguments<'_>) {
        self.debug.borrow_mut().push(args.to_string());
    }
}

//! Sysfs pattern expansion backed by the `glob` crate

use std::path::PathBuf;

use glob::MatchOptions;
use mira_hal::PathMatcher;
use thiserror::Error;

/// Pattern expansion failure
#[derive(Debug, Error)]
pub enum MatchError {
    /// Pattern is not a valid glob
    #[error("invalid pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    /// A directory on the way could not be read
    #[error("{0}")]
    Io(#[from] glob::GlobError),
    /// Matched path cannot be represented as UTF-8
    #[error("non UTF-8 path {0:?}")]
    NonUtf8(PathBuf),
}

/// Expands patterns against the live filesystem
///
/// Unreadable directories abort the expansion instead of being skipped,
/// so a permission problem never turns into a silently missing device.
/// Wildcards do not match a leading `.` in a file name.
#[derive(Debug, Clone, Copy)]
pub struct GlobMatcher {
    options: MatchOptions,
}

impl GlobMatcher {
    /// Create a matcher with case-sensitive, shell-like matching
    pub fn new() -> Self {
        Self {
            options: MatchOptions {
                case_sensitive: true,
                require_literal_separator: true,
                require_literal_leading_dot: true,
            },
        }
    }
}

impl Default for GlobMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PathMatcher for GlobMatcher {
    type Error = MatchError;

    fn match_paths(&self, pattern: &str) -> Result<Vec<String>, Self::Error> {
        let mut paths = Vec::new();

        for entry in glob::glob_with(pattern, self.options)? {
            let path = entry?;
            let path = path
                .into_os_string()
                .into_string()
                .map_err(|raw| MatchError::NonUtf8(raw.into()))?;
            paths.push(path);
        }

        Ok(paths)
    }
}

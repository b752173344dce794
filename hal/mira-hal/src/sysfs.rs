//! Filesystem pattern matching
//!
//! Device entries under sysfs are located with shell-style patterns such
//! as `/sys/bus/spi/devices/spi1.0/spidev/*`. The matcher only expands the
//! pattern; deciding whether the result is usable is up to the caller.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Display;

/// Expands filesystem patterns into concrete paths
///
/// Implementations must be read-only: expanding a pattern never creates,
/// modifies or removes anything.
pub trait PathMatcher {
    /// Error type for pattern expansion
    type Error: Display;

    /// Expand `pattern` into the list of matching paths
    ///
    /// An empty list is a valid result (nothing matched). Errors are
    /// reserved for malformed patterns or unreadable directories.
    fn match_paths(&self, pattern: &str) -> Result<Vec<String>, Self::Error>;
}

impl<T: PathMatcher + ?Sized> PathMatcher for &T {
    type Error = T::Error;

    fn match_paths(&self, pattern: &str) -> Result<Vec<String>, Self::Error> {
        (**self).match_paths(pattern)
    }
}

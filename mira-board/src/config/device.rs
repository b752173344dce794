//! Sysfs device resolution
//!
//! A pattern must match exactly one path; the device is identified by the
//! final path component (e.g. `spidev1.0`, `pwmchip2`, `ttymxc3`).

use mira_hal::PathMatcher;

use super::error::ResolveError;

/// Resolve `pattern` to the short name of the single device it matches
pub fn resolve<M: PathMatcher>(matcher: &M, pattern: &str) -> Result<String, ResolveError> {
    let mut paths = matcher
        .match_paths(pattern)
        .map_err(|e| ResolveError::Lookup {
            pattern: pattern.into(),
            reason: e.to_string(),
        })?;

    if paths.len() != 1 {
        return Err(ResolveError::MatchCount {
            pattern: pattern.into(),
            count: paths.len(),
        });
    }

    // TODO: read the sysfs 'dev' attribute instead of trusting the directory name
    let path = paths.remove(0);
    let name = path.rsplit_once('/').map(|(_, name)| name.to_owned());

    match name {
        None => Err(ResolveError::NoSeparator { path }),
        Some(name) if name.is_empty() => Err(ResolveError::TrailingSeparator { path }),
        Some(name) => Ok(name),
    }
}

/// Parse `spidev<bus>.<cs>`
pub fn parse_spidev(name: &str) -> Option<(u32, u32)> {
    let (bus, cs) = name.strip_prefix("spidev")?.split_once('.')?;
    Some((parse_decimal(bus)?, parse_decimal(cs)?))
}

/// Parse `pwmchip<id>`
pub fn parse_pwmchip(name: &str) -> Option<u32> {
    parse_decimal(name.strip_prefix("pwmchip")?)
}

/// Parse an unsigned decimal number, digits only
pub(crate) fn parse_decimal(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

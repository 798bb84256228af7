//! Sentinel for configuration values that no layer has supplied yet.

use std::fmt;

/// Marker standing in for a value that is still unknown.
///
/// `Missing` is a zero-sized unit type, so every instance is the same value:
/// it compares equal only to itself and is never confused with `null`, an
/// empty string or any other configuration value. Display renders `Missing`
/// and debug output renders `MISSING`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Missing;

/// The shared missing marker.
pub const MISSING: Missing = Missing;

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Missing")
    }
}

impl fmt::Debug for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MISSING")
    }
}

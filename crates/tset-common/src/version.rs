//! Language version gate.
//!
//! A compilation unit declares the minimum language version it targets.
//! Several interface rules depend on it, so the version is threaded
//! explicitly through the checker options instead of being read from any
//! global configuration.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A `go1.N` language version.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GoVersion {
    pub major: u32,
    pub minor: u32,
}

impl GoVersion {
    /// Overlapping embedded methods with identical signatures are permitted.
    pub const GO1_14: GoVersion = GoVersion::new(1, 14);

    /// Type parameters and non-interface types may be embedded; legacy type
    /// lists are no longer accepted silently.
    pub const GO1_18: GoVersion = GoVersion::new(1, 18);

    /// The newest version the engine knows about.
    pub const LATEST: GoVersion = GoVersion::new(1, 22);

    pub const fn new(major: u32, minor: u32) -> Self {
        GoVersion { major, minor }
    }

    /// Reports whether this version meets `min`.
    #[inline]
    pub fn at_least(self, min: GoVersion) -> bool {
        self >= min
    }
}

impl Default for GoVersion {
    fn default() -> Self {
        Self::LATEST
    }
}

impl fmt::Display for GoVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "go{}.{}", self.major, self.minor)
    }
}

/// Error returned for strings that are not of the form `go1.N`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseVersionError(pub String);

impl fmt::Display for ParseVersionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid language version {:?} (expected go1.N)", self.0)
    }
}

impl std::error::Error for ParseVersionError {}

impl FromStr for GoVersion {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseVersionError(s.to_string());
        let rest = s.trim().strip_prefix("go").ok_or_else(err)?;
        let mut parts = rest.split('.');
        let major = parts.next().and_then(|p| p.parse().ok()).ok_or_else(err)?;
        let minor = match parts.next() {
            Some(p) => p.parse().map_err(|_| err())?,
            None => 0,
        };
        // A patch component ("go1.21.3") does not affect language rules.
        if let Some(patch) = parts.next() {
            patch.parse::<u32>().map_err(|_| err())?;
        }
        if parts.next().is_some() {
            return Err(err());
        }
        Ok(GoVersion::new(major, minor))
    }
}

impl Serialize for GoVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GoVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

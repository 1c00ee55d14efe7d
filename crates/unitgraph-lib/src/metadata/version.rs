//! Versions and version ranges
//!
//! Metadata produced by OSGi tooling versions everything as
//! `major.minor.micro[.qualifier]`. The numeric part is held as a
//! `semver::Version`; the qualifier is kept verbatim and ordered as a plain
//! string, the way OSGi compares it.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Bound;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while parsing versions and ranges
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("Invalid version '{input}': {reason}")]
    InvalidVersion { input: String, reason: String },

    #[error("Invalid version range '{input}': {reason}")]
    InvalidRange { input: String, reason: String },
}

/// An OSGi version: numeric `major.minor.micro` plus an optional qualifier.
///
/// Ordering compares the numeric segments first, then the qualifier
/// lexicographically by bytes; an empty qualifier sorts lowest. `"10"` is
/// therefore below `"9"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    core: semver::Version,
    qualifier: String,
}

impl Version {
    pub fn new(major: u64, minor: u64, micro: u64) -> Self {
        Self {
            core: semver::Version::new(major, minor, micro),
            qualifier: String::new(),
        }
    }

    pub fn with_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifier = qualifier.into();
        self
    }

    pub fn major(&self) -> u64 {
        self.core.major
    }

    pub fn minor(&self) -> u64 {
        self.core.minor
    }

    pub fn micro(&self) -> u64 {
        self.core.patch
    }

    /// Qualifier segment; empty when the version has none
    pub fn qualifier(&self) -> &str {
        &self.qualifier
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.core
            .cmp(&other.core)
            .then_with(|| self.qualifier.cmp(&other.qualifier))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.core)?;
        if !self.qualifier.is_empty() {
            write!(f, ".{}", self.qualifier)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        parse_version(input)
    }
}

/// Parse an OSGi-style version.
///
/// Missing minor and micro segments are zero-padded; a fourth segment is the
/// qualifier and may hold letters, digits, `-` and `_`.
pub fn parse_version(input: &str) -> Result<Version, VersionError> {
    let trimmed = input.trim();
    let invalid = |reason: String| VersionError::InvalidVersion {
        input: input.to_string(),
        reason,
    };
    if trimmed.is_empty() {
        return Err(invalid("empty version".to_string()));
    }

    let mut segments = trimmed.splitn(4, '.');
    let mut numbers = [0u64; 3];
    for slot in numbers.iter_mut() {
        match segments.next() {
            Some(segment) => {
                *slot = segment.parse().map_err(|e: std::num::ParseIntError| {
                    invalid(format!("segment '{}': {}", segment, e))
                })?;
            }
            None => break,
        }
    }

    let mut version = Version::new(numbers[0], numbers[1], numbers[2]);

    if let Some(qualifier) = segments.next() {
        let valid = !qualifier.is_empty()
            && qualifier
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(invalid(format!("qualifier '{}'", qualifier)));
        }
        version.qualifier = qualifier.to_string();
    }

    Ok(version)
}

/// A version interval with inclusive or exclusive bounds
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionRange {
    lower: Bound<Version>,
    upper: Bound<Version>,
}

impl VersionRange {
    pub fn new(lower: Bound<Version>, upper: Bound<Version>) -> Self {
        Self { lower, upper }
    }

    /// `[version, ∞)`, the meaning of a bare version in OSGi range syntax
    pub fn at_least(version: Version) -> Self {
        Self::new(Bound::Included(version), Bound::Unbounded)
    }

    /// `[version, version]`
    pub fn exactly(version: Version) -> Self {
        Self::new(Bound::Included(version.clone()), Bound::Included(version))
    }

    pub fn lower(&self) -> &Bound<Version> {
        &self.lower
    }

    pub fn upper(&self) -> &Bound<Version> {
        &self.upper
    }

    /// Check whether the version lies within this range
    pub fn contains(&self, version: &Version) -> bool {
        let above_lower = match &self.lower {
            Bound::Included(lower) => version >= lower,
            Bound::Excluded(lower) => version > lower,
            Bound::Unbounded => true,
        };
        let below_upper = match &self.upper {
            Bound::Included(upper) => version <= upper,
            Bound::Excluded(upper) => version < upper,
            Bound::Unbounded => true,
        };
        above_lower && below_upper
    }
}

impl FromStr for VersionRange {
    type Err = VersionError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let invalid = |reason: &str| VersionError::InvalidRange {
            input: input.to_string(),
            reason: reason.to_string(),
        };
        let parse = |part: &str| {
            parse_version(part).map_err(|e| VersionError::InvalidRange {
                input: input.to_string(),
                reason: e.to_string(),
            })
        };

        let open = match trimmed.chars().next() {
            Some(c @ ('[' | '(')) => c,
            Some(_) => return Ok(Self::at_least(parse(trimmed)?)),
            None => return Err(invalid("empty range")),
        };
        let close = match trimmed.chars().last() {
            Some(c @ (']' | ')')) if trimmed.len() > 1 => c,
            _ => return Err(invalid("missing closing ']' or ')'")),
        };

        let body = &trimmed[1..trimmed.len() - 1];
        let (low, high) = body
            .split_once(',')
            .ok_or_else(|| invalid("expected 'low,high'"))?;

        let low = parse(low)?;
        let high = parse(high)?;
        if low > high {
            return Err(invalid("lower bound exceeds upper bound"));
        }

        let lower = if open == '[' {
            Bound::Included(low)
        } else {
            Bound::Excluded(low)
        };
        let upper = if close == ']' {
            Bound::Included(high)
        } else {
            Bound::Excluded(high)
        };

        Ok(Self::new(lower, upper))
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.lower, &self.upper) {
            (Bound::Included(low), Bound::Unbounded) => write!(f, "{}", low),
            (Bound::Unbounded, Bound::Unbounded) => write!(f, "0.0.0"),
            (lower, upper) => {
                match lower {
                    Bound::Included(v) => write!(f, "[{}", v)?,
                    Bound::Excluded(v) => write!(f, "({}", v)?,
                    Bound::Unbounded => write!(f, "[0.0.0")?,
                }
                match upper {
                    Bound::Included(v) => write!(f, ",{}]", v),
                    Bound::Excluded(v) => write!(f, ",{})", v),
                    // unbounded upper with a non-inclusive lower has no OSGi spelling
                    Bound::Unbounded => write!(f, ",)"),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    include!("version.test.rs");
}

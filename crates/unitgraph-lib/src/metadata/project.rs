use serde::{Deserialize, Serialize};
use std::fmt;

/// A build module owning one or more units.
///
/// Projects are identified by their key alone; graph results are reported at
/// this granularity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Project {
    key: String,
}

impl Project {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

impl From<&str> for Project {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

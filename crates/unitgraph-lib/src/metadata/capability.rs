//! Provided capabilities, requirements and requirement filters

use super::version::{Version, VersionRange};
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Namespace of the identity capability every unit provides
pub const NAMESPACE_IU: &str = "org.eclipse.equinox.p2.iu";
/// OSGi bundle symbolic names
pub const NAMESPACE_OSGI_BUNDLE: &str = "osgi.bundle";
/// Marker namespace published by fragments, named after the host
pub const NAMESPACE_OSGI_FRAGMENT: &str = "osgi.fragment";
/// Exported Java packages
pub const NAMESPACE_JAVA_PACKAGE: &str = "java.package";
/// Eclipse artifact type (`bundle`, `feature`, `source`)
pub const NAMESPACE_ECLIPSE_TYPE: &str = "org.eclipse.equinox.p2.eclipse.type";

/// Something a unit offers to the rest of the build.
///
/// Equality and hashing use (namespace, name, version) only; attributes
/// are match data for filters, not part of the identity.
#[derive(Debug, Clone)]
pub struct Capability {
    pub namespace: String,
    pub name: String,
    pub version: Version,
    /// Extra attributes that requirement filters may inspect
    pub attributes: BTreeMap<String, String>,
}

impl Capability {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, version: Version) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            version,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

impl PartialEq for Capability {
    fn eq(&self, other: &Self) -> bool {
        self.namespace == other.namespace && self.name == other.name && self.version == other.version
    }
}

impl Eq for Capability {}

impl Hash for Capability {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.namespace.hash(state);
        self.name.hash(state);
        self.version.hash(state);
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}; {} {}", self.namespace, self.name, self.version)
    }
}

type Predicate = dyn Fn(&Capability) -> bool + Send + Sync;

/// Extra match condition on a requirement, evaluated against a capability.
///
/// The expression language of real metadata is not interpreted here; callers
/// supply whatever predicate models it.
#[derive(Clone)]
pub struct Filter {
    description: String,
    predicate: Arc<Predicate>,
}

impl Filter {
    pub fn new<F>(description: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Capability) -> bool + Send + Sync + 'static,
    {
        Self {
            description: description.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Matches capabilities carrying `key=value` among their attributes
    pub fn attribute_equals(key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        let description = format!("({}={})", key, value);
        Self::new(description, move |cap: &Capability| {
            cap.attribute(&key) == Some(value.as_str())
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn matches(&self, capability: &Capability) -> bool {
        (self.predicate)(capability)
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Something a unit needs from the rest of the build
#[derive(Debug, Clone)]
pub struct Requirement {
    pub namespace: String,
    pub name: String,
    /// `None` accepts any version
    pub range: Option<VersionRange>,
    /// `None` accepts any capability
    pub filter: Option<Filter>,
    /// Optional requirements may stay unsatisfied (min = 0)
    pub optional: bool,
    /// Upper bound on meaningful providers; `u32::MAX` is unbounded.
    /// Recorded only, never enforced during resolution.
    pub max: u32,
    pub greedy: bool,
}

impl Requirement {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            range: None,
            filter: None,
            optional: false,
            max: u32::MAX,
            greedy: true,
        }
    }

    pub fn with_range(mut self, range: VersionRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn with_max(mut self, max: u32) -> Self {
        self.max = max;
        self
    }

    pub fn non_greedy(mut self) -> Self {
        self.greedy = false;
        self
    }

    /// Minimum number of providers, as the metadata would spell it
    pub fn min(&self) -> u32 {
        if self.optional { 0 } else { 1 }
    }

    /// Non-optional bundle or package requirements are needed to compile
    pub fn is_mandatory_compile(&self) -> bool {
        !self.optional
            && (self.namespace == NAMESPACE_OSGI_BUNDLE || self.namespace == NAMESPACE_JAVA_PACKAGE)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}; {}", self.namespace, self.name)?;
        if let Some(range) = &self.range {
            write!(f, " {}", range)?;
        }
        if let Some(filter) = &self.filter {
            write!(f, " {}", filter.description())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    include!("capability.test.rs");
}

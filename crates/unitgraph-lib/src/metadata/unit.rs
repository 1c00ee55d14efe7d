//! Units: the resolvable metadata a project publishes

use super::capability::{
    Capability, NAMESPACE_ECLIPSE_TYPE, NAMESPACE_IU, NAMESPACE_OSGI_BUNDLE,
    NAMESPACE_OSGI_FRAGMENT, Requirement,
};
use super::satisfy::satisfies;
use super::version::Version;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Unit property marking a product definition
pub const PROP_TYPE_PRODUCT: &str = "org.eclipse.equinox.p2.type.product";
/// Unit property marking a category
pub const PROP_TYPE_CATEGORY: &str = "org.eclipse.equinox.p2.type.category";

/// Coarse classification of a unit, used to filter dependency sets
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Bundle,
    Fragment,
    Feature,
    Product,
    Category,
    Other,
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnitKind::Bundle => "bundle",
            UnitKind::Fragment => "fragment",
            UnitKind::Feature => "feature",
            UnitKind::Product => "product",
            UnitKind::Category => "category",
            UnitKind::Other => "other",
        };
        f.write_str(name)
    }
}

/// A versioned bundle of provided capabilities and requirements.
///
/// Units are shared as `Arc<Unit>` and compared by pointer wherever identity
/// matters: two projects may publish units with equal id and version that
/// must stay distinct.
#[derive(Debug)]
pub struct Unit {
    id: String,
    version: Version,
    provided: Vec<Capability>,
    requirements: Vec<Requirement>,
    meta_requirements: Vec<Requirement>,
    properties: BTreeMap<String, String>,
}

impl Unit {
    pub fn builder(id: impl Into<String>, version: Version) -> UnitBuilder {
        UnitBuilder {
            id: id.into(),
            version,
            provided: Vec::new(),
            requirements: Vec::new(),
            meta_requirements: Vec::new(),
            properties: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn provided_capabilities(&self) -> &[Capability] {
        &self.provided
    }

    /// Requirements taking part in dependency resolution
    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    /// Informational requirements, never resolved
    pub fn meta_requirements(&self) -> &[Requirement] {
        &self.meta_requirements
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// True iff any provided capability satisfies the requirement
    pub fn satisfies(&self, requirement: &Requirement) -> bool {
        self.provided.iter().any(|cap| satisfies(requirement, cap))
    }

    pub fn kind(&self) -> UnitKind {
        let has_cap = |namespace: &str, name: Option<&str>| {
            self.provided
                .iter()
                .any(|cap| cap.namespace == namespace && name.is_none_or(|n| cap.name == n))
        };
        let flag = |key: &str| self.property(key) == Some("true");

        if has_cap(NAMESPACE_OSGI_FRAGMENT, None) {
            UnitKind::Fragment
        } else if flag(PROP_TYPE_PRODUCT) {
            UnitKind::Product
        } else if flag(PROP_TYPE_CATEGORY) {
            UnitKind::Category
        } else if has_cap(NAMESPACE_ECLIPSE_TYPE, Some("feature")) || self.id.ends_with(".feature.group") {
            UnitKind::Feature
        } else if has_cap(NAMESPACE_OSGI_BUNDLE, None) || has_cap(NAMESPACE_ECLIPSE_TYPE, Some("bundle")) {
            UnitKind::Bundle
        } else {
            UnitKind::Other
        }
    }

    pub fn is_fragment(&self) -> bool {
        self.kind() == UnitKind::Fragment
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.version)
    }
}

/// Builder for [`Unit`]; `build()` adds the identity capability
#[derive(Debug)]
pub struct UnitBuilder {
    id: String,
    version: Version,
    provided: Vec<Capability>,
    requirements: Vec<Requirement>,
    meta_requirements: Vec<Requirement>,
    properties: BTreeMap<String, String>,
}

impl UnitBuilder {
    pub fn provides(mut self, capability: Capability) -> Self {
        self.provided.push(capability);
        self
    }

    pub fn requires(mut self, requirement: Requirement) -> Self {
        self.requirements.push(requirement);
        self
    }

    pub fn meta_requires(mut self, requirement: Requirement) -> Self {
        self.meta_requirements.push(requirement);
        self
    }

    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn build(mut self) -> Arc<Unit> {
        let has_identity = self
            .provided
            .iter()
            .any(|cap| cap.namespace == NAMESPACE_IU && cap.name == self.id);
        if !has_identity {
            self.provided.insert(
                0,
                Capability::new(NAMESPACE_IU, self.id.clone(), self.version.clone()),
            );
        }

        Arc::new(Unit {
            id: self.id,
            version: self.version,
            provided: self.provided,
            requirements: self.requirements,
            meta_requirements: self.meta_requirements,
            properties: self.properties,
        })
    }
}

#[cfg(test)]
mod tests {
    include!("unit.test.rs");
}

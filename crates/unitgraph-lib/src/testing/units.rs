//! Builders for the unit shapes tests use over and over

use crate::metadata::capability::{
    NAMESPACE_ECLIPSE_TYPE, NAMESPACE_JAVA_PACKAGE, NAMESPACE_OSGI_BUNDLE, NAMESPACE_OSGI_FRAGMENT,
};
use crate::metadata::{Capability, Project, Requirement, Unit, UnitBuilder, Version};
use std::sync::Arc;

fn v1() -> Version {
    Version::new(1, 0, 0)
}

/// Bundle `id` 1.0.0 providing its own `osgi.bundle` capability
pub fn bundle(id: &str) -> UnitBuilder {
    Unit::builder(id, v1()).provides(Capability::new(NAMESPACE_OSGI_BUNDLE, id, v1()))
}

/// Fragment `id` attached to `host`; also requires the host bundle
pub fn fragment(id: &str, host: &str) -> UnitBuilder {
    bundle(id)
        .provides(Capability::new(NAMESPACE_OSGI_FRAGMENT, host, v1()))
        .requires(needs_bundle(host))
}

/// Feature group unit, `id` should end in `.feature.group`
pub fn feature(id: &str) -> UnitBuilder {
    Unit::builder(id, v1()).provides(Capability::new(NAMESPACE_ECLIPSE_TYPE, "feature", v1()))
}

pub fn needs_bundle(name: &str) -> Requirement {
    Requirement::new(NAMESPACE_OSGI_BUNDLE, name)
}

pub fn needs_package(name: &str) -> Requirement {
    Requirement::new(NAMESPACE_JAVA_PACKAGE, name)
}

/// Graph input from `(project key, units)` pairs
pub fn build_input<I>(projects: I) -> Vec<(Project, Vec<Arc<Unit>>)>
where
    I: IntoIterator<Item = (&'static str, Vec<Arc<Unit>>)>,
{
    projects
        .into_iter()
        .map(|(key, units)| (Project::new(key), units))
        .collect()
}

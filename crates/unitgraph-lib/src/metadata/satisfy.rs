//! Requirement satisfaction
//!
//! Pure matching of a single requirement against a single capability. Absent
//! ranges and filters are the "no constraint" case and always match.

use super::capability::{Capability, Requirement};

/// Check whether `capability` satisfies `requirement`
pub fn satisfies(requirement: &Requirement, capability: &Capability) -> bool {
    if requirement.namespace != capability.namespace || requirement.name != capability.name {
        return false;
    }

    let version_ok = match &requirement.range {
        Some(range) => range.contains(&capability.version),
        None => true,
    };
    if !version_ok {
        return false;
    }

    match &requirement.filter {
        Some(filter) => filter.matches(capability),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    include!("satisfy.test.rs");
}

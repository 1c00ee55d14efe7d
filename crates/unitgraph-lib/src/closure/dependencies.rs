//! Per-project view over the precomputed closure

use crate::metadata::{Project, Requirement, Unit, UnitKind};
use std::sync::Arc;

use super::graph::{DependencyClosureGraph, ProjectId, RequirementProviders, UnitId};

/// The outgoing dependencies of one project.
///
/// A borrowed view: every query walks data computed when the graph was built
/// and never re-runs resolution, so repeated calls are cheap and stable.
#[derive(Debug, Clone, Copy)]
pub struct ProjectDependencies<'a> {
    graph: &'a DependencyClosureGraph,
    owner: Option<ProjectId>,
    entries: &'a [RequirementProviders],
}

impl<'a> ProjectDependencies<'a> {
    pub(super) fn new(
        graph: &'a DependencyClosureGraph,
        owner: Option<ProjectId>,
        entries: &'a [RequirementProviders],
    ) -> Self {
        Self {
            graph,
            owner,
            entries,
        }
    }

    /// The project this view belongs to; `None` for an unknown project
    pub fn owner(&self) -> Option<&'a Project> {
        self.owner.map(|id| &self.graph.projects[id])
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Units in other projects satisfying this project's requirements.
    ///
    /// Units whose kind is listed in `excluded` are dropped; an empty list
    /// returns everything. Each unit appears once, in discovery order.
    pub fn dependencies(&self, excluded: &[UnitKind]) -> Vec<&'a Arc<Unit>> {
        self.collect_units(self.entries.iter(), |unit_id| {
            !excluded.contains(&self.graph.unit_kinds[unit_id])
        })
    }

    /// Like [`Self::dependencies`], but skips every requirement already
    /// satisfied by one of the `context` units.
    pub fn dependencies_with_context(&self, context: &[Arc<Unit>]) -> Vec<&'a Arc<Unit>> {
        let graph = self.graph;
        let open = self.entries.iter().filter(|entry| {
            let requirement = graph.requirement(entry.requirement);
            !context.iter().any(|unit| unit.satisfies(requirement))
        });
        self.collect_units(open, |_| true)
    }

    /// Distinct projects on the other end of this project's edges
    pub fn projects(&self) -> Vec<&'a Project> {
        let mut seen: Vec<ProjectId> = Vec::new();
        for entry in self.entries {
            for &provider in &entry.providers {
                let owner = self.graph.unit_owner[provider];
                if !seen.contains(&owner) {
                    seen.push(owner);
                }
            }
        }
        seen.into_iter().map(|id| &self.graph.projects[id]).collect()
    }

    /// Each satisfied requirement with its providers from other projects
    pub fn requirements(&self) -> impl Iterator<Item = (&'a Requirement, Vec<&'a Arc<Unit>>)> + 'a {
        let graph = self.graph;
        self.entries.iter().map(move |entry| {
            let providers = entry
                .providers
                .iter()
                .map(|&provider| &graph.units[provider])
                .collect();
            (graph.requirement(entry.requirement), providers)
        })
    }

    fn collect_units<'e, I, F>(&self, entries: I, keep: F) -> Vec<&'a Arc<Unit>>
    where
        I: Iterator<Item = &'e RequirementProviders>,
        F: Fn(UnitId) -> bool,
    {
        let mut seen: Vec<UnitId> = Vec::new();
        for entry in entries {
            for &provider in &entry.providers {
                if keep(provider) && !seen.contains(&provider) {
                    seen.push(provider);
                }
            }
        }
        seen.into_iter().map(|id| &self.graph.units[id]).collect()
    }
}

#[cfg(test)]
mod tests {
    include!("dependencies.test.rs");
}

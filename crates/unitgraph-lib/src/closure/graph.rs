//! Cross-project dependency closure
//!
//! Indexes every unit of every project, matches each unit's requirements
//! against every unit in the build and records which projects depend on
//! which. The graph is an immutable snapshot: it is built once from an
//! explicit input and never mutated afterwards.

use crate::metadata::{Project, Requirement, Unit, UnitKind};
use petgraph::graph::{DiGraph, NodeIndex};
use rayon::prelude::*;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, OnceLock};
use thiserror::Error;
use tracing::{debug, trace};

use super::cycles::CycleAnalysis;
use super::dependencies::ProjectDependencies;

pub(crate) type ProjectId = usize;
pub(crate) type UnitId = usize;

/// Errors raised while constructing a closure graph
#[derive(Debug, Error)]
pub enum ClosureError {
    #[error("Project {project} has no units")]
    EmptyProject { project: String },

    #[error("Project {project} is registered more than once")]
    DuplicateProject { project: String },

    #[error("Unit {unit} is registered by both {first} and {second}")]
    SharedUnit {
        unit: String,
        first: String,
        second: String,
    },

    #[error("Failed to create resolver thread pool: {source}")]
    ThreadPool {
        #[from]
        source: rayon::ThreadPoolBuildError,
    },
}

/// Tuning knobs for graph construction; none of them change the result
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Worker threads for the requirement scan; `None` uses the global pool
    pub jobs: Option<usize>,
    /// Narrow candidate providers through a (namespace, name) index
    pub index_capabilities: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            jobs: None,
            index_capabilities: true,
        }
    }
}

/// A requirement of a unit owned by a project
#[derive(Debug, Clone, Copy)]
pub struct UnitRequirement<'a> {
    pub project: &'a Project,
    pub unit: &'a Arc<Unit>,
    pub requirement: &'a Requirement,
}

/// Position of a requirement inside the unit arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct RequirementRef {
    pub unit: UnitId,
    pub index: usize,
}

/// A requirement together with the providers found in other projects
#[derive(Debug, Clone)]
pub(crate) struct RequirementProviders {
    pub requirement: RequirementRef,
    pub providers: Vec<UnitId>,
}

/// Raw scan result for one requirement, any project
struct RequirementMatch {
    requirement: RequirementRef,
    providers: Vec<UnitId>,
}

/// Dependency closure over all projects of a build
#[derive(Debug)]
pub struct DependencyClosureGraph {
    pub(super) projects: Vec<Project>,
    pub(super) project_index: HashMap<Project, ProjectId>,
    pub(super) project_units: Vec<Vec<Arc<Unit>>>,

    /// Unit arena; `UnitId` indexes these three vectors
    pub(super) units: Vec<Arc<Unit>>,
    pub(super) unit_owner: Vec<ProjectId>,
    pub(super) unit_kinds: Vec<UnitKind>,
    /// Pointer identity of each unit to its id
    unit_index: HashMap<usize, UnitId>,

    /// Per project: requirements with providers in other projects
    pub(super) dependencies: Vec<Vec<RequirementProviders>>,
    /// Units satisfying one of their own requirements
    pub(super) self_references: Vec<RequirementRef>,
    /// Requirements nothing in the build satisfies
    unsatisfied: Vec<RequirementRef>,

    /// Project adjacency, one edge per ordered pair of distinct projects.
    /// Edge weights list the requirements behind the dependency.
    pub(super) graph: DiGraph<ProjectId, Vec<RequirementRef>>,
    pub(super) node_ixs: Vec<NodeIndex>,

    pub(super) cycles: OnceLock<CycleAnalysis>,
}

fn unit_key(unit: &Arc<Unit>) -> usize {
    Arc::as_ptr(unit) as usize
}

impl DependencyClosureGraph {
    /// Build the closure with default options
    pub fn build<I>(project_units: I) -> Result<Self, ClosureError>
    where
        I: IntoIterator<Item = (Project, Vec<Arc<Unit>>)>,
    {
        Self::build_with(project_units, &BuildOptions::default())
    }

    /// Build the closure graph from every project and the units it publishes
    pub fn build_with<I>(project_units: I, options: &BuildOptions) -> Result<Self, ClosureError>
    where
        I: IntoIterator<Item = (Project, Vec<Arc<Unit>>)>,
    {
        let mut projects = Vec::new();
        let mut project_index = HashMap::new();
        let mut per_project = Vec::new();
        let mut units = Vec::new();
        let mut unit_owner = Vec::new();
        let mut unit_index: HashMap<usize, UnitId> = HashMap::new();

        for (project, owned) in project_units {
            if owned.is_empty() {
                return Err(ClosureError::EmptyProject {
                    project: project.to_string(),
                });
            }

            let project_id = projects.len();
            match project_index.entry(project.clone()) {
                Entry::Occupied(_) => {
                    return Err(ClosureError::DuplicateProject {
                        project: project.to_string(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(project_id);
                }
            }

            for unit in &owned {
                let unit_id = units.len();
                if let Some(&existing) = unit_index.get(&unit_key(unit)) {
                    return Err(ClosureError::SharedUnit {
                        unit: unit.to_string(),
                        first: projects
                            .get(unit_owner[existing])
                            .unwrap_or(&project)
                            .to_string(),
                        second: project.to_string(),
                    });
                }
                unit_index.insert(unit_key(unit), unit_id);
                units.push(Arc::clone(unit));
                unit_owner.push(project_id);
            }

            projects.push(project);
            per_project.push(owned);
        }

        let unit_kinds = units.iter().map(|unit| unit.kind()).collect();

        let matches = match options.jobs {
            Some(jobs) => {
                let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;
                pool.install(|| scan_requirements(&units, &unit_owner, projects.len(), options))
            }
            None => scan_requirements(&units, &unit_owner, projects.len(), options),
        };

        let mut dependencies = Vec::with_capacity(projects.len());
        let mut self_references = Vec::new();
        let mut unsatisfied = Vec::new();
        let mut graph = DiGraph::new();
        let node_ixs: Vec<NodeIndex> = (0..projects.len()).map(|id| graph.add_node(id)).collect();

        for (source, project_matches) in matches.into_iter().enumerate() {
            let mut external = Vec::new();
            // target project -> requirements, in first-seen order
            let mut targets: Vec<(ProjectId, Vec<RequirementRef>)> = Vec::new();

            for found in project_matches {
                if found.providers.is_empty() {
                    unsatisfied.push(found.requirement);
                    continue;
                }

                if found.providers.contains(&found.requirement.unit) {
                    trace!(
                        project = %projects[source],
                        unit = %units[found.requirement.unit],
                        "unit satisfies its own requirement"
                    );
                    self_references.push(found.requirement);
                }

                let providers: Vec<UnitId> = found
                    .providers
                    .into_iter()
                    .filter(|&provider| unit_owner[provider] != source)
                    .collect();

                for &provider in &providers {
                    let target = unit_owner[provider];
                    match targets.iter_mut().find(|(id, _)| *id == target) {
                        Some((_, reqs)) => {
                            if !reqs.contains(&found.requirement) {
                                reqs.push(found.requirement);
                            }
                        }
                        None => targets.push((target, vec![found.requirement])),
                    }
                }

                if !providers.is_empty() {
                    external.push(RequirementProviders {
                        requirement: found.requirement,
                        providers,
                    });
                }
            }

            for (target, reqs) in targets {
                trace!(
                    from = %projects[source],
                    to = %projects[target],
                    requirements = reqs.len(),
                    "recorded project dependency"
                );
                graph.add_edge(node_ixs[source], node_ixs[target], reqs);
            }
            dependencies.push(external);
        }

        debug!(
            projects = projects.len(),
            units = units.len(),
            edges = graph.edge_count(),
            self_references = self_references.len(),
            unsatisfied = unsatisfied.len(),
            "Dependency closure graph built"
        );

        Ok(Self {
            projects,
            project_index,
            project_units: per_project,
            units,
            unit_owner,
            unit_kinds,
            unit_index,
            dependencies,
            self_references,
            unsatisfied,
            graph,
            node_ixs,
            cycles: OnceLock::new(),
        })
    }

    pub(super) fn project_id(&self, project: &Project) -> Option<ProjectId> {
        self.project_index.get(project).copied()
    }

    pub(super) fn requirement(&self, req: RequirementRef) -> &Requirement {
        &self.units[req.unit].requirements()[req.index]
    }

    pub(super) fn unit_requirement(&self, req: RequirementRef) -> UnitRequirement<'_> {
        UnitRequirement {
            project: &self.projects[self.unit_owner[req.unit]],
            unit: &self.units[req.unit],
            requirement: self.requirement(req),
        }
    }

    /// Dependencies of a project; empty for a project unknown to this graph
    pub fn project_dependencies(&self, project: &Project) -> ProjectDependencies<'_> {
        match self.project_id(project) {
            Some(id) => ProjectDependencies::new(self, Some(id), &self.dependencies[id]),
            None => ProjectDependencies::new(self, None, &[]),
        }
    }

    /// Project that registered this exact unit instance
    pub fn project(&self, unit: &Arc<Unit>) -> Option<&Project> {
        self.unit_index
            .get(&unit_key(unit))
            .map(|&id| &self.projects[self.unit_owner[id]])
    }

    /// Iterate over all projects in registration order
    pub fn projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter()
    }

    /// Units published by a project; empty when unknown
    pub fn project_units(&self, project: &Project) -> &[Arc<Unit>] {
        match self.project_id(project) {
            Some(id) => &self.project_units[id],
            None => &[],
        }
    }

    /// Check whether any unit of the project is a fragment
    pub fn is_fragment(&self, project: &Project) -> bool {
        self.project_units(project).iter().any(|unit| unit.is_fragment())
    }

    /// Distinct projects the given project depends on
    pub fn dependency_projects(&self, project: &Project) -> Vec<&Project> {
        self.project_dependencies(project).projects()
    }

    /// Every project paired with its dependency view
    pub fn dependencies(&self) -> impl Iterator<Item = (&Project, ProjectDependencies<'_>)> {
        self.projects
            .iter()
            .enumerate()
            .map(move |(id, project)| {
                (project, ProjectDependencies::new(self, Some(id), &self.dependencies[id]))
            })
    }

    /// Requirements with zero matches anywhere in the build
    pub fn unsatisfied_requirements(&self) -> Vec<UnitRequirement<'_>> {
        self.unsatisfied
            .iter()
            .map(|&req| self.unit_requirement(req))
            .collect()
    }

    /// Units whose own capabilities satisfy one of their requirements
    pub fn self_references(&self) -> Vec<UnitRequirement<'_>> {
        self.self_references
            .iter()
            .map(|&req| self.unit_requirement(req))
            .collect()
    }

    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// Number of recorded project-to-project edges, self references excluded
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

/// Match every requirement of every unit against the whole build.
///
/// One task per project; each task only reads the shared arena and returns
/// its own list, merged back in project order.
fn scan_requirements(
    units: &[Arc<Unit>],
    unit_owner: &[ProjectId],
    project_count: usize,
    options: &BuildOptions,
) -> Vec<Vec<RequirementMatch>> {
    let index = options.index_capabilities.then(|| capability_index(units));

    let mut owned_units: Vec<Vec<UnitId>> = vec![Vec::new(); project_count];
    for (unit_id, &owner) in unit_owner.iter().enumerate() {
        owned_units[owner].push(unit_id);
    }

    owned_units
        .par_iter()
        .map(|owned| {
            let mut found = Vec::new();
            for &unit_id in owned {
                for (index_in_unit, requirement) in units[unit_id].requirements().iter().enumerate()
                {
                    let providers = match &index {
                        Some(index) => index
                            .get(&(requirement.namespace.as_str(), requirement.name.as_str()))
                            .map(|candidates| {
                                candidates
                                    .iter()
                                    .copied()
                                    .filter(|&candidate| units[candidate].satisfies(requirement))
                                    .collect::<Vec<_>>()
                            })
                            .unwrap_or_default(),
                        None => (0..units.len())
                            .filter(|&candidate| units[candidate].satisfies(requirement))
                            .collect(),
                    };
                    found.push(RequirementMatch {
                        requirement: RequirementRef {
                            unit: unit_id,
                            index: index_in_unit,
                        },
                        providers,
                    });
                }
            }
            found
        })
        .collect()
}

/// (namespace, name) -> units providing at least one such capability, ascending
fn capability_index(units: &[Arc<Unit>]) -> HashMap<(&str, &str), Vec<UnitId>> {
    let mut index: HashMap<(&str, &str), Vec<UnitId>> = HashMap::new();
    for (unit_id, unit) in units.iter().enumerate() {
        for cap in unit.provided_capabilities() {
            let providers = index
                .entry((cap.namespace.as_str(), cap.name.as_str()))
                .or_default();
            if providers.last() != Some(&unit_id) {
                providers.push(unit_id);
            }
        }
    }
    index
}

#[cfg(test)]
mod tests {
    include!("graph.test.rs");
}

//! Cycle classification of project edges
//!
//! Uses Tarjan's strongly connected components over the project adjacency.
//! Every edge inside a component of two or more projects is part of a
//! transitive cycle. Unit self-references are tracked separately by the graph
//! and are never treated as cycles.

use crate::metadata::{Project, Requirement};
use petgraph::algo::tarjan_scc;
use petgraph::graph::DiGraph;
use petgraph::visit::EdgeRef;
use serde::Serialize;
use std::fmt;
use tracing::debug;

use super::graph::{DependencyClosureGraph, ProjectId, RequirementRef};

/// How an edge between two projects is classified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeKind {
    /// Ordinary dependency outside any cycle
    Dependency,
    /// Both ends are mutually reachable
    Cycle,
    /// A unit satisfying its own requirement
    SelfReference,
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EdgeKind::Dependency => "dependency",
            EdgeKind::Cycle => "cycle",
            EdgeKind::SelfReference => "self-reference",
        };
        f.write_str(name)
    }
}

/// A classified dependency between two projects
#[derive(Debug, Clone)]
pub struct ProjectEdge<'a> {
    pub source: &'a Project,
    pub target: &'a Project,
    pub kind: EdgeKind,
    /// Requirements of `source` that `target` satisfies
    pub requirements: Vec<&'a Requirement>,
}

/// Strongly connected component decomposition of the project graph
#[derive(Debug, Clone)]
pub struct CycleAnalysis {
    /// Component number per project
    component: Vec<usize>,
    /// Components with at least two projects, members in registration order
    cycles: Vec<Vec<ProjectId>>,
}

impl CycleAnalysis {
    pub(super) fn compute(graph: &DiGraph<ProjectId, Vec<RequirementRef>>, project_count: usize) -> Self {
        let mut component = vec![0; project_count];
        let mut cycles = Vec::new();

        for (number, scc) in tarjan_scc(graph).into_iter().enumerate() {
            let mut members: Vec<ProjectId> = scc.iter().map(|&node| graph[node]).collect();
            for &member in &members {
                component[member] = number;
            }
            if members.len() > 1 {
                members.sort_unstable();
                cycles.push(members);
            }
        }
        cycles.sort_by_key(|members| members[0]);

        debug!(cycles = cycles.len(), "Cycle analysis computed");
        Self { component, cycles }
    }

    /// Check whether `source -> target` lies on a transitive cycle
    pub(super) fn is_cyclic(&self, source: ProjectId, target: ProjectId) -> bool {
        // distinct projects sharing a component means the component is a cycle
        source != target && self.component[source] == self.component[target]
    }

    pub(super) fn cycle_ids(&self) -> &[Vec<ProjectId>] {
        &self.cycles
    }
}

impl DependencyClosureGraph {
    /// Memoised cycle analysis; computed on first use, at most once
    pub fn cycle_analysis(&self) -> &CycleAnalysis {
        self.cycles
            .get_or_init(|| CycleAnalysis::compute(&self.graph, self.projects.len()))
    }

    /// Groups of mutually dependent projects
    pub fn cycles(&self) -> Vec<Vec<&Project>> {
        self.cycle_analysis()
            .cycle_ids()
            .iter()
            .map(|members| members.iter().map(|&id| &self.projects[id]).collect())
            .collect()
    }

    pub fn has_cycles(&self) -> bool {
        !self.cycle_analysis().cycle_ids().is_empty()
    }

    /// Classify the dependency between two projects.
    ///
    /// `None` when no such edge was recorded. For `a == b` the answer is
    /// [`EdgeKind::SelfReference`] iff one of the project's units satisfies its
    /// own requirement.
    pub fn classify(&self, source: &Project, target: &Project) -> Option<EdgeKind> {
        let source = self.project_id(source)?;
        let target = self.project_id(target)?;

        if source == target {
            let has_marker = self
                .self_references
                .iter()
                .any(|req| self.unit_owner[req.unit] == source);
            return has_marker.then_some(EdgeKind::SelfReference);
        }

        self.graph
            .find_edge(self.node_ixs[source], self.node_ixs[target])?;
        Some(self.edge_kind(source, target))
    }

    /// Every recorded edge with its classification.
    ///
    /// Grouped by source project in registration order; a project's
    /// self-reference loop, if any, follows its outgoing edges.
    pub fn edges(&self) -> Vec<ProjectEdge<'_>> {
        let mut outgoing: Vec<Vec<ProjectEdge<'_>>> = vec![Vec::new(); self.projects.len()];

        for edge in self.graph.edge_references() {
            let source = self.graph[edge.source()];
            let target = self.graph[edge.target()];
            outgoing[source].push(ProjectEdge {
                source: &self.projects[source],
                target: &self.projects[target],
                kind: self.edge_kind(source, target),
                requirements: edge.weight().iter().map(|&req| self.requirement(req)).collect(),
            });
        }

        let mut loops: Vec<Vec<RequirementRef>> = vec![Vec::new(); self.projects.len()];
        for &req in &self.self_references {
            loops[self.unit_owner[req.unit]].push(req);
        }

        let mut edges = Vec::with_capacity(self.graph.edge_count() + self.self_references.len());
        for (id, (mut out, reqs)) in outgoing.into_iter().zip(loops).enumerate() {
            edges.append(&mut out);
            if !reqs.is_empty() {
                edges.push(ProjectEdge {
                    source: &self.projects[id],
                    target: &self.projects[id],
                    kind: EdgeKind::SelfReference,
                    requirements: reqs.into_iter().map(|req| self.requirement(req)).collect(),
                });
            }
        }
        edges
    }

    pub(super) fn edge_kind(&self, source: ProjectId, target: ProjectId) -> EdgeKind {
        if source == target {
            EdgeKind::SelfReference
        } else if self.cycle_analysis().is_cyclic(source, target) {
            EdgeKind::Cycle
        } else {
            EdgeKind::Dependency
        }
    }
}

#[cfg(test)]
mod tests {
    include!("cycles.test.rs");
}

//! # Dependency Closure
//!
//! Cross-project dependency graph of a build: which project needs which, by
//! way of unit requirements satisfied by units of other projects.
//!
//! ## Modules
//!
//! - [`graph`] - Construction and project/unit queries
//! - [`dependencies`] - Per-project dependency views
//! - [`cycles`] - Transitive cycle and self-reference classification
//! - [`dot`] - Graphviz rendering and dumps

pub mod cycles;
pub mod dependencies;
pub mod dot;
pub mod graph;

pub use cycles::{CycleAnalysis, EdgeKind, ProjectEdge};
pub use dependencies::ProjectDependencies;
pub use dot::{render_dot, write_dot};
pub use graph::{BuildOptions, ClosureError, DependencyClosureGraph, UnitRequirement};

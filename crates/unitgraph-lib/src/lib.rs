//! # unitgraph Library
//!
//! Cross-project dependency closure for multi-module builds. Given every
//! project of a build and the units it publishes, computes which projects
//! depend on which, flags transitive cycles and renders the result as a
//! Graphviz graph.
//!
//! ## Core Modules
//!
//! - [`metadata`] - Versions, capabilities, requirements and units
//! - [`closure`] - The dependency closure graph, cycle analysis and DOT dumps
//! - [`manifest`] - Build manifests in TOML, YAML or JSON
//! - [`primitives`] - Shared enums, configuration values and errors
//! - [`logger`] - Structured logging
//! - [`application`] - CLI interface, configuration and commands
//!
//! ## Quick Start
//!
//! ```
//! use unitgraph_lib::closure::DependencyClosureGraph;
//! use unitgraph_lib::metadata::{Capability, Project, Requirement, Unit, Version};
//!
//! let v1 = Version::new(1, 0, 0);
//! let app = Unit::builder("app", v1.clone())
//!     .requires(Requirement::new("osgi.bundle", "core"))
//!     .build();
//! let core = Unit::builder("core", v1.clone())
//!     .provides(Capability::new("osgi.bundle", "core", v1))
//!     .build();
//!
//! let graph = DependencyClosureGraph::build(vec![
//!     (Project::new("app"), vec![app]),
//!     (Project::new("core"), vec![core]),
//! ])?;
//! let deps = graph.project_dependencies(&Project::new("app")).dependencies(&[]);
//! assert_eq!(deps[0].id(), "core");
//! # Ok::<(), unitgraph_lib::closure::ClosureError>(())
//! ```

pub mod application;
pub mod closure;
pub mod logger;
pub mod manifest;
pub mod metadata;
pub mod primitives;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used types for convenience
pub use application::{AppConfig, Cli, Commands, execute_command};
pub use closure::{BuildOptions, ClosureError, DependencyClosureGraph, EdgeKind, ProjectDependencies};
pub use logger::Logger;
pub use manifest::{BuildManifest, ManifestError, load_manifest};
pub use metadata::{Capability, Project, Requirement, Unit, UnitKind};
pub use primitives::{ColorIntent, ConfigError, LogFormat, LogLevel, LogOutput, LoggerError};

// Private imports for the main function
use anyhow::Result;
use application::{CliConfig, resolve_ansi};

pub fn main() -> Result<()> {
    // Load CLI configuration
    let config = CliConfig::load()?;
    let app = &config.app_config;

    console::set_colors_enabled(resolve_ansi(app.color, LogOutput::Stdout));
    Logger::init(app.to_logger_config(resolve_ansi(app.color, app.log_output)))?;

    // Execute the command
    execute_command(config)
}

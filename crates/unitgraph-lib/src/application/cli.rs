use crate::metadata::UnitKind;
use crate::primitives::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::config::AppConfig;

/// unitgraph CLI - cross-project dependency closure of a build
#[derive(Debug, Clone, Parser)]
#[command(name = "unitgraph")]
#[command(about = "Resolve which projects of a build depend on which")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Global configuration options
    #[command(flatten)]
    pub config: AppConfig,

    /// unitgraph commands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Configuration loaded from CLI
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub app_config: AppConfig,
    pub command: Option<Commands>,
}

/// Available unitgraph commands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Show version information
    Version,

    /// List the units other projects contribute to a project
    Deps {
        /// Project key
        #[arg(help = "Key of the project to inspect")]
        project: String,

        /// Leave out units of these kinds
        #[arg(short = 'x', long, value_enum, help = "Unit kinds to exclude (repeatable)")]
        exclude: Vec<UnitKind>,

        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List every project with the projects it depends on
    Projects {
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List groups of mutually dependent projects
    Cycles {
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List requirements nothing in the build satisfies
    Unsatisfied {
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Render the project graph in Graphviz DOT format
    Dump {
        /// Output file; stdout when omitted
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

impl Commands {
    /// Check if command needs a build manifest
    pub fn requires_manifest(&self) -> bool {
        !matches!(self, Commands::Version)
    }
}

#[cfg(test)]
mod tests {
    include!("cli.test.rs");
}

//! Application configuration management
//!
//! Handles config loading, validation, and environment variable processing
//! following the precedence: defaults -> .env -> env vars -> CLI args.

use crate::closure::BuildOptions;
use crate::primitives::*;
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration values
pub mod defaults {
    pub const LOG_LEVEL: &str = "0"; // Error-only logging by default
    pub const LOG_FORMAT: &str = "text";
    pub const LOG_OUTPUT: &str = "stderr";
    pub const COLOR: &str = "auto";

    /// Manifest names probed in the working directory, in order
    pub const MANIFEST_CANDIDATES: &[&str] = &[
        "unitgraph.toml",
        "unitgraph.yaml",
        "unitgraph.yml",
        "unitgraph.json",
    ];
}

/// Default value functions for configuration fields
mod default_fns {
    use crate::primitives::{ColorIntent, LogFormat, LogOutput};

    pub fn log_level() -> u8 {
        0
    }

    pub fn log_format() -> LogFormat {
        LogFormat::Text
    }

    pub fn log_output() -> LogOutput {
        LogOutput::Stderr
    }

    pub fn color() -> ColorIntent {
        ColorIntent::Auto
    }
}

/// Application configuration structure
#[derive(Debug, Clone, Parser, Deserialize)]
pub struct AppConfig {
    /// Build manifest describing projects and units (.toml, .yaml, .json)
    #[arg(short, long, env = "UNITGRAPH_MANIFEST", global = true)]
    #[serde(default)]
    pub manifest: Option<PathBuf>,

    /// Worker threads for the requirement scan (default: all cores)
    #[arg(short = 'j', long, env = "UNITGRAPH_JOBS", global = true)]
    #[serde(default)]
    pub jobs: Option<usize>,

    /// Disable the capability index and scan every unit per requirement
    #[arg(long, env = "UNITGRAPH_NO_INDEX", global = true)]
    #[serde(default)]
    pub no_index: bool,

    /// Write the DOT graph to this path after every build
    #[arg(long, env = "UNITGRAPH_DUMP", global = true)]
    #[serde(default)]
    pub dump: Option<PathBuf>,

    /// Verbosity level (0=error, 1=warn, 2=info, 3=debug, 4=trace)
    #[arg(long, env = "UNITGRAPH_LOG_LEVEL", default_value = defaults::LOG_LEVEL, global = true)]
    #[serde(default = "default_fns::log_level")]
    pub log_level: u8,

    /// Log format (text, json, yaml)
    #[arg(long, env = "UNITGRAPH_LOG_FORMAT", default_value = defaults::LOG_FORMAT, global = true)]
    #[serde(default = "default_fns::log_format")]
    pub log_format: LogFormat,

    /// Log output stream (stderr, stdout)
    #[arg(long, env = "UNITGRAPH_LOG_OUTPUT", default_value = defaults::LOG_OUTPUT, global = true)]
    #[serde(default = "default_fns::log_output")]
    pub log_output: LogOutput,

    /// Color output control (auto, always, never)
    #[arg(long, env = "UNITGRAPH_COLOR", default_value = defaults::COLOR, global = true)]
    #[serde(default = "default_fns::color")]
    pub color: ColorIntent,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            manifest: None,
            jobs: None,
            no_index: false,
            dump: None,
            log_level: default_fns::log_level(),
            log_format: default_fns::log_format(),
            log_output: default_fns::log_output(),
            color: default_fns::color(),
        }
    }
}

impl AppConfig {
    /// Create LoggerConfig, with ANSI already decided by the caller
    pub fn to_logger_config(&self, ansi: bool) -> LoggerConfig {
        LoggerConfig {
            level: LogLevel::from_verbosity(self.log_level),
            format: self.log_format,
            output: self.log_output,
            ansi,
        }
    }

    /// Graph construction options
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            jobs: self.jobs,
            index_capabilities: !self.no_index,
        }
    }

    /// Merge this config with another, taking non-default values from other
    pub fn merge_with(mut self, other: Self) -> Self {
        if other.manifest.is_some() {
            self.manifest = other.manifest;
        }
        if other.jobs.is_some() {
            self.jobs = other.jobs;
        }
        if other.dump.is_some() {
            self.dump = other.dump;
        }
        if other.no_index {
            self.no_index = true;
        }

        if other.log_level != default_fns::log_level() {
            self.log_level = other.log_level;
        }
        if !matches!(other.log_format, LogFormat::Text) {
            self.log_format = other.log_format;
        }
        if !matches!(other.log_output, LogOutput::Stderr) {
            self.log_output = other.log_output;
        }
        if !matches!(other.color, ColorIntent::Auto) {
            self.color = other.color;
        }

        self
    }

    /// Validate the final configuration, resolving the manifest from `workdir`
    pub fn validate(&mut self, workdir: &Path) -> Result<(), ConfigError> {
        if self.jobs == Some(0) {
            return Err(ConfigError::ValidationFailed {
                reason: "--jobs must be at least 1".to_string(),
            });
        }
        if self.log_level > 4 {
            return Err(ConfigError::ValidationFailed {
                reason: format!("--log-level {} is out of range 0-4", self.log_level),
            });
        }

        if self.manifest.is_none() {
            self.manifest = defaults::MANIFEST_CANDIDATES
                .iter()
                .map(|name| workdir.join(name))
                .find(|candidate| candidate.is_file());
        }

        Ok(())
    }
}

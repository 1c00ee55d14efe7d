//! Configuration loading
//!
//! Coordinates loading configuration from `.env` files, the environment and
//! the command line.

use crate::primitives::ConfigError;
use clap::Parser;
use std::path::Path;

use super::{
    cli::{Cli, CliConfig},
    config::AppConfig,
    env::EnvironmentConfig,
};

/// Env files read before parsing, first match wins per variable
const ENV_FILES: [&str; 2] = [".env.local", ".env"];

/// Load `.env.local` and `.env` into the process environment; missing files are fine
pub fn load_env_files() -> Result<(), ConfigError> {
    for env_file in ENV_FILES {
        if let Err(e) = dotenvy::from_filename(env_file) {
            if !e.not_found() {
                return Err(ConfigError::EnvFileError {
                    file: env_file.to_string(),
                    source: e,
                });
            }
        }
    }
    Ok(())
}

impl AppConfig {
    /// Resolve the final config: defaults -> environment -> CLI
    pub fn resolve(
        cli: AppConfig,
        env: &EnvironmentConfig,
        workdir: &Path,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.color = env.apply_color_config(config.color);
        config = config.merge_with(cli);
        config.validate(workdir)?;
        Ok(config)
    }
}

impl CliConfig {
    /// Load configuration from env files, environment and command line arguments
    pub fn load() -> Result<Self, ConfigError> {
        load_env_files()?;
        Self::from_cli(Cli::parse(), &EnvironmentConfig::load()?)
    }

    /// Resolve an already parsed command line against the environment
    pub fn from_cli(cli: Cli, env: &EnvironmentConfig) -> Result<Self, ConfigError> {
        let workdir = std::env::current_dir().map_err(|e| ConfigError::ValidationFailed {
            reason: format!("cannot determine working directory: {}", e),
        })?;
        Ok(Self {
            app_config: AppConfig::resolve(cli.config, env, &workdir)?,
            command: cli.command,
        })
    }
}

#[cfg(test)]
mod tests {
    include!("loader.test.rs");
}

//! Application layer modules
//!
//! Organizes CLI interface, configuration management, and command execution.

pub mod cli;
pub mod commands;
pub mod config;
pub mod env;
pub mod loader;

// Re-export main types for convenience
pub use cli::{Cli, CliConfig, Commands};
pub use commands::{execute_command, execute_command_with_output, load_graph};
pub use config::AppConfig;
pub use env::{EnvironmentConfig, resolve_ansi};
pub use loader::load_env_files;

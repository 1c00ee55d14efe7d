//! Environment variable handling for application configuration
//!
//! Manages the conventional color and CI variables that sit outside the
//! `UNITGRAPH_*` namespace.

use crate::primitives::{ColorIntent, ConfigError, LogOutput};
use serde::Deserialize;

/// Environment variables that affect application behavior
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnvironmentConfig {
    /// NO_COLOR environment variable (any non-empty value = disable color)
    pub no_color: Option<String>,
    /// FORCE_COLOR environment variable (0/false = disable, 1/2/3/true = enable)
    pub force_color: Option<String>,
    /// CLICOLOR environment variable (0 = disable color)
    pub clicolor: Option<String>,
    /// CI environment variable (any value = CI mode)
    pub ci: Option<String>,
}

impl EnvironmentConfig {
    /// Load environment configuration from current environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    /// Load from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars).map_err(|source| ConfigError::EnvironmentParsingFailed { source })
    }

    /// Apply environment variables to color configuration
    ///
    /// Precedence: CI < CLICOLOR < NO_COLOR < FORCE_COLOR
    pub fn apply_color_config(&self, mut color: ColorIntent) -> ColorIntent {
        if self.ci.is_some() {
            color = ColorIntent::Never;
        }

        if self.clicolor.as_deref() == Some("0") {
            color = ColorIntent::Never;
        }

        if self.no_color.as_deref().is_some_and(|value| !value.is_empty()) {
            color = ColorIntent::Never;
        }

        if let Some(force_color) = &self.force_color {
            match force_color.as_str() {
                "0" | "false" => color = ColorIntent::Never,
                "1" | "2" | "3" | "true" => color = ColorIntent::Always,
                _ => {}
            }
        }

        color
    }
}

/// Whether ANSI escapes should be written to the given stream
pub fn resolve_ansi(intent: ColorIntent, output: LogOutput) -> bool {
    match intent {
        ColorIntent::Always => true,
        ColorIntent::Never => false,
        ColorIntent::Auto => match output {
            LogOutput::Stderr => console::Term::stderr().features().colors_supported(),
            LogOutput::Stdout => console::Term::stdout().features().colors_supported(),
        },
    }
}

#[cfg(test)]
mod tests {
    include!("env.test.rs");
}

//! Fixture infrastructure for E2E tests
//!
//! One sample build, spelled in every supported manifest format, plus a
//! harness that parses a command line and runs it in-process against a
//! temporary working directory.
//!
//! The sample build:
//! - `core` exports `org.acme.core.api`
//! - `ui` imports it and needs the help bundle
//! - `help` needs `ui` back, so `ui` and `help` form a cycle
//! - `ui.gtk` is a fragment of the ui bundle
//! - `site` holds a feature including everything plus an optional bundle nobody builds

use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use unitgraph_lib::application::{Cli, CliConfig, EnvironmentConfig, execute_command_with_output};
use unitgraph_lib::testing::ManifestFixture;
use unitgraph_lib::AppConfig;

pub const SAMPLE_TOML: &str = r#"
[[project]]
key = "core"

[[project.unit]]
id = "org.acme.core"
version = "1.2.0"
provides = [
    { namespace = "osgi.bundle", name = "org.acme.core" },
    { namespace = "java.package", name = "org.acme.core.api" },
]

[[project]]
key = "ui"

[[project.unit]]
id = "org.acme.ui"
version = "1.0.0"
provides = [{ namespace = "osgi.bundle", name = "org.acme.ui" }]
requires = [
    { namespace = "java.package", name = "org.acme.core.api", range = "[1.0,2.0)" },
    { namespace = "osgi.bundle", name = "org.acme.help" },
]

[[project]]
key = "help"

[[project.unit]]
id = "org.acme.help"
version = "1.0.0"
provides = [{ namespace = "osgi.bundle", name = "org.acme.help" }]
requires = [{ namespace = "osgi.bundle", name = "org.acme.ui" }]

[[project]]
key = "ui.gtk"

[[project.unit]]
id = "org.acme.ui.gtk"
version = "1.0.0"
provides = [
    { namespace = "osgi.bundle", name = "org.acme.ui.gtk" },
    { namespace = "osgi.fragment", name = "org.acme.ui" },
]
requires = [{ namespace = "osgi.bundle", name = "org.acme.ui" }]

[[project]]
key = "site"

[[project.unit]]
id = "org.acme.feature.group"
version = "1.0.0"
requires = [
    { namespace = "osgi.bundle", name = "org.acme.core" },
    { namespace = "osgi.bundle", name = "org.acme.ui" },
    { namespace = "osgi.bundle", name = "org.acme.help" },
    { namespace = "osgi.bundle", name = "org.acme.extras", optional = true },
]
"#;

pub const SAMPLE_YAML: &str = r#"
project:
  - key: core
    unit:
      - id: org.acme.core
        version: "1.2.0"
        provides:
          - { namespace: osgi.bundle, name: org.acme.core }
          - { namespace: java.package, name: org.acme.core.api }
  - key: ui
    unit:
      - id: org.acme.ui
        version: "1.0.0"
        provides:
          - { namespace: osgi.bundle, name: org.acme.ui }
        requires:
          - { namespace: java.package, name: org.acme.core.api, range: "[1.0,2.0)" }
          - { namespace: osgi.bundle, name: org.acme.help }
  - key: help
    unit:
      - id: org.acme.help
        version: "1.0.0"
        provides:
          - { namespace: osgi.bundle, name: org.acme.help }
        requires:
          - { namespace: osgi.bundle, name: org.acme.ui }
  - key: ui.gtk
    unit:
      - id: org.acme.ui.gtk
        version: "1.0.0"
        provides:
          - { namespace: osgi.bundle, name: org.acme.ui.gtk }
          - { namespace: osgi.fragment, name: org.acme.ui }
        requires:
          - { namespace: osgi.bundle, name: org.acme.ui }
  - key: site
    unit:
      - id: org.acme.feature.group
        version: "1.0.0"
        requires:
          - { namespace: osgi.bundle, name: org.acme.core }
          - { namespace: osgi.bundle, name: org.acme.ui }
          - { namespace: osgi.bundle, name: org.acme.help }
          - { namespace: osgi.bundle, name: org.acme.extras, optional: true }
"#;

pub const SAMPLE_JSON: &str = r#"{
  "project": [
    { "key": "core", "unit": [{
      "id": "org.acme.core", "version": "1.2.0",
      "provides": [
        { "namespace": "osgi.bundle", "name": "org.acme.core" },
        { "namespace": "java.package", "name": "org.acme.core.api" }
      ]
    }]},
    { "key": "ui", "unit": [{
      "id": "org.acme.ui", "version": "1.0.0",
      "provides": [{ "namespace": "osgi.bundle", "name": "org.acme.ui" }],
      "requires": [
        { "namespace": "java.package", "name": "org.acme.core.api", "range": "[1.0,2.0)" },
        { "namespace": "osgi.bundle", "name": "org.acme.help" }
      ]
    }]},
    { "key": "help", "unit": [{
      "id": "org.acme.help", "version": "1.0.0",
      "provides": [{ "namespace": "osgi.bundle", "name": "org.acme.help" }],
      "requires": [{ "namespace": "osgi.bundle", "name": "org.acme.ui" }]
    }]},
    { "key": "ui.gtk", "unit": [{
      "id": "org.acme.ui.gtk", "version": "1.0.0",
      "provides": [
        { "namespace": "osgi.bundle", "name": "org.acme.ui.gtk" },
        { "namespace": "osgi.fragment", "name": "org.acme.ui" }
      ],
      "requires": [{ "namespace": "osgi.bundle", "name": "org.acme.ui" }]
    }]},
    { "key": "site", "unit": [{
      "id": "org.acme.feature.group", "version": "1.0.0",
      "requires": [
        { "namespace": "osgi.bundle", "name": "org.acme.core" },
        { "namespace": "osgi.bundle", "name": "org.acme.ui" },
        { "namespace": "osgi.bundle", "name": "org.acme.help" },
        { "namespace": "osgi.bundle", "name": "org.acme.extras", "optional": true }
      ]
    }]}
  ]
}"#;

/// Temporary working directory plus an in-process command runner
pub struct BuildFixture {
    pub files: ManifestFixture,
}

impl BuildFixture {
    /// Empty working directory
    pub fn empty() -> Result<Self> {
        Ok(Self {
            files: ManifestFixture::new()?,
        })
    }

    /// Working directory holding the sample build as `unitgraph.toml`
    pub fn sample() -> Result<Self> {
        Self::with_manifest("unitgraph.toml", SAMPLE_TOML)
    }

    pub fn with_manifest(name: &str, content: &str) -> Result<Self> {
        let fixture = Self::empty()?;
        fixture.files.write_file(name, content)?;
        Ok(fixture)
    }

    pub fn path(&self) -> &Path {
        self.files.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.path().join(name)
    }

    /// Resolve `args` the way the binary does, with the fixture as working
    /// directory and an empty environment
    pub fn config(&self, args: &[&str]) -> Result<CliConfig> {
        let argv = std::iter::once("unitgraph").chain(args.iter().copied());
        let cli = Cli::try_parse_from(argv)?;
        let env = EnvironmentConfig::from_vars(Vec::new())?;

        Ok(CliConfig {
            app_config: AppConfig::resolve(cli.config, &env, self.path())?,
            command: cli.command,
        })
    }

    /// Run a command line and capture what it writes
    pub fn run(&self, args: &[&str]) -> Result<String> {
        let config = self.config(args)?;
        let mut out = Vec::new();
        execute_command_with_output(config, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    /// Run a command line expecting JSON output
    pub fn run_json(&self, args: &[&str]) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.run(args)?)?)
    }
}

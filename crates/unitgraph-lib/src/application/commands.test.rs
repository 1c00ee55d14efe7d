use super::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// core <- app, app <-> plugin, plugin needs something nobody has
const MANIFEST: &str = r#"
[[project]]
key = "core"

[[project.unit]]
id = "org.example.core"
version = "1.0.0"
provides = [{ namespace = "osgi.bundle", name = "org.example.core" }]

[[project]]
key = "app"

[[project.unit]]
id = "org.example.app"
version = "1.0.0"
provides = [{ namespace = "osgi.bundle", name = "org.example.app" }]
requires = [
    { namespace = "osgi.bundle", name = "org.example.core" },
    { namespace = "osgi.bundle", name = "org.example.plugin" },
]

[[project]]
key = "plugin"

[[project.unit]]
id = "org.example.plugin"
version = "1.0.0"
provides = [{ namespace = "osgi.bundle", name = "org.example.plugin" }]
requires = [
    { namespace = "osgi.bundle", name = "org.example.app" },
    { namespace = "java.package", name = "org.missing", optional = true },
]

[[project.unit]]
id = "org.example.plugin.feature.group"
version = "1.0.0"
"#;

fn fixture() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("unitgraph.toml");
    std::fs::write(&path, MANIFEST).unwrap();
    (dir, path)
}

fn config_for(manifest: &Path, command: Commands) -> CliConfig {
    CliConfig {
        app_config: AppConfig {
            manifest: Some(manifest.to_path_buf()),
            ..AppConfig::default()
        },
        command: Some(command),
    }
}

fn run(config: CliConfig) -> Result<String> {
    let mut out = Vec::new();
    execute_command_with_output(config, &mut out)?;
    Ok(String::from_utf8(out)?)
}

mod handle_version_tests {
    use super::*;

    #[test]
    fn it_displays_version_without_manifest() {
        let config = CliConfig {
            app_config: AppConfig::default(),
            command: Some(Commands::Version),
        };
        let output = run(config).unwrap();
        assert!(output.starts_with(&format!("unitgraph {}", env!("CARGO_PKG_VERSION"))));
    }

    #[test]
    fn it_prints_usage_without_command() {
        let config = CliConfig {
            app_config: AppConfig::default(),
            command: None,
        };
        assert!(run(config).unwrap().contains("unitgraph --help"));
    }
}

mod handle_deps_tests {
    use super::*;

    #[test]
    fn it_lists_units_from_other_projects() {
        let (_dir, manifest) = fixture();
        let output = run(config_for(
            &manifest,
            Commands::Deps {
                project: "app".to_string(),
                exclude: Vec::new(),
                format: OutputFormat::Text,
            },
        ))
        .unwrap();

        assert!(output.contains("org.example.core 1.0.0 (bundle) from core"));
        assert!(output.contains("org.example.plugin 1.0.0 (bundle) from plugin"));
    }

    #[test]
    fn it_excludes_kinds() {
        let (_dir, manifest) = fixture();
        let output = run(config_for(
            &manifest,
            Commands::Deps {
                project: "app".to_string(),
                exclude: vec![UnitKind::Bundle],
                format: OutputFormat::Text,
            },
        ))
        .unwrap();

        assert_eq!(output, "app has no dependencies on other projects\n");
    }

    #[test]
    fn it_renders_json() {
        let (_dir, manifest) = fixture();
        let output = run(config_for(
            &manifest,
            Commands::Deps {
                project: "plugin".to_string(),
                exclude: Vec::new(),
                format: OutputFormat::Json,
            },
        ))
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["id"], "org.example.app");
        assert_eq!(value[0]["kind"], "bundle");
        assert_eq!(value[0]["project"], "app");
    }

    #[test]
    fn it_rejects_unknown_projects() {
        let (_dir, manifest) = fixture();
        let err = run(config_for(
            &manifest,
            Commands::Deps {
                project: "nope".to_string(),
                exclude: Vec::new(),
                format: OutputFormat::Text,
            },
        ))
        .unwrap_err();
        assert!(err.to_string().contains("Unknown project 'nope'"));
    }
}

mod handle_projects_tests {
    use super::*;

    #[test]
    fn it_lists_projects_with_dependencies() {
        let (_dir, manifest) = fixture();
        let output = run(config_for(
            &manifest,
            Commands::Projects {
                format: OutputFormat::Text,
            },
        ))
        .unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines, vec!["core", "app -> core, plugin", "plugin -> app"]);
    }
}

mod handle_cycles_tests {
    use super::*;

    #[test]
    fn it_reports_cycles_as_json() {
        let (_dir, manifest) = fixture();
        let output = run(config_for(
            &manifest,
            Commands::Cycles {
                format: OutputFormat::Json,
            },
        ))
        .unwrap();

        let value: Vec<Vec<String>> = serde_json::from_str(&output).unwrap();
        assert_eq!(value, vec![vec!["app".to_string(), "plugin".to_string()]]);
    }

    #[test]
    fn it_reports_cycles_as_text() {
        let (_dir, manifest) = fixture();
        let output = run(config_for(
            &manifest,
            Commands::Cycles {
                format: OutputFormat::Text,
            },
        ))
        .unwrap();
        assert!(output.contains("cycle 1:"));
        assert!(output.contains("app, plugin"));
    }
}

mod handle_unsatisfied_tests {
    use super::*;

    #[test]
    fn it_lists_missing_requirements() {
        let (_dir, manifest) = fixture();
        let output = run(config_for(
            &manifest,
            Commands::Unsatisfied {
                format: OutputFormat::Text,
            },
        ))
        .unwrap();

        assert_eq!(
            output,
            "plugin: org.example.plugin 1.0.0 requires java.package; org.missing (optional)\n"
        );
    }
}

mod handle_dump_tests {
    use super::*;

    #[test]
    fn it_writes_dot_to_output() {
        let (_dir, manifest) = fixture();
        let output = run(config_for(&manifest, Commands::Dump { out: None })).unwrap();

        assert!(output.starts_with("digraph ProjectDependencies {"));
        assert!(output.contains("p1 -> p2 [color=red"));
        assert!(output.contains("p1 -> p0 [color=black"));
    }

    #[test]
    fn it_writes_dot_to_file() {
        let (dir, manifest) = fixture();
        let target = dir.path().join("graph.dot");
        let output = run(config_for(
            &manifest,
            Commands::Dump {
                out: Some(target.clone()),
            },
        ))
        .unwrap();

        assert!(output.is_empty());
        let written = std::fs::read_to_string(&target).unwrap();
        assert!(written.contains("p0 [label=\"core\"];"));
    }

    #[test]
    fn it_dumps_after_build_when_configured() {
        let (dir, manifest) = fixture();
        let target = dir.path().join("auto.dot");
        let config = CliConfig {
            app_config: AppConfig {
                manifest: Some(manifest),
                dump: Some(target.clone()),
                ..AppConfig::default()
            },
            command: Some(Commands::Projects {
                format: OutputFormat::Text,
            }),
        };

        run(config).unwrap();
        assert!(target.is_file());
    }
}

mod load_graph_tests {
    use super::*;

    #[test]
    fn it_requires_a_manifest() {
        let err = load_graph(&AppConfig::default()).unwrap_err();
        assert!(err.to_string().contains("No build manifest found"));
    }

    #[test]
    fn it_reports_the_manifest_path_on_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{").unwrap();

        let config = AppConfig {
            manifest: Some(path),
            ..AppConfig::default()
        };
        let err = load_graph(&config).unwrap_err();
        assert!(err.to_string().starts_with("Failed to load build manifest"));
    }

    #[test]
    fn it_honours_build_options() {
        let (_dir, manifest) = fixture();
        let config = AppConfig {
            manifest: Some(manifest),
            jobs: Some(2),
            no_index: true,
            ..AppConfig::default()
        };
        let graph = load_graph(&config).unwrap();
        assert_eq!(graph.project_count(), 3);
        assert_eq!(graph.edge_count(), 3);
    }
}

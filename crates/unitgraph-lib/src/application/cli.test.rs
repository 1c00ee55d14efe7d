use super::*;
use crate::primitives::{ColorIntent, LogFormat};

#[test]
fn test_cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}

#[test]
fn test_deps_with_exclusions() {
    let cli = Cli::try_parse_from([
        "unitgraph",
        "deps",
        "projectA",
        "--exclude",
        "feature",
        "-x",
        "product",
        "--format",
        "json",
    ])
    .unwrap();

    match cli.command {
        Some(Commands::Deps {
            project,
            exclude,
            format,
        }) => {
            assert_eq!(project, "projectA");
            assert_eq!(exclude, vec![UnitKind::Feature, UnitKind::Product]);
            assert_eq!(format, OutputFormat::Json);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_global_options_after_subcommand() {
    let cli = Cli::try_parse_from([
        "unitgraph",
        "cycles",
        "--manifest",
        "build.toml",
        "-j",
        "3",
        "--no-index",
        "--log-format",
        "json",
        "--color",
        "never",
    ])
    .unwrap();

    assert_eq!(cli.config.manifest, Some(PathBuf::from("build.toml")));
    assert_eq!(cli.config.jobs, Some(3));
    assert!(cli.config.no_index);
    assert_eq!(cli.config.log_format, LogFormat::Json);
    assert_eq!(cli.config.color, ColorIntent::Never);
    assert!(matches!(
        cli.command,
        Some(Commands::Cycles {
            format: OutputFormat::Text
        })
    ));
}

#[test]
fn test_unknown_unit_kind_is_rejected() {
    let result = Cli::try_parse_from(["unitgraph", "deps", "a", "--exclude", "plugin"]);
    assert!(result.is_err());
}

#[test]
fn test_dump_output_path() {
    let cli = Cli::try_parse_from(["unitgraph", "dump", "--out", "graph.dot"]).unwrap();
    match cli.command {
        Some(Commands::Dump { out }) => assert_eq!(out, Some(PathBuf::from("graph.dot"))),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_manifest_requirement() {
    assert!(!Commands::Version.requires_manifest());
    assert!(
        Commands::Projects {
            format: OutputFormat::Text
        }
        .requires_manifest()
    );
}

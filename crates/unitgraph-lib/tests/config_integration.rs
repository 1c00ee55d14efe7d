use clap::Parser;
use unitgraph_lib::application::{Cli, CliConfig, EnvironmentConfig};
use unitgraph_lib::application::config::AppConfig;
use unitgraph_lib::primitives::{ColorIntent, LogLevel, LogOutput};

fn no_env() -> EnvironmentConfig {
    EnvironmentConfig::from_vars(Vec::<(String, String)>::new()).unwrap()
}

#[test]
fn test_config_default_creation() {
    let config = AppConfig::default();

    assert!(config.log_level <= 4);
    assert!(config.manifest.is_none());
    assert_eq!(config.color, ColorIntent::Auto);
    assert!(config.build_options().index_capabilities);
}

#[test]
fn test_config_merging_integration() {
    let base_config = AppConfig::default();
    let override_config = AppConfig {
        log_level: 3,
        jobs: Some(8),
        color: ColorIntent::Never,
        ..AppConfig::default()
    };

    let merged = base_config.merge_with(override_config);

    assert_eq!(merged.log_level, 3);
    assert_eq!(merged.jobs, Some(8));
    assert_eq!(merged.color, ColorIntent::Never);
    assert!(!merged.no_index);
}

#[test]
fn test_cli_to_logger_config() {
    let cli = Cli::try_parse_from([
        "unitgraph",
        "--manifest",
        "build.toml",
        "--log-level",
        "3",
        "--log-output",
        "stdout",
        "projects",
    ])
    .unwrap();

    let config = CliConfig::from_cli(cli, &no_env()).unwrap();
    let logger = config.app_config.to_logger_config(false);

    assert_eq!(logger.level, LogLevel::Debug);
    assert_eq!(logger.output, LogOutput::Stdout);
    assert!(!logger.ansi);
    assert!(config.command.is_some());
}

#[test]
fn test_cli_validation_errors_surface() {
    let cli = Cli::try_parse_from(["unitgraph", "--jobs", "0", "projects"]).unwrap();
    let err = CliConfig::from_cli(cli, &no_env()).unwrap_err();
    assert!(err.to_string().contains("--jobs must be at least 1"));
}

use super::*;
use crate::primitives::ColorIntent;
use std::path::PathBuf;
use tempfile::TempDir;

fn env(pairs: &[(&str, &str)]) -> EnvironmentConfig {
    EnvironmentConfig::from_vars(
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string())),
    )
    .unwrap()
}

#[test]
fn test_config_loading_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.log_level, 0);
    assert_eq!(config.jobs, None);
    assert!(!config.no_index);
    assert_eq!(config.color, ColorIntent::Auto);
}

#[test]
fn test_config_merging() {
    let base = AppConfig::default();
    let override_config = AppConfig {
        log_level: 4,
        color: ColorIntent::Always,
        jobs: Some(8),
        ..AppConfig::default()
    };

    let merged = base.merge_with(override_config);
    assert_eq!(merged.log_level, 4);
    assert_eq!(merged.color, ColorIntent::Always);
    assert_eq!(merged.jobs, Some(8));
    assert!(merged.manifest.is_none());
}

#[test]
fn test_environment_color_yields_to_cli() {
    let dir = TempDir::new().unwrap();

    let resolved =
        AppConfig::resolve(AppConfig::default(), &env(&[("NO_COLOR", "1")]), dir.path()).unwrap();
    assert_eq!(resolved.color, ColorIntent::Never);

    let cli = AppConfig {
        color: ColorIntent::Always,
        ..AppConfig::default()
    };
    let resolved = AppConfig::resolve(cli, &env(&[("NO_COLOR", "1")]), dir.path()).unwrap();
    assert_eq!(resolved.color, ColorIntent::Always);
}

#[test]
fn test_manifest_discovered_in_workdir() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("unitgraph.yaml"), "project: []\n").unwrap();

    let resolved = AppConfig::resolve(AppConfig::default(), &env(&[]), dir.path()).unwrap();
    assert_eq!(resolved.manifest, Some(dir.path().join("unitgraph.yaml")));

    // an explicit manifest is never replaced
    let cli = AppConfig {
        manifest: Some(PathBuf::from("elsewhere.toml")),
        ..AppConfig::default()
    };
    let resolved = AppConfig::resolve(cli, &env(&[]), dir.path()).unwrap();
    assert_eq!(resolved.manifest, Some(PathBuf::from("elsewhere.toml")));
}

#[test]
fn test_no_manifest_found() {
    let dir = TempDir::new().unwrap();
    let resolved = AppConfig::resolve(AppConfig::default(), &env(&[]), dir.path()).unwrap();
    assert!(resolved.manifest.is_none());
}

#[test]
fn test_zero_jobs_rejected() {
    let dir = TempDir::new().unwrap();
    let cli = AppConfig {
        jobs: Some(0),
        ..AppConfig::default()
    };
    let err = AppConfig::resolve(cli, &env(&[]), dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
}

#[test]
fn test_log_level_out_of_range_rejected() {
    let dir = TempDir::new().unwrap();
    let cli = AppConfig {
        log_level: 9,
        ..AppConfig::default()
    };
    assert!(AppConfig::resolve(cli, &env(&[]), dir.path()).is_err());
}

#[test]
fn test_build_options_follow_config() {
    let config = AppConfig {
        jobs: Some(2),
        no_index: true,
        ..AppConfig::default()
    };
    let options = config.build_options();
    assert_eq!(options.jobs, Some(2));
    assert!(!options.index_capabilities);
}

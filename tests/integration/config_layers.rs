//! Integration tests for layered configuration loading

use crate::integration::test_utils::with_xdg_env;
use lectern::config::{starter_config_toml, ConfigLoader, LecternConfig};
use lectern::provider::DEFAULT_MODEL;
use lectern::FailureKind;
use std::fs;
use tempfile::TempDir;

fn write_global(test_dir: &TempDir, contents: &str) {
    let dir = test_dir.path().join("config").join("lectern");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), contents).unwrap();
}

#[test]
fn test_defaults_without_any_file() {
    let test_dir = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();

    let config = with_xdg_env(&test_dir, || ConfigLoader::load(project.path())).unwrap();

    assert_eq!(config.provider.model, DEFAULT_MODEL);
    assert_eq!(config.provider.api_key_env, "GEMINI_API_KEY");
    assert_eq!(config.provider.request_timeout_secs, None);
    assert_eq!(config.retry.max_attempts, 3);
    assert_eq!(config.retry.initial_delay_ms, 1000);
    assert_eq!(config.logging.level, "warn");
    assert!(config.validate().is_ok());
}

#[test]
fn test_project_file_overrides_global_file() {
    let test_dir = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    write_global(
        &test_dir,
        r#"
[provider]
model = "global-model"
connect_timeout_secs = 3

[retry]
max_attempts = 7
"#,
    );
    fs::write(
        project.path().join("lectern.toml"),
        r#"
[retry]
max_attempts = 4
initial_delay_ms = 250
"#,
    )
    .unwrap();

    let config = with_xdg_env(&test_dir, || ConfigLoader::load(project.path())).unwrap();

    assert_eq!(config.provider.model, "global-model");
    assert_eq!(config.provider.connect_timeout_secs, 3);
    assert_eq!(config.retry.max_attempts, 4);
    assert_eq!(config.retry.initial_delay_ms, 250);
}

#[test]
fn test_named_environment_file_and_env_vars_override_project_file() {
    let test_dir = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    fs::write(
        project.path().join("lectern.toml"),
        "[retry]\nmax_attempts = 4\ninitial_delay_ms = 250\n",
    )
    .unwrap();
    fs::write(
        project.path().join("lectern.ci.toml"),
        "[retry]\ninitial_delay_ms = 5\n",
    )
    .unwrap();

    let config = with_xdg_env(&test_dir, || {
        std::env::set_var("LECTERN_ENV", "ci");
        std::env::set_var("LECTERN__RETRY__MAX_ATTEMPTS", "9");
        let loaded = ConfigLoader::load(project.path());
        std::env::remove_var("LECTERN_ENV");
        std::env::remove_var("LECTERN__RETRY__MAX_ATTEMPTS");
        loaded
    })
    .unwrap();

    assert_eq!(config.retry.initial_delay_ms, 5);
    assert_eq!(config.retry.max_attempts, 9);
}

#[test]
fn test_load_from_explicit_file() {
    let test_dir = TempDir::new().unwrap();
    let path = test_dir.path().join("custom.toml");
    fs::write(
        &path,
        r#"
[provider]
endpoint = "http://localhost:8080/v1beta"
request_timeout_secs = 30

[logging]
level = "debug"
format = "json"
"#,
    )
    .unwrap();

    let config = with_xdg_env(&test_dir, || ConfigLoader::load_from_file(&path)).unwrap();

    assert_eq!(config.provider.endpoint, "http://localhost:8080/v1beta");
    assert_eq!(config.provider.request_timeout_secs, Some(30));
    assert_eq!(config.logging.format, "json");
    assert_eq!(config.retry.max_attempts, 3);
}

#[test]
fn test_missing_explicit_file_is_config_error() {
    let test_dir = TempDir::new().unwrap();
    let path = test_dir.path().join("missing.toml");

    let err = ConfigLoader::load_from_file(&path).unwrap_err();

    assert_eq!(err.kind(), FailureKind::Config);
    assert!(err.to_string().contains("missing.toml"));
}

#[test]
fn test_invalid_values_fail_validation() {
    let test_dir = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    fs::write(
        project.path().join("lectern.toml"),
        r#"
[provider]
endpoint = "ftp://example.test"

[retry]
max_attempts = 0

[logging]
level = "loud"
"#,
    )
    .unwrap();

    let config = with_xdg_env(&test_dir, || ConfigLoader::load(project.path())).unwrap();
    let errors = config.clone().validate().unwrap_err();
    assert_eq!(errors.len(), 3);

    let err = config.validated().unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Invalid endpoint URL"));
    assert!(message.contains("max_attempts"));
    assert!(message.contains("Invalid log level"));
}

#[test]
fn test_starter_config_round_trips_to_defaults() {
    let parsed: LecternConfig = toml::from_str(&starter_config_toml()).unwrap();
    let defaults = LecternConfig::default();

    assert_eq!(parsed.provider.endpoint, defaults.provider.endpoint);
    assert_eq!(parsed.provider.model, defaults.provider.model);
    assert_eq!(parsed.retry, defaults.retry);
    assert_eq!(parsed.logging.level, defaults.logging.level);
    assert!(parsed.validate().is_ok());
}

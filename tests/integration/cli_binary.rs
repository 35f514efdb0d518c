//! Integration tests for the lectern binary

use std::fs;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Run the binary isolated from the caller's config, credentials and env overrides.
fn run(home: &TempDir, args: &[&str], envs: &[(&str, &str)]) -> Output {
    let config_home = home.path().join("config");
    fs::create_dir_all(&config_home).unwrap();

    let mut command = Command::new(env!("CARGO_BIN_EXE_lectern"));
    command
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", &config_home)
        .env("NO_COLOR", "1")
        .env_remove("GEMINI_API_KEY")
        .env_remove("LECTERN_ENV")
        .env_remove("LECTERN_LOG")
        .env_remove("LECTERN__RETRY__MAX_ATTEMPTS")
        .stdin(Stdio::null())
        .args(args);
    for (key, value) in envs {
        command.env(key, value);
    }
    command.output().unwrap()
}

fn dir_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_schema_command_prints_schema() {
    let home = TempDir::new().unwrap();
    let dir = dir_arg(home.path());

    let output = run(&home, &["--dir", &dir, "--quiet", "schema"], &[]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let schema: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(schema["type"], "OBJECT");
    assert_eq!(schema["properties"]["slides"]["type"], "ARRAY");
}

#[test]
fn test_prompt_command_prints_request_body() {
    let home = TempDir::new().unwrap();
    let dir = dir_arg(home.path());

    let output = run(
        &home,
        &[
            "--dir", &dir, "--quiet", "prompt", "--topic", "Photosynthesis", "--subject",
            "Biology",
        ],
        &[],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let body: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let text = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(text.contains("High School Biology"));
    assert!(text.contains("\"Photosynthesis\""));
}

#[test]
fn test_generate_without_topic_fails_when_not_interactive() {
    let home = TempDir::new().unwrap();
    let dir = dir_arg(home.path());

    let output = run(
        &home,
        &["--dir", &dir, "--quiet", "generate", "--subject", "Math"],
        &[("GEMINI_API_KEY", "test-key")],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("--topic is required"));
}

#[test]
fn test_generate_without_api_key_is_config_error() {
    let home = TempDir::new().unwrap();
    let dir = dir_arg(home.path());

    let output = run(
        &home,
        &[
            "--dir", &dir, "--quiet", "generate", "--topic", "Fractions", "--subject", "Math",
        ],
        &[],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("GEMINI_API_KEY"));
}

#[test]
fn test_generate_against_unreachable_endpoint_exhausts_attempts() {
    let home = TempDir::new().unwrap();
    let dir = dir_arg(home.path());

    let output = run(
        &home,
        &[
            "--dir",
            &dir,
            "--quiet",
            "generate",
            "--topic",
            "Fractions",
            "--subject",
            "Math",
            "--max-attempts",
            "2",
            "--initial-delay-ms",
            "1",
        ],
        &[
            ("GEMINI_API_KEY", "test-key"),
            ("LECTERN__PROVIDER__ENDPOINT", "http://127.0.0.1:9/v1beta"),
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("failed after 2 attempt(s)"), "stderr: {}", err);
    assert!(err.contains("last failure: transport"), "stderr: {}", err);
}

#[test]
fn test_config_init_then_show() {
    let home = TempDir::new().unwrap();
    let project = home.path().join("project");
    let dir = dir_arg(&project);

    let created = run(&home, &["--dir", &dir, "--quiet", "config", "init"], &[]);
    assert!(created.status.success(), "stderr: {}", stderr(&created));
    assert!(project.join("lectern.toml").exists());

    let again = run(&home, &["--dir", &dir, "--quiet", "config", "init"], &[]);
    assert_eq!(again.status.code(), Some(1));
    assert!(stderr(&again).contains("--force"));

    let shown = run(
        &home,
        &["--dir", &dir, "--quiet", "config", "show"],
        &[("GEMINI_API_KEY", "test-key")],
    );
    assert!(shown.status.success(), "stderr: {}", stderr(&shown));
    let text = stdout(&shown);
    assert!(text.contains("max_attempts = 3"));
    assert!(!text.contains("test-key"));
}

#[test]
fn test_invalid_project_config_exits_with_error() {
    let home = TempDir::new().unwrap();
    fs::write(
        home.path().join("lectern.toml"),
        "[logging]\nformat = \"xml\"\n",
    )
    .unwrap();
    let dir = dir_arg(home.path());

    let output = run(&home, &["--dir", &dir, "--quiet", "schema"], &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Invalid log format"));
}

//! Configuration System
//!
//! Layered configuration for the provider endpoint, retry policy, and logging. Sources, lowest
//! precedence first: built-in defaults, the global config file, project config files, then
//! `LECTERN__*` environment variables.

use crate::error::GenerationError;
use crate::logging::LoggingConfig;
use crate::provider::ProviderConfig;
use crate::retry::RetryPolicy;
use config::{File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

mod merge;
mod sources;

pub use sources::workspace_file::{project_config_path, PROJECT_CONFIG_FILE};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LecternConfig {
    /// Generation endpoint and credential source
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Attempt count and initial backoff
    #[serde(default)]
    pub retry: RetryPolicy,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Provider(String),
    Retry(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Provider(msg) => write!(f, "Provider: {}", msg),
            ValidationError::Retry(msg) => write!(f, "Retry: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl LecternConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.provider.validate() {
            errors.push(ValidationError::Provider(e));
        }

        if self.retry.max_attempts == 0 {
            errors.push(ValidationError::Retry(
                "max_attempts must be at least 1".to_string(),
            ));
        }

        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and fold all errors into one `Config` error.
    pub fn validated(self) -> Result<Self, GenerationError> {
        self.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            GenerationError::Config(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(self)
    }

    /// Render as TOML with any inline API key redacted.
    pub fn to_redacted_toml(&self) -> Result<String, GenerationError> {
        let mut redacted = self.clone();
        if redacted.provider.api_key.is_some() {
            redacted.provider.api_key = Some("<redacted>".to_string());
        }
        toml::to_string_pretty(&redacted)
            .map_err(|e| GenerationError::Config(format!("Failed to render config: {}", e)))
    }
}

/// Loads [`LecternConfig`] from layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load defaults, the global file, project files in `project_dir`, and env overrides.
    pub fn load(project_dir: &Path) -> Result<LecternConfig, GenerationError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::workspace_file::add_to_builder(builder, project_dir)?;
        let builder = merge::merge_policy::add_env_overrides(builder);

        let config: LecternConfig = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Load defaults, one explicit file, and env overrides. The file must exist.
    pub fn load_from_file(path: &Path) -> Result<LecternConfig, GenerationError> {
        if !path.exists() {
            return Err(GenerationError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let builder = merge::merge_policy::builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()).format(FileFormat::Toml));
        let builder = merge::merge_policy::add_env_overrides(builder);

        let config: LecternConfig = builder.build()?.try_deserialize()?;
        Ok(config)
    }
}

/// Starter project configuration written by `lectern config init`.
pub fn starter_config_toml() -> String {
    format!(
        r#"# Lectern project configuration.
# Values here override ~/.config/lectern/config.toml and are overridden by
# LECTERN__SECTION__KEY environment variables.

[provider]
endpoint = "{endpoint}"
model = "{model}"
# Name of the environment variable holding the API key.
api_key_env = "{api_key_env}"
connect_timeout_secs = {connect}
# request_timeout_secs = 120

[retry]
max_attempts = {attempts}
initial_delay_ms = {delay}

[logging]
level = "warn"
format = "text"
output = "stderr"
"#,
        endpoint = crate::provider::DEFAULT_ENDPOINT,
        model = crate::provider::DEFAULT_MODEL,
        api_key_env = crate::provider::DEFAULT_API_KEY_ENV,
        connect = crate::provider::DEFAULT_CONNECT_TIMEOUT_SECS,
        attempts = crate::retry::DEFAULT_MAX_ATTEMPTS,
        delay = crate::retry::DEFAULT_INITIAL_DELAY_MS,
    )
}

//! Merge rules: defaults, override order, conflict handling.

use crate::provider::{
    DEFAULT_API_KEY_ENV, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_ENDPOINT, DEFAULT_MODEL,
};
use crate::retry::{DEFAULT_INITIAL_DELAY_MS, DEFAULT_MAX_ATTEMPTS};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment};

/// Prefix for environment overrides, e.g. `LECTERN__RETRY__MAX_ATTEMPTS=5`.
pub const ENV_PREFIX: &str = "LECTERN";
pub const ENV_SEPARATOR: &str = "__";

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("provider.endpoint", DEFAULT_ENDPOINT)?
        .set_default("provider.model", DEFAULT_MODEL)?
        .set_default("provider.api_key_env", DEFAULT_API_KEY_ENV)?
        .set_default("provider.connect_timeout_secs", DEFAULT_CONNECT_TIMEOUT_SECS)?
        .set_default("retry.max_attempts", DEFAULT_MAX_ATTEMPTS)?
        .set_default("retry.initial_delay_ms", DEFAULT_INITIAL_DELAY_MS)
}

/// Environment overrides are applied last, above every file.
///
/// Values stay strings; numeric and boolean fields are converted when the config is
/// deserialized, so string fields such as `provider.api_key` keep leading zeros.
pub fn add_env_overrides(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator(ENV_SEPARATOR)
            .separator(ENV_SEPARATOR),
    )
}

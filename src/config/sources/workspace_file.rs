//! Project config file source: lectern.toml and lectern.{env}.toml

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File, FileFormat};
use std::path::{Path, PathBuf};

pub const PROJECT_CONFIG_FILE: &str = "lectern.toml";

/// Base project config file inside `project_dir`.
pub fn project_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(PROJECT_CONFIG_FILE)
}

/// Add project config files to builder.
/// Precedence: lectern.toml (base) then lectern.{LECTERN_ENV}.toml when LECTERN_ENV is set.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    project_dir: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let mut builder = builder;

    let base_config_path = project_config_path(project_dir);
    if base_config_path.exists() {
        builder = builder.add_source(
            File::from(base_config_path)
                .format(FileFormat::Toml)
                .required(false),
        );
    }

    if let Ok(env_name) = std::env::var("LECTERN_ENV") {
        let env_config_path = project_dir.join(format!("lectern.{}.toml", env_name));
        if env_config_path.exists() {
            builder = builder.add_source(
                File::from(env_config_path)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }
    }

    Ok(builder)
}

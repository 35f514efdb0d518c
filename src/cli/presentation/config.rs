//! Config command presentation.

use std::path::Path;

pub fn format_config_show_result(
    rendered_toml: &str,
    source: Option<&Path>,
    api_key_available: bool,
) -> String {
    let mut output = String::new();
    match source {
        Some(path) => output.push_str(&format!("# Loaded from: {}\n", path.display())),
        None => output.push_str("# Loaded from: defaults, global and project files, environment\n"),
    }
    let key_status = if api_key_available {
        "available"
    } else {
        "missing"
    };
    output.push_str(&format!("# API key: {}\n\n", key_status));
    output.push_str(rendered_toml);
    output
}

pub fn format_config_init_result(path: &Path, overwritten: bool) -> String {
    let verb = if overwritten { "Overwrote" } else { "Created" };
    format!(
        "{} {}\nSet your API key in the environment variable named by provider.api_key_env.",
        verb,
        path.display()
    )
}

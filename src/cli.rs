//! Command-line surface: argument parsing, command routing, and output formatting.
//! Generation itself lives in [`crate::api`]; this module only wires it to the terminal.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::{command_name, config_command_name, uses_network};
pub use output::map_error;
pub use parse::{Cli, Commands, ConfigCommands, LessonArgs, OutputFormat};
pub use presentation::{
    format_config_init_result, format_config_show_result, format_lesson_json,
    format_lesson_markdown, format_lesson_text, format_request_body_json, format_schema_json,
    RenderOptions,
};
pub use route::RunContext;

//! CLI presentation: text, markdown and json formatters per command family.

mod config;
mod lesson;

pub use config::{format_config_init_result, format_config_show_result};
pub use lesson::{
    format_lesson_json, format_lesson_markdown, format_lesson_text, format_request_body_json,
    format_schema_json, RenderOptions,
};

//! CLI parse: clap types for Lectern. No behavior; definitions only.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Lectern CLI - Generate structured lesson plans from a topic
#[derive(Parser)]
#[command(name = "lectern")]
#[command(about = "Generate structured lesson plans from a topic using a hosted generative model")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Project directory searched for lectern.toml
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, short = 'q', default_value = "false", conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Lesson parameters shared by commands that build a request.
#[derive(clap::Args, Debug, Clone)]
pub struct LessonArgs {
    /// Lesson topic, e.g. "Photosynthesis"
    #[arg(long, short = 't')]
    pub topic: Option<String>,

    /// Subject, e.g. "Biology"
    #[arg(long, short = 's')]
    pub subject: Option<String>,

    /// Audience grade level, e.g. "7th Grade"
    #[arg(long, short = 'g', default_value = crate::request::DEFAULT_GRADE_LEVEL)]
    pub grade: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a lesson plan
    Generate {
        #[command(flatten)]
        lesson: LessonArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Override the configured number of attempts
        #[arg(long)]
        max_attempts: Option<u32>,

        /// Override the configured delay before the first retry, in milliseconds
        #[arg(long)]
        initial_delay_ms: Option<u64>,

        /// Show the quiz answer key
        #[arg(long)]
        answers: bool,
    },
    /// Print the request body that would be sent, without sending it
    Prompt {
        #[command(flatten)]
        lesson: LessonArgs,
    },
    /// Print the lesson plan response schema
    Schema,
    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration (API key redacted)
    Show,
    /// Write a starter lectern.toml into the project directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Markdown,
    Json,
}

//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::api::LessonPlanner;
use crate::cli::parse::{Commands, ConfigCommands, LessonArgs, OutputFormat};
use crate::cli::presentation::{
    format_config_init_result, format_config_show_result, format_lesson_json,
    format_lesson_markdown, format_lesson_text, format_request_body_json, format_schema_json,
    RenderOptions,
};
use crate::cli::{command_name, uses_network};
use crate::config::{project_config_path, starter_config_toml, ConfigLoader, LecternConfig};
use crate::error::GenerationError;
use crate::request::{build_request, LessonParams};
use crate::schema::lesson_plan_schema;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

/// Runtime context for CLI execution: project directory, config path, and loaded config.
pub struct RunContext {
    config: LecternConfig,
    project_dir: PathBuf,
    config_path: Option<PathBuf>,
}

impl RunContext {
    /// Create run context from project directory and optional config path. Uses ConfigLoader only.
    pub fn new(project_dir: PathBuf, config_path: Option<PathBuf>) -> Result<Self, GenerationError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&project_dir)?
        };

        Ok(Self {
            config: config.validated()?,
            project_dir,
            config_path,
        })
    }

    /// Run context over an already-loaded configuration.
    pub fn with_config(config: LecternConfig, project_dir: PathBuf) -> Self {
        Self {
            config,
            project_dir,
            config_path: None,
        }
    }

    pub fn config(&self) -> &LecternConfig {
        &self.config
    }

    /// Execute a command and return its stdout text.
    pub fn execute(&self, command: &Commands) -> Result<String, GenerationError> {
        let started = Instant::now();
        let name = command_name(command);
        debug!(command = %name, network = uses_network(command), "Executing command");

        let result = match command {
            Commands::Generate {
                lesson,
                format,
                max_attempts,
                initial_delay_ms,
                answers,
            } => self.handle_generate(lesson, *format, *max_attempts, *initial_delay_ms, *answers),
            Commands::Prompt { lesson } => self.handle_prompt(lesson),
            Commands::Schema => format_schema_json(lesson_plan_schema()),
            Commands::Config { command } => match command {
                ConfigCommands::Show => self.handle_config_show(),
                ConfigCommands::Init { force } => self.handle_config_init(*force),
            },
        };

        info!(
            command = %name,
            ok = result.is_ok(),
            duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Command finished"
        );
        result
    }

    fn handle_generate(
        &self,
        lesson: &LessonArgs,
        format: OutputFormat,
        max_attempts: Option<u32>,
        initial_delay_ms: Option<u64>,
        answers: bool,
    ) -> Result<String, GenerationError> {
        let params = resolve_lesson_params(lesson)?;
        params.validate()?;

        let planner = LessonPlanner::from_config(&self.config)?;
        let mut policy = planner.policy();
        if let Some(attempts) = max_attempts {
            policy.max_attempts = attempts;
        }
        if let Some(delay) = initial_delay_ms {
            policy.initial_delay_ms = delay;
        }

        let rt = tokio::runtime::Runtime::new()
            .map_err(|e| GenerationError::Config(format!("Failed to create runtime: {}", e)))?;

        let plan = rt.block_on(async {
            tokio::select! {
                result = planner.generate_with(&params, policy) => result,
                _ = tokio::signal::ctrl_c() => Err(GenerationError::Cancelled),
            }
        })?;

        let options = RenderOptions {
            color: stdout_supports_color(self.config.logging.color),
            show_answers: answers,
        };
        match format {
            OutputFormat::Text => Ok(format_lesson_text(&plan, options)),
            OutputFormat::Markdown => Ok(format_lesson_markdown(&plan, options)),
            OutputFormat::Json => format_lesson_json(&plan),
        }
    }

    fn handle_prompt(&self, lesson: &LessonArgs) -> Result<String, GenerationError> {
        let params = resolve_lesson_params(lesson)?;
        params.validate()?;
        format_request_body_json(&build_request(&params))
    }

    fn handle_config_show(&self) -> Result<String, GenerationError> {
        let rendered = self.config.to_redacted_toml()?;
        Ok(format_config_show_result(
            &rendered,
            self.config_path.as_deref(),
            self.config.provider.resolve_api_key().is_ok(),
        ))
    }

    fn handle_config_init(&self, force: bool) -> Result<String, GenerationError> {
        let path = project_config_path(&self.project_dir);
        let exists = path.exists();
        if exists && !force {
            return Err(GenerationError::Config(format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            )));
        }
        std::fs::create_dir_all(&self.project_dir).map_err(|e| {
            GenerationError::Config(format!("Failed to create {}: {}", self.project_dir.display(), e))
        })?;
        std::fs::write(&path, starter_config_toml()).map_err(|e| {
            GenerationError::Config(format!("Failed to write {}: {}", path.display(), e))
        })?;
        Ok(format_config_init_result(&path, exists))
    }
}

/// Fill missing topic or subject interactively when stdin is a terminal.
fn resolve_lesson_params(args: &LessonArgs) -> Result<LessonParams, GenerationError> {
    let topic = match &args.topic {
        Some(topic) => topic.clone(),
        None => prompt_for("Lesson topic", "--topic")?,
    };
    let subject = match &args.subject {
        Some(subject) => subject.clone(),
        None => prompt_for("Subject", "--subject")?,
    };
    Ok(LessonParams::new(topic, args.grade.clone(), subject))
}

fn prompt_for(label: &str, flag: &str) -> Result<String, GenerationError> {
    if !std::io::stdin().is_terminal() {
        return Err(GenerationError::InvalidInput(format!("{} is required", flag)));
    }
    dialoguer::Input::<String>::new()
        .with_prompt(label)
        .interact_text()
        .map_err(|e| GenerationError::Config(format!("Failed to get user input: {}", e)))
}

fn stdout_supports_color(configured: bool) -> bool {
    configured && std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

//! Lesson plan presentation: terminal text, markdown, and json.

use crate::error::GenerationError;
use crate::lesson::{option_label, LessonPlan, QuizItem};
use crate::request::GenerationRequest;
use crate::schema::SchemaNode;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use owo_colors::OwoColorize;

/// Rendering switches for lesson output.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// ANSI colors (text format only)
    pub color: bool,
    /// Include the quiz answer key
    pub show_answers: bool,
}

fn heading(text: &str, options: RenderOptions) -> String {
    if options.color {
        text.bold().cyan().to_string()
    } else {
        text.to_string()
    }
}

fn answer_text(item: &QuizItem) -> String {
    match item.answer_index() {
        Some(idx) => format!("{}. {}", option_label(idx), item.options[idx]),
        None => item.answer.clone(),
    }
}

pub fn format_lesson_text(plan: &LessonPlan, options: RenderOptions) -> String {
    let mut output = String::new();

    let title = if options.color {
        plan.title.bold().to_string()
    } else {
        plan.title.clone()
    };
    output.push_str(&format!("{}\n\n", title));

    output.push_str(&format!("{}\n", heading("Learning Objectives", options)));
    if plan.learning_objectives.is_empty() {
        output.push_str("  (none)\n");
    }
    for (i, objective) in plan.learning_objectives.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, objective));
    }

    output.push_str(&format!("\n{}\n", heading("Slides", options)));
    if plan.slides.is_empty() {
        output.push_str("  (none)\n");
    }
    let total = plan.slides.len();
    for (i, slide) in plan.slides.iter().enumerate() {
        let label = format!("[{}/{}] {}", i + 1, total, slide.title);
        if options.color {
            output.push_str(&format!("  {}\n", label.bold()));
        } else {
            output.push_str(&format!("  {}\n", label));
        }
        for bullet in slide.bullets() {
            output.push_str(&format!("    • {}\n", bullet));
        }
    }

    output.push_str(&format!("\n{}\n", heading("Quiz", options)));
    if plan.quiz.is_empty() {
        output.push_str("  (none)\n");
    } else {
        output.push_str(&quiz_table(&plan.quiz, options.show_answers));
        output.push('\n');
        if !options.show_answers {
            output.push_str("  (run with --answers to show the answer key)\n");
        }
    }

    output.push_str(&format!("\n{}\n", heading("Homework", options)));
    output.push_str(&format!("  {}\n", plan.homework.title));
    for line in plan.homework.description.lines() {
        output.push_str(&format!("  {}\n", line));
    }

    output
}

fn quiz_table(quiz: &[QuizItem], show_answers: bool) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec!["#", "Question", "Options"];
    if show_answers {
        header.push("Answer");
    }
    table.set_header(header);

    for (i, item) in quiz.iter().enumerate() {
        let options = item
            .options
            .iter()
            .enumerate()
            .map(|(idx, option)| format!("{}. {}", option_label(idx), option))
            .collect::<Vec<_>>()
            .join("\n");
        let mut row = vec![(i + 1).to_string(), item.question.clone(), options];
        if show_answers {
            row.push(answer_text(item));
        }
        table.add_row(row);
    }
    table.to_string()
}

pub fn format_lesson_markdown(plan: &LessonPlan, options: RenderOptions) -> String {
    let mut output = format!("# {}\n\n## Learning Objectives\n\n", plan.title);
    for objective in &plan.learning_objectives {
        output.push_str(&format!("- {}\n", objective));
    }

    output.push_str("\n## Slides\n");
    for (i, slide) in plan.slides.iter().enumerate() {
        output.push_str(&format!("\n### Slide {}: {}\n\n", i + 1, slide.title));
        for bullet in slide.bullets() {
            output.push_str(&format!("- {}\n", bullet));
        }
    }

    output.push_str("\n## Quiz\n");
    for (i, item) in plan.quiz.iter().enumerate() {
        output.push_str(&format!("\n{}. {}\n", i + 1, item.question));
        for (idx, option) in item.options.iter().enumerate() {
            output.push_str(&format!("   - {}. {}\n", option_label(idx), option));
        }
    }

    if options.show_answers && !plan.quiz.is_empty() {
        output.push_str("\n### Answer Key\n\n");
        for (i, item) in plan.quiz.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, answer_text(item)));
        }
    }

    output.push_str(&format!(
        "\n## Homework: {}\n\n{}\n",
        plan.homework.title, plan.homework.description
    ));
    output
}

pub fn format_lesson_json(plan: &LessonPlan) -> Result<String, GenerationError> {
    serde_json::to_string_pretty(plan)
        .map_err(|e| GenerationError::Config(format!("Failed to render lesson plan: {}", e)))
}

pub fn format_request_body_json(request: &GenerationRequest) -> Result<String, GenerationError> {
    serde_json::to_string_pretty(&request.to_body())
        .map_err(|e| GenerationError::Config(format!("Failed to render request: {}", e)))
}

pub fn format_schema_json(schema: &SchemaNode) -> Result<String, GenerationError> {
    serde_json::to_string_pretty(schema)
        .map_err(|e| GenerationError::Config(format!("Failed to render schema: {}", e)))
}

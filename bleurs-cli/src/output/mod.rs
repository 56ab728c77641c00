//! Output formatting module

use crate::config::OutputConfig;
use anyhow::Result;
use bleurs_core::BleuScore;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format the score of a single corpus line (1-based)
    fn format_sentence(&mut self, line: usize, score: &BleuScore) -> Result<()>;

    /// Format the overall score
    fn format_summary(&mut self, header: &ReportHeader, score: &BleuScore) -> Result<()>;

    /// Finalize output (e.g., write the collected JSON document)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable summary
    #[default]
    Text,
    /// JSON document with every intermediate value
    Json,
    /// Markdown tables
    Markdown,
}

impl OutputFormat {
    /// Every format, in listing order
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Text, OutputFormat::Json, OutputFormat::Markdown];

    /// Name as accepted by `--format`
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "markdown",
        }
    }

    /// One-line description for listings
    pub fn description(self) -> &'static str {
        match self {
            OutputFormat::Text => "Human-readable summary",
            OutputFormat::Json => "JSON with precisions, weights and lengths",
            OutputFormat::Markdown => "Markdown tables",
        }
    }
}

/// What was scored and how
#[derive(Debug, Clone, Serialize)]
pub struct ReportHeader {
    /// `sentence` or `corpus`
    pub level: &'static str,
    /// Number of scored sentence pairs
    pub sentences: usize,
    /// Smoothing strategy name
    pub smoothing: String,
    /// Tokenizer name
    pub tokenizer: String,
}

/// Build the formatter for `format` writing to `writer`
pub fn create_formatter(
    format: OutputFormat,
    writer: Box<dyn Write + Send + Sync>,
    options: &OutputConfig,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer, options.precision)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer, options.pretty_json)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer, options.precision)),
    }
}

/// Precisions as `n/d` strings separated by spaces
pub(crate) fn precision_list(score: &BleuScore) -> String {
    score
        .precisions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

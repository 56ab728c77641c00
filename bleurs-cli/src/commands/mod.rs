//! CLI command implementations

use crate::config::CliConfig;
use crate::output::{create_formatter, OutputFormat, OutputFormatter, ReportHeader};
use anyhow::{Context, Result};
use bleurs_core::{BleuScorer, Smoothing, TokenizerKind, Weights};
use clap::{Args, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

pub mod corpus;
pub mod generate_config;
pub mod list;
pub mod score;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Score one hypothesis sentence against its references
    Score(score::ScoreArgs),

    /// Score line-aligned hypothesis and reference files
    Corpus(corpus::CorpusArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },

    /// Write a commented configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// Check a configuration file
    Validate(validate::ValidateArgs),
}

/// List subcommands
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ListCommands {
    /// List smoothing methods
    Smoothing,

    /// List tokenizers
    Tokenizers,

    /// List output formats
    Formats,
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Score(args) => args.execute(),
            Commands::Corpus(args) => args.execute(),
            Commands::List { subcommand } => list::execute(*subcommand, &mut io::stdout()),
            Commands::GenerateConfig(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
        }
    }
}

/// Options shared by the scoring commands
#[derive(Debug, Clone, Default, Args)]
pub struct ScoringArgs {
    /// Configuration file
    #[arg(short, long, value_name = "FILE", env = "BLEURS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Smoothing method (name or method0-method4)
    #[arg(short, long, value_name = "METHOD")]
    pub smoothing: Option<Smoothing>,

    /// Comma-separated n-gram weights, e.g. 0.25,0.25,0.25,0.25
    #[arg(short, long, value_name = "W1,W2,...")]
    pub weights: Option<Weights>,

    /// Highest n-gram order scored with uniform weights
    #[arg(short = 'n', long, value_name = "N")]
    pub max_order: Option<usize>,

    /// Tokenizer applied to every sentence
    #[arg(short, long, value_name = "NAME")]
    pub tokenizer: Option<TokenizerKind>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl ScoringArgs {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) -> Result<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            let installed = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
            if let Err(e) = installed {
                // Commands run in-process (tests, embedding) may find a logger in place
                log::debug!("keeping existing logger: {e}");
            }
        }

        Ok(())
    }

    /// Configuration file values with command-line overrides applied
    pub fn load_config(&self) -> Result<CliConfig> {
        let mut config = match &self.config {
            Some(path) => CliConfig::from_file(path)?,
            None => CliConfig::default(),
        };

        let scoring = &mut config.scoring;
        if let Some(weights) = &self.weights {
            scoring.max_order = weights.max_order();
            scoring.weights = Some(weights.clone());
        } else if let Some(max_order) = self.max_order {
            scoring.max_order = max_order;
            scoring.weights = None;
        }
        if let Some(smoothing) = self.smoothing {
            scoring.smoothing = smoothing;
        }
        if let Some(tokenizer) = self.tokenizer {
            scoring.tokenizer = tokenizer;
        }
        if let Some(format) = self.format {
            config.output.default_format = format;
        }

        config.validate()?;
        log::debug!("effective configuration: {:?}", config);
        Ok(config)
    }

    /// Scorer for the effective configuration
    pub fn build_scorer(&self, config: &CliConfig) -> Result<BleuScorer> {
        BleuScorer::with_config(config.scoring.clone()).context("Invalid scoring configuration")
    }

    /// Formatter writing to `--output` or stdout
    pub fn formatter(&self, config: &CliConfig) -> Result<Box<dyn OutputFormatter>> {
        let writer: Box<dyn Write + Send + Sync> = match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                Box::new(BufWriter::new(file))
            }
            None => Box::new(io::stdout()),
        };

        Ok(create_formatter(
            config.output.default_format,
            writer,
            &config.output,
        ))
    }

    /// Report header for `sentences` scored pairs
    pub fn header(&self, level: &'static str, sentences: usize, config: &CliConfig) -> ReportHeader {
        ReportHeader {
            level,
            sentences,
            smoothing: config.scoring.smoothing.to_string(),
            tokenizer: config.scoring.tokenizer.to_string(),
        }
    }
}

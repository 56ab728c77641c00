//! Score command implementation

use super::ScoringArgs;
use crate::error::CliError;
use crate::input::FileReader;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the score command
#[derive(Debug, Args)]
pub struct ScoreArgs {
    /// Hypothesis sentence
    #[arg(short = 'H', long, value_name = "TEXT")]
    pub hypothesis: String,

    /// Reference sentence (repeatable)
    #[arg(short, long = "reference", value_name = "TEXT")]
    pub references: Vec<String>,

    /// File with one reference sentence per line (repeatable)
    #[arg(long, value_name = "FILE")]
    pub references_file: Vec<PathBuf>,

    #[command(flatten)]
    pub scoring: ScoringArgs,
}

impl ScoreArgs {
    /// Execute the score command
    pub fn execute(&self) -> Result<()> {
        self.scoring.init_logging()?;

        log::info!("Scoring sentence");
        log::debug!("Arguments: {:?}", self);

        let config = self.scoring.load_config()?;
        let scorer = self.scoring.build_scorer(&config)?;
        let references = self.collect_references()?;

        let score = scorer
            .score_text(&references, &self.hypothesis)
            .context("Failed to score sentence")?;
        log::info!("BLEU {:.6}", score.score);

        let mut formatter = self.scoring.formatter(&config)?;
        formatter.format_summary(&self.scoring.header("sentence", 1, &config), &score)?;
        formatter.finish()?;

        Ok(())
    }

    /// References from `--reference` followed by those from `--references-file`
    fn collect_references(&self) -> Result<Vec<String>> {
        let mut references = self.references.clone();
        for path in &self.references_file {
            references.extend(
                FileReader::read_lines(path)?
                    .into_iter()
                    .filter(|line| !line.trim().is_empty()),
            );
        }

        if references.is_empty() {
            return Err(CliError::NoReferences.into());
        }

        Ok(references)
    }
}

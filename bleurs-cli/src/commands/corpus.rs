//! Corpus command implementation

use super::ScoringArgs;
use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{resolve_patterns, FileReader};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use bleurs_core::{BleuScorer, CorpusStats};
use clap::Args;
use rayon::prelude::*;
use std::path::PathBuf;

/// Arguments for the corpus command
#[derive(Debug, Args)]
pub struct CorpusArgs {
    /// Hypothesis file, one sentence per line
    #[arg(short = 'H', long, value_name = "FILE")]
    pub hypotheses: PathBuf,

    /// Reference files or patterns (supports glob), line-aligned with the hypotheses
    #[arg(short, long = "references", value_name = "FILE/PATTERN", required = true)]
    pub references: Vec<String>,

    /// Also report the score of every line
    #[arg(long)]
    pub sentences: bool,

    /// Number of worker threads (default: config or number of CPUs)
    #[arg(short = 'j', long, value_name = "N")]
    pub threads: Option<usize>,

    #[command(flatten)]
    pub scoring: ScoringArgs,
}

/// Hypotheses with the references of each line
#[derive(Debug)]
struct AlignedCorpus {
    hypotheses: Vec<String>,
    reference_sets: Vec<Vec<String>>,
}

impl CorpusArgs {
    /// Execute the corpus command
    pub fn execute(&self) -> Result<()> {
        self.scoring.init_logging()?;

        log::info!("Starting corpus scoring");
        log::debug!("Arguments: {:?}", self);

        let config = self.scoring.load_config()?;
        let scorer = self.scoring.build_scorer(&config)?;
        let corpus = self.load_corpus()?;
        let line_count = corpus.hypotheses.len();

        let mut progress = ProgressReporter::new(self.scoring.quiet);
        progress.init_sentences(line_count as u64);
        let stats = self.pair_stats(&scorer, &corpus, &config, &progress)?;
        progress.finish();

        let total = stats
            .iter()
            .fold(CorpusStats::identity(), |acc, pair| acc.combine(pair));
        let score = scorer
            .score_stats(&total)
            .context("Failed to score corpus")?;
        log::info!("Corpus BLEU {:.6} over {} lines", score.score, line_count);

        let mut formatter = self.scoring.formatter(&config)?;
        if self.sentences {
            for (index, pair) in stats.iter().enumerate() {
                let sentence = scorer
                    .score_stats(pair)
                    .with_context(|| format!("Failed to score line {}", index + 1))?;
                formatter.format_sentence(index + 1, &sentence)?;
            }
        }
        formatter.format_summary(
            &self.scoring.header("corpus", line_count, &config),
            &score,
        )?;
        formatter.finish()?;

        Ok(())
    }

    /// Read the hypothesis file and every reference file, checking alignment
    fn load_corpus(&self) -> Result<AlignedCorpus> {
        let hypotheses = FileReader::read_lines(&self.hypotheses)?;
        let reference_files = resolve_patterns(&self.references)?;
        log::info!(
            "{} hypotheses, {} reference file(s)",
            hypotheses.len(),
            reference_files.len()
        );

        let mut reference_sets: Vec<Vec<String>> = vec![Vec::new(); hypotheses.len()];
        for path in reference_files {
            let lines = FileReader::read_lines(&path)?;
            if lines.len() != hypotheses.len() {
                return Err(CliError::LineCountMismatch {
                    path,
                    expected: hypotheses.len(),
                    found: lines.len(),
                }
                .into());
            }

            for (set, line) in reference_sets.iter_mut().zip(lines) {
                set.push(line);
            }
        }

        Ok(AlignedCorpus {
            hypotheses,
            reference_sets,
        })
    }

    /// Sufficient statistics of every line, in line order
    fn pair_stats(
        &self,
        scorer: &BleuScorer,
        corpus: &AlignedCorpus,
        config: &CliConfig,
        progress: &ProgressReporter,
    ) -> Result<Vec<CorpusStats>> {
        let score_line = |index: usize| -> Result<CorpusStats> {
            let stats = scorer
                .pair_stats(&corpus.reference_sets[index], &corpus.hypotheses[index])
                .with_context(|| format!("Failed to score line {}", index + 1))?;
            progress.sentence_completed();
            Ok(stats)
        };

        let threads = self
            .threads
            .unwrap_or_else(|| config.performance.effective_threads());
        let line_count = corpus.hypotheses.len();

        if threads <= 1 || line_count < config.performance.parallel_threshold {
            log::debug!("scoring {line_count} lines sequentially");
            return (0..line_count).map(score_line).collect();
        }

        log::debug!("scoring {line_count} lines on {threads} threads");
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .context("Failed to build thread pool")?;
        pool.install(|| (0..line_count).into_par_iter().map(score_line).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_corpus(dir: &TempDir) -> (PathBuf, String) {
        fs::write(
            dir.path().join("hyp.txt"),
            "he read the book because he was interested in world history\nJohn loves Mary\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("ref.1"),
            "he was interested in world history because he read the book\nJohn loves Mary\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("ref.2"),
            "he read a book about world history\nMary is loved by John\n",
        )
        .unwrap();

        (
            dir.path().join("hyp.txt"),
            dir.path().join("ref.*").to_string_lossy().into_owned(),
        )
    }

    fn args(hypotheses: PathBuf, references: Vec<String>) -> CorpusArgs {
        CorpusArgs {
            hypotheses,
            references,
            sentences: false,
            threads: None,
            scoring: ScoringArgs {
                quiet: true,
                ..ScoringArgs::default()
            },
        }
    }

    #[test]
    fn test_load_corpus_aligns_lines() {
        let dir = TempDir::new().unwrap();
        let (hypotheses, pattern) = write_corpus(&dir);

        let corpus = args(hypotheses, vec![pattern]).load_corpus().unwrap();
        assert_eq!(corpus.hypotheses.len(), 2);
        assert_eq!(
            corpus.reference_sets[1],
            vec!["John loves Mary", "Mary is loved by John"]
        );
    }

    #[test]
    fn test_line_count_mismatch() {
        let dir = TempDir::new().unwrap();
        let (hypotheses, _) = write_corpus(&dir);
        fs::write(dir.path().join("short.ref"), "only one line\n").unwrap();

        let short = dir.path().join("short.ref").to_string_lossy().into_owned();
        let err = args(hypotheses, vec![short]).load_corpus().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::LineCountMismatch {
                expected: 2,
                found: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_thread_counts_agree() {
        let dir = TempDir::new().unwrap();
        let (hypotheses, pattern) = write_corpus(&dir);
        let args = args(hypotheses, vec![pattern]);

        let mut config = CliConfig::default();
        config.performance.parallel_threshold = 0;
        let scorer = args.scoring.build_scorer(&config).unwrap();
        let corpus = args.load_corpus().unwrap();
        let progress = ProgressReporter::new(true);

        let sequential = CorpusArgs {
            threads: Some(1),
            ..args
        };
        let one = sequential
            .pair_stats(&scorer, &corpus, &config, &progress)
            .unwrap();
        let parallel = CorpusArgs {
            threads: Some(4),
            ..sequential
        };
        let four = parallel
            .pair_stats(&scorer, &corpus, &config, &progress)
            .unwrap();

        assert_eq!(one, four);
        assert_eq!(one[1].hypothesis_length(), 3);
    }

    #[test]
    fn test_execute_with_sentences() {
        let dir = TempDir::new().unwrap();
        let (hypotheses, pattern) = write_corpus(&dir);
        let output = dir.path().join("report.txt");

        let mut args = args(hypotheses, vec![pattern]);
        args.sentences = true;
        args.scoring.output = Some(output.clone());
        args.execute().unwrap();

        let content = fs::read_to_string(output).unwrap();
        assert!(content.starts_with("1\t"));
        assert!(content.contains("\n2\t1.0000\t3/3 2/2 1/1\n"));
        assert!(content.contains("corpus level, 2 sentence(s)"));
    }
}

//! Markdown output formatter

use super::{precision_list, OutputFormatter, ReportHeader};
use anyhow::Result;
use bleurs_core::BleuScore;
use std::io::Write;

/// Markdown formatter - per-line table followed by a summary table
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    digits: usize,
    sentence_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W, digits: usize) -> Self {
        Self {
            writer,
            digits,
            sentence_count: 0,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_sentence(&mut self, line: usize, score: &BleuScore) -> Result<()> {
        if self.sentence_count == 0 {
            writeln!(self.writer, "| Line | BLEU | Precisions |")?;
            writeln!(self.writer, "|-----:|-----:|------------|")?;
        }
        self.sentence_count += 1;
        writeln!(
            self.writer,
            "| {line} | {:.*} | {} |",
            self.digits,
            score.score,
            precision_list(score)
        )?;
        Ok(())
    }

    fn format_summary(&mut self, header: &ReportHeader, score: &BleuScore) -> Result<()> {
        let digits = self.digits;
        if self.sentence_count > 0 {
            writeln!(self.writer)?;
        }
        writeln!(self.writer, "## BLEU ({} level)", header.level)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| BLEU | {:.*} |", digits, score.score)?;
        for (order, precision) in score.precisions.iter().enumerate() {
            writeln!(self.writer, "| Precision {} | {precision} |", order + 1)?;
        }
        writeln!(
            self.writer,
            "| Brevity penalty | {:.*} |",
            digits, score.brevity_penalty
        )?;
        writeln!(self.writer, "| Hypothesis length | {} |", score.hypothesis_length)?;
        writeln!(self.writer, "| Reference length | {} |", score.reference_length)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "---")?;
        writeln!(
            self.writer,
            "*Sentences: {}, smoothing: {}, tokenizer: {}*",
            header.sentences, header.smoothing, header.tokenizer
        )?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

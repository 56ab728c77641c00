//! Plain text output formatter

use super::{precision_list, OutputFormatter, ReportHeader};
use anyhow::Result;
use bleurs_core::BleuScore;
use std::io::Write;

/// Plain text formatter - one line per corpus sentence, then a summary block
pub struct TextFormatter<W: Write> {
    writer: W,
    digits: usize,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter printing scores with `digits` decimals
    pub fn new(writer: W, digits: usize) -> Self {
        Self { writer, digits }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_sentence(&mut self, line: usize, score: &BleuScore) -> Result<()> {
        writeln!(
            self.writer,
            "{line}\t{:.*}\t{}",
            self.digits,
            score.score,
            precision_list(score)
        )?;
        Ok(())
    }

    fn format_summary(&mut self, header: &ReportHeader, score: &BleuScore) -> Result<()> {
        let digits = self.digits;
        writeln!(self.writer, "BLEU = {:.*}", digits, score.score)?;
        writeln!(self.writer, "  precisions:      {}", precision_list(score))?;
        writeln!(
            self.writer,
            "  brevity penalty: {:.*} (hypothesis {}, reference {})",
            digits, score.brevity_penalty, score.hypothesis_length, score.reference_length
        )?;
        writeln!(
            self.writer,
            "  {} level, {} sentence(s), smoothing {}, tokenizer {}",
            header.level, header.sentences, header.smoothing, header.tokenizer
        )?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::{sample_header, sample_score, SharedBuffer};

    #[test]
    fn test_summary() {
        let buffer = SharedBuffer::default();
        let mut formatter = TextFormatter::new(buffer.clone(), 4);
        formatter
            .format_summary(&sample_header(), &sample_score())
            .unwrap();
        formatter.finish().unwrap();

        let output = buffer.contents();
        assert!(output.starts_with("BLEU = 0.7401\n"));
        assert!(output.contains("precisions:      11/11 9/10 6/9 4/8"));
        assert!(output.contains("brevity penalty: 1.0000 (hypothesis 11, reference 11)"));
        assert!(output.contains("smoothing none"));
    }

    #[test]
    fn test_sentence_line() {
        let buffer = SharedBuffer::default();
        let mut formatter = TextFormatter::new(buffer.clone(), 2);
        formatter.format_sentence(3, &sample_score()).unwrap();
        assert_eq!(buffer.contents(), "3\t0.74\t11/11 9/10 6/9 4/8\n");
    }
}

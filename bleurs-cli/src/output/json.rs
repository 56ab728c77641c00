//! JSON output formatter

use super::{OutputFormatter, ReportHeader};
use anyhow::Result;
use bleurs_core::BleuScore;
use serde::Serialize;
use std::io::Write;

/// JSON formatter - collects everything and writes one document on finish
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    summary: Option<Summary>,
    sentences: Vec<SentenceData>,
}

/// Per-line entry of a corpus report
#[derive(Debug, Serialize)]
pub struct SentenceData {
    /// 1-based line number
    pub line: usize,
    /// Score of that line alone
    #[serde(flatten)]
    pub score: BleuScore,
}

#[derive(Debug, Serialize)]
struct Summary {
    #[serde(flatten)]
    header: ReportHeader,
    #[serde(flatten)]
    score: BleuScore,
}

#[derive(Serialize)]
struct Document<'a> {
    #[serde(flatten)]
    summary: &'a Option<Summary>,
    #[serde(skip_serializing_if = "no_lines")]
    lines: &'a [SentenceData],
}

fn no_lines(lines: &&[SentenceData]) -> bool {
    lines.is_empty()
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
            summary: None,
            sentences: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_sentence(&mut self, line: usize, score: &BleuScore) -> Result<()> {
        self.sentences.push(SentenceData {
            line,
            score: score.clone(),
        });
        Ok(())
    }

    fn format_summary(&mut self, header: &ReportHeader, score: &BleuScore) -> Result<()> {
        self.summary = Some(Summary {
            header: header.clone(),
            score: score.clone(),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let document = Document {
            summary: &self.summary,
            lines: &self.sentences,
        };
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &document)?;
        } else {
            serde_json::to_writer(&mut self.writer, &document)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

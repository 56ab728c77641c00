//! List command implementation

use super::ListCommands;
use crate::output::OutputFormat;
use anyhow::Result;
use bleurs_core::{Smoothing, TokenizerKind};
use std::io::Write;

/// Print the components selected by `subcommand`
pub fn execute<W: Write>(subcommand: ListCommands, writer: &mut W) -> Result<()> {
    match subcommand {
        ListCommands::Smoothing => {
            writeln!(writer, "Available smoothing methods:")?;
            for method in Smoothing::ALL {
                writeln!(
                    writer,
                    "  {:<14} {:<8} {}",
                    method.as_str(),
                    method.alias(),
                    method.description()
                )?;
            }
        }
        ListCommands::Tokenizers => {
            writeln!(writer, "Available tokenizers:")?;
            for tokenizer in TokenizerKind::ALL {
                writeln!(
                    writer,
                    "  {:<14} {}",
                    tokenizer.as_str(),
                    tokenizer.description()
                )?;
            }
        }
        ListCommands::Formats => {
            writeln!(writer, "Available output formats:")?;
            for format in OutputFormat::ALL {
                writeln!(writer, "  {:<14} {}", format.as_str(), format.description())?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}

//! Bleurs CLI library
//!
//! This library provides the command-line interface for the Bleurs
//! BLEU scoring toolkit.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use commands::Commands;
pub use config::CliConfig;
pub use error::{CliError, CliResult};

//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

/// Commented configuration with every default spelled out
pub const TEMPLATE: &str = r#"# bleurs configuration
#
# Every key is optional; omitted keys keep the value shown here.
# Command-line options override values from this file.

[output]
# Report format: "text", "json" or "markdown"
default_format = "text"
# Indent JSON output
pretty_json = true
# Decimals printed for scores in text and markdown reports
precision = 4

[performance]
# Corpora with fewer sentence pairs are scored on one thread
parallel_threshold = 1000
# Number of worker threads (0 = one per CPU)
worker_threads = 0

[scoring]
# Highest n-gram order, scored with uniform weights
max_order = 4
# Tokenizer: "simple" (splits punctuation) or "whitespace"
tokenizer = "simple"
# Explicit per-order weights; overrides max_order when set
# weights = [0.25, 0.25, 0.25, 0.25]

[scoring.smoothing]
# One of: none, epsilon, add-one, exponential, length-scaled
# (aliases method0 to method4)
method = "none"
# epsilon = 0.1   # used by "epsilon"
# k = 5.0         # used by "length-scaled"
"#;

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        println!("Generating configuration template...");
        println!("  Output file: {}", self.output.display());

        fs::write(&self.output, TEMPLATE)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the configuration file");
        println!("2. Validate your configuration:");
        println!("   bleurs validate -c {}", self.output.display());
        println!("3. Use it for scoring:");
        println!(
            "   bleurs corpus -H hyp.txt -r ref.txt -c {}",
            self.output.display()
        );

        Ok(())
    }
}

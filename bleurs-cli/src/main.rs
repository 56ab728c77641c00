//! Command-line entry point for bleurs

use bleurs_cli::Commands;
use clap::Parser;

/// BLEU scores for machine translation output
#[derive(Debug, Parser)]
#[command(name = "bleurs", version, about = "BLEU scores for machine translation output")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    Cli::parse().command.execute()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_corpus_arguments() {
        let cli = Cli::try_parse_from([
            "bleurs", "corpus", "-H", "hyp.txt", "-r", "ref.*", "-s", "method3", "-j", "2",
        ])
        .unwrap();
        match cli.command {
            Commands::Corpus(args) => {
                assert_eq!(args.references, vec!["ref.*"]);
                assert_eq!(args.threads, Some(2));
                assert_eq!(args.scoring.smoothing, Some(bleurs_core::Smoothing::Exponential));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}

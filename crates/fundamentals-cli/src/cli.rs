use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "fundamentals-summary", version, about = "Summarize company fundamentals records")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the categorized summary as JSON
    Summarize(InputArgs),
    /// Print one compression view
    Compress {
        #[command(flatten)]
        input: InputArgs,
        /// brief, standard, detailed or structured (defaults to SUMMARY_DETAIL_LEVEL)
        #[arg(long, short)]
        level: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct InputArgs {
    /// JSON record file, a directory of <SYMBOL>.json files, or `-` for stdin
    pub input: PathBuf,
    /// Symbol to load from a directory, or to use when the record has none
    #[arg(long, short, default_value = "")]
    pub symbol: String,
    /// Single-line JSON output
    #[arg(long)]
    pub compact: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compress_with_level() {
        let cli = Cli::try_parse_from(["fundamentals-summary", "compress", "aapl.json", "--level", "brief"]).unwrap();
        match cli.command {
            Command::Compress { input, level } => {
                assert_eq!(input.input, PathBuf::from("aapl.json"));
                assert_eq!(level.as_deref(), Some("brief"));
                assert!(!input.compact);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_summarize_from_stdin() {
        let cli = Cli::try_parse_from(["fundamentals-summary", "summarize", "-", "--compact", "-s", "MSFT"]).unwrap();
        match cli.command {
            Command::Summarize(input) => {
                assert_eq!(input.input, PathBuf::from("-"));
                assert_eq!(input.symbol, "MSFT");
                assert!(input.compact);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_missing_input_is_rejected() {
        assert!(Cli::try_parse_from(["fundamentals-summary", "summarize"]).is_err());
    }
}

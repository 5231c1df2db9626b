use analysis_core::{RawRecord, RecordSource};
use anyhow::{Context, Result};
use clap::Parser;
use fundamental_analysis::FundamentalSummarizer;

mod cli;
mod config;
mod source;

use cli::{Cli, Command, InputArgs};
use config::CliConfig;
use source::JsonFileSource;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = CliConfig::from_env()?;
    let summarizer = FundamentalSummarizer::new();

    let output = match cli.command {
        Command::Summarize(input) => {
            let record = load(&input)?;
            let summary = summarizer.summarize(&record);
            let value = summary.to_value()?;
            render_json(&value, pretty(&config, &input))?
        }
        Command::Compress { input, level } => {
            let level = match level {
                Some(level) => level.parse()?,
                None => config.default_level,
            };
            let record = load(&input)?;
            let view = summarizer.compress(&record, level);
            tracing::info!(level = %level, symbol = ?record.symbol, "compressed record");
            view.render(pretty(&config, &input))?
        }
    };

    println!("{output}");
    Ok(())
}

// Logs go to stderr so stdout carries only the summary.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn load(input: &InputArgs) -> Result<RawRecord> {
    JsonFileSource::new(&input.input)
        .load(&input.symbol)
        .with_context(|| format!("Failed to load record from {}", input.input.display()))
}

fn pretty(config: &CliConfig, input: &InputArgs) -> bool {
    config.pretty_json && !input.compact
}

fn render_json(value: &serde_json::Value, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(text)
}

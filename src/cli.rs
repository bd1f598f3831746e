use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "narrative-hype",
    version,
    about = "Narrative hype index for crypto projects from developer activity and news mentions"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Config file to use instead of ./narrative.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Answer a single chat command, e.g. "/narrative SOL"
    Ask(AskCommand),
    /// Score one ticker and print the report
    Score(ScoreCommand),
    /// Answer chat commands read line by line from stdin
    Repl,
    /// List supported tickers
    Tickers,
}

#[derive(Args)]
pub struct AskCommand {
    /// Command text; words are joined with single spaces
    #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct ScoreCommand {
    pub ticker: String,
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ReportFormat,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

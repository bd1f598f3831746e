mod cli;
mod command;
mod config;
mod error;
mod http;
mod pipeline;
mod probe;
mod report;
mod score;
mod types;

use crate::command::{Dispatcher, ReplyKind};
use crate::config::Credentials;
use crate::error::HypeError;
use crate::http::ReqwestTransport;
use crate::pipeline::Pipeline;
use clap::Parser;
use std::io::{BufRead, Write};
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const DEGRADED: i32 = 1;
    pub const REJECTED: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn reply_exit_code(kind: ReplyKind) -> i32 {
    match kind {
        ReplyKind::Report { degraded: false } | ReplyKind::Usage => exit_code::SUCCESS,
        ReplyKind::Report { degraded: true } => exit_code::DEGRADED,
        ReplyKind::Rejected => exit_code::REJECTED,
        ReplyKind::InternalError => exit_code::RUNTIME_FAILURE,
    }
}

fn run() -> Result<i32, HypeError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let root = std::env::current_dir()?;
    let settings = config::load_settings(&root, cli.config.as_deref())?;

    match cli.command {
        cli::Commands::Tickers => {
            for ticker in settings.tickers() {
                if let Some(project) = settings.project(ticker) {
                    println!(
                        "{}\t{}\t{}",
                        project.ticker, project.display_name, project.repository
                    );
                }
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Ask(cmd) => {
            let transport = ReqwestTransport::new(&settings)?;
            let credentials = Credentials::from_env();
            let dispatcher = Dispatcher::new(Pipeline::new(&settings, &transport, &credentials));

            let reply = dispatcher.respond(&cmd.text.join(" "));
            println!("{}", reply.text);
            Ok(reply_exit_code(reply.kind))
        }
        cli::Commands::Score(cmd) => {
            let transport = ReqwestTransport::new(&settings)?;
            let credentials = Credentials::from_env();
            let pipeline = Pipeline::new(&settings, &transport, &credentials);

            let report = pipeline.run_ticker(&cmd.ticker.to_ascii_uppercase())?;
            let output_format = match cmd.format {
                cli::ReportFormat::Text => report::OutputFormat::Text,
                cli::ReportFormat::Json => report::OutputFormat::Json,
            };
            println!("{}", report::render(&report, output_format)?);

            if report.is_degraded() {
                Ok(exit_code::DEGRADED)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Repl => {
            let transport = ReqwestTransport::new(&settings)?;
            let credentials = Credentials::from_env();
            let dispatcher = Dispatcher::new(Pipeline::new(&settings, &transport, &credentials));

            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            for line in stdin.lock().split(b'\n') {
                let line = String::from_utf8_lossy(&line?).into_owned();
                if line.trim().is_empty() {
                    continue;
                }
                let reply = dispatcher.respond(&line);
                writeln!(stdout, "{}\n", reply.text)?;
                stdout.flush()?;
            }
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}

//! Gamma CLI - plays one game described on standard input.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;
use std::process::ExitCode;

/// Gamma - a territory game for several players
///
/// Reads `B width height players areas` (batch) or `I width height players
/// areas` (interactive) followed, in batch mode, by one command per line.
#[derive(Parser, Debug)]
#[command(name = "gamma")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log verbosity (-v warn, -vv info, -vvv debug, -vvvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Write a JSON summary of the final board to this file
    #[arg(long)]
    summary: Option<PathBuf>,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Off,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        3 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match cli::execute(args.summary.as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

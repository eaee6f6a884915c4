//! Mirath command-line calculator.
//!
//! Reads a JSON calculation request and prints the share table as JSON.
//!
//! Usage:
//!   mirath calculate --input request.json --config mirath.toml --pretty
//!   mirath heirs
//!
//! Logs go to stderr so stdout carries only the response body.

use anyhow::Result;
use clap::{Parser, Subcommand};
use mirath_cli::{calculate_body, heirs_table, load_config, read_input};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "mirath")]
#[command(about = "Islamic inheritance (Fara'id) share calculator")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Divide an estate described by a JSON request
    Calculate {
        /// Request file; reads stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Engine config (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// List the recognised heir categories
    Heirs,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match run(args.command) {
        Ok(code) => code,
        Err(err) => {
            error!("{err:#}");
            ExitCode::from(2)
        }
    }
}

fn run(command: Command) -> Result<ExitCode> {
    match command {
        Command::Calculate {
            input,
            config,
            pretty,
        } => {
            let config = load_config(config.as_deref())?;
            let request = read_input(input.as_deref())?;
            let output = calculate_body(&request, &config, pretty)?;
            println!("{}", output.body);
            if output.is_error {
                return Ok(ExitCode::FAILURE);
            }
            info!("Calculation complete");
            Ok(ExitCode::SUCCESS)
        }
        Command::Heirs => {
            print!("{}", heirs_table());
            Ok(ExitCode::SUCCESS)
        }
    }
}

use std::io::IsTerminal;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use command::*;

mod command;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Log at debug level unless RUST_LOG says otherwise
    #[clap(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the merged example responses captured for one operation
    Examples(Examples),
    /// Attach captured example responses to every operation of an OpenAPI document
    Apply(Apply),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .compact()
        .without_time()
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    match cli.command {
        Command::Examples(e) => e.run(),
        Command::Apply(a) => a.run(),
    }
}

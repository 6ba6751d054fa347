//! # Stockroom CLI
//!
//! Terminal front-end over the inventory service.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  1. init_tracing()          RUST_LOG or the default filter, to stderr  │
//! │  2. Cli::parse()            clap; usage errors exit before any I/O     │
//! │  3. Inventory::from_env()   .env + DB_*; missing value → exit 3,       │
//! │                             then pool + load all three snapshots       │
//! │  5. commands::execute()     one command, output to stdout              │
//! │  6. Database::close()                                                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod export;
pub mod render;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use commands::Command;
use error::CliError;
use stockroom_db::Inventory;

/// Stockroom inventory: view stock, search, add stock, register, export
#[derive(Debug, Parser)]
#[command(name = "stockroom", version, about, long_about = None)]
pub struct Cli {
    /// Print results and errors as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Parses the command line, runs it and returns the process exit status.
pub async fn run() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let json = cli.json;

    match execute(cli).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            let cli_error = CliError::from(&err);
            error!(code = ?cli_error.code, "{}", cli_error.message);

            if json {
                match serde_json::to_string_pretty(&cli_error) {
                    Ok(body) => println!("{body}"),
                    Err(_) => eprintln!("{cli_error}"),
                }
            } else {
                eprintln!("{cli_error}");
            }
            ExitCode::from(cli_error.code.exit_code())
        }
    }
}

async fn execute(cli: Cli) -> anyhow::Result<String> {
    let mut inventory = Inventory::from_env()
        .await
        .context("opening the inventory database")?;
    let result = commands::execute(&mut inventory, cli.command, cli.json).await;
    inventory.store().close().await;
    result
}

/// Logs go to stderr so stdout carries only the rendered output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,stockroom=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

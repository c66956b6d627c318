//! # Cartman CLI
//!
//! Drives a persistent cart from the command line. Every command prints the
//! re-rendered views (or checkout request) as JSON on stdout; failures print
//! an `ApiError` as JSON on stderr and exit with status 1.
//!
//! Commands:
//! - `cartman show` - Print the mini-cart and checkout views
//! - `cartman add <payload> [count]` - Add a product from its JSON payload
//! - `cartman remove <id>` - Remove one line
//! - `cartman update <id=count>...` - Apply checkout form counts as one batch
//! - `cartman clear` - Remove every line
//! - `cartman checkout [--purge]` - Build a checkout request

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;

use cartman_storefront::commands::{cart, checkout};
use cartman_storefront::error::ApiError;
use cartman_storefront::{init_tracing, load_config, open_session};

/// Cartman - persistent shopping cart
#[derive(Parser)]
#[command(name = "cartman")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path (default: platform config dir / cartman.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Store file path, overrides the configured one
    #[arg(short, long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current views
    Show,

    /// Add a product to the cart
    Add {
        /// Product payload as JSON, e.g. '{"id":"mug","price":9.99,"name":"Mug"}'
        payload: String,

        /// Count as typed by the shopper
        #[arg(default_value = "1")]
        count: String,
    },

    /// Remove one line
    Remove {
        /// Item id
        id: String,
    },

    /// Set line counts (a count of 0 removes the line)
    Update {
        /// Rows as id=count
        #[arg(required = true)]
        rows: Vec<String>,
    },

    /// Remove every line
    Clear,

    /// Build a checkout request from the cart
    Checkout {
        /// Empty the cart once the request is built
        #[arg(long)]
        purge: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match serde_json::to_string(&err) {
                Ok(json) => eprintln!("{json}"),
                Err(_) => eprintln!("{err}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), ApiError> {
    let config = load_config(cli.config.as_deref())?;
    let mut session = open_session(&config, cli.store.as_deref())?;

    match cli.command {
        Commands::Show => print(&cart::get_cart(&session)),
        Commands::Add { payload, count } => print(&cart::add_product(&mut session, &payload, &count)?),
        Commands::Remove { id } => print(&cart::remove_line(&mut session, &id)?),
        Commands::Update { rows } => {
            let rows = rows
                .iter()
                .map(|row| cart::parse_row(row))
                .collect::<Result<Vec<_>, _>>()?;
            print(&cart::update_lines(&mut session, &rows)?)
        }
        Commands::Clear => print(&cart::remove_all(&mut session)?),
        Commands::Checkout { purge } => print(&checkout::checkout(&mut session, &config, purge)?),
    }
}

fn print<T: Serialize>(value: &T) -> Result<(), ApiError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::internal(format!("Cannot serialize output: {e}")))?;
    println!("{json}");
    Ok(())
}

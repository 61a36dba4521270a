//! FoodExpress CLI - data management tools.
//!
//! # Usage
//!
//! ```bash
//! # Write the seed data into ./data, keeping existing blobs
//! fx-cli seed
//!
//! # Overwrite existing blobs with the seed data
//! fx-cli seed --force --data-dir /var/lib/foodexpress
//!
//! # Orders by status and revenue
//! fx-cli report
//! ```
//!
//! # Commands
//!
//! - `seed` - Write the built-in menu, fees and sample orders
//! - `report` - Print order counts by status and total revenue

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "fx-cli")]
#[command(author, version, about = "FoodExpress CLI tools")]
struct Cli {
    /// Directory holding the JSON blobs (default: $FOODEXPRESS_DATA_DIR or ./data)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the seed data blobs
    Seed {
        /// Overwrite blobs that already exist
        #[arg(short, long)]
        force: bool,
    },
    /// Print order counts by status and total revenue
    Report,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

#[allow(clippy::print_stdout)]
async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = cli.data_dir.unwrap_or_else(|| {
        std::env::var("FOODEXPRESS_DATA_DIR").map_or_else(|_| PathBuf::from("data"), PathBuf::from)
    });

    match cli.command {
        Commands::Seed { force } => {
            let written = commands::seed::seed(&data_dir, force)?;
            println!("Wrote {} blob(s) to {}", written.len(), data_dir.display());
        }
        Commands::Report => {
            let report = commands::report::report(&data_dir).await;
            print!("{report}");
        }
    }
    Ok(())
}

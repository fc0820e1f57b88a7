//! Stockpile CLI - interactive shell and one-shot commands over the inventory

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stockpile::Inventory;
use stockpile::config::{self, StockpileConfig};
use stockpile::shell::input::parse_decimal;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "stockpile")]
#[command(version)]
#[command(about = "Single-user inventory tracker backed by SQLite")]
#[command(long_about = r#"
Stockpile keeps a list of items (id, name, quantity, price) in a local
SQLite file. Run without a command to open the interactive menu.

Example usage:
  stockpile
  stockpile add --id 1 --name Pen --quantity 10 --price 1.5
  stockpile search pen
  stockpile --database shop.db list
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON instead of human-readable output
    #[arg(long, global = true)]
    json: bool,

    /// Path to the database file (overrides the config file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Open the interactive menu (default)
    Shell,

    /// Add a new item
    Add {
        /// Unique item id
        #[arg(long)]
        id: i64,

        /// Item name
        #[arg(long)]
        name: String,

        /// Units in stock
        #[arg(long, allow_negative_numbers = true)]
        quantity: i64,

        /// Unit price
        #[arg(long, allow_negative_numbers = true, value_parser = parse_decimal)]
        price: f64,
    },

    /// Remove an item by id
    Remove {
        id: i64,
    },

    /// Set the quantity of an item
    SetQuantity {
        id: i64,

        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Set the price of an item
    SetPrice {
        id: i64,

        #[arg(allow_negative_numbers = true, value_parser = parse_decimal)]
        price: f64,
    },

    /// Search items by name (case-insensitive substring)
    Search {
        /// Text to look for; empty matches every item
        #[arg(default_value = "")]
        text: String,
    },

    /// List all items
    List,

    /// Show one item by id
    Get {
        id: i64,
    },

    /// Show stock statistics
    Stats,

    /// Write a config file pointing at the database
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Show version information
    Version,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn is_human(self) -> bool {
        self == OutputMode::Human
    }
}

pub fn emit_success(output_mode: OutputMode, command: &str, data: serde_json::Value) -> anyhow::Result<()> {
    if output_mode.is_human() {
        return Ok(());
    }
    let envelope = serde_json::json!({
        "ok": true,
        "command": command,
        "data": data,
    });
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stderr keeps the shell's stdout clean
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let output_mode = if cli.json { OutputMode::Json } else { OutputMode::Human };
    let command = cli.command.unwrap_or(Commands::Shell);

    let loaded = config::load_config(cli.config.as_deref())?;
    let database = config::resolve_database(cli.database.as_deref(), loaded.as_ref());

    match command {
        Commands::Version => return commands::run_version(output_mode),
        Commands::Init { force } => {
            let path = cli.config.unwrap_or_else(config::default_config_path);
            let new_config = StockpileConfig {
                database: Some(database.display().to_string()),
            };
            return commands::run_init(&path, &new_config, force, output_mode);
        }
        _ => {}
    }

    config::ensure_db_dir(&database)?;
    tracing::info!("Opening inventory at {}", database.display());
    let mut inventory = Inventory::open(&database)?;

    let outcome = commands::run(&mut inventory, command, output_mode);
    let closed = inventory.close();
    outcome?;
    closed?;
    Ok(())
}

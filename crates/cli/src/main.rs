//! Binscope CLI - inventory views from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # List warehouses
//! binscope warehouses --token "$SHIPHERO_ACCESS_TOKEN"
//!
//! # Flat inventory for one customer
//! binscope inventory --customer Q3VzdG9tZXJBY2NvdW50Ojg4Nzc0
//!
//! # Stock grouped by bin location, as JSON
//! binscope locations --customer Q3VzdG9tZXJBY2NvdW50Ojg4Nzc0 --json
//!
//! # CSV export to a file
//! binscope export --customer Q3VzdG9tZXJBY2NvdW50Ojg4Nzc0 -o inventory.csv
//! ```
//!
//! # Environment Variables
//!
//! - `SHIPHERO_ACCESS_TOKEN` - Access token (instead of `--token`)
//! - `SHIPHERO_GRAPHQL_URL` - GraphQL endpoint override

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use secrecy::SecretString;
use url::Url;

mod commands;

use binscope_core::{CustomerAccountId, SlottedSellablePolicy, WarehouseId};
use binscope_dashboard::shiphero::client::{DEFAULT_REQUEST_TIMEOUT, GRAPHQL_ENDPOINT};
use binscope_dashboard::shiphero::pagination::{
    DEFAULT_MAX_PAGES, DEFAULT_PAGE_DELAY_MS, DEFAULT_PAGE_SIZE, PaginationSettings,
};
use binscope_dashboard::shiphero::{InventoryFilter, ShipHeroClient};
use commands::CommandError;

#[derive(Parser)]
#[command(name = "binscope")]
#[command(author, version, about = "Bin-location inventory for ShipHero 3PL accounts")]
struct Cli {
    /// `ShipHero` access token
    #[arg(long, env = "SHIPHERO_ACCESS_TOKEN", hide_env_values = true)]
    token: String,

    /// GraphQL endpoint
    #[arg(long, env = "SHIPHERO_GRAPHQL_URL", default_value = GRAPHQL_ENDPOINT)]
    endpoint: Url,

    /// Records requested per page
    #[arg(
        long,
        default_value_t = DEFAULT_PAGE_SIZE,
        value_parser = clap::value_parser!(i64).range(1..)
    )]
    page_size: i64,

    /// Stop after this many pages
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_PAGES,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    max_pages: u32,

    /// Pause between page requests, in milliseconds
    #[arg(long, default_value_t = DEFAULT_PAGE_DELAY_MS)]
    page_delay_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List warehouses on the account
    Warehouses,
    /// One row per SKU and location
    Inventory {
        #[command(flatten)]
        filter: FilterArgs,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Stock grouped by bin location
    Locations {
        #[command(flatten)]
        filter: FilterArgs,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Flat inventory as CSV
    Export {
        #[command(flatten)]
        filter: FilterArgs,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Inventory filters shared by the inventory commands.
#[derive(Args)]
struct FilterArgs {
    /// Customer account UUID
    #[arg(short, long)]
    customer: String,

    /// Restrict to one warehouse
    #[arg(short, long)]
    warehouse: Option<String>,

    /// Restrict to one SKU
    #[arg(short, long)]
    sku: Option<String>,

    /// Sellable rule for slotted locations (`always` or `active`)
    #[arg(long, default_value = "always")]
    slotted_sellable: SlottedSellablePolicy,
}

#[tokio::main]
async fn main() {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout stays clean for CSV and JSON
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "binscope_dashboard=warn".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CommandError> {
    let client = ShipHeroClient::new(cli.endpoint, DEFAULT_REQUEST_TIMEOUT)?;
    let token = SecretString::from(cli.token);
    let settings = PaginationSettings {
        page_size: cli.page_size,
        max_pages: cli.max_pages,
        page_delay: std::time::Duration::from_millis(cli.page_delay_ms),
    };
    let ctx = commands::Context {
        client,
        token,
        settings,
    };

    match cli.command {
        Commands::Warehouses => commands::warehouses::list(&ctx).await,
        Commands::Inventory { filter, json } => {
            let (filter, policy) = filter.into_parts()?;
            commands::inventory::items(&ctx, &filter, policy, json).await
        }
        Commands::Locations { filter, json } => {
            let (filter, policy) = filter.into_parts()?;
            commands::inventory::locations(&ctx, &filter, policy, json).await
        }
        Commands::Export { filter, output } => {
            let (filter, policy) = filter.into_parts()?;
            commands::inventory::export(&ctx, &filter, policy, output.as_deref()).await
        }
    }
}

impl FilterArgs {
    fn into_parts(self) -> Result<(InventoryFilter, SlottedSellablePolicy), CommandError> {
        let customer_account_id = CustomerAccountId::parse(&self.customer)?;
        let warehouse_id = self
            .warehouse
            .as_deref()
            .map(WarehouseId::parse)
            .transpose()?;
        let filter = InventoryFilter {
            customer_account_id,
            warehouse_id,
            sku: self.sku.filter(|sku| !sku.trim().is_empty()),
        };
        Ok((filter, self.slotted_sellable))
    }
}

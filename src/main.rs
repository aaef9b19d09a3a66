//! partsfinder - used auto parts search and inquiries
//!
//! CLI binary for browsing the parts catalog and sending inquiries.

use anyhow::Result;
use clap::{Parser, Subcommand};
use parts_finder::config::ApiConfig;
use parts_finder::context::AppContext;
use parts_finder::events::{ClientId, TracingSink};
use parts_finder::types::ImageQuery;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "partsfinder")]
#[command(about = "Find used auto parts and send an inquiry")]
#[command(version)]
struct Cli {
    /// API base URL (overrides PARTS_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List manufacturers
    Makes,

    /// List the models of a manufacturer
    Models {
        /// Manufacturer name, slug or id
        make: String,
    },

    /// List part categories
    Parts,

    /// Pick a vehicle and part interactively, then send an inquiry
    Search {
        /// Preselect the manufacturer by name or slug
        #[arg(long)]
        brand: Option<String>,
    },

    /// Send an inquiry without prompts
    Inquire(cli::InquireArgs),

    /// Look up the product image for a vehicle and part
    Image {
        /// Manufacturer id
        #[arg(long)]
        make: u64,

        /// Model id
        #[arg(long)]
        model: u64,

        /// Model year
        #[arg(long)]
        year: i32,

        /// Part category id
        #[arg(long)]
        part: u64,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = ApiConfig::from_env()?;
    if let Some(url) = cli.api_url.as_deref() {
        config = config.with_base_url(url)?;
    }

    let events = Arc::new(TracingSink::new(ClientId::load_default()));
    let ctx = AppContext::init(config, events)?;

    match cli.command {
        None => {
            // Default: interactive search
            cli::run_search(&ctx, None).await?;
        }
        Some(Commands::Makes) => cli::run_makes(&ctx).await?,
        Some(Commands::Models { make }) => cli::run_models(&ctx, &make).await?,
        Some(Commands::Parts) => cli::run_parts(&ctx).await?,
        Some(Commands::Search { brand }) => cli::run_search(&ctx, brand.as_deref()).await?,
        Some(Commands::Inquire(args)) => cli::run_inquire(&ctx, args).await?,
        Some(Commands::Image {
            make,
            model,
            year,
            part,
        }) => {
            let query = ImageQuery {
                manufacturer_id: make,
                model_id: model,
                year,
                part_category_id: part,
            };
            cli::run_image(&ctx, &query).await?;
        }
    }

    ctx.shutdown();
    Ok(())
}

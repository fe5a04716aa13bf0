//! Product Notes - Main Server
//!
//! Serves the product notes API over the Shopify Admin API.

use anyhow::Result;
use clap::{Parser, Subcommand};
use product_notes::overview::{load_all_products, Overview, PRODUCTS_PAGE_SIZE};
use product_notes::{AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "product-notes")]
#[command(about = "Product notes server for Shopify")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Port to listen on (overrides config.yaml / SERVER_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Load every product from the shop and print the notes overview
    Overview {
        /// Only products whose title contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,product_notes=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::from_env()?;

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server_port = port;
            }
            product_notes::start_server(config).await
        }
        Commands::Overview { search } => run_overview(config, search.as_deref()).await,
    }
}

async fn run_overview(config: Config, search: Option<&str>) -> Result<()> {
    let shop_domain = config.shop_domain.clone();
    let state = AppState::new(config)?;

    let products = load_all_products(state.catalog.as_ref(), PRODUCTS_PAGE_SIZE).await?;
    let overview = Overview::new(products);
    let stats = overview.stats();

    tracing::info!(
        "Loaded {} products: {} with notes, {} without, {} notes total",
        stats.total_products,
        stats.products_with_notes,
        stats.products_without_notes,
        stats.total_notes
    );

    for row in overview.rows(&shop_domain, search.unwrap_or("")) {
        println!("{} [{}] {}", row.title, row.badge_label, row.admin_url);
        for note in &row.notes {
            println!("  {}. {}: {}", note.position, note.note.title, note.note.description);
        }
    }

    Ok(())
}

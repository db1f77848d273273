use models::{CliApp, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod cli;
mod commodities;
mod config;
mod database;
mod export;
mod extractor;
mod models;
mod pipeline;
mod search;
mod validator;

use config::{load_config, Config};
use database::create_db_pool;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let config = match load_config("config.yml").await {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load config.yml: {}. Using defaults.", e);
            Config::default()
        }
    };

    // Setup logging
    std::env::set_var("RUST_LOG", "supplier_scraper=info,hyper=warn,reqwest=warn");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("supplier_scraper=info".parse().unwrap()),
        )
        .with_max_level(tracing::Level::INFO)
        .init();

    // Create output directory
    tokio::fs::create_dir_all(&config.output.directory).await?;

    // Initialize database
    info!("Initializing database...");
    let db_pool = create_db_pool("data/suppliers.db").await?;

    // Initialize and run CLI app
    let app = CliApp::new(config, db_pool).await?;
    app.run().await?;

    Ok(())
}

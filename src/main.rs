mod aggregator;
mod config;
mod fetcher;
mod paginator;
mod parser;
mod render;
mod site;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::fetcher::Fetcher;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "planet_news=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "planet.toml".to_string());
    let config = Config::load(&config_path)?;
    info!("Loaded {} feeds from configuration", config.feeds.len());

    // Fetch everything, merge, and write the site
    let fetcher = Fetcher::new();
    let result = aggregator::aggregate(&fetcher, &config.feeds).await;
    let summary = site::generate(&config, &result).await?;

    info!(
        "Successfully generated {} pages with {} total entries",
        summary.pages, summary.entries
    );

    Ok(())
}

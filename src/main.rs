use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod models;
mod services;
mod utils;

use api::{CoinGeckoClient, SentimentClient};
use config::Config;
use services::render_service::{self, RenderError};
use services::snapshot_service;

#[derive(Debug, Error)]
enum DashboardError {
    #[error(transparent)]
    Api(#[from] api::ApiError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

async fn run(config: &Config) -> Result<(), DashboardError> {
    let prices = CoinGeckoClient::new(config);
    let sentiment = SentimentClient::new(config.sentiment_url.clone());

    let report = snapshot_service::assemble_report(config, &prices, &sentiment).await?;
    render_service::render_dashboard(&report, &config.output_path, config.image_size)?;
    Ok(())
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("crypto_dashboard=info")),
        )
        .with_target(false)
        .init();

    let config = Config::default();
    info!(
        "Building dashboard for {} coins (prices in {})",
        config.coins.len(),
        config.currency
    );

    if let Err(e) = run(&config).await {
        error!("Dashboard run failed: {}", e);
        std::process::exit(1);
    }
}

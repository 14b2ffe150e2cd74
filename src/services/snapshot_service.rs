use chrono::{Duration, Utc};
use tokio::time::sleep;
use tracing::info;

use crate::api::{ApiError, PriceSource, SentimentSource};
use crate::config::Config;
use crate::models::{CoinSnapshot, GlobalIndicators, Report};
use crate::utils::{capitalize, format_pct, format_usd};

/// Assemble one report: global indicators, one snapshot per configured
/// coin in order, the sentiment score, and a completion timestamp.
///
/// Per-coin failures propagate and abort the run; the global and sentiment
/// fetches only degrade their own fields.
pub async fn assemble_report<P, S>(
    config: &Config,
    prices: &P,
    sentiment: &S,
) -> Result<Report, ApiError>
where
    P: PriceSource,
    S: SentimentSource,
{
    info!("Fetching global data...");
    let (bitcoin_dominance, total_market_cap) = prices.global_data().await;
    info!("Bitcoin Dominance: {:?}", bitcoin_dominance);
    info!("Total Market Cap: {:?}", total_market_cap);

    let mut snapshots = Vec::with_capacity(config.coins.len());
    for (i, coin) in config.coins.iter().enumerate() {
        info!("Fetching data for {}...", coin);
        let detail = prices.coin_detail(coin).await?;

        let week_ago = (Utc::now() - Duration::days(7)).date_naive();
        let week_ago_price = prices.historical_price(coin, week_ago).await?;
        let week_change = (detail.price - week_ago_price) / week_ago_price * 100.0;

        snapshots.push(CoinSnapshot {
            coin: capitalize(coin),
            price: format_usd(detail.price),
            week_change: format_pct(week_change),
            year_change: format_pct(detail.change_1y),
        });

        // Stay under the upstream rate limit between coins.
        if i + 1 < config.coins.len() {
            sleep(config.inter_coin_delay).await;
        }
    }

    let sentiment = sentiment.sentiment_index().await;

    Ok(Report {
        snapshots,
        global: GlobalIndicators {
            bitcoin_dominance,
            total_market_cap,
        },
        sentiment,
        captured_at: Utc::now(),
    })
}

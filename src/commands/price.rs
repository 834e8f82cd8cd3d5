use crate::models::PriceResult;
use crate::services::poll_service::Ticker;
use crate::services::price_service::PriceSource;

/// Poll the market immediately instead of waiting for the next tick
pub async fn execute<S: PriceSource>(ticker: &mut Ticker<S>) -> Result<String, String> {
    tracing::info!("💹 Price command called");
    let result = ticker.poll_once().await;
    Ok(format_ticker_line(ticker.symbol(), &result))
}

/// One-line ticker display, e.g. `LUNA_CC 1.0500 ▲  Last update: 12:30 UTC (5 samples)`
pub fn format_ticker_line(symbol: &str, result: &PriceResult) -> String {
    format!(
        "{} {} {}  {} ({} samples)",
        symbol,
        result.display_price,
        result.trend.arrow(),
        result.status,
        result.samples
    )
}

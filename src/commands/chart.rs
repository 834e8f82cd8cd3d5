use crate::models::ChartOutcome;
use crate::services::poll_service::Ticker;
use crate::services::price_service::PriceSource;

/// Redraw the chart from the current history
pub fn execute<S: PriceSource>(ticker: &Ticker<S>) -> Result<String, String> {
    tracing::info!("🎨 Chart command called");

    match ticker.render().map_err(|e| e.to_string())? {
        ChartOutcome::Rendered { path, points } => {
            Ok(format!("📈 Chart with {} points written to {}", points, path))
        }
        ChartOutcome::NothingToDraw => Ok(format!(
            "Not enough price data to draw a chart yet ({} sample(s), need at least 2)",
            ticker.tracker().len()
        )),
    }
}

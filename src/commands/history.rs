use crate::services::poll_service::Ticker;
use crate::services::price_service::{format_price, PriceSource};
use crate::utils::Table;

/// Table of recorded prices, oldest first
pub fn execute<S: PriceSource>(ticker: &Ticker<S>) -> Result<String, String> {
    let tracker = ticker.tracker();
    if tracker.is_empty() {
        return Ok("No prices recorded yet".to_string());
    }

    let mut table = Table::new(vec!["#", "Price", "Change"]);
    let mut previous: Option<f64> = None;

    for (i, price) in tracker.samples().enumerate() {
        let change = match previous {
            Some(prev) => format!("{:+.4}", price - prev),
            None => "-".to_string(),
        };
        let index = (i + 1).to_string();
        let shown = format_price(price);
        table.add_row(vec![index.as_str(), shown.as_str(), change.as_str()]);
        previous = Some(price);
    }

    Ok(format!(
        "{}\n{} of {} samples",
        table.render(),
        tracker.len(),
        tracker.capacity()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::chart_service::ChartSettings;
    use crate::services::price_service::testing::ScriptedSource;

    #[tokio::test]
    async fn test_history_table() {
        let source = ScriptedSource::new(vec![Ok(1.0), Ok(1.5)]);
        let path = std::env::temp_dir().join(format!("luna_history_{}.png", std::process::id()));
        let path = path.to_string_lossy().into_owned();
        let mut ticker = Ticker::new(source, ChartSettings::new(path.clone(), 200, 100));
        assert_eq!(execute(&ticker).unwrap(), "No prices recorded yet");

        ticker.poll_once().await;
        ticker.poll_once().await;
        let _ = std::fs::remove_file(&path);

        let text = execute(&ticker).unwrap();
        assert!(text.contains("1.5000"));
        assert!(text.contains("+0.5000"));
        assert!(text.ends_with("2 of 20 samples"));
    }
}

use thiserror::Error;
use tracing::info;
use crate::api::ApiError;
use crate::models::{TradeResult, TradeSide};
use crate::services::price_service::PriceSource;
use crate::services::tracker::{PriceHistoryTracker, TrackerError};

/// Price change per unit bought or sold
pub const UPDATE_FACTOR: f64 = 0.001;
/// Floor for simulated sells
pub const MIN_PRICE: f64 = 0.01;
/// Assumed price when nothing has been observed yet
pub const FALLBACK_PRICE: f64 = 1.00;
pub const DEFAULT_AMOUNT: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TradeError {
    #[error("Amount must be a positive number, got {0}")]
    InvalidAmount(String),
    #[error("Market error: {0}")]
    Api(#[from] ApiError),
    #[error("Market returned an unusable price: {0}")]
    Tracker(#[from] TrackerError),
}

/// Parse an optional amount argument, defaulting to [`DEFAULT_AMOUNT`]
pub fn parse_amount(arg: Option<&str>) -> Result<f64, TradeError> {
    let amount = match arg {
        None => DEFAULT_AMOUNT,
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| TradeError::InvalidAmount(raw.to_string()))?,
    };

    if !amount.is_finite() || amount <= 0.0 {
        return Err(TradeError::InvalidAmount(amount.to_string()));
    }
    Ok(amount)
}

/// Price after an order of `amount` units on a read-only market
pub fn simulate_price(current: Option<f64>, side: TradeSide, amount: f64) -> f64 {
    let current = current.unwrap_or(FALLBACK_PRICE);
    let impact = amount * UPDATE_FACTOR;
    match side {
        TradeSide::Buy => current + impact,
        TradeSide::Sell => (current - impact).max(MIN_PRICE),
    }
}

/// Submit a buy or sell.
///
/// A filled order's price is recorded as a new sample. Read-only sources get
/// a simulated price that is reported but never recorded.
pub async fn execute_trade<S: PriceSource>(
    source: &S,
    tracker: &mut PriceHistoryTracker,
    side: TradeSide,
    amount: f64,
) -> Result<TradeResult, TradeError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(TradeError::InvalidAmount(amount.to_string()));
    }

    match source.place_order(side, amount).await? {
        Some((new_price, timestamp)) => {
            tracker.record(new_price)?;
            info!("{} of {} filled, price now {:.4}", side.as_str(), amount, new_price);
            Ok(TradeResult::Executed { side, amount, new_price, timestamp })
        }
        None => {
            let new_price = simulate_price(tracker.latest(), side, amount);
            info!("{} of {} simulated at {:.4} (read-only market)", side.as_str(), amount, new_price);
            Ok(TradeResult::Simulated { side, amount, new_price })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::price_service::testing::ScriptedSource;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(None), Ok(100.0));
        assert_eq!(parse_amount(Some("25.5")), Ok(25.5));
        assert!(matches!(parse_amount(Some("abc")), Err(TradeError::InvalidAmount(_))));
        assert!(matches!(parse_amount(Some("0")), Err(TradeError::InvalidAmount(_))));
        assert!(matches!(parse_amount(Some("-3")), Err(TradeError::InvalidAmount(_))));
        assert!(matches!(parse_amount(Some("inf")), Err(TradeError::InvalidAmount(_))));
    }

    #[test]
    fn test_simulate_price() {
        assert!((simulate_price(None, TradeSide::Buy, 100.0) - 1.1).abs() < 1e-12);
        assert!((simulate_price(Some(2.0), TradeSide::Sell, 500.0) - 1.5).abs() < 1e-12);
        assert_eq!(simulate_price(Some(0.05), TradeSide::Sell, 1000.0), MIN_PRICE);
    }

    #[tokio::test]
    async fn test_filled_order_is_recorded() {
        let source = ScriptedSource::new(vec![]);
        let mut tracker = PriceHistoryTracker::new();

        let result = execute_trade(&source, &mut tracker, TradeSide::Buy, 10.0).await.unwrap();

        assert_eq!(
            result,
            TradeResult::Executed { side: TradeSide::Buy, amount: 10.0, new_price: 2.5, timestamp: None }
        );
        assert_eq!(tracker.latest(), Some(2.5));
        assert_eq!(source.orders.lock().unwrap().as_slice(), &[(TradeSide::Buy, 10.0)]);
    }

    #[tokio::test]
    async fn test_read_only_order_is_simulated() {
        let source = ScriptedSource::read_only(vec![]);
        let mut tracker = PriceHistoryTracker::new();
        tracker.record(1.0).unwrap();

        let result = execute_trade(&source, &mut tracker, TradeSide::Sell, 100.0).await.unwrap();

        match result {
            TradeResult::Simulated { new_price, .. } => assert!((new_price - 0.9).abs() < 1e-12),
            other => panic!("expected simulated trade, got {:?}", other),
        }
        assert_eq!(tracker.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_amount_never_reaches_market() {
        let source = ScriptedSource::new(vec![]);
        let mut tracker = PriceHistoryTracker::new();

        let err = execute_trade(&source, &mut tracker, TradeSide::Buy, -1.0).await.unwrap_err();
        assert!(matches!(err, TradeError::InvalidAmount(_)));
        assert!(source.orders.lock().unwrap().is_empty());
    }
}

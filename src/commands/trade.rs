use crate::models::{TradeResult, TradeSide};
use crate::services::poll_service::Ticker;
use crate::services::price_service::{format_price, PriceSource};
use crate::services::trade_service;

/// `$buy [amount]` and `$sell [amount]`
pub async fn execute<S: PriceSource>(
    ticker: &mut Ticker<S>,
    side: TradeSide,
    args: &[&str],
) -> Result<String, String> {
    tracing::info!("💱 {} command called with args: {:?}", side.as_str(), args);

    let amount = trade_service::parse_amount(args.first().copied()).map_err(|e| e.to_string())?;
    let result = ticker.trade(side, amount).await.map_err(|e| e.to_string())?;

    Ok(format_trade(&result))
}

pub fn format_trade(result: &TradeResult) -> String {
    match result {
        TradeResult::Executed { side, amount, new_price, .. } => {
            let verb = match side {
                TradeSide::Buy => "Bought",
                TradeSide::Sell => "Sold",
            };
            format!("✅ {} {} units, price now {}", verb, amount, format_price(*new_price))
        }
        TradeResult::Simulated { side, new_price, .. } => format!(
            "ℹ️ This market is read-only, the order was not sent.\n   Simulated price after the {}: {}",
            side.as_str(),
            format_price(*new_price)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_trade() {
        let executed = TradeResult::Executed {
            side: TradeSide::Sell,
            amount: 50.0,
            new_price: 0.95,
            timestamp: None,
        };
        assert_eq!(format_trade(&executed), "✅ Sold 50 units, price now 0.9500");

        let simulated = TradeResult::Simulated { side: TradeSide::Buy, amount: 100.0, new_price: 1.1 };
        assert!(format_trade(&simulated).ends_with("Simulated price after the buy: 1.1000"));
    }
}

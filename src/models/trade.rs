//! Buy/sell models

/// Side of a market order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Buy => "buy",
            TradeSide::Sell => "sell",
        }
    }
}

/// Outcome of a buy or sell
#[derive(Debug, Clone, PartialEq)]
pub enum TradeResult {
    /// The market accepted the order and moved the price
    Executed {
        side: TradeSide,
        amount: f64,
        new_price: f64,
        timestamp: Option<String>,
    },
    /// Read-only market: the price change was only computed locally
    Simulated {
        side: TradeSide,
        amount: f64,
        new_price: f64,
    },
}

use std::future::Future;
use tracing::debug;
use crate::api::jsonbin::parse_timestamp;
use crate::api::{ApiError, JsonBinClient, LocalMarketClient};
use crate::models::{MarketQuote, PriceResult, TradeSide, Trend};
use crate::services::tracker::PriceHistoryTracker;

/// Shown instead of a price when none has been received yet
pub const PLACEHOLDER: &str = "—";
pub const DISCONNECTED: &str = "Could not connect to the market";

/// Where prices come from and where orders go
pub trait PriceSource {
    /// Fetch the current quote
    fn fetch_quote(&self) -> impl Future<Output = Result<MarketQuote, ApiError>> + Send;

    /// Place an order.
    ///
    /// Returns `Ok(None)` when the source is read-only, otherwise the new
    /// price and the server timestamp.
    fn place_order(
        &self,
        side: TradeSide,
        amount: f64,
    ) -> impl Future<Output = Result<Option<(f64, Option<String>)>, ApiError>> + Send;
}

impl PriceSource for LocalMarketClient {
    async fn fetch_quote(&self) -> Result<MarketQuote, ApiError> {
        let market = self.get_market().await?;
        Ok(MarketQuote {
            symbol: Some(market.symbol),
            name: Some(market.name),
            price: market.price,
            last_update: market.last_update.as_deref().and_then(parse_timestamp),
        })
    }

    async fn place_order(&self, side: TradeSide, amount: f64) -> Result<Option<(f64, Option<String>)>, ApiError> {
        self.trade(side, amount).await.map(Some)
    }
}

impl PriceSource for JsonBinClient {
    async fn fetch_quote(&self) -> Result<MarketQuote, ApiError> {
        let asset = self.get_asset().await?;
        Ok(MarketQuote {
            symbol: Some(self.asset_key().to_uppercase()),
            name: None,
            price: asset.price,
            last_update: asset.last_update.as_deref().and_then(parse_timestamp),
        })
    }

    async fn place_order(&self, side: TradeSide, amount: f64) -> Result<Option<(f64, Option<String>)>, ApiError> {
        debug!("JSON store is read-only, {} of {} will be simulated", side.as_str(), amount);
        Ok(None)
    }
}

/// The source selected by configuration
pub enum MarketSource {
    Local(LocalMarketClient),
    JsonBin(JsonBinClient),
}

impl MarketSource {
    pub fn describe(&self) -> String {
        match self {
            MarketSource::Local(client) => format!("market server at {}", client.base_url()),
            MarketSource::JsonBin(client) => format!("JSON store (asset '{}', read-only)", client.asset_key()),
        }
    }
}

impl PriceSource for MarketSource {
    async fn fetch_quote(&self) -> Result<MarketQuote, ApiError> {
        match self {
            MarketSource::Local(client) => client.fetch_quote().await,
            MarketSource::JsonBin(client) => client.fetch_quote().await,
        }
    }

    async fn place_order(&self, side: TradeSide, amount: f64) -> Result<Option<(f64, Option<String>)>, ApiError> {
        match self {
            MarketSource::Local(client) => client.place_order(side, amount).await,
            MarketSource::JsonBin(client) => client.place_order(side, amount).await,
        }
    }
}

/// Price with four decimals
pub fn format_price(price: f64) -> String {
    format!("{:.4}", price)
}

/// Direction of the newest sample against the one before it
pub fn trend(tracker: &PriceHistoryTracker) -> Trend {
    match (tracker.previous(), tracker.latest()) {
        (Some(prev), Some(last)) if last > prev => Trend::Up,
        (Some(prev), Some(last)) if last < prev => Trend::Down,
        (Some(_), Some(_)) => Trend::Flat,
        _ => Trend::Unknown,
    }
}

/// "Last update: HH:MM UTC" when the quote is timestamped
pub fn status_line(quote: &MarketQuote) -> String {
    match quote.last_update {
        Some(ts) => format!("Last update: {} UTC", ts.format("%H:%M")),
        None => "Data loaded".to_string(),
    }
}

/// Display state after a successful fetch
pub fn summarize(tracker: &PriceHistoryTracker, quote: &MarketQuote) -> PriceResult {
    PriceResult {
        display_price: format_price(quote.price),
        trend: trend(tracker),
        status: status_line(quote),
        samples: tracker.len(),
    }
}

/// Display state after a failed fetch, keeping the last known price
pub fn disconnected(tracker: &PriceHistoryTracker) -> PriceResult {
    PriceResult {
        display_price: tracker
            .latest()
            .map(format_price)
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
        trend: Trend::Unknown,
        status: DISCONNECTED.to_string(),
        samples: tracker.len(),
    }
}

#[cfg(test)]
pub mod testing {
    //! Scripted price source for driver and command tests

    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    pub struct ScriptedSource {
        quotes: Mutex<VecDeque<Result<f64, ApiError>>>,
        pub read_only: bool,
        pub orders: Mutex<Vec<(TradeSide, f64)>>,
    }

    impl ScriptedSource {
        pub fn new(script: Vec<Result<f64, ApiError>>) -> Self {
            Self {
                quotes: Mutex::new(script.into()),
                read_only: false,
                orders: Mutex::new(Vec::new()),
            }
        }

        pub fn read_only(script: Vec<Result<f64, ApiError>>) -> Self {
            Self { read_only: true, ..Self::new(script) }
        }
    }

    impl PriceSource for ScriptedSource {
        async fn fetch_quote(&self) -> Result<MarketQuote, ApiError> {
            let next = self.quotes.lock().unwrap().pop_front();
            let price = next.unwrap_or_else(|| Err(ApiError::RequestError("script exhausted".to_string())))?;
            Ok(MarketQuote { symbol: Some("LUNA_CC".to_string()), name: None, price, last_update: None })
        }

        async fn place_order(&self, side: TradeSide, amount: f64) -> Result<Option<(f64, Option<String>)>, ApiError> {
            self.orders.lock().unwrap().push((side, amount));
            if self.read_only {
                return Ok(None);
            }
            Ok(Some((2.5, None)))
        }
    }
}

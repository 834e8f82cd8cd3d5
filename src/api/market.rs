use reqwest::Client as HttpClient;
use tracing::debug;
use super::client::{read_json, request_error};
use super::models::{ApiError, MarketResponse, StatusResponse, TradeResponse};
use crate::models::TradeSide;

/// Client for the market server's HTTP routes
#[derive(Debug, Clone)]
pub struct LocalMarketClient {
    http_client: HttpClient,
    base_url: String,
}

impl LocalMarketClient {
    pub const DEFAULT_BASE_URL: &'static str = "http://127.0.0.1:8000";

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET /
    ///
    /// Connectivity probe. Returns the server status and the listed symbol.
    pub async fn get_status(&self) -> Result<StatusResponse, ApiError> {
        let url = format!("{}/", self.base_url);
        let response = self.http_client
            .get(&url)
            .send()
            .await
            .map_err(request_error)?;

        read_json(response).await
    }

    /// GET /market
    ///
    /// Current symbol, name, price and last update time.
    pub async fn get_market(&self) -> Result<MarketResponse, ApiError> {
        let url = format!("{}/market", self.base_url);
        let response = self.http_client
            .get(&url)
            .send()
            .await
            .map_err(request_error)?;

        read_json(response).await
    }

    /// POST /buy?amount= or POST /sell?amount=
    ///
    /// # Returns
    /// * `Ok((new_price, timestamp))` - Price after the order moved the market
    /// * `Err(ApiError::Rejected)` - Server refused the amount
    pub async fn trade(&self, side: TradeSide, amount: f64) -> Result<(f64, Option<String>), ApiError> {
        let url = format!("{}/{}", self.base_url, side.as_str());
        debug!("POST {} amount={}", url, amount);

        let response = self.http_client
            .post(&url)
            .query(&[("amount", amount.to_string())])
            .send()
            .await
            .map_err(request_error)?;

        match read_json::<TradeResponse>(response).await? {
            TradeResponse::Filled { new_price, timestamp, .. } => Ok((new_price, timestamp)),
            TradeResponse::Rejected { error } => Err(ApiError::Rejected(error)),
        }
    }
}

use reqwest::Client as HttpClient;
use std::sync::Mutex;
use chrono::{DateTime, Utc};
use super::client::{read_json, request_error};
use super::models::{ApiError, BinAsset, BinResponse};
use crate::utils::ratelimit::{wait_for_slot, RequestLimiter};

/// Read-only client for a public JSON store bin holding the market record
pub struct JsonBinClient {
    http_client: HttpClient,
    base_url: String,
    bin_id: String,
    asset_key: String,
    limiter: Mutex<RequestLimiter>,
}

impl JsonBinClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.jsonbin.io/v3";
    pub const DEFAULT_BIN_ID: &'static str = "69958d2743b1c97be98825d3";
    pub const DEFAULT_ASSET_KEY: &'static str = "luna_cc";

    pub fn with_base_url(
        base_url: String,
        bin_id: String,
        asset_key: String,
        requests_per_minute: usize,
    ) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            bin_id,
            asset_key,
            limiter: Mutex::new(RequestLimiter::per_minute(requests_per_minute)),
        }
    }

    pub fn asset_key(&self) -> &str {
        &self.asset_key
    }

    /// GET /b/{bin_id}
    ///
    /// Returns the configured asset's entry from the bin record.
    pub async fn get_asset(&self) -> Result<BinAsset, ApiError> {
        wait_for_slot(&self.limiter).await;

        let url = format!("{}/b/{}", self.base_url, self.bin_id);
        let response = self.http_client
            .get(&url)
            .send()
            .await
            .map_err(request_error)?;

        let bin: BinResponse = read_json(response).await?;
        let value = bin
            .record
            .and_then(|mut record| record.remove(&self.asset_key))
            .ok_or_else(|| ApiError::InvalidPayload("invalid data format".to_string()))?;

        serde_json::from_value::<BinAsset>(value)
            .map_err(|_| ApiError::InvalidPayload("invalid data format".to_string()))
    }
}

/// Parse a market timestamp. Offset-less ISO strings are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn client_for(server: &mockito::ServerGuard) -> JsonBinClient {
        JsonBinClient::with_base_url(server.url(), "abc123".to_string(), "luna_cc".to_string(), 60)
    }

    #[tokio::test]
    async fn test_reads_asset_from_record() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/b/abc123")
            .with_status(200)
            .with_body(r#"{"record":{"luna_cc":{"price":1.2345,"last_update":"2025-03-01T09:15:00Z"}},"metadata":{}}"#)
            .create_async()
            .await;

        let asset = client_for(&server).get_asset().await.unwrap();
        assert_eq!(asset.price, 1.2345);
        assert_eq!(asset.last_update.as_deref(), Some("2025-03-01T09:15:00Z"));
    }

    #[tokio::test]
    async fn test_missing_asset_is_invalid_payload() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/b/abc123")
            .with_status(200)
            .with_body(r#"{"record":{"other":{"price":2.0}}}"#)
            .create_async()
            .await;

        let err = client_for(&server).get_asset().await.unwrap_err();
        assert_eq!(err, ApiError::InvalidPayload("invalid data format".to_string()));
    }

    #[tokio::test]
    async fn test_non_numeric_price_is_invalid_payload() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/b/abc123")
            .with_status(200)
            .with_body(r#"{"record":{"luna_cc":{"price":"1.00"}}}"#)
            .create_async()
            .await;

        let err = client_for(&server).get_asset().await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidPayload(_)));
    }

    #[tokio::test]
    async fn test_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/b/abc123")
            .with_status(404)
            .with_body(r#"{"message":"Bin not found"}"#)
            .create_async()
            .await;

        let err = client_for(&server).get_asset().await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let naive = parse_timestamp("2025-03-01T12:30:00.123456").unwrap();
        assert_eq!((naive.hour(), naive.minute()), (12, 30));

        let offset = parse_timestamp("2025-03-01T12:30:00+02:00").unwrap();
        assert_eq!(offset.hour(), 10);

        assert!(parse_timestamp("yesterday").is_none());
    }
}

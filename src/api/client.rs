//! Response handling shared by the market clients

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::warn;
use super::models::{ApiError, RateLimitResponse};

/// Turn a reqwest send error into an [`ApiError`]
pub fn request_error(e: reqwest::Error) -> ApiError {
    ApiError::RequestError(format!("Request failed: {}", e))
}

/// Check the status and decode a JSON body
pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(handle_error_response(status, response).await);
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
}

/// Parse error response based on HTTP status code
pub async fn handle_error_response(status: StatusCode, response: Response) -> ApiError {
    let status_code = status.as_u16();
    let body_text = response.text().await.unwrap_or_default();

    match status_code {
        400 | 422 => {
            // FastAPI puts the reason under "detail", JSON stores use "message"
            match serde_json::from_str::<serde_json::Value>(&body_text) {
                Ok(err_json) => {
                    let message = err_json
                        .get("message")
                        .or_else(|| err_json.get("detail"))
                        .map(|v| match v.as_str() {
                            Some(s) => s.to_string(),
                            None => v.to_string(),
                        })
                        .unwrap_or(body_text);
                    ApiError::BadRequest(message)
                }
                Err(_) => ApiError::BadRequest(body_text),
            }
        }
        404 => ApiError::NotFound(body_text),
        429 => {
            let retry_after = serde_json::from_str::<RateLimitResponse>(&body_text)
                .ok()
                .and_then(|r| r.retry_after)
                .unwrap_or(1000);
            warn!("Rate limited, retry after {} ms", retry_after);
            ApiError::RateLimited { retry_after }
        }
        500..=599 => {
            warn!("Server error {}: {}", status_code, body_text);
            ApiError::ServerError(status_code, body_text)
        }
        _ => ApiError::HttpError(status_code, body_text),
    }
}

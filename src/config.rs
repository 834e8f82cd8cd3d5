use std::time::Duration;
use thiserror::Error;
use crate::api::{JsonBinClient, LocalMarketClient};
use crate::services::chart_service::ChartSettings;
use crate::services::price_service::MarketSource;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Market server exposing /market, /buy and /sell
    Local,
    /// Read-only JSON store bin
    JsonBin,
}

/// Runtime settings, read from the environment (and `.env`)
#[derive(Debug, Clone)]
pub struct Config {
    pub source: SourceKind,
    pub market_url: String,
    pub jsonbin_url: String,
    pub jsonbin_bin_id: String,
    pub asset_key: String,
    pub jsonbin_requests_per_minute: usize,
    pub poll_interval: Duration,
    pub chart_path: String,
    pub chart_width: u32,
    pub chart_height: u32,
    pub command_cooldown: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys take their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let source = match get("MARKET_SOURCE", "local").to_lowercase().as_str() {
            "local" | "server" => SourceKind::Local,
            "jsonbin" | "bin" => SourceKind::JsonBin,
            other => {
                return Err(ConfigError::Invalid {
                    key: "MARKET_SOURCE",
                    value: other.to_string(),
                    reason: "expected 'local' or 'jsonbin'",
                })
            }
        };

        let poll_secs: u64 = parse_positive(&lookup, "POLL_INTERVAL_SECS", 32)?;
        let cooldown_secs: u64 = parse_number(&lookup, "COMMAND_COOLDOWN_SECS", 2)?;

        Ok(Self {
            source,
            market_url: get("MARKET_URL", LocalMarketClient::DEFAULT_BASE_URL),
            jsonbin_url: get("JSONBIN_URL", JsonBinClient::DEFAULT_BASE_URL),
            jsonbin_bin_id: get("JSONBIN_BIN_ID", JsonBinClient::DEFAULT_BIN_ID),
            asset_key: get("ASSET_KEY", JsonBinClient::DEFAULT_ASSET_KEY),
            jsonbin_requests_per_minute: parse_positive(&lookup, "JSONBIN_REQUESTS_PER_MINUTE", 10)?,
            poll_interval: Duration::from_secs(poll_secs),
            chart_path: get("CHART_PATH", "luna_chart.png"),
            chart_width: parse_positive(&lookup, "CHART_WIDTH", 640)?,
            chart_height: parse_positive(&lookup, "CHART_HEIGHT", 320)?,
            command_cooldown: Duration::from_secs(cooldown_secs),
        })
    }

    pub fn market_source(&self) -> MarketSource {
        match self.source {
            SourceKind::Local => MarketSource::Local(LocalMarketClient::with_base_url(self.market_url.clone())),
            SourceKind::JsonBin => MarketSource::JsonBin(JsonBinClient::with_base_url(
                self.jsonbin_url.clone(),
                self.jsonbin_bin_id.clone(),
                self.asset_key.clone(),
                self.jsonbin_requests_per_minute,
            )),
        }
    }

    pub fn chart_settings(&self) -> ChartSettings {
        ChartSettings::new(self.chart_path.clone(), self.chart_width, self.chart_height)
    }
}

fn parse_number<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => match raw.trim().parse() {
            Ok(value) => Ok(value),
            Err(_) => Err(ConfigError::Invalid {
                key,
                value: raw,
                reason: "not a number",
            }),
        },
    }
}

fn parse_positive<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + PartialOrd + Default + ToString,
{
    let value = parse_number(lookup, key, default)?;
    if value <= T::default() {
        return Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
            reason: "must be greater than zero",
        });
    }
    Ok(value)
}

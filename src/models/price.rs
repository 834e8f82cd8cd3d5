//! Price query models

use chrono::{DateTime, Utc};

/// A single price observation returned by a market source
#[derive(Debug, Clone, PartialEq)]
pub struct MarketQuote {
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub price: f64,
    pub last_update: Option<DateTime<Utc>>,
}

/// Direction of the newest sample relative to the previous one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Flat,
    Unknown,
}

impl Trend {
    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Up => "▲",
            Trend::Down => "▼",
            Trend::Flat => "=",
            Trend::Unknown => "·",
        }
    }
}

/// What the ticker shows after a poll cycle
#[derive(Debug, Clone)]
pub struct PriceResult {
    pub display_price: String,
    pub trend: Trend,
    pub status: String,
    pub samples: usize,
}

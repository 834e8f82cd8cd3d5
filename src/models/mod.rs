//! Data models for ticker commands and services
//!
//! Each model represents the output of a service operation.

pub mod chart;
pub mod price;
pub mod trade;

pub use chart::{ChartOutcome, ChartPoint};
pub use price::{MarketQuote, PriceResult, Trend};
pub use trade::{TradeResult, TradeSide};

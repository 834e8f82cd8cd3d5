pub mod chart_service;
pub mod poll_service;
pub mod price_service;
pub mod trade_service;
pub mod tracker;

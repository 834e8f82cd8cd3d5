pub mod chart;
pub mod help;
pub mod history;
pub mod price;
pub mod trade;

use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::warn;
use crate::models::TradeSide;
use crate::services::poll_service::Ticker;
use crate::services::price_service::PriceSource;

/// What the command loop should do after a line
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    Quit,
}

/// Per-command cooldown so a held key cannot flood the market
pub struct Cooldowns {
    last_run: HashMap<String, Instant>,
    cooldown: Duration,
}

impl Cooldowns {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            last_run: HashMap::new(),
            cooldown,
        }
    }

    /// Ok if `command` may run at `now`, otherwise the seconds left to wait
    pub fn check(&mut self, command: &str, now: Instant) -> Result<(), u64> {
        if let Some(&last) = self.last_run.get(command) {
            let elapsed = now.saturating_duration_since(last);
            if elapsed < self.cooldown {
                let remaining = self.cooldown - elapsed;
                return Err(remaining.as_secs_f64().ceil() as u64);
            }
        }
        self.last_run.insert(command.to_string(), now);
        Ok(())
    }
}

/// Parse and run one command line
pub async fn handle_line<S: PriceSource>(
    ticker: &mut Ticker<S>,
    cooldowns: &mut Cooldowns,
    line: &str,
) -> Option<Reply> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let (&first, args) = parts.split_first()?;

    let command = first.trim_start_matches('$').to_lowercase();
    let command = match command.as_str() {
        "price" | "p" => "price",
        "buy" | "b" => "buy",
        "sell" | "s" => "sell",
        "chart" | "c" => "chart",
        "history" | "h" => "history",
        "help" | "?" => return Some(Reply::Text(help::text())),
        "quit" | "exit" | "q" => return Some(Reply::Quit),
        _ => return Some(Reply::Text(format!("❌ Unknown command '{}'. Type $help for a list.", first))),
    };

    if let Err(remaining) = cooldowns.check(command, Instant::now()) {
        return Some(Reply::Text(format!(
            "⏳ Please wait {} seconds before using this command again.",
            remaining
        )));
    }

    let result = match command {
        "price" => price::execute(ticker).await,
        "buy" => trade::execute(ticker, TradeSide::Buy, args).await,
        "sell" => trade::execute(ticker, TradeSide::Sell, args).await,
        "chart" => chart::execute(ticker),
        _ => history::execute(ticker),
    };

    Some(Reply::Text(match result {
        Ok(text) => text,
        Err(e) => {
            warn!("Error executing command {}: {}", command, e);
            format!("❌ {}", e)
        }
    }))
}

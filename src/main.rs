use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;
mod models;
mod services;
mod utils;

use commands::Cooldowns;
use config::{Config, ConfigError};
use services::poll_service::{self, Ticker};
use services::price_service::MarketSource;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    // Logs go to stderr so the ticker owns stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("luna_ticker=debug,reqwest=warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("🌙 Starting Luna ticker v{}", env!("CARGO_PKG_VERSION"));

    let config = match startup_config(Config::from_env()) {
        Ok(config) => config,
        Err(code) => return code,
    };

    let mut ticker = Ticker::new(config.market_source(), config.chart_settings());
    info!("Price source: {}", ticker.source().describe());

    if let MarketSource::Local(client) = ticker.source() {
        match client.get_status().await {
            Ok(status) => info!("Market says '{}' for {}", status.status, status.market),
            Err(e) => warn!("Market server not reachable yet: {}", e),
        }
    }

    let mut cooldowns = Cooldowns::new(config.command_cooldown);
    let input = tokio::io::BufReader::new(tokio::io::stdin());

    println!("Type $help for commands.");

    tokio::select! {
        _ = poll_service::run(&mut ticker, config.poll_interval, &mut cooldowns, input) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted");
        }
    }

    // Leave a final chart behind on the way out
    match ticker.render() {
        Ok(outcome) => info!("Final chart: {:?}", outcome),
        Err(e) => warn!("{}", e),
    }
    info!("Stopped after {} samples", ticker.tracker().len());
    ExitCode::SUCCESS
}

/// A bad configuration stops startup with a failing exit status
fn startup_config(loaded: Result<Config, ConfigError>) -> Result<Config, ExitCode> {
    loaded.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        ExitCode::FAILURE
    })
}

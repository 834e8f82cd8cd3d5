use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};
use crate::commands::{self, Cooldowns, Reply};
use crate::models::{ChartOutcome, PriceResult, TradeResult, TradeSide};
use crate::services::chart_service::{self, ChartError, ChartSettings};
use crate::services::price_service::{self, PriceSource};
use crate::services::trade_service::{self, TradeError};
use crate::services::tracker::PriceHistoryTracker;

/// Owns the price source, the history and the chart output.
///
/// One poll cycle is fetch, record, summarize, render.
pub struct Ticker<S> {
    source: S,
    tracker: PriceHistoryTracker,
    chart: ChartSettings,
    symbol: Option<String>,
}

impl<S: PriceSource> Ticker<S> {
    pub fn new(source: S, chart: ChartSettings) -> Self {
        Self {
            source,
            tracker: PriceHistoryTracker::new(),
            chart,
            symbol: None,
        }
    }

    pub fn tracker(&self) -> &PriceHistoryTracker {
        &self.tracker
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Last symbol reported by the market
    pub fn symbol(&self) -> &str {
        self.symbol.as_deref().unwrap_or("LUNA_CC")
    }

    /// Run one poll cycle.
    ///
    /// A failed fetch or a rejected sample records nothing and reports the
    /// last known price.
    pub async fn poll_once(&mut self) -> PriceResult {
        let quote = match self.source.fetch_quote().await {
            Ok(quote) => quote,
            Err(e) => {
                warn!("Failed to fetch market price: {}", e);
                return price_service::disconnected(&self.tracker);
            }
        };

        if let Err(e) = self.tracker.record(quote.price) {
            warn!("Dropping sample from market: {}", e);
            return price_service::disconnected(&self.tracker);
        }
        if quote.symbol.is_some() {
            self.symbol = quote.symbol.clone();
        }
        debug!("Recorded {} ({} samples)", quote.price, self.tracker.len());

        let result = price_service::summarize(&self.tracker, &quote);
        if let Err(e) = self.render() {
            warn!("{}", e);
        }
        result
    }

    /// Draw the chart from the current history
    pub fn render(&self) -> Result<ChartOutcome, ChartError> {
        chart_service::render_chart(&self.tracker, &self.chart)
    }

    pub async fn trade(&mut self, side: TradeSide, amount: f64) -> Result<TradeResult, TradeError> {
        let result = trade_service::execute_trade(&self.source, &mut self.tracker, side, amount).await?;
        if matches!(result, TradeResult::Executed { .. }) {
            if let Err(e) = self.render() {
                warn!("{}", e);
            }
        }
        Ok(result)
    }
}

/// Poll on a fixed interval and serve commands read from `input` until
/// `$quit`.
///
/// When `input` reaches end of file the ticker keeps polling.
pub async fn run<S, R>(ticker: &mut Ticker<S>, period: Duration, cooldowns: &mut Cooldowns, input: R)
where
    S: PriceSource,
    R: AsyncBufRead + Unpin,
{
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    let mut lines = input.lines();
    let mut input_open = true;

    info!("Polling every {}s", period.as_secs());

    // The first tick completes at once, so the initial fetch lands before any command
    interval.tick().await;
    let result = ticker.poll_once().await;
    println!("{}", commands::price::format_ticker_line(ticker.symbol(), &result));

    loop {
        tokio::select! {
            biased;

            _ = interval.tick() => {
                let result = ticker.poll_once().await;
                println!("{}", commands::price::format_ticker_line(ticker.symbol(), &result));
            }
            line = lines.next_line(), if input_open => {
                match line {
                    Ok(Some(line)) => match commands::handle_line(ticker, cooldowns, &line).await {
                        Some(Reply::Text(text)) => println!("{}", text),
                        Some(Reply::Quit) => {
                            info!("Quit requested");
                            return;
                        }
                        None => {}
                    },
                    Ok(None) => {
                        debug!("Command input closed, polling only");
                        input_open = false;
                    }
                    Err(e) => {
                        warn!("Failed to read command input: {}", e);
                        input_open = false;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::models::Trend;
    use crate::services::price_service::testing::ScriptedSource;

    fn settings(name: &str) -> ChartSettings {
        let path = std::env::temp_dir().join(format!("luna_poll_{}_{}.png", name, std::process::id()));
        ChartSettings::new(path.to_string_lossy().into_owned(), 200, 100)
    }

    #[tokio::test]
    async fn test_poll_records_and_reports_trend() {
        let source = ScriptedSource::new(vec![Ok(1.0), Ok(1.25)]);
        let chart = settings("trend");
        let mut ticker = Ticker::new(source, chart.clone());

        let first = ticker.poll_once().await;
        assert_eq!(first.display_price, "1.0000");
        assert_eq!(first.trend, Trend::Unknown);

        let second = ticker.poll_once().await;
        assert_eq!(second.display_price, "1.2500");
        assert_eq!(second.trend, Trend::Up);
        assert_eq!(second.samples, 2);
        assert!(std::path::Path::new(&chart.path).exists());
        let _ = std::fs::remove_file(&chart.path);
    }

    #[tokio::test]
    async fn test_failed_fetch_records_nothing() {
        let source = ScriptedSource::new(vec![
            Ok(2.0),
            Err(ApiError::ServerError(502, "bad gateway".to_string())),
            Ok(f64::NAN),
        ]);
        let mut ticker = Ticker::new(source, settings("failure"));

        ticker.poll_once().await;
        let failed = ticker.poll_once().await;
        assert_eq!(failed.display_price, "2.0000");
        assert_eq!(failed.status, price_service::DISCONNECTED);

        let rejected = ticker.poll_once().await;
        assert_eq!(rejected.display_price, "2.0000");
        assert_eq!(ticker.tracker().len(), 1);
    }

    #[tokio::test]
    async fn test_run_serves_commands_until_quit() {
        let source = ScriptedSource::new(vec![Ok(1.5)]);
        let mut ticker = Ticker::new(source, settings("run"));
        let mut cooldowns = Cooldowns::new(Duration::ZERO);
        let input: &[u8] = b"$history\n$quit\n$buy 5\n";

        run(&mut ticker, Duration::from_secs(3600), &mut cooldowns, input).await;

        assert_eq!(ticker.tracker().latest(), Some(1.5));
        assert!(ticker.source().orders.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_initial_fetch_happens_before_quit() {
        let source = ScriptedSource::new(vec![Ok(0.75), Ok(0.8)]);
        let mut ticker = Ticker::new(source, settings("quit"));
        let mut cooldowns = Cooldowns::new(Duration::ZERO);
        let input: &[u8] = b"$quit\n";

        run(&mut ticker, Duration::from_secs(3600), &mut cooldowns, input).await;

        assert_eq!(ticker.tracker().samples().collect::<Vec<_>>(), vec![0.75]);
    }
}

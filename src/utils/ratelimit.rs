//! Sliding-window request limiter for the free JSON store API

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

pub struct RequestLimiter {
    /// Timestamps of requests inside the current window
    request_times: VecDeque<Instant>,
    max_requests: usize,
    window: Duration,
}

impl RequestLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            request_times: VecDeque::with_capacity(max_requests),
            max_requests: max_requests.max(1),
            window,
        }
    }

    /// Limiter allowing `n` requests per rolling minute
    pub fn per_minute(n: usize) -> Self {
        Self::new(n, Duration::from_secs(60))
    }

    /// Record a request at `now`, or return how long to wait before retrying.
    ///
    /// A request is only recorded when the returned wait is zero.
    pub fn check_and_record(&mut self, now: Instant) -> Duration {
        while let Some(&front) = self.request_times.front() {
            if now.duration_since(front) >= self.window {
                self.request_times.pop_front();
            } else {
                break;
            }
        }

        if self.request_times.len() >= self.max_requests {
            if let Some(&oldest) = self.request_times.front() {
                return self.window - now.duration_since(oldest);
            }
        }

        self.request_times.push_back(now);
        Duration::ZERO
    }
}

/// Wait until `limiter` admits one more request
pub async fn wait_for_slot(limiter: &Mutex<RequestLimiter>) {
    loop {
        let wait = {
            let mut guard = limiter.lock().unwrap_or_else(|e| e.into_inner());
            guard.check_and_record(Instant::now())
        };

        if wait.is_zero() {
            return;
        }
        tracing::debug!("JSON store rate limit: waiting {}ms", wait.as_millis());
        tokio::time::sleep(wait).await;
    }
}

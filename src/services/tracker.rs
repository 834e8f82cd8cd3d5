use std::collections::VecDeque;
use thiserror::Error;
use crate::models::ChartPoint;

/// Number of samples kept for the chart
pub const HISTORY_CAPACITY: usize = 20;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackerError {
    #[error("Invalid sample: {0}")]
    InvalidSample(f64),
}

/// Rolling price history for the chart.
///
/// Holds at most [`HISTORY_CAPACITY`] samples in arrival order. The oldest
/// sample is evicted when a new one arrives at capacity.
#[derive(Debug, Clone)]
pub struct PriceHistoryTracker {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl PriceHistoryTracker {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Append a price sample, evicting the oldest one when full.
    ///
    /// Non-finite and negative prices are rejected and leave the history
    /// untouched.
    pub fn record(&mut self, price: f64) -> Result<(), TrackerError> {
        if !price.is_finite() || price < 0.0 {
            return Err(TrackerError::InvalidSample(price));
        }

        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(price);
        Ok(())
    }

    /// Project the history into normalized chart space.
    ///
    /// Yields nothing with fewer than two samples. When every sample is
    /// equal the range is taken as 1, so all points land on `y = 1`.
    pub fn project(&self) -> impl Iterator<Item = ChartPoint> + Clone + '_ {
        let count = self.samples.len();
        let (min, max) = self
            .samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &p| (lo.min(p), hi.max(p)));

        let range = if max - min == 0.0 { 1.0 } else { max - min };
        let last = count.saturating_sub(1).max(1) as f64;
        let visible = if count < 2 { 0 } else { count };

        self.samples
            .iter()
            .take(visible)
            .enumerate()
            .map(move |(i, &value)| ChartPoint {
                x: i as f64 / last,
                y: 1.0 - (value - min) / range,
            })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recent sample
    pub fn latest(&self) -> Option<f64> {
        self.samples.back().copied()
    }

    /// Sample recorded just before the latest one
    pub fn previous(&self) -> Option<f64> {
        let len = self.samples.len();
        if len < 2 {
            return None;
        }
        self.samples.get(len - 2).copied()
    }

    /// Samples in arrival order
    pub fn samples(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }
}

impl Default for PriceHistoryTracker {
    fn default() -> Self {
        Self::new()
    }
}

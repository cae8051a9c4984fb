use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Number of readings retained for the trend.
pub const HISTORY_CAPACITY: usize = 10;

/// One point on the AQI trend.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct HistorySample {
    pub time_label: String,
    pub aqi: u32,
}

impl HistorySample {
    pub fn new(time_label: impl Into<String>, aqi: u32) -> Self {
        HistorySample {
            time_label: time_label.into(),
            aqi,
        }
    }
}

/// Sliding window of the most recent readings in arrival order.
///
/// Once full, each new sample evicts the oldest one.
#[derive(Debug, PartialEq, Clone)]
pub struct History {
    samples: VecDeque<HistorySample>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        History::with_capacity(HISTORY_CAPACITY)
    }
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        History {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest when at capacity.
    pub fn record(&mut self, sample: HistorySample) -> &VecDeque<HistorySample> {
        while self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
        &self.samples
    }

    pub fn samples(&self) -> &VecDeque<HistorySample> {
        &self.samples
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistorySample> {
        self.samples.iter()
    }

    pub fn latest(&self) -> Option<&HistorySample> {
        self.samples.back()
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

    /// A trend needs at least two points to be drawn.
    pub fn has_trend(&self) -> bool {
        self.samples.len() > 1
    }

    /// Highest AQI in the window, used to size a trend axis.
    pub fn max_aqi(&self) -> Option<u32> {
        self.samples.iter().map(|s| s.aqi).max()
    }
}

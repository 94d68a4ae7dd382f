use std::collections::VecDeque;

use chrono::NaiveDateTime;

/// Samples kept for the live graph (one per tick)
pub const HISTORY_LEN: usize = 60;

/// One tick of throughput, raw bytes per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistorySample {
    pub at: NaiveDateTime,
    pub down: u64,
    pub up: u64,
}

/// Fixed-size FIFO of recent samples, oldest first
#[derive(Debug, Clone)]
pub struct HistoryWindow {
    samples: VecDeque<HistorySample>,
    capacity: usize,
}

impl Default for HistoryWindow {
    fn default() -> Self {
        Self::with_capacity(HISTORY_LEN)
    }
}

impl HistoryWindow {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn push(&mut self, sample: HistorySample) {
        self.samples.push_back(sample);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistorySample> {
        self.samples.iter()
    }

    /// Chart points `(x, value)` for one direction on an axis of `span`
    /// seconds whose right edge is the newest sample.
    ///
    /// Samples older than `span` seconds before the newest are skipped, so
    /// gaps (pause, stalls, suspend) never push current traffic off the chart.
    pub fn points(&self, span: f64, value: impl Fn(&HistorySample) -> f64) -> Vec<(f64, f64)> {
        let Some(newest) = self.samples.back() else {
            return Vec::new();
        };
        self.iter()
            .filter_map(|s| {
                let age = (newest.at - s.at).num_milliseconds() as f64 / 1000.0;
                let x = span - age;
                (0.0..=span).contains(&x).then(|| (x, value(s)))
            })
            .collect()
    }

    /// Largest single-tick byte count in either direction
    pub fn peak(&self) -> u64 {
        self.iter()
            .map(|s| s.down.max(s.up))
            .max()
            .unwrap_or(0)
    }
}

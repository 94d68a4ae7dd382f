//! Cumulative interface counters -> per-tick byte deltas

use sysinfo::Networks;

/// Cumulative bytes received/sent across all interfaces at one instant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByteSample {
    pub received: u64,
    pub sent: u64,
}

/// Anything that can report cumulative interface counters
pub trait CounterSource {
    fn read_counters(&mut self) -> ByteSample;
}

/// OS counters via `sysinfo`, summed over every interface
pub struct SysinfoCounters {
    networks: Networks,
}

impl SysinfoCounters {
    pub fn new() -> Self {
        Self {
            networks: Networks::new_with_refreshed_list(),
        }
    }
}

impl Default for SysinfoCounters {
    fn default() -> Self {
        Self::new()
    }
}

impl CounterSource for SysinfoCounters {
    fn read_counters(&mut self) -> ByteSample {
        // true = drop interfaces that disappeared since the last refresh
        self.networks.refresh(true);

        let mut sample = ByteSample::default();
        for (_name, data) in self.networks.iter() {
            sample.received = sample.received.saturating_add(data.total_received());
            sample.sent = sample.sent.saturating_add(data.total_transmitted());
        }
        sample
    }
}

/// Delta tracker over a [`CounterSource`]
pub struct Sampler {
    source: Box<dyn CounterSource>,
    previous: ByteSample,
}

impl Sampler {
    /// Reads the source once so the first tick measures from startup.
    pub fn new(mut source: Box<dyn CounterSource>) -> Self {
        let previous = source.read_counters();
        Self { source, previous }
    }

    /// Bytes `(down, up)` moved since the previous call.
    ///
    /// A counter that went backwards (interface restart, counter reset or
    /// wraparound) yields zero for this tick and becomes the new baseline.
    pub fn sample(&mut self) -> (u64, u64) {
        let current = self.source.read_counters();
        let down = current.received.checked_sub(self.previous.received).unwrap_or(0);
        let up = current.sent.checked_sub(self.previous.sent).unwrap_or(0);
        self.previous = current;
        (down, up)
    }
}

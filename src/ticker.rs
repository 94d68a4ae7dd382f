//! Fixed-rate tick schedule with a shared stop flag

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// One sampling/accounting cycle per second
pub const TICK_RATE_MS: u64 = 1000;

/// Longest sleep between stop-flag checks in [`Ticker::wait`]
const WAIT_SLICE: Duration = Duration::from_millis(50);

/// Cloneable cancel handle shared between the tick loop and signal handlers
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Repeating schedule. The first tick is due one interval after creation.
#[derive(Debug)]
pub struct Ticker {
    interval: Duration,
    next_due: Instant,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self::starting_at(interval, Instant::now())
    }

    pub fn starting_at(interval: Duration, start: Instant) -> Self {
        Self {
            interval,
            next_due: start + interval,
        }
    }

    /// Non-blocking check for event-polling loops. Consumes the tick when due.
    ///
    /// Missed ticks are not replayed: after a stall the schedule restarts
    /// from `now`.
    pub fn is_due(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due += self.interval;
        if self.next_due <= now {
            self.next_due = now + self.interval;
        }
        true
    }

    /// Time left until the next tick
    pub fn remaining(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }

    /// Block until the next tick. Returns `false` once `stop` is set.
    pub fn wait(&mut self, stop: &StopHandle) -> bool {
        loop {
            if stop.is_stopped() {
                return false;
            }
            let now = Instant::now();
            if self.is_due(now) {
                return true;
            }
            thread::sleep(self.remaining(now).min(WAIT_SLICE));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn due_once_per_interval() {
        let start = Instant::now();
        let second = Duration::from_secs(1);
        let mut ticker = Ticker::starting_at(second, start);

        assert!(!ticker.is_due(start));
        assert!(!ticker.is_due(start + Duration::from_millis(999)));
        assert!(ticker.is_due(start + second));
        assert!(!ticker.is_due(start + Duration::from_millis(1500)));
        assert!(ticker.is_due(start + Duration::from_millis(2000)));
    }

    #[test]
    fn stall_does_not_replay_missed_ticks() {
        let start = Instant::now();
        let second = Duration::from_secs(1);
        let mut ticker = Ticker::starting_at(second, start);

        let late = start + Duration::from_secs(10);
        assert!(ticker.is_due(late));
        assert!(!ticker.is_due(late));
        assert_eq!(ticker.remaining(late), second);
    }

    #[test]
    fn wait_returns_false_when_stopped() {
        let stop = StopHandle::new();
        let mut ticker = Ticker::new(Duration::from_secs(3600));
        stop.stop();

        assert!(!ticker.wait(&stop));
    }

    #[test]
    fn wait_returns_after_interval() {
        let stop = StopHandle::new();
        let mut ticker = Ticker::new(Duration::from_millis(10));

        assert!(ticker.wait(&stop));
        assert!(!stop.is_stopped());
    }

    #[test]
    fn stop_is_shared_between_clones() {
        let stop = StopHandle::new();
        let other = stop.clone();
        let mut ticker = Ticker::new(Duration::from_secs(3600));

        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            other.stop();
        });

        assert!(!ticker.wait(&stop));
        handle.join().unwrap();
    }
}

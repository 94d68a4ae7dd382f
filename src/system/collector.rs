use chrono::NaiveDateTime;
use log::{debug, info, warn};

use crate::app::App;
use crate::system::network::NetworkInfo;
use crate::system::sampler::{CounterSource, Sampler};
use crate::usage::storage::{load_or_default, StoreError, UsageStore};
use crate::usage::UsageAccumulator;

/// The tick handler: the only owner and mutator of the usage accumulator
pub struct Collector {
    sampler: Sampler,
    store: Box<dyn UsageStore>,
    usage: UsageAccumulator,
}

impl Collector {
    /// Load saved totals (or start fresh) and prime the counter baseline
    pub fn new(source: Box<dyn CounterSource>, store: Box<dyn UsageStore>, now: NaiveDateTime) -> Self {
        let usage = load_or_default(store.as_ref(), now);
        debug!("usage state anchored at {}", usage.last_reset);
        Self {
            sampler: Sampler::new(source),
            store,
            usage,
        }
    }

    pub fn usage(&self) -> &UsageAccumulator {
        &self.usage
    }

    /// One tick: sample, account, persist, then publish to the App
    pub fn tick(&mut self, app: &mut App, now: NaiveDateTime) {
        let info = self.account(now);
        match self.persist() {
            Ok(()) => app.persist_error = None,
            Err(e) => app.persist_error = Some(e.to_string()),
        }
        app.record_tick(info, &self.usage, now);
    }

    /// Final flush on shutdown: account whatever moved since the last tick
    pub fn shutdown(&mut self, now: NaiveDateTime) -> Result<(), StoreError> {
        self.account(now);
        self.persist()
    }

    fn account(&mut self, now: NaiveDateTime) -> NetworkInfo {
        let (down_bytes, up_bytes) = self.sampler.sample();
        let resets = self.usage.apply(down_bytes, up_bytes, now);
        if !resets.is_empty() {
            info!("usage rollover at {}: reset {:?}", now, resets);
        }
        NetworkInfo { down_bytes, up_bytes }
    }

    /// Write failures are not fatal: in-memory totals stay authoritative and
    /// the next tick tries again.
    fn persist(&mut self) -> Result<(), StoreError> {
        self.store.save(&self.usage).map_err(|e| {
            warn!("failed to save usage state: {}", e);
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use chrono::{Duration, NaiveDate};

    use super::*;
    use crate::config::NetspeedConfig;
    use crate::system::sampler::testing::ScriptedCounters;
    use crate::usage::{MemoryStore, UsageStore};

    fn at(d: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, d)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    /// Memory store shared with the test so saved bytes can be inspected
    #[derive(Clone, Default)]
    struct SharedStore {
        inner: Rc<RefCell<MemoryStore>>,
        saves: Rc<RefCell<usize>>,
        fail: Rc<RefCell<bool>>,
    }

    impl UsageStore for SharedStore {
        fn load(&self) -> Result<UsageAccumulator, StoreError> {
            self.inner.borrow().load()
        }

        fn save(&mut self, usage: &UsageAccumulator) -> Result<(), StoreError> {
            if *self.fail.borrow() {
                return Err(StoreError::Io(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read-only",
                )));
            }
            *self.saves.borrow_mut() += 1;
            self.inner.borrow_mut().save(usage)
        }
    }

    fn app(now: NaiveDateTime) -> App {
        App::new(&NetspeedConfig::default(), UsageAccumulator::new(now))
    }

    #[test]
    fn tick_accounts_persists_and_publishes() {
        let start = at(10, 12, 0, 0);
        let store = SharedStore::default();
        let source = ScriptedCounters::new(&[(1000, 100), (3048, 612), (3048, 612)]);
        let mut collector = Collector::new(Box::new(source), Box::new(store.clone()), start);
        let mut app = app(start);

        collector.tick(&mut app, start + Duration::seconds(1));
        collector.tick(&mut app, start + Duration::seconds(2));

        assert_eq!(*store.saves.borrow(), 2);
        let saved = store.load().unwrap();
        assert_eq!(saved.day_download, 2048);
        assert_eq!(saved.year_upload, 512);
        assert_eq!(saved.last_reset, start + Duration::seconds(2));
        assert_eq!(&saved, collector.usage());

        assert_eq!(app.usage, saved);
        assert_eq!(app.history.iter().count(), 2);
        assert_eq!(app.down_label, "↓ 0.0 KB/s");
        assert!(app.persist_error.is_none());
    }

    #[test]
    fn resumes_from_saved_state() {
        let start = at(10, 12, 0, 0);
        let mut seeded = UsageAccumulator::new(start);
        seeded.apply(5000, 7000, start);
        let store = SharedStore::default();
        store.inner.borrow_mut().save(&seeded).unwrap();

        let source = ScriptedCounters::new(&[(0, 0), (100, 10)]);
        let mut collector = Collector::new(Box::new(source), Box::new(store.clone()), start);
        let mut app = app(start);
        collector.tick(&mut app, start + Duration::seconds(1));

        assert_eq!(collector.usage().day_download, 5100);
        assert_eq!(collector.usage().month_upload, 7010);
    }

    #[test]
    fn day_rollover_between_ticks() {
        let late = at(10, 23, 59, 59);
        let store = SharedStore::default();
        let source = ScriptedCounters::new(&[(0, 0), (100, 50), (300, 60)]);
        let mut collector = Collector::new(Box::new(source), Box::new(store), late);
        let mut app = app(late);

        collector.tick(&mut app, late);
        collector.tick(&mut app, at(11, 0, 0, 1));

        assert_eq!(collector.usage().day_download, 200);
        assert_eq!(collector.usage().month_download, 300);
    }

    #[test]
    fn write_failure_keeps_memory_state_and_recovers() {
        let start = at(10, 12, 0, 0);
        let store = SharedStore::default();
        let source = ScriptedCounters::new(&[(0, 0), (10, 1), (30, 2)]);
        let mut collector = Collector::new(Box::new(source), Box::new(store.clone()), start);
        let mut app = app(start);

        *store.fail.borrow_mut() = true;
        collector.tick(&mut app, start + Duration::seconds(1));
        assert!(app.persist_error.is_some());
        assert_eq!(collector.usage().day_download, 10);
        assert!(store.load().is_err());

        *store.fail.borrow_mut() = false;
        collector.tick(&mut app, start + Duration::seconds(2));
        assert!(app.persist_error.is_none());
        assert_eq!(store.load().unwrap().day_download, 30);
    }

    #[test]
    fn shutdown_flushes_final_sample() {
        let start = at(10, 12, 0, 0);
        let store = SharedStore::default();
        let source = ScriptedCounters::new(&[(0, 0), (64, 32)]);
        let mut collector = Collector::new(Box::new(source), Box::new(store.clone()), start);

        collector.shutdown(start + Duration::milliseconds(400)).unwrap();

        let saved = store.load().unwrap();
        assert_eq!(saved.day_download, 64);
        assert_eq!(saved.day_upload, 32);
    }
}

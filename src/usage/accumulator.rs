//! Rolling day/week/month/year byte totals.
//!
//! Every tick hands the accumulator the bytes moved since the previous tick.
//! Before adding them, each bucket checks whether the calendar period of the
//! new tick differs from the one of `last_reset`; buckets whose period changed
//! start over from zero. Resets are independent of each other, so a new month
//! never clears the week bucket unless the ISO week changed as well.

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Calendar period tracked by one bucket per direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Day,
    Week,
    Month,
    Year,
}

impl Period {
    pub const ALL: [Period; 4] = [Period::Day, Period::Week, Period::Month, Period::Year];

    pub fn label(&self) -> &'static str {
        match self {
            Period::Day => "Today",
            Period::Week => "This Week",
            Period::Month => "This Month",
            Period::Year => "This Year",
        }
    }

    /// True when `now` falls into a different period than `last`.
    ///
    /// Weeks are ISO weeks (Monday start) and carry their ISO year, months
    /// carry their year, so a gap of exactly one year still counts as a new
    /// week or month.
    pub fn crossed(&self, last: NaiveDateTime, now: NaiveDateTime) -> bool {
        match self {
            Period::Day => last.date() != now.date(),
            Period::Week => last.iso_week() != now.iso_week(),
            Period::Month => (last.year(), last.month()) != (now.year(), now.month()),
            Period::Year => last.year() != now.year(),
        }
    }
}

/// Traffic direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Download,
    Upload,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Download, Direction::Upload];

    pub fn label(&self) -> &'static str {
        match self {
            Direction::Download => "Download",
            Direction::Upload => "Upload",
        }
    }
}

/// Persisted usage totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageAccumulator {
    pub day_download: u64,
    pub week_download: u64,
    pub month_download: u64,
    pub year_download: u64,
    pub day_upload: u64,
    pub week_upload: u64,
    pub month_upload: u64,
    pub year_upload: u64,
    /// Local time of the last applied tick
    pub last_reset: NaiveDateTime,
}

impl UsageAccumulator {
    /// Empty totals anchored at `now`
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            day_download: 0,
            week_download: 0,
            month_download: 0,
            year_download: 0,
            day_upload: 0,
            week_upload: 0,
            month_upload: 0,
            year_upload: 0,
            last_reset: now,
        }
    }

    /// Periods whose boundary lies between `last_reset` and `now`
    pub fn crossed_periods(&self, now: NaiveDateTime) -> Vec<Period> {
        Period::ALL
            .iter()
            .copied()
            .filter(|p| p.crossed(self.last_reset, now))
            .collect()
    }

    /// Totals as they stand at `now` without recording a tick.
    ///
    /// Buckets whose period ended since `last_reset` read as zero;
    /// `last_reset` itself is kept so callers can still show when the
    /// totals were last written.
    pub fn as_of(&self, now: NaiveDateTime) -> Self {
        let mut view = self.clone();
        for period in self.crossed_periods(now) {
            view.reset(period);
        }
        view
    }

    /// Account one tick worth of traffic.
    ///
    /// All resets happen first, then both deltas are added exactly once to
    /// every bucket. Returns the periods that were reset.
    pub fn apply(&mut self, down_bytes: u64, up_bytes: u64, now: NaiveDateTime) -> Vec<Period> {
        let crossed = self.crossed_periods(now);
        for period in &crossed {
            self.reset(*period);
        }

        for period in Period::ALL {
            let down = self.bucket_mut(Direction::Download, period);
            *down = down.saturating_add(down_bytes);
            let up = self.bucket_mut(Direction::Upload, period);
            *up = up.saturating_add(up_bytes);
        }

        self.last_reset = now;
        crossed
    }

    pub fn bucket(&self, direction: Direction, period: Period) -> u64 {
        match (direction, period) {
            (Direction::Download, Period::Day) => self.day_download,
            (Direction::Download, Period::Week) => self.week_download,
            (Direction::Download, Period::Month) => self.month_download,
            (Direction::Download, Period::Year) => self.year_download,
            (Direction::Upload, Period::Day) => self.day_upload,
            (Direction::Upload, Period::Week) => self.week_upload,
            (Direction::Upload, Period::Month) => self.month_upload,
            (Direction::Upload, Period::Year) => self.year_upload,
        }
    }

    fn bucket_mut(&mut self, direction: Direction, period: Period) -> &mut u64 {
        match (direction, period) {
            (Direction::Download, Period::Day) => &mut self.day_download,
            (Direction::Download, Period::Week) => &mut self.week_download,
            (Direction::Download, Period::Month) => &mut self.month_download,
            (Direction::Download, Period::Year) => &mut self.year_download,
            (Direction::Upload, Period::Day) => &mut self.day_upload,
            (Direction::Upload, Period::Week) => &mut self.week_upload,
            (Direction::Upload, Period::Month) => &mut self.month_upload,
            (Direction::Upload, Period::Year) => &mut self.year_upload,
        }
    }

    /// Zero both directions of one period
    fn reset(&mut self, period: Period) {
        for direction in Direction::ALL {
            *self.bucket_mut(direction, period) = 0;
        }
    }
}

//! Accumulated counters kept alongside the ledger.

use std::fmt;

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: u64 = 24 * MS_PER_HOUR;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stats {
    /// Manual clicks count.
    pub total_clicks: u64,
    /// Total cookies earned all-time. Never decreases; purchases do not touch it.
    pub total_earned: f64,
    /// Milliseconds since the Unix epoch at which playtime tracking started.
    pub session_start_ms: u64,
}

impl Stats {
    pub fn new(session_start_ms: u64) -> Self {
        Self {
            session_start_ms,
            ..Self::default()
        }
    }

    pub fn record_click(&mut self, credited: f64) {
        self.total_clicks += 1;
        self.total_earned += credited;
    }

    pub fn record_production(&mut self, produced: f64) {
        self.total_earned += produced;
    }

    /// Wall-clock time since the session epoch, offline time included.
    pub fn playtime(&self, now_ms: u64) -> Playtime {
        Playtime::from_millis(now_ms.saturating_sub(self.session_start_ms))
    }
}

/// Elapsed playtime broken into whole units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Playtime {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Playtime {
    pub fn from_millis(ms: u64) -> Self {
        Self {
            days: ms / MS_PER_DAY,
            hours: (ms % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (ms % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (ms % MS_PER_MINUTE) / MS_PER_SECOND,
        }
    }
}

impl fmt::Display for Playtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}d {}h {}m {}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

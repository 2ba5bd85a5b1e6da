//! Time sources: a fixed-timestep tick clock and a wall clock.
//!
//! The browser redraws at a variable frame rate. [`TickClock`] converts frame
//! timestamps into a whole number of production ticks, making the tick loop
//! deterministic and fully testable. [`Clock`] supplies wall-clock time for
//! the playtime epoch.

use std::cell::Cell;
use std::rc::Rc;

pub struct TickClock {
    /// Milliseconds per tick (1000ms = one production tick per second)
    ms_per_tick: f64,
    /// Largest frame delta honoured, in ms
    max_delta_ms: f64,
    /// Accumulated milliseconds not yet consumed as ticks
    accumulator: f64,
    /// Total elapsed ticks since creation
    pub total_ticks: u64,
    /// Timestamp of the last update (ms), None if first frame
    last_timestamp: Option<f64>,
}

impl TickClock {
    pub fn new(ms_per_tick: f64, max_delta_ms: f64) -> Self {
        Self {
            ms_per_tick,
            max_delta_ms,
            accumulator: 0.0,
            total_ticks: 0,
            last_timestamp: None,
        }
    }

    /// Feed a frame timestamp (from `performance.now()` or similar).
    /// Returns the number of ticks to run this frame.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).clamp(0.0, self.max_delta_ms),
            None => 0.0, // First frame: no delta
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        self.total_ticks += ticks as u64;
        ticks
    }
}

/// Wall-clock time in milliseconds since the Unix epoch.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// The real clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[cfg(target_arch = "wasm32")]
    fn now_ms(&self) -> u64 {
        // std::time::SystemTime panics on wasm32-unknown-unknown.
        js_sys::Date::now() as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn now_ms(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// A settable clock. Clones share the same time.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new(now_ms: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(now_ms)),
        }
    }

    pub fn set(&self, now_ms: u64) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock() -> TickClock {
        TickClock::new(1000.0, 5000.0)
    }

    #[test]
    fn first_frame_returns_zero_ticks() {
        let mut tc = clock();
        assert_eq!(tc.update(12_345.0), 0);
    }

    #[test]
    fn one_tick_per_second() {
        let mut tc = clock();
        tc.update(0.0);
        assert_eq!(tc.update(1000.0), 1);
        assert_eq!(tc.total_ticks, 1);
    }

    #[test]
    fn remainder_carried_over() {
        let mut tc = clock();
        tc.update(0.0);
        assert_eq!(tc.update(1500.0), 1); // 500ms remainder
        assert_eq!(tc.update(2000.0), 1); // 500 + 500
        assert_eq!(tc.total_ticks, 2);
    }

    #[test]
    fn clamp_large_delta() {
        let mut tc = clock();
        tc.update(0.0);
        // 60 second gap clamped to 5 seconds
        assert_eq!(tc.update(60_000.0), 5);
    }

    #[test]
    fn backwards_timestamp_is_ignored() {
        let mut tc = clock();
        tc.update(5_000.0);
        assert_eq!(tc.update(1_000.0), 0);
        assert_eq!(tc.update(2_000.0), 1);
    }

    #[test]
    fn steady_60fps() {
        let mut tc = clock();
        tc.update(0.0);
        let mut total = 0u32;
        // 180 frames at ~16.67ms each = 3 seconds
        for i in 1..=180 {
            total += tc.update(i as f64 * 16.667);
        }
        assert!((2..=3).contains(&total), "expected ~3 ticks, got {}", total);
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let a = ManualClock::new(100);
        let b = a.clone();
        a.advance(50);
        assert_eq!(b.now_ms(), 150);
        b.set(7);
        assert_eq!(a.now_ms(), 7);
    }

    #[test]
    fn system_clock_is_after_2020() {
        assert!(SystemClock.now_ms() > 1_577_836_800_000);
    }
}

//! Host trait and implementations

use std::cell::Cell;
use std::time::{Duration, Instant};

use chrono::Datelike;

/// Host abstraction trait
///
/// Everything an enhancement needs from its environment besides the page
/// itself. Values are queried on demand and never cached by callers.
pub trait Host {
    /// Get the host name
    ///
    /// Returns a string like "system" or "manual".
    fn name(&self) -> &'static str;

    /// Current monotonic time
    fn now(&self) -> Instant;

    /// Whether the user asked the system to minimize non-essential motion
    fn prefers_reduced_motion(&self) -> bool;

    /// Current calendar year in the host's local time zone
    fn local_year(&self) -> i32;
}

/// Host backed by the wall clock and the local calendar
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemHost {
    reduced_motion: bool,
}

impl SystemHost {
    /// Create a system host with the given motion preference
    pub fn new(reduced_motion: bool) -> Self {
        Self { reduced_motion }
    }
}

impl Host for SystemHost {
    fn name(&self) -> &'static str {
        "system"
    }

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn local_year(&self) -> i32 {
        chrono::Local::now().year()
    }
}

/// Deterministic host for tests and headless replay
///
/// Time only moves when [`ManualHost::advance`] is called. Interior
/// mutability lets event handlers hold `&ManualHost` while a driver
/// advances the clock between events.
#[derive(Debug)]
pub struct ManualHost {
    origin: Instant,
    elapsed: Cell<Duration>,
    reduced_motion: Cell<bool>,
    year: Cell<i32>,
}

impl Default for ManualHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualHost {
    /// Create a manual host at time zero, full motion, year taken from the local calendar
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Cell::new(Duration::ZERO),
            reduced_motion: Cell::new(false),
            year: Cell::new(chrono::Local::now().year()),
        }
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        self.elapsed.set(self.elapsed.get() + by);
    }

    /// Time elapsed since the host was created
    pub fn elapsed(&self) -> Duration {
        self.elapsed.get()
    }

    /// Set the reduced-motion preference
    pub fn set_reduced_motion(&self, reduced: bool) {
        self.reduced_motion.set(reduced);
    }

    /// Pin the reported calendar year
    pub fn set_year(&self, year: i32) {
        self.year.set(year);
    }
}

impl Host for ManualHost {
    fn name(&self) -> &'static str {
        "manual"
    }

    fn now(&self) -> Instant {
        self.origin + self.elapsed.get()
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion.get()
    }

    fn local_year(&self) -> i32 {
        self.year.get()
    }
}

//! Throttle and debounce
//!
//! Both limiters are plain values: they remember an instant and answer
//! questions about the time they are handed. Nothing here reads a clock or
//! spawns a timer, so the same event stream always produces the same fires.

use std::time::{Duration, Instant};

/// Fire at most once per interval (leading edge)
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last_fired: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_fired: None,
        }
    }

    /// Record a trigger at `now`; returns `true` if it should fire
    ///
    /// The first trigger always fires. Later triggers fire once at least
    /// `interval` has passed since the last one that fired.
    pub fn try_fire(&mut self, now: Instant) -> bool {
        let ready = match self.last_fired {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        };
        if ready {
            self.last_fired = Some(now);
        }
        ready
    }
}

/// Fire once input has been quiet for a delay (trailing edge)
#[derive(Debug, Clone)]
pub struct Debounce {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Record a trigger at `now`, superseding any pending one
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Whether a fire is pending
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Instant the pending fire is due, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns `true` exactly once when the pending deadline has passed
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_throttle_leading_edge() {
        let t0 = Instant::now();
        let mut throttle = Throttle::new(ms(100));

        assert!(throttle.try_fire(t0));
        assert!(!throttle.try_fire(t0 + ms(16)));
        assert!(!throttle.try_fire(t0 + ms(99)));
        assert!(throttle.try_fire(t0 + ms(100)));
        assert!(!throttle.try_fire(t0 + ms(150)));
        assert!(throttle.try_fire(t0 + ms(216)));
    }

    #[test]
    fn test_throttle_high_frequency_stream() {
        let t0 = Instant::now();
        let mut throttle = Throttle::new(ms(100));

        // 60 events at ~60fps over one second
        let fires = (0..60)
            .filter(|i| throttle.try_fire(t0 + ms(i * 16)))
            .count();
        assert!((9..=11).contains(&fires), "fired {fires} times");
    }

    #[test]
    fn test_debounce_fires_after_quiet_period() {
        let t0 = Instant::now();
        let mut debounce = Debounce::new(ms(200));

        assert!(!debounce.poll(t0));
        debounce.schedule(t0);
        assert!(!debounce.poll(t0 + ms(199)));
        assert!(debounce.poll(t0 + ms(200)));
        // Fires once
        assert!(!debounce.poll(t0 + ms(400)));
        assert!(!debounce.is_pending());
    }

    #[test]
    fn test_debounce_newer_trigger_supersedes() {
        let t0 = Instant::now();
        let mut debounce = Debounce::new(ms(200));

        for i in 0..10 {
            debounce.schedule(t0 + ms(i * 50));
        }
        // Last trigger at 450ms, so nothing before 650ms
        assert!(!debounce.poll(t0 + ms(640)));
        assert_eq!(debounce.deadline(), Some(t0 + ms(650)));
        assert!(debounce.poll(t0 + ms(650)));
    }
}

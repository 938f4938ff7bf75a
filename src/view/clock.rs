use std::time::{Duration, Instant};

/******************************************\
|==========================================|
|               Time Source                |
|==========================================|
\******************************************/

/// Monotonic time measured from an arbitrary epoch.
///
/// The countdown refresh path reads the clock through this trait so the
/// display logic can be driven with a fake source in tests instead of real
/// elapsed time.
pub trait TimeSource {
    fn now(&self) -> Duration;
}

/// The production time source, anchored at its creation instant
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    epoch: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicClock {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }
}

/******************************************\
|==========================================|
|                Countdown                 |
|==========================================|
\******************************************/

/// # Countdown
///
/// One player's remaining clock. The feed delivers a remaining time with
/// each position; between feed updates the running side's display ticks
/// down locally, the idle side's stands still.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: Duration,
    synced_at: Duration,
    running: bool,
}

impl Countdown {
    pub const fn new() -> Self {
        Self {
            remaining: Duration::ZERO,
            synced_at: Duration::ZERO,
            running: false,
        }
    }

    /// Re-anchors the countdown on a feed update
    pub fn sync(&mut self, remaining: Duration, now: Duration, running: bool) {
        self.remaining = remaining;
        self.synced_at = now;
        self.running = running;
    }

    /// Remaining time at `now`, never below zero
    pub fn remaining_at(&self, now: Duration) -> Duration {
        if self.running {
            self.remaining
                .saturating_sub(now.saturating_sub(self.synced_at))
        } else {
            self.remaining
        }
    }

    /// Formats the remaining time for display
    pub fn display(&self, source: &impl TimeSource) -> String {
        format_clock(self.remaining_at(source.now()))
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats a duration as `m:ss`, or `h:mm:ss` from one hour up
pub fn format_clock(duration: Duration) -> String {
    let total = duration.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeTime(Duration);

    impl TimeSource for FakeTime {
        fn now(&self) -> Duration {
            self.0
        }
    }

    #[test]
    fn test_format_boundaries() {
        assert_eq!(format_clock(Duration::from_secs(0)), "0:00");
        assert_eq!(format_clock(Duration::from_secs(59)), "0:59");
        assert_eq!(format_clock(Duration::from_secs(60)), "1:00");
        assert_eq!(format_clock(Duration::from_secs(3599)), "59:59");
        assert_eq!(format_clock(Duration::from_secs(3600)), "1:00:00");
        assert_eq!(format_clock(Duration::from_secs(3661)), "1:01:01");
    }

    #[test]
    fn test_running_countdown_ticks() {
        let mut clock = Countdown::new();
        clock.sync(Duration::from_secs(90), Duration::from_secs(10), true);

        assert_eq!(clock.display(&FakeTime(Duration::from_secs(10))), "1:30");
        assert_eq!(clock.display(&FakeTime(Duration::from_secs(25))), "1:15");
    }

    #[test]
    fn test_idle_countdown_stands_still() {
        let mut clock = Countdown::new();
        clock.sync(Duration::from_secs(90), Duration::from_secs(10), false);

        assert_eq!(clock.display(&FakeTime(Duration::from_secs(500))), "1:30");
    }

    #[test]
    fn test_countdown_saturates_at_zero() {
        let mut clock = Countdown::new();
        clock.sync(Duration::from_secs(5), Duration::ZERO, true);

        assert_eq!(
            clock.remaining_at(Duration::from_secs(60)),
            Duration::ZERO
        );
    }
}

//! Time abstraction traits for platform-agnostic timing.
//!
//! Durations are expressed with microsecond resolution so elapsed-time
//! diagnostics can be truncated to whole milliseconds the same way on every
//! platform.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to whole microseconds.
    fn as_micros(&self) -> u64;

    /// Converts duration to milliseconds, truncating any sub-millisecond part.
    fn as_millis(&self) -> u64 {
        self.as_micros() / 1000
    }

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant (ZERO if `earlier` is later).
    fn duration_since(&self, earlier: Self) -> Self::Duration;

    /// Adds duration to instant, returns None on overflow.
    fn checked_add(self, duration: Self::Duration) -> Option<Self>;
}

#[cfg(feature = "fugit")]
mod fugit_impls {
    use super::{TimeDuration, TimeInstant};
    use fugit::{MicrosDurationU64, TimerInstantU64};

    impl TimeDuration for MicrosDurationU64 {
        const ZERO: Self = MicrosDurationU64::from_ticks(0);

        fn as_micros(&self) -> u64 {
            self.to_micros()
        }

        fn from_millis(millis: u64) -> Self {
            MicrosDurationU64::millis(millis)
        }
    }

    impl TimeInstant for TimerInstantU64<1_000_000> {
        type Duration = MicrosDurationU64;

        fn duration_since(&self, earlier: Self) -> Self::Duration {
            let ticks = self.ticks().saturating_sub(earlier.ticks());
            MicrosDurationU64::from_ticks(ticks)
        }

        fn checked_add(self, duration: Self::Duration) -> Option<Self> {
            let ticks = self.ticks().checked_add(duration.to_micros())?;
            Some(TimerInstantU64::from_ticks(ticks))
        }
    }
}

//! Hardware timer wrapper for oneshot-sequencer time traits.
//!
//! The RP2040 timer counts microseconds in a 64-bit register; the fugit types
//! it returns already implement the sequencer's `TimeInstant`/`TimeDuration`
//! (crate feature `fugit`).

use oneshot_sequencer::TimeSource;
use rp_pico::hal::Timer;

/// Instant type returned by the RP2040 timer
pub type Instant = fugit::TimerInstantU64<1_000_000>;

/// Duration type matching [`Instant`]
pub type Duration = fugit::MicrosDurationU64;

/// Time source wrapper around RP2040 Timer
pub struct HardwareTimer {
    timer: Timer,
}

impl HardwareTimer {
    pub fn new(timer: Timer) -> Self {
        Self { timer }
    }
}

impl TimeSource<Instant> for HardwareTimer {
    fn now(&self) -> Instant {
        self.timer.get_counter()
    }
}

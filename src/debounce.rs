//! Push-button debouncing.
//!
//! Two detectors turn an active-low input into one press event per physical
//! press:
//!
//! - [`BlockingDebouncer`] samples, waits the settle time, re-samples and then
//!   spins until release. Simple, but stalls the caller while the button is held.
//! - [`EdgeDebouncer`] never blocks. It latches a press once the input has been
//!   low for the settle time and reports it on release.
//!
//! Both report `true` only after the button is released, so a held button
//! yields exactly one event.

use crate::time::{TimeDuration, TimeInstant, TimeSource};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;

/// Something the main loop can poll for debounced presses.
pub trait PressDetector {
    /// Returns `true` exactly once per accepted physical press.
    fn poll(&mut self) -> bool;
}

/// Reads an active-low button. A failed read counts as "not pressed".
fn is_pressed<P: InputPin>(pin: &mut P) -> bool {
    match pin.is_low() {
        Ok(low) => low,
        Err(_) => {
            warn!("button read failed");
            false
        }
    }
}

/// Debouncer that blocks for the settle time and for as long as the button is held.
pub struct BlockingDebouncer<P: InputPin, D: DelayNs> {
    pin: P,
    delay: D,
    settle_ms: u32,
}

impl<P: InputPin, D: DelayNs> BlockingDebouncer<P, D> {
    /// Creates a debouncer with a custom settle time.
    pub fn new(pin: P, delay: D, settle_ms: u32) -> Self {
        Self {
            pin,
            delay,
            settle_ms,
        }
    }

    /// Releases the pin and delay provider.
    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }
}

impl<P: InputPin, D: DelayNs> PressDetector for BlockingDebouncer<P, D> {
    fn poll(&mut self) -> bool {
        if !is_pressed(&mut self.pin) {
            return false;
        }

        self.delay.delay_ms(self.settle_ms);
        if !is_pressed(&mut self.pin) {
            trace!("button glitch rejected");
            return false;
        }

        while is_pressed(&mut self.pin) {
            core::hint::spin_loop();
        }
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Latch<I> {
    Released,
    Settling { since: I },
    Held,
}

/// Non-blocking debouncer driven by a time source.
///
/// Each `poll` takes one sample. A low level must be observed continuously for
/// at least `settle_ms` before the press is latched; any high sample before that
/// discards it. A latched press is reported on the first high sample after it.
pub struct EdgeDebouncer<'t, P, I, T>
where
    P: InputPin,
    I: TimeInstant,
    T: TimeSource<I>,
{
    pin: P,
    time_source: &'t T,
    settle_ms: u64,
    latch: Latch<I>,
}

impl<'t, P, I, T> EdgeDebouncer<'t, P, I, T>
where
    P: InputPin,
    I: TimeInstant,
    T: TimeSource<I>,
{
    pub fn new(pin: P, time_source: &'t T, settle_ms: u32) -> Self {
        Self {
            pin,
            time_source,
            settle_ms: settle_ms as u64,
            latch: Latch::Released,
        }
    }

    /// True once a press has been confirmed and is waiting for release.
    pub fn is_held(&self) -> bool {
        matches!(self.latch, Latch::Held)
    }

    pub fn release(self) -> P {
        self.pin
    }
}

impl<'t, P, I, T> PressDetector for EdgeDebouncer<'t, P, I, T>
where
    P: InputPin,
    I: TimeInstant,
    T: TimeSource<I>,
{
    fn poll(&mut self) -> bool {
        let pressed = is_pressed(&mut self.pin);

        match self.latch {
            Latch::Released => {
                if pressed {
                    self.latch = Latch::Settling {
                        since: self.time_source.now(),
                    };
                }
                false
            }
            Latch::Settling { since } => {
                if !pressed {
                    trace!("button glitch rejected");
                    self.latch = Latch::Released;
                } else if self.time_source.now().duration_since(since).as_millis() >= self.settle_ms {
                    self.latch = Latch::Held;
                }
                false
            }
            Latch::Held => {
                if pressed {
                    return false;
                }
                self.latch = Latch::Released;
                true
            }
        }
    }
}

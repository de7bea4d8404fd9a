//! Indicator output abstraction.

use crate::types::OutputChannel;
use embedded_hal::digital::OutputPin;

/// Trait for abstracting the three indicator outputs.
///
/// Implement this for your hardware (GPIO, shift register, I/O expander...) to
/// allow the controller to drive it.
pub trait IndicatorOutputs {
    /// Switches `channel` on or off.
    ///
    /// Handle any hardware errors internally - this method cannot fail.
    fn set(&mut self, channel: OutputChannel, on: bool);

    /// Switches every channel on.
    fn all_on(&mut self) {
        for channel in OutputChannel::ALL {
            self.set(channel, true);
        }
    }
}

/// Indicator outputs backed by three GPIO pins.
///
/// Handles active-low wiring (common anode) by inverting the pin level.
pub struct PinOutputs<R, G, B>
where
    R: OutputPin,
    G: OutputPin,
    B: OutputPin,
{
    red: R,
    green: G,
    blue: B,
    active_low: bool,
}

impl<R, G, B> PinOutputs<R, G, B>
where
    R: OutputPin,
    G: OutputPin,
    B: OutputPin,
{
    /// Wraps three output pins. All channels start off.
    ///
    /// # Arguments
    /// * `active_low` - true when driving the pin low lights the indicator
    pub fn new(red: R, green: G, blue: B, active_low: bool) -> Self {
        let mut outputs = Self {
            red,
            green,
            blue,
            active_low,
        };
        for channel in OutputChannel::ALL {
            outputs.set(channel, false);
        }
        outputs
    }

    /// Releases the pins.
    pub fn release(self) -> (R, G, B) {
        (self.red, self.green, self.blue)
    }
}

fn drive<P: OutputPin>(pin: &mut P, high: bool) -> bool {
    let result = if high { pin.set_high() } else { pin.set_low() };
    result.is_ok()
}

impl<R, G, B> IndicatorOutputs for PinOutputs<R, G, B>
where
    R: OutputPin,
    G: OutputPin,
    B: OutputPin,
{
    fn set(&mut self, channel: OutputChannel, on: bool) {
        let high = on != self.active_low;
        let ok = match channel {
            OutputChannel::Red => drive(&mut self.red, high),
            OutputChannel::Green => drive(&mut self.green, high),
            OutputChannel::Blue => drive(&mut self.blue, high),
        };
        if !ok {
            warn!("failed to drive {} output", channel);
        }
    }
}

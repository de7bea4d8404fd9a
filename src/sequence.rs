//! The extinguish sequence and its pure transition function.

use crate::config::STEP_INTERVAL_MS;
use crate::time::TimeDuration;
use crate::types::{OutputChannel, Phase, SequenceError, Step};

/// Describes which output goes dark at each step and how long each step waits.
///
/// The sequence always has exactly three steps, one per [`OutputChannel`]. The
/// same interval separates activation from the first step and each step from
/// the next.
///
/// # Type Parameters
/// * `D` - The duration type (e.g., `fugit::MicrosDurationU64`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShutoffSequence<D: TimeDuration> {
    order: [OutputChannel; 3],
    interval: D,
}

/// Result of advancing the state machine by one alarm firing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition<D> {
    /// Phase after the alarm has been handled.
    pub next: Phase,

    /// Output to switch off, if any.
    pub extinguish: Option<OutputChannel>,

    /// Delay until the next one-shot alarm, if the sequence continues.
    pub next_alarm: Option<D>,
}

impl<D: TimeDuration> ShutoffSequence<D> {
    /// Creates a new sequence builder.
    pub fn builder() -> SequenceBuilder<D> {
        SequenceBuilder::new()
    }

    /// Blue, then Green, then Red, [`STEP_INTERVAL_MS`] apart.
    pub fn standard() -> Self {
        Self {
            order: [OutputChannel::Blue, OutputChannel::Green, OutputChannel::Red],
            interval: D::from_millis(STEP_INTERVAL_MS),
        }
    }

    /// Computes what one alarm firing does from `phase`.
    ///
    /// An alarm observed while idle is a no-op: nothing is extinguished and no
    /// further alarm is requested.
    pub fn advance(&self, phase: Phase) -> Transition<D> {
        match phase {
            Phase::Idle => Transition {
                next: Phase::Idle,
                extinguish: None,
                next_alarm: None,
            },
            Phase::Holding(step) => {
                let channel = self.channel_for(step);
                match step.next() {
                    Some(following) => Transition {
                        next: Phase::Holding(following),
                        extinguish: Some(channel),
                        next_alarm: Some(self.interval),
                    },
                    None => Transition {
                        next: Phase::Idle,
                        extinguish: Some(channel),
                        next_alarm: None,
                    },
                }
            }
        }
    }

    /// Output extinguished at `step`.
    #[inline]
    pub fn channel_for(&self, step: Step) -> OutputChannel {
        self.order[step.index() as usize]
    }

    /// Extinguish order.
    pub fn order(&self) -> [OutputChannel; 3] {
        self.order
    }

    /// Delay before the first step and between steps.
    pub fn interval(&self) -> D {
        self.interval
    }
}

impl<D: TimeDuration> Default for ShutoffSequence<D> {
    fn default() -> Self {
        Self::standard()
    }
}

/// Builder for constructing validated shutoff sequences.
#[derive(Debug)]
pub struct SequenceBuilder<D: TimeDuration> {
    order: [OutputChannel; 3],
    interval: D,
}

impl<D: TimeDuration> SequenceBuilder<D> {
    /// Creates a builder preloaded with the standard order and interval.
    pub fn new() -> Self {
        let standard = ShutoffSequence::<D>::standard();
        Self {
            order: standard.order,
            interval: standard.interval,
        }
    }

    /// Sets the order in which the outputs are switched off.
    pub fn order(mut self, order: [OutputChannel; 3]) -> Self {
        self.order = order;
        self
    }

    /// Sets the delay before the first step and between steps.
    pub fn interval(mut self, interval: D) -> Self {
        self.interval = interval;
        self
    }

    /// Builds and validates the sequence.
    ///
    /// # Errors
    /// * `ZeroInterval` - The interval is zero
    /// * `DuplicateChannel` - A channel is listed twice, so one would never go dark
    pub fn build(self) -> Result<ShutoffSequence<D>, SequenceError> {
        if self.interval == D::ZERO {
            return Err(SequenceError::ZeroInterval);
        }

        for (i, channel) in self.order.iter().enumerate() {
            if self.order[..i].contains(channel) {
                return Err(SequenceError::DuplicateChannel(*channel));
            }
        }

        Ok(ShutoffSequence {
            order: self.order,
            interval: self.interval,
        })
    }
}

impl<D: TimeDuration> Default for SequenceBuilder<D> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Millis(u64);

    impl TimeDuration for Millis {
        const ZERO: Self = Millis(0);

        fn as_micros(&self) -> u64 {
            self.0 * 1000
        }

        fn from_millis(millis: u64) -> Self {
            Millis(millis)
        }
    }

    #[test]
    fn standard_sequence_turns_off_blue_green_red() {
        let seq = ShutoffSequence::<Millis>::standard();

        let t0 = seq.advance(Phase::Holding(Step::First));
        assert_eq!(t0.extinguish, Some(OutputChannel::Blue));
        assert_eq!(t0.next, Phase::Holding(Step::Second));
        assert_eq!(t0.next_alarm, Some(Millis(3000)));

        let t1 = seq.advance(t0.next);
        assert_eq!(t1.extinguish, Some(OutputChannel::Green));
        assert_eq!(t1.next, Phase::Holding(Step::Final));
        assert_eq!(t1.next_alarm, Some(Millis(3000)));

        let t2 = seq.advance(t1.next);
        assert_eq!(t2.extinguish, Some(OutputChannel::Red));
        assert_eq!(t2.next, Phase::Idle);
        assert_eq!(t2.next_alarm, None);
    }

    #[test]
    fn idle_advance_is_noop() {
        let seq = ShutoffSequence::<Millis>::standard();
        let t = seq.advance(Phase::Idle);
        assert_eq!(t.next, Phase::Idle);
        assert_eq!(t.extinguish, None);
        assert_eq!(t.next_alarm, None);
    }

    #[test]
    fn builder_rejects_zero_interval() {
        let result = ShutoffSequence::<Millis>::builder().interval(Millis(0)).build();
        assert_eq!(result, Err(SequenceError::ZeroInterval));
    }

    #[test]
    fn builder_rejects_duplicate_channel() {
        let result = ShutoffSequence::<Millis>::builder()
            .order([OutputChannel::Red, OutputChannel::Green, OutputChannel::Red])
            .build();
        assert_eq!(result, Err(SequenceError::DuplicateChannel(OutputChannel::Red)));
    }

    #[test]
    fn builder_custom_order_and_interval() {
        let seq = ShutoffSequence::<Millis>::builder()
            .order([OutputChannel::Red, OutputChannel::Blue, OutputChannel::Green])
            .interval(Millis(500))
            .build()
            .unwrap();

        assert_eq!(seq.channel_for(Step::First), OutputChannel::Red);
        assert_eq!(seq.channel_for(Step::Final), OutputChannel::Green);
        assert_eq!(seq.interval(), Millis(500));
    }
}

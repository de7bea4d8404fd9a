//! Core types shared by the sequence, controller and diagnostics.

/// One of the three indicator outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputChannel {
    Red,
    Green,
    Blue,
}

impl OutputChannel {
    /// All channels, in the order they are switched on.
    pub const ALL: [OutputChannel; 3] = [OutputChannel::Red, OutputChannel::Green, OutputChannel::Blue];

    /// Colour name used in diagnostic lines.
    pub fn label(self) -> &'static str {
        match self {
            OutputChannel::Red => "Vermelho",
            OutputChannel::Green => "Verde",
            OutputChannel::Blue => "Azul",
        }
    }
}

/// Which output is next to be extinguished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    First,
    Second,
    Final,
}

impl Step {
    /// Numeric step value (0, 1 or 2).
    #[inline]
    pub fn index(self) -> u8 {
        match self {
            Step::First => 0,
            Step::Second => 1,
            Step::Final => 2,
        }
    }

    /// The step after this one, or `None` after the final step.
    #[inline]
    pub fn next(self) -> Option<Step> {
        match self {
            Step::First => Some(Step::Second),
            Step::Second => Some(Step::Final),
            Step::Final => None,
        }
    }
}

/// Position of the controller in the sequence state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// No sequence running. A press is accepted.
    #[default]
    Idle,
    /// Outputs lit, waiting for the alarm that executes `step`.
    Holding(Step),
}

impl Phase {
    /// True while a sequence is in progress.
    #[inline]
    pub fn is_active(self) -> bool {
        matches!(self, Phase::Holding(_))
    }

    /// Step counter as seen by diagnostics; 0 while idle.
    #[inline]
    pub fn step_index(self) -> u8 {
        match self {
            Phase::Idle => 0,
            Phase::Holding(step) => step.index(),
        }
    }
}

/// A debounced button-down transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressEvent;

/// Sequence validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequenceError {
    /// Interval between steps is zero.
    ZeroInterval,

    /// The same channel appears twice in the extinguish order.
    DuplicateChannel(OutputChannel),
}

impl core::fmt::Display for SequenceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SequenceError::ZeroInterval => {
                write!(f, "step interval must be non-zero")
            }
            SequenceError::DuplicateChannel(channel) => {
                write!(f, "channel {:?} appears more than once in the extinguish order", channel)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SequenceError {}

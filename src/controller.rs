//! Sequence controller with state management and timing control.
//!
//! Provides [`SequenceController`], which owns the sequence state (activation,
//! start time, step) and the indicator outputs. It reacts to press events from
//! the main loop and to alarm firings from the timer context, and tells its
//! driver when the next one-shot alarm is due.

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::outputs::IndicatorOutputs;
use crate::sequence::ShutoffSequence;
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::types::{Phase, Step};

/// Snapshot of the sequence state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceState<I> {
    /// True from an accepted press until the final step completes.
    pub active: bool,

    /// When the most recent sequence started. `None` before the first press.
    pub start_time: Option<I>,

    /// Next output to extinguish (0, 1 or 2); 0 while inactive.
    pub step: u8,
}

/// Result of a press event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressOutcome<D> {
    /// Sequence started. Arm a one-shot alarm to fire after this delay.
    Accepted(D),

    /// A sequence is already running; nothing changed and no alarm is needed.
    Rejected,
}

/// Result of an alarm firing.
///
/// Alarms never repeat on their own: the only way the sequence continues is by
/// arming a new one-shot alarm for [`AlarmOutcome::Reschedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmOutcome<D> {
    /// Step executed. Arm a one-shot alarm to fire after this delay.
    Reschedule(D),

    /// Final step executed; the controller is idle again.
    Complete,

    /// The alarm arrived while no sequence was running. Nothing changed.
    Ignored,
}

/// Drives three indicator outputs through the light-all, extinguish-one-by-one
/// sequence.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `O` - Indicator outputs implementation
/// * `T` - Time source implementation
/// * `S` - Diagnostic sink
pub struct SequenceController<'t, I, O, T, S>
where
    I: TimeInstant,
    O: IndicatorOutputs,
    T: TimeSource<I>,
    S: DiagnosticSink,
{
    outputs: O,
    time_source: &'t T,
    sink: S,
    sequence: ShutoffSequence<I::Duration>,
    phase: Phase,
    start_time: Option<I>,
}

impl<'t, I, O, T, S> SequenceController<'t, I, O, T, S>
where
    I: TimeInstant,
    O: IndicatorOutputs,
    T: TimeSource<I>,
    S: DiagnosticSink,
{
    /// Creates an idle controller running the standard sequence.
    pub fn new(outputs: O, time_source: &'t T, sink: S) -> Self {
        Self::with_sequence(outputs, time_source, sink, ShutoffSequence::standard())
    }

    /// Creates an idle controller running a custom sequence.
    pub fn with_sequence(
        outputs: O,
        time_source: &'t T,
        sink: S,
        sequence: ShutoffSequence<I::Duration>,
    ) -> Self {
        Self {
            outputs,
            time_source,
            sink,
            sequence,
            phase: Phase::Idle,
            start_time: None,
        }
    }

    /// Handles a debounced button press.
    ///
    /// While a sequence is running this only emits [`Diagnostic::Busy`]; the
    /// state is left untouched and no alarm is requested.
    ///
    /// # Returns
    /// * `PressOutcome::Accepted(delay)` - Outputs lit; arm the first alarm
    /// * `PressOutcome::Rejected` - Sequence already active
    pub fn on_press_detected(&mut self) -> PressOutcome<I::Duration> {
        if self.phase.is_active() {
            warn!("press ignored, sequence at step {}", self.phase.step_index());
            self.sink.emit(Diagnostic::Busy);
            return PressOutcome::Rejected;
        }

        self.phase = Phase::Holding(Step::First);
        self.start_time = Some(self.time_source.now());

        self.outputs.all_on();
        self.sink.emit(Diagnostic::AllOn);

        let delay = self.sequence.interval();
        debug!("sequence started, first step in {} ms", delay.as_millis());
        PressOutcome::Accepted(delay)
    }

    /// Handles a one-shot alarm firing. Called from the timer context.
    ///
    /// # Returns
    /// * `AlarmOutcome::Reschedule(delay)` - Arm the next alarm
    /// * `AlarmOutcome::Complete` - Sequence finished
    /// * `AlarmOutcome::Ignored` - No sequence was running
    pub fn on_alarm_fired(&mut self) -> AlarmOutcome<I::Duration> {
        let transition = self.sequence.advance(self.phase);

        let Some(channel) = transition.extinguish else {
            warn!("alarm fired while idle");
            return AlarmOutcome::Ignored;
        };

        let elapsed_ms = self.elapsed_ms().unwrap_or(0);
        self.outputs.set(channel, false);
        self.sink.emit(Diagnostic::Extinguished { channel, elapsed_ms });
        self.phase = transition.next;

        match transition.next_alarm {
            Some(delay) => {
                trace!("step {} next", self.phase.step_index());
                AlarmOutcome::Reschedule(delay)
            }
            None => {
                self.sink.emit(Diagnostic::Complete);
                info!("sequence complete after {} ms", elapsed_ms);
                AlarmOutcome::Complete
            }
        }
    }

    /// Milliseconds since the current (or last) sequence started.
    ///
    /// Derived from the microsecond clock and truncated, never rounded.
    pub fn elapsed_ms(&self) -> Option<i64> {
        self.start_time.map(|start| {
            let elapsed = self.time_source.now().duration_since(start);
            i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
        })
    }

    /// Returns a snapshot of the sequence state.
    pub fn state(&self) -> SequenceState<I> {
        SequenceState {
            active: self.phase.is_active(),
            start_time: self.start_time,
            step: self.phase.step_index(),
        }
    }

    /// Returns the current state machine phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns true while a sequence is running.
    pub fn is_active(&self) -> bool {
        self.phase.is_active()
    }

    /// Returns the sequence this controller runs.
    pub fn sequence(&self) -> &ShutoffSequence<I::Duration> {
        &self.sequence
    }

    pub fn outputs(&self) -> &O {
        &self.outputs
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the sink, for start-up banners and the like.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

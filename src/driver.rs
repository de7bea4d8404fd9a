//! Glue between the debouncer, the shared controller and a one-shot alarm.
//!
//! The main loop calls [`ButtonLoop::tick`] at a steady cadence; the alarm
//! interrupt calls [`service_alarm`]. Both arm the next alarm themselves, so at
//! most one alarm is ever outstanding.

use crate::controller::{AlarmOutcome, PressOutcome};
use crate::debounce::PressDetector;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::outputs::IndicatorOutputs;
use crate::shared::SharedController;
use crate::time::{TimeDuration, TimeInstant, TimeSource};

/// A one-shot hardware (or OS) alarm.
///
/// Takes `&self` because it is armed from both the main loop and the alarm
/// interrupt; implementations use interior mutability or raw register access.
pub trait AlarmScheduler<D: TimeDuration> {
    type Error: core::fmt::Debug;

    /// Arms the alarm to fire once, `delay` from now.
    fn schedule_once(&self, delay: D) -> Result<(), Self::Error>;
}

fn arm<D: TimeDuration, A: AlarmScheduler<D>>(alarm: &A, delay: D) {
    if alarm.schedule_once(delay).is_err() {
        // The sequence stalls here; nothing retries the arm.
        warn!("failed to arm alarm for {} ms", delay.as_millis());
    }
}

/// Main-loop side of the system.
pub struct ButtonLoop<'a, 't, B, A, I, O, T, S>
where
    B: PressDetector,
    A: AlarmScheduler<I::Duration>,
    I: TimeInstant,
    O: IndicatorOutputs,
    T: TimeSource<I>,
    S: DiagnosticSink,
{
    button: B,
    alarm: &'a A,
    controller: &'a SharedController<'t, I, O, T, S>,
}

impl<'a, 't, B, A, I, O, T, S> ButtonLoop<'a, 't, B, A, I, O, T, S>
where
    B: PressDetector,
    A: AlarmScheduler<I::Duration>,
    I: TimeInstant,
    O: IndicatorOutputs,
    T: TimeSource<I>,
    S: DiagnosticSink,
{
    pub fn new(button: B, alarm: &'a A, controller: &'a SharedController<'t, I, O, T, S>) -> Self {
        Self {
            button,
            alarm,
            controller,
        }
    }

    /// Emits the start-up banner through the controller's sink.
    pub fn announce_ready(&self) {
        self.controller.with(|c| c.sink_mut().emit(Diagnostic::Ready));
    }

    /// Polls the button once and starts a sequence on a press.
    ///
    /// Returns the press outcome, or `None` when no press was detected.
    pub fn tick(&mut self) -> Option<PressOutcome<I::Duration>> {
        if !self.button.poll() {
            return None;
        }

        let outcome = self.controller.on_press_detected()?;
        if let PressOutcome::Accepted(delay) = outcome {
            arm(self.alarm, delay);
        }
        Some(outcome)
    }

    pub fn button(&mut self) -> &mut B {
        &mut self.button
    }
}

/// Alarm-interrupt side of the system: advances the sequence and re-arms.
pub fn service_alarm<A, I, O, T, S>(
    controller: &SharedController<'_, I, O, T, S>,
    alarm: &A,
) -> AlarmOutcome<I::Duration>
where
    A: AlarmScheduler<I::Duration>,
    I: TimeInstant,
    O: IndicatorOutputs,
    T: TimeSource<I>,
    S: DiagnosticSink,
{
    let outcome = controller.on_alarm_fired();
    if let AlarmOutcome::Reschedule(delay) = outcome {
        arm(alarm, delay);
    }
    outcome
}

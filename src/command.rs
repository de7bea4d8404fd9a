//! Event-based control for the controller.
//!
//! Drivers that funnel the button task and the alarm handler through a single
//! queue (e.g. an embassy `Channel`) send [`ControllerEvent`]s and dispatch them
//! with [`SequenceController::handle_event`].

use crate::controller::{AlarmOutcome, PressOutcome, SequenceController};
use crate::diagnostics::DiagnosticSink;
use crate::outputs::IndicatorOutputs;
use crate::time::{TimeInstant, TimeSource};

/// Events the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerEvent {
    /// Debounced button press.
    ButtonPressed,
    /// One-shot alarm matured.
    AlarmFired,
}

/// Outcome of a dispatched event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventOutcome<D> {
    Press(PressOutcome<D>),
    Alarm(AlarmOutcome<D>),
}

impl<D: Copy> EventOutcome<D> {
    /// Delay until the next alarm should fire, if one must be armed.
    pub fn next_alarm(&self) -> Option<D> {
        match *self {
            EventOutcome::Press(PressOutcome::Accepted(delay)) => Some(delay),
            EventOutcome::Alarm(AlarmOutcome::Reschedule(delay)) => Some(delay),
            _ => None,
        }
    }
}

impl<'t, I, O, T, S> SequenceController<'t, I, O, T, S>
where
    I: TimeInstant,
    O: IndicatorOutputs,
    T: TimeSource<I>,
    S: DiagnosticSink,
{
    /// Dispatches an event to the matching handler.
    pub fn handle_event(&mut self, event: ControllerEvent) -> EventOutcome<I::Duration> {
        match event {
            ControllerEvent::ButtonPressed => EventOutcome::Press(self.on_press_detected()),
            ControllerEvent::AlarmFired => EventOutcome::Alarm(self.on_alarm_fired()),
        }
    }
}

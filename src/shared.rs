//! Interrupt-safe sharing of a [`SequenceController`].
//!
//! The main loop and the alarm interrupt both mutate the controller. Wrapping
//! it in [`SharedController`] makes each press or alarm a critical section, so
//! the active-flag check and the activation that follows cannot be split by an
//! alarm, on single-core and multi-core targets alike.

use core::cell::RefCell;
use critical_section::Mutex;

use crate::controller::{AlarmOutcome, PressOutcome, SequenceController};
use crate::diagnostics::DiagnosticSink;
use crate::outputs::IndicatorOutputs;
use crate::time::{TimeInstant, TimeSource};

/// A controller that may live in a `static` and be reached from any context.
///
/// Starts empty; install the controller with [`SharedController::init`] once
/// the hardware is configured. Events arriving before that are dropped.
pub struct SharedController<'t, I, O, T, S>
where
    I: TimeInstant,
    O: IndicatorOutputs,
    T: TimeSource<I>,
    S: DiagnosticSink,
{
    inner: Mutex<RefCell<Option<SequenceController<'t, I, O, T, S>>>>,
}

impl<'t, I, O, T, S> SharedController<'t, I, O, T, S>
where
    I: TimeInstant,
    O: IndicatorOutputs,
    T: TimeSource<I>,
    S: DiagnosticSink,
{
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Installs the controller, replacing any previous one.
    pub fn init(&self, controller: SequenceController<'t, I, O, T, S>) {
        critical_section::with(|cs| {
            self.inner.borrow_ref_mut(cs).replace(controller);
        });
    }

    /// Runs `f` on the controller inside a critical section.
    ///
    /// Returns `None` if no controller has been installed.
    pub fn with<R>(&self, f: impl FnOnce(&mut SequenceController<'t, I, O, T, S>) -> R) -> Option<R> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).as_mut().map(f))
    }

    /// Atomic check-and-activate. See [`SequenceController::on_press_detected`].
    pub fn on_press_detected(&self) -> Option<PressOutcome<I::Duration>> {
        let outcome = self.with(|c| c.on_press_detected());
        if outcome.is_none() {
            warn!("press before controller init");
        }
        outcome
    }

    /// See [`SequenceController::on_alarm_fired`]. Call from the alarm interrupt.
    pub fn on_alarm_fired(&self) -> AlarmOutcome<I::Duration> {
        self.with(|c| c.on_alarm_fired()).unwrap_or_else(|| {
            warn!("alarm before controller init");
            AlarmOutcome::Ignored
        })
    }

    /// Returns true while a sequence is running.
    pub fn is_active(&self) -> bool {
        self.with(|c| c.is_active()).unwrap_or(false)
    }
}

impl<'t, I, O, T, S> Default for SharedController<'t, I, O, T, S>
where
    I: TimeInstant,
    O: IndicatorOutputs,
    T: TimeSource<I>,
    S: DiagnosticSink,
{
    fn default() -> Self {
        Self::new()
    }
}

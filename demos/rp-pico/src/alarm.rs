//! One-shot alarm on RP2040 timer alarm 0.

use core::cell::RefCell;
use critical_section::Mutex;
use fugit::MicrosDurationU32;
use oneshot_sequencer::AlarmScheduler;
use rp_pico::hal::timer::{Alarm, Alarm0, ScheduleAlarmError};

use crate::time::Duration;

#[derive(Debug)]
pub enum ArmError {
    /// `install` was never called.
    NotInstalled,
    /// Delay does not fit the 32-bit alarm compare register.
    TooLong,
    Schedule(ScheduleAlarmError),
}

/// Alarm 0, shared between the main loop and `TIMER_IRQ_0`.
pub struct HalAlarm {
    alarm: Mutex<RefCell<Option<Alarm0>>>,
}

impl HalAlarm {
    pub const fn new() -> Self {
        Self {
            alarm: Mutex::new(RefCell::new(None)),
        }
    }

    /// Takes ownership of the alarm and enables its interrupt.
    pub fn install(&self, mut alarm: Alarm0) {
        alarm.enable_interrupt();
        critical_section::with(|cs| {
            self.alarm.borrow_ref_mut(cs).replace(alarm);
        });
    }

    /// Acknowledges a fired alarm. Call first thing in `TIMER_IRQ_0`.
    pub fn clear(&self) {
        critical_section::with(|cs| {
            if let Some(alarm) = self.alarm.borrow_ref_mut(cs).as_mut() {
                alarm.clear_interrupt();
            }
        });
    }
}

impl Default for HalAlarm {
    fn default() -> Self {
        Self::new()
    }
}

impl AlarmScheduler<Duration> for HalAlarm {
    type Error = ArmError;

    fn schedule_once(&self, delay: Duration) -> Result<(), Self::Error> {
        let micros = u32::try_from(delay.ticks()).map_err(|_| ArmError::TooLong)?;
        critical_section::with(|cs| {
            let mut alarm = self.alarm.borrow_ref_mut(cs);
            let alarm = alarm.as_mut().ok_or(ArmError::NotInstalled)?;
            alarm
                .schedule(MicrosDurationU32::from_ticks(micros))
                .map_err(ArmError::Schedule)
        })
    }
}

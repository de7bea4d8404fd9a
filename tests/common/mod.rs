//! Shared test infrastructure for oneshot-sequencer integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::{Cell, RefCell};
use core::convert::Infallible;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin};
use oneshot_sequencer::{
    AlarmScheduler, Diagnostic, DiagnosticSink, IndicatorOutputs, OutputChannel, TimeDuration,
    TimeInstant, TimeSource,
};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps microseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TestDuration {
    pub const fn ms(millis: u64) -> Self {
        TestDuration(millis * 1000)
    }
}

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_micros(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration::ms(millis)
    }
}

/// Mock instant type for testing (microseconds since boot)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0.saturating_sub(earlier.0))
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        self.0.checked_add(duration.0).map(TestInstant)
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: Cell::new(TestInstant(0)),
        }
    }

    pub fn advance(&self, duration: TestDuration) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + duration.0));
    }

    pub fn advance_ms(&self, millis: u64) {
        self.advance(TestDuration::ms(millis));
    }

    pub fn set_time(&self, time: TestInstant) {
        self.current_time.set(time);
    }

    pub fn now_us(&self) -> u64 {
        self.current_time.get().0
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

/// Delay provider that moves the mock clock forward instead of sleeping
pub struct MockDelay<'a> {
    clock: &'a MockTimeSource,
}

impl<'a> MockDelay<'a> {
    pub fn new(clock: &'a MockTimeSource) -> Self {
        Self { clock }
    }
}

impl DelayNs for MockDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.clock.advance(TestDuration(ns as u64 / 1000));
    }
}

// ============================================================================
// Mock Button
// ============================================================================

/// Active-low button driven by a script of low intervals `[start_us, end_us)`.
///
/// Every read costs `sample_cost_us` of mock time, so a debouncer spinning on
/// the pin still sees the clock move.
pub struct MockButton<'a> {
    clock: &'a MockTimeSource,
    low_intervals: heapless::Vec<(u64, u64), 16>,
    sample_cost_us: u64,
    reads: usize,
}

impl<'a> MockButton<'a> {
    pub fn new(clock: &'a MockTimeSource) -> Self {
        Self {
            clock,
            low_intervals: heapless::Vec::new(),
            sample_cost_us: 100,
            reads: 0,
        }
    }

    /// Holds the button down from `start_ms` for `held_ms`.
    pub fn press_at(mut self, start_ms: u64, held_ms: u64) -> Self {
        let start = start_ms * 1000;
        self.low_intervals
            .push((start, start + held_ms * 1000))
            .expect("too many scripted presses");
        self
    }

    /// Holds the button down over an interval given in microseconds.
    pub fn low_between_us(mut self, start_us: u64, end_us: u64) -> Self {
        self.low_intervals
            .push((start_us, end_us))
            .expect("too many scripted presses");
        self
    }

    pub fn sample_cost_us(mut self, cost: u64) -> Self {
        self.sample_cost_us = cost;
        self
    }

    pub fn reads(&self) -> usize {
        self.reads
    }

    fn level_is_low(&self) -> bool {
        let now = self.clock.now_us();
        self.low_intervals
            .iter()
            .any(|&(start, end)| now >= start && now < end)
    }
}

impl ErrorType for MockButton<'_> {
    type Error = Infallible;
}

impl InputPin for MockButton<'_> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.is_low().map(|low| !low)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        let low = self.level_is_low();
        self.reads += 1;
        self.clock.advance(TestDuration(self.sample_cost_us));
        Ok(low)
    }
}

/// Input pin whose reads always fail
pub struct BrokenButton;

#[derive(Debug)]
pub struct ReadError;

impl embedded_hal::digital::Error for ReadError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

impl ErrorType for BrokenButton {
    type Error = ReadError;
}

impl InputPin for BrokenButton {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Err(ReadError)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Err(ReadError)
    }
}

// ============================================================================
// Mock Outputs
// ============================================================================

/// Mock outputs that record every level change
pub struct MockOutputs {
    levels: [bool; 3],
    history: heapless::Vec<(OutputChannel, bool), 32>,
}

impl MockOutputs {
    pub fn new() -> Self {
        Self {
            levels: [false; 3],
            history: heapless::Vec::new(),
        }
    }

    pub fn is_on(&self, channel: OutputChannel) -> bool {
        self.levels[index(channel)]
    }

    /// Levels as (red, green, blue)
    pub fn levels(&self) -> (bool, bool, bool) {
        (self.levels[0], self.levels[1], self.levels[2])
    }

    pub fn history(&self) -> &[(OutputChannel, bool)] {
        &self.history
    }
}

fn index(channel: OutputChannel) -> usize {
    match channel {
        OutputChannel::Red => 0,
        OutputChannel::Green => 1,
        OutputChannel::Blue => 2,
    }
}

impl IndicatorOutputs for MockOutputs {
    fn set(&mut self, channel: OutputChannel, on: bool) {
        self.levels[index(channel)] = on;
        let _ = self.history.push((channel, on));
    }
}

// ============================================================================
// Recording Sink
// ============================================================================

/// Sink that keeps every diagnostic, in order
pub struct RecordingSink {
    lines: heapless::Vec<Diagnostic, 64>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            lines: heapless::Vec::new(),
        }
    }

    pub fn lines(&self) -> &[Diagnostic] {
        &self.lines
    }

    /// Rendered text of every line, for comparing against console output
    pub fn rendered(&self) -> std::vec::Vec<std::string::String> {
        self.lines.iter().map(|d| d.to_string()).collect()
    }

    pub fn count(&self, diagnostic: &Diagnostic) -> usize {
        self.lines.iter().filter(|d| *d == diagnostic).count()
    }
}

impl DiagnosticSink for RecordingSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        let _ = self.lines.push(diagnostic);
    }
}

// ============================================================================
// Mock Alarm
// ============================================================================

/// Simulated one-shot alarm: remembers the pending deadline and every request
pub struct MockAlarm<'a> {
    clock: &'a MockTimeSource,
    deadline: Cell<Option<TestInstant>>,
    requests: RefCell<heapless::Vec<TestDuration, 16>>,
    fail: Cell<bool>,
}

impl<'a> MockAlarm<'a> {
    pub fn new(clock: &'a MockTimeSource) -> Self {
        Self {
            clock,
            deadline: Cell::new(None),
            requests: RefCell::new(heapless::Vec::new()),
            fail: Cell::new(false),
        }
    }

    /// Makes every following `schedule_once` fail, like an exhausted alarm pool
    pub fn fail_always(&self) {
        self.fail.set(true);
    }

    pub fn deadline(&self) -> Option<TestInstant> {
        self.deadline.get()
    }

    pub fn requests(&self) -> std::vec::Vec<TestDuration> {
        self.requests.borrow().iter().copied().collect()
    }

    /// Moves the clock to the pending deadline and consumes it.
    ///
    /// Returns false if nothing is armed.
    pub fn advance_to_deadline(&self) -> bool {
        match self.deadline.take() {
            Some(at) => {
                if at > self.clock.now() {
                    self.clock.set_time(at);
                }
                true
            }
            None => false,
        }
    }
}

#[derive(Debug)]
pub struct AlarmBusy;

impl AlarmScheduler<TestDuration> for MockAlarm<'_> {
    type Error = AlarmBusy;

    fn schedule_once(&self, delay: TestDuration) -> Result<(), Self::Error> {
        if self.fail.get() {
            return Err(AlarmBusy);
        }
        assert!(
            self.deadline.get().is_none(),
            "a second alarm was armed while one was pending"
        );
        let _ = self.requests.borrow_mut().push(delay);
        self.deadline.set(self.clock.now().checked_add(delay));
        Ok(())
    }
}

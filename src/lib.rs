#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`SequenceController`**: Owns the sequence state and the three indicator outputs
//! - **`ShutoffSequence`**: Extinguish order and step interval, with a pure `advance` function
//! - **`Phase`** / **`Step`**: The `Idle -> Holding(0) -> Holding(1) -> Holding(2) -> Idle` state machine
//! - **`IndicatorOutputs`**: Trait to implement for your LED hardware (`PinOutputs` covers plain GPIO)
//! - **`TimeSource`**: Trait to implement for your timing system
//! - **`PressDetector`**: Debounced button input (`BlockingDebouncer` or `EdgeDebouncer`)
//! - **`AlarmScheduler`**: Trait to implement for your one-shot alarm
//! - **`SharedController`**: Critical-section wrapper for use from the main loop and the alarm interrupt
//! - **`Diagnostic`** / **`DiagnosticSink`**: The console lines and where they go
//!
//! Alarms never repeat by themselves: every press or step hands back the delay
//! for the next one-shot alarm, and the driver arms it.

mod fmt;

pub mod command;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod diagnostics;
pub mod driver;
pub mod outputs;
pub mod sequence;
pub mod shared;
pub mod time;
pub mod types;

pub use command::{ControllerEvent, EventOutcome};
pub use controller::{AlarmOutcome, PressOutcome, SequenceController, SequenceState};
pub use debounce::{BlockingDebouncer, EdgeDebouncer, PressDetector};
pub use diagnostics::{Diagnostic, DiagnosticSink, FmtSink, NullSink};
pub use driver::{AlarmScheduler, ButtonLoop, service_alarm};
pub use outputs::{IndicatorOutputs, PinOutputs};
pub use sequence::{SequenceBuilder, ShutoffSequence, Transition};
pub use shared::SharedController;
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use types::{OutputChannel, Phase, PressEvent, SequenceError, Step};

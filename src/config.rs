//! Compile-time configuration.
//!
//! Pin numbers match the reference RP2040 board wiring.

/// Delay between lighting the outputs and each subsequent extinguish step.
pub const STEP_INTERVAL_MS: u64 = 3000;

/// Time the button must stay low before a press is confirmed.
pub const SETTLE_MS: u32 = 50;

/// Pause between polls of the button in the main loop.
pub const POLL_INTERVAL_MS: u32 = 10;

/// GPIO driving the red indicator.
pub const RED_PIN: u8 = 13;

/// GPIO driving the green indicator.
pub const GREEN_PIN: u8 = 11;

/// GPIO driving the blue indicator.
pub const BLUE_PIN: u8 = 12;

/// GPIO wired to the push-button (active-low, internal pull-up).
pub const BUTTON_PIN: u8 = 5;

#![no_std]

pub mod alarm;
pub mod console;
pub mod time;

//! CHIP-8 virtual machine.
//!
//! [`core`] holds the machine itself: memory, registers, timers, keypad and
//! display buffers, and the fetch/decode/execute cycle. It does no I/O and can
//! be driven by anything that loads a [`core::rom::Rom`], calls
//! [`core::processor::Processor::cycle`] at its clock rate and
//! [`core::processor::Processor::tick_timers`] at 60 Hz.
//!
//! With the `frontend` feature, [`external`] and [`emulator`] provide an SDL2
//! window, keypad and beeper around it.
pub mod config;
pub mod consts;
pub mod core;
pub mod error;
pub mod utils;

#[cfg(feature = "frontend")]
pub mod emulator;
#[cfg(feature = "frontend")]
pub mod external;

pub use crate::core::processor::{CycleStatus, Processor};
pub use crate::core::quirks::Quirks;
pub use crate::core::rom::Rom;
pub use crate::error::{EmulatorError, LoadError, MachineFault};

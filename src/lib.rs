//! CPU and memory unit of a CHIP-8 interpreter
//!
//! The crate is `no_std` and allocation free. A host loads a program with
//! [`Chip8::new`] (or [`Builder`]), drives it by calling [`Chip8::step`] or
//! [`Chip8::run`] at its own cadence, ticks the timers at 60Hz with
//! [`Chip8::tick_timers`] and reads the display back through [`Chip8::frame`].
//! Keypad state and random numbers are supplied by a [`Context`].
#![no_std]

pub mod builder;
pub mod chip;
pub mod context;
pub mod error;
pub mod frame;
pub mod layout;
pub mod opcode;
pub mod timer;

mod font;

pub use builder::Builder;
pub use chip::{Chip8, Halt};
pub use context::{Context, Headless};
pub use error::Error;
pub use frame::{Frame, FrameView};
pub use opcode::OpCode;
pub use timer::TimerState;

pub use nb;

#[cfg(feature = "embedded-graphics")]
pub use embedded_graphics;

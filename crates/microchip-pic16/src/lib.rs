//! Instruction-level emulator core for PIC16-family microcontrollers.
//!
//! Models the 14-bit instruction set, the four-bank register file with its
//! mirrored and indirect aliases, the data EEPROM protocol behind EECON1,
//! tri-state port I/O, and a fixed-size execution trace ring. Peripherals
//! plug into register traffic through the [`RegObserver`] hooks.

mod cpu;
pub mod flags;
mod memory;
mod observer;
pub mod registers;
mod trace;

pub use cpu::{Fault, Op, Pic16, STACK_DEPTH, decode};
pub use memory::{EEPROM_BYTES, Memory, PROGRAM_WORDS};
pub use observer::{NullObserver, RegObserver};
pub use trace::TraceRing;

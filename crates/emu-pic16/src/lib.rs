//! Machine assembly around the PIC16 core: firmware loading, the debugger
//! REPL, and the two peripheral observers (terminal pinout view and the
//! AE-GraphicLCD trace).

pub mod aegl;
pub mod chipview;
pub mod debugger;
pub mod loader;

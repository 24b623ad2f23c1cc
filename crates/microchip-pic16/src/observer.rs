//! Peripheral observer hooks.

use crate::cpu::Pic16;

/// A peripheral watching register traffic.
///
/// The CPU invokes these after an access has taken effect, passing the
/// resolved 9-bit register address. Observers see the mutated CPU state and
/// may change it (for example to post incoming UART data), but must not
/// execute instructions. One observer is active at a time.
pub trait RegObserver {
    /// Called after a file-register read.
    fn on_read(&mut self, _pic: &mut Pic16, _addr: u16) {}

    /// Called after a file-register write.
    fn on_write(&mut self, _pic: &mut Pic16, _addr: u16) {}
}

/// Observer that ignores all traffic.
pub struct NullObserver;

impl RegObserver for NullObserver {}

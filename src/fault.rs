//! Unrecoverable faults.
//!
//! There is no channel to report a fault on this hardware, so the only response is to stop:
//! [`halt`] masks interrupts and spins forever. Nothing observable happens afterwards; in
//! particular no pin changes state again.

use core::fmt;

/// Conditions the firmware cannot continue from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fault {
    /// The factory DCO calibration constants read as erased flash (0xFF)
    ErasedCalibration,
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::ErasedCalibration => f.write_str("DCO calibration constants erased"),
        }
    }
}

/// Stop all further execution.
#[inline(never)]
pub fn halt(fault: Fault) -> ! {
    error!("halting: {}", fault);
    #[cfg(feature = "msp430g2553")]
    msp430::interrupt::disable();
    #[allow(clippy::empty_loop)]
    loop {}
}

//! Low power solar sensing for the MSP430G2xx value line, built on [`embedded_hal`] traits.
//! Here are the [`datasheet`] and [`User's guide`] for reference.
//!
//! As of this writing, the only supported device is the MSP430G2553 on the MSP-EXP430G2
//! Launchpad, with the 32768 Hz crystal fitted.
//!
//! [`embedded_hal`]: https://github.com/rust-embedded/embedded-hal
//! [`datasheet`]: https://www.ti.com/lit/ds/symlink/msp430g2553.pdf
//! [`User's guide`]: https://www.ti.com/lit/ug/slau144j/slau144j.pdf
//!
//! # Overview
//!
//! * [`delay`]: blocking delays of 1 s, 250 ms and 1 ms granularity that sleep in LPM3 or LPM0
//!   while the watchdog interval timer counts ticks.
//! * [`clock`]: waits for the crystal and loads the factory 1 MHz DCO calibration.
//! * [`comparator`]: Comparator_A+ sampling, powered only for the duration of a read.
//! * [`solar`]: the sensing loop, pulsing an LED whenever the solar cell is lit.
//!
//! Drivers are generic over the register access traits in `hw_traits`, which the device PAC
//! implements when a device feature is enabled.
//!
//! # Usage
//!
//! Requires `msp430-elf-gcc` installed and in $PATH to build
//!
//! When using this crate as a dependency, make sure you include the appropriate `memory.x` file for
//! your microcontroller.
//!
//! # Examples
//!
//! The `demos/` directory contains the complete firmware. Build it with
//! `cargo build --example solar --features msp430g2553` and flash it with `mspdebug rf2500`.

#![cfg_attr(not(test), no_std)]
#![cfg_attr(target_arch = "msp430", feature(asm_experimental_arch))]
#![deny(missing_docs)]

#[macro_use]
mod fmt;

pub mod clock;
pub mod comparator;
pub mod delay;
pub mod fault;
pub mod gpio;
pub mod lpm;
pub mod prelude;
pub mod solar;
pub mod watchdog;

#[doc(hidden)]
#[allow(missing_docs)]
pub mod hw_traits;

#[cfg(test)]
mod testing;

#[cfg(feature = "msp430g2553")]
pub use msp430g2553 as pac;

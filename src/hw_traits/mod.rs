//! Register-level access to the peripherals driven by this crate.
//!
//! Each trait exposes the handful of registers a driver needs, named `<reg>_rd`, `<reg>_wr`,
//! `<reg>_set` and `<reg>_clear`. The device PAC implements them on its register blocks; the
//! drivers in the rest of the crate are written against the traits only.

pub mod bcs;
pub mod comp;
pub mod gpio;
pub mod sfr;
pub mod wdt;

/// Obtain a handle to a peripheral without going through the ownership chain.
///
/// Used by interrupt handlers, which cannot borrow the driver that owns the peripheral.
pub trait Steal {
    /// # Safety
    /// The caller must not race the owner of the peripheral on the same registers.
    unsafe fn steal() -> Self;
}

#[cfg(feature = "msp430g2553")]
macro_rules! steal_impl {
    ($PERIPH:ident) => {
        impl $crate::hw_traits::Steal for $crate::pac::$PERIPH {
            #[inline(always)]
            unsafe fn steal() -> Self {
                $crate::pac::Peripherals::steal().$PERIPH
            }
        }
    };
}

#[cfg(feature = "msp430g2553")]
pub(crate) use steal_impl;

//! Watchdog timer (WDT+), configurable as either a traditional watchdog or an interval timer.
//!
//! **Note**: MSP430 devices will reset after bootup if watchdog is not stopped after an initial 32
//! ms interval (roughly). Call `Wdt::constrain()` as early in the application as possible to stop
//! the watchdog.
//!
//! In interval mode the watchdog sets WDTIFG every time the counter reaches the selected tap,
//! which makes it the tick source behind [`Delay`](crate::delay::Delay).

use crate::hw_traits::wdt::{WdtCtl, WdtPeriph, PASSWORD};
use core::marker::PhantomData;

/// Interval tap and clock source of the watchdog counter.
///
/// The tick period is `divider / f(source)`. With a 32768 Hz crystal on ACLK and a 1 MHz SMCLK
/// this gives the familiar `WDT_ADLY_*` and `WDT_MDLY_*` presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WdtInterval {
    /// ACLK / 32768, 1 s at 32768 Hz
    Aclk32K,
    /// ACLK / 8192, 250 ms at 32768 Hz
    Aclk8K,
    /// ACLK / 512, 16 ms at 32768 Hz
    Aclk512,
    /// ACLK / 64, 1.9 ms at 32768 Hz
    Aclk64,
    /// SMCLK / 32768, 32 ms at 1 MHz
    Smclk32K,
    /// SMCLK / 8192, 8 ms at 1 MHz
    Smclk8K,
    /// SMCLK / 512, 0.5 ms at 1 MHz
    Smclk512,
    /// SMCLK / 64, 0.064 ms at 1 MHz
    Smclk64,
}

impl WdtInterval {
    /// WDTSSEL and WDTISx bits of this interval
    #[inline]
    pub const fn bits(self) -> WdtCtl {
        match self {
            WdtInterval::Aclk32K => WdtCtl::WDTSSEL,
            WdtInterval::Aclk8K => WdtCtl::WDTSSEL.union(WdtCtl::WDTIS0),
            WdtInterval::Aclk512 => WdtCtl::WDTSSEL.union(WdtCtl::WDTIS1),
            WdtInterval::Aclk64 => WdtCtl::WDTSSEL
                .union(WdtCtl::WDTIS1)
                .union(WdtCtl::WDTIS0),
            WdtInterval::Smclk32K => WdtCtl::empty(),
            WdtInterval::Smclk8K => WdtCtl::WDTIS0,
            WdtInterval::Smclk512 => WdtCtl::WDTIS1,
            WdtInterval::Smclk64 => WdtCtl::WDTIS1.union(WdtCtl::WDTIS0),
        }
    }

    /// Whether the counter runs from ACLK, as opposed to SMCLK
    #[inline]
    pub const fn uses_aclk(self) -> bool {
        self.bits().contains(WdtCtl::WDTSSEL)
    }

    /// Clock periods per tick
    #[inline]
    pub const fn divider(self) -> u16 {
        match self {
            WdtInterval::Aclk32K | WdtInterval::Smclk32K => 32768,
            WdtInterval::Aclk8K | WdtInterval::Smclk8K => 8192,
            WdtInterval::Aclk512 | WdtInterval::Smclk512 => 512,
            WdtInterval::Aclk64 | WdtInterval::Smclk64 => 64,
        }
    }
}

mod sealed {
    use super::*;

    pub trait SealedWatchdogSelect {}

    impl SealedWatchdogSelect for WatchdogMode {}
    impl SealedWatchdogSelect for IntervalMode {}
}

/// Watchdog mode typestate
pub struct WatchdogMode;
/// Interval mode typestate
pub struct IntervalMode;

/// Marker trait for watchdog modes
pub trait WatchdogSelect: sealed::SealedWatchdogSelect {
    /// WDTTMSEL setting carried into every WDTCTL write
    #[doc(hidden)]
    fn mode_bits() -> WdtCtl;
}
impl WatchdogSelect for WatchdogMode {
    #[inline(always)]
    fn mode_bits() -> WdtCtl {
        WdtCtl::empty()
    }
}
impl WatchdogSelect for IntervalMode {
    #[inline(always)]
    fn mode_bits() -> WdtCtl {
        WdtCtl::WDTTMSEL
    }
}

/// Watchdog timer which can be configured to watchdog or interval (timer) mode
pub struct Wdt<P: WdtPeriph, MODE> {
    _mode: PhantomData<MODE>,
    periph: P,
}

impl<P: WdtPeriph> Wdt<P, WatchdogMode> {
    /// Convert WDT peripheral into a watchdog timer (watchdog mode), hold the counter and mask its
    /// interval interrupt.
    pub fn constrain(periph: P) -> Self {
        periph.wdtctl_wr(PASSWORD | WdtCtl::WDTHOLD.bits());
        periph.wdtie_clear();
        Wdt {
            _mode: PhantomData,
            periph,
        }
    }

    /// Convert to interval mode, keeping the counter held
    #[inline]
    pub fn to_interval(self) -> Wdt<P, IntervalMode> {
        let mut wdt = Wdt {
            _mode: PhantomData,
            periph: self.periph,
        };
        wdt.pause();
        wdt
    }
}

impl<P: WdtPeriph, MODE: WatchdogSelect> Wdt<P, MODE> {
    // Reads return a different password byte, so it is always replaced before writing back
    #[inline(always)]
    fn modify(&mut self, f: impl FnOnce(WdtCtl) -> WdtCtl) {
        let current = WdtCtl::from_bits_truncate(self.periph.wdtctl_rd());
        let bits = f(current) | MODE::mode_bits();
        self.periph.wdtctl_wr(PASSWORD | bits.bits());
    }

    /// Hold the counter
    #[inline]
    pub fn pause(&mut self) {
        self.modify(|w| w | WdtCtl::WDTHOLD);
    }

    /// Whether the counter is running
    #[inline]
    pub fn is_running(&self) -> bool {
        !WdtCtl::from_bits_truncate(self.periph.wdtctl_rd()).contains(WdtCtl::WDTHOLD)
    }
}

impl<P: WdtPeriph> Wdt<P, IntervalMode> {
    /// Clear the counter and start counting towards `interval` in a single write
    #[inline]
    pub fn start(&mut self, interval: WdtInterval) {
        self.periph.wdtctl_wr(
            PASSWORD | (WdtCtl::WDTTMSEL | WdtCtl::WDTCNTCL | interval.bits()).bits(),
        );
    }

    /// Enable interrupts for watchdog, which fire whenever the interval elapses
    #[inline]
    pub fn enable_interrupts(&mut self) -> &mut Self {
        self.periph.wdtie_set();
        self
    }

    /// Disable interrupts for watchdog
    #[inline]
    pub fn disable_interrupts(&mut self) -> &mut Self {
        self.periph.wdtie_clear();
        self
    }

    /// Clear a pending interval flag
    #[inline]
    pub fn clear_ifg(&mut self) -> &mut Self {
        self.periph.wdtifg_clear();
        self
    }

    /// Returns `true` and clears the flag if an interval has elapsed since the last call.
    /// Only meaningful with interrupts disabled, since the interrupt handler clears the flag too.
    #[inline]
    pub fn interval_elapsed(&mut self) -> bool {
        if self.periph.wdtifg_rd() {
            self.periph.wdtifg_clear();
            true
        } else {
            false
        }
    }
}

/// Hold the watchdog and mask its interrupt from interrupt context, where the owning `Wdt` is not
/// reachable.
///
/// # Safety
/// Must only be called while the main context is not touching the watchdog, i.e. from its
/// interrupt handler while the main context sleeps.
#[inline(always)]
pub(crate) unsafe fn stop_from_isr<P: WdtPeriph>() {
    let periph = P::steal();
    periph.wdtctl_wr(PASSWORD | WdtCtl::WDTHOLD.bits());
    periph.wdtie_clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{self, MockWdt};

    #[test]
    fn constrain_holds_and_masks() {
        testing::reset();
        testing::with(|r| {
            r.wdtctl = 0x0000;
            r.ie1_wdtie = true;
        });
        let wdt = Wdt::constrain(MockWdt);
        assert!(!wdt.is_running());
        assert!(!testing::with(|r| r.ie1_wdtie));
    }

    #[test]
    fn interval_presets_match_header_values() {
        testing::reset();
        let mut wdt = Wdt::constrain(MockWdt).to_interval();

        wdt.start(WdtInterval::Aclk32K);
        assert_eq!(testing::with(|r| r.wdtctl), 0x5A1C);
        wdt.start(WdtInterval::Aclk8K);
        assert_eq!(testing::with(|r| r.wdtctl), 0x5A1D);
        wdt.start(WdtInterval::Smclk512);
        assert_eq!(testing::with(|r| r.wdtctl), 0x5A1A);
        assert!(wdt.is_running());
    }

    #[test]
    fn pause_keeps_interval_mode() {
        testing::reset();
        let mut wdt = Wdt::constrain(MockWdt).to_interval();
        wdt.start(WdtInterval::Aclk8K);
        wdt.pause();

        let ctl = WdtCtl::from_bits_truncate(testing::with(|r| r.wdtctl));
        assert!(ctl.contains(WdtCtl::WDTHOLD | WdtCtl::WDTTMSEL));
        assert!(!wdt.is_running());
    }

    #[test]
    fn interval_flag_is_consumed_once() {
        testing::reset();
        let mut wdt = Wdt::constrain(MockWdt).to_interval();
        assert!(!wdt.interval_elapsed());
        testing::with(|r| r.ifg1_wdtifg = true);
        assert!(wdt.interval_elapsed());
        assert!(!wdt.interval_elapsed());
    }

    #[test]
    fn interval_periods() {
        assert!(WdtInterval::Aclk8K.uses_aclk());
        assert!(!WdtInterval::Smclk512.uses_aclk());
        assert_eq!(WdtInterval::Aclk8K.divider(), 8192);
        assert_eq!(WdtInterval::Smclk64.divider(), 64);
    }
}

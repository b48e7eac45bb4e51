//! Basic clock system (BCS+) bring-up.
//!
//! After reset MCLK and SMCLK run from an uncalibrated DCO and ACLK from LFXT1, which only
//! becomes usable once the 32768 Hz crystal has started. [`Bcs::calibrate`] waits for the crystal
//! to settle and then loads the factory 1 MHz DCO calibration, producing the clock objects.

use crate::delay::{Delay, DelayClass};
use crate::fault::Fault;
use crate::gpio::Xt1Pins;
use crate::hw_traits::bcs::{BcsPeriph, Bcsctl3};
use crate::hw_traits::gpio::CrystalPort;
use crate::hw_traits::wdt::WdtPeriph;
use crate::lpm::LowPower;

/// LFXT1 crystal frequency
pub const LFXT1: u16 = 32768;
/// DCO frequency after loading the 1 MHz calibration
pub const DCO_1MHZ: u32 = 1_000_000;
/// Value of an erased flash byte, which is what a missing calibration constant reads as
pub const ERASED: u8 = 0xFF;

/// Basic clock system
pub struct Bcs<P: BcsPeriph> {
    periph: P,
}

impl<P: BcsPeriph> Bcs<P> {
    /// Wrap the clock system registers
    #[inline]
    pub fn new(periph: P) -> Self {
        Bcs { periph }
    }

    /// Wait for the crystal to start, then calibrate the DCO to 1 MHz.
    ///
    /// Oscillator faults are cleared and re-checked every 250 ms for as long as they keep
    /// reappearing. If the calibration constants have been erased they are not loaded and
    /// [`Fault::ErasedCalibration`] is returned, leaving the DCO untouched.
    pub fn calibrate<X, W, L>(
        self,
        _xt1: &Xt1Pins<X>,
        delay: &mut Delay<W, L>,
    ) -> Result<Clocks, Fault>
    where
        X: CrystalPort,
        W: WdtPeriph,
        L: LowPower,
    {
        let faults = self.wait_for_crystal(delay);
        if faults > 0 {
            debug!("clock: crystal settled after {} faulted checks", faults);
        }
        self.load_dco_1mhz()?;

        let clocks = Clocks {
            mclk: Mclk(DCO_1MHZ),
            smclk: Smclk(DCO_1MHZ),
            aclk: Aclk(LFXT1),
        };
        debug!("clock: MCLK {} Hz, ACLK {} Hz", clocks.mclk.freq(), clocks.aclk.freq());
        Ok(clocks)
    }

    // Returns how many checks still saw a fault
    fn wait_for_crystal<W: WdtPeriph, L: LowPower>(&self, delay: &mut Delay<W, L>) -> u16 {
        let mut faults = 0u16;
        loop {
            self.periph.bcsctl3_clear(Bcsctl3::LFXT1OF);
            self.periph.ofifg_clear();
            delay.wait(DelayClass::QuarterSecond, 1);
            if !self.periph.ofifg_rd() {
                return faults;
            }
            faults = faults.saturating_add(1);
        }
    }

    fn load_dco_1mhz(&self) -> Result<(), Fault> {
        let bcs = self.periph.calbc1_1mhz_rd();
        if bcs == ERASED {
            warn!("clock: CALBC1_1MHZ erased");
            return Err(Fault::ErasedCalibration);
        }
        let dco = self.periph.caldco_1mhz_rd();
        // Lowest DCOx and MODx first, so the range switch never overshoots
        self.periph.dcoctl_wr(0);
        self.periph.bcsctl1_wr(bcs);
        self.periph.dcoctl_wr(dco);
        Ok(())
    }
}

/// Clocks produced by [`Bcs::calibrate`]
pub struct Clocks {
    /// CPU clock
    pub mclk: Mclk,
    /// Sub-main clock, drives the 1 ms delay class
    pub smclk: Smclk,
    /// Auxiliary clock, drives the 1 s and 250 ms delay classes
    pub aclk: Aclk,
}

/// MCLK clock object
pub struct Mclk(u32);
/// SMCLK clock object
pub struct Smclk(u32);
/// ACLK clock object
pub struct Aclk(u16);

/// Trait for configured clock objects
pub trait Clock {
    /// Type of the returned frequency value
    type Freq;

    /// Frequency of the clock
    fn freq(&self) -> Self::Freq;
}

impl Clock for Mclk {
    type Freq = u32;

    #[inline]
    fn freq(&self) -> u32 {
        self.0
    }
}

impl Clock for Smclk {
    type Freq = u32;

    #[inline]
    fn freq(&self) -> u32 {
        self.0
    }
}

impl Clock for Aclk {
    type Freq = u16;

    #[inline]
    fn freq(&self) -> u16 {
        self.0
    }
}

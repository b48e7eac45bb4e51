use super::Steal;
use bitflags::bitflags;

bitflags! {
    /// Basic clock system control register 3 (BCSCTL3)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Bcsctl3: u8 {
        /// LFXT1 oscillator fault
        const LFXT1OF = 1 << 0;
        /// XT2 oscillator fault
        const XT2OF = 1 << 1;
        /// LFXT1 load capacitance bit 0
        const XCAP0 = 1 << 2;
        /// LFXT1 load capacitance bit 1
        const XCAP1 = 1 << 3;
        /// LFXT1 range select bit 0
        const LFXT1S0 = 1 << 4;
        /// LFXT1 range select bit 1
        const LFXT1S1 = 1 << 5;
        /// XT2 range select bit 0
        const XT2S0 = 1 << 6;
        /// XT2 range select bit 1
        const XT2S1 = 1 << 7;
    }
}

pub trait BcsPeriph: Steal {
    fn bcsctl1_rd(&self) -> u8;
    fn bcsctl1_wr(&self, bits: u8);

    fn bcsctl3_rd(&self) -> Bcsctl3;
    fn bcsctl3_clear(&self, bits: Bcsctl3);

    fn dcoctl_rd(&self) -> u8;
    fn dcoctl_wr(&self, bits: u8);

    fn ofifg_rd(&self) -> bool;
    fn ofifg_clear(&self);

    fn calbc1_1mhz_rd(&self) -> u8;
    fn caldco_1mhz_rd(&self) -> u8;
}

#[cfg(feature = "msp430g2553")]
mod device {
    use super::*;
    use crate::hw_traits::sfr::{device as sfr, Ifg1};
    use crate::pac;

    crate::hw_traits::steal_impl!(SYSTEM_CLOCK);

    // Factory constants in information segment A, read-only
    #[inline(always)]
    fn calibration() -> &'static pac::calibration_data::RegisterBlock {
        unsafe { &*pac::CALIBRATION_DATA::ptr() }
    }

    impl BcsPeriph for pac::SYSTEM_CLOCK {
        #[inline(always)]
        fn bcsctl1_rd(&self) -> u8 {
            self.bcsctl1.read().bits()
        }

        #[inline(always)]
        fn bcsctl1_wr(&self, bits: u8) {
            self.bcsctl1.write(|w| unsafe { w.bits(bits) });
        }

        #[inline(always)]
        fn bcsctl3_rd(&self) -> Bcsctl3 {
            Bcsctl3::from_bits_retain(self.bcsctl3.read().bits())
        }

        #[inline(always)]
        fn bcsctl3_clear(&self, bits: Bcsctl3) {
            self.bcsctl3
                .modify(|r, w| unsafe { w.bits(r.bits() & !bits.bits()) });
        }

        #[inline(always)]
        fn dcoctl_rd(&self) -> u8 {
            self.dcoctl.read().bits()
        }

        #[inline(always)]
        fn dcoctl_wr(&self, bits: u8) {
            self.dcoctl.write(|w| unsafe { w.bits(bits) });
        }

        #[inline(always)]
        fn ofifg_rd(&self) -> bool {
            sfr::ifg1_rd().contains(Ifg1::OFIFG)
        }

        #[inline(always)]
        fn ofifg_clear(&self) {
            sfr::ifg1_clear(Ifg1::OFIFG);
        }

        #[inline(always)]
        fn calbc1_1mhz_rd(&self) -> u8 {
            calibration().calbc1_1mhz.read().bits()
        }

        #[inline(always)]
        fn caldco_1mhz_rd(&self) -> u8 {
            calibration().caldco_1mhz.read().bits()
        }
    }
}

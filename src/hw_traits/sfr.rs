use bitflags::bitflags;

bitflags! {
    /// Interrupt enable register 1 (IE1)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Ie1: u8 {
        /// Watchdog interval interrupt enable
        const WDTIE = 1 << 0;
        /// Oscillator fault interrupt enable
        const OFIE = 1 << 1;
        /// NMI interrupt enable
        const NMIIE = 1 << 4;
        /// Flash access violation interrupt enable
        const ACCVIE = 1 << 5;
    }
}

bitflags! {
    /// Interrupt flag register 1 (IFG1)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Ifg1: u8 {
        /// Watchdog interval elapsed
        const WDTIFG = 1 << 0;
        /// Oscillator fault
        const OFIFG = 1 << 1;
        /// Power-on reset
        const PORIFG = 1 << 2;
        /// Reset pin
        const RSTIFG = 1 << 3;
        /// NMI pin
        const NMIIFG = 1 << 4;
    }
}

#[cfg(feature = "msp430g2553")]
pub(crate) mod device {
    use super::{Ie1, Ifg1};
    use crate::pac;

    #[inline(always)]
    fn sfr() -> &'static pac::special_function::RegisterBlock {
        unsafe { &*pac::SPECIAL_FUNCTION::ptr() }
    }

    #[inline(always)]
    pub fn ie1_rd() -> Ie1 {
        Ie1::from_bits_retain(sfr().ie1.read().bits())
    }

    #[inline(always)]
    pub fn ie1_set(bits: Ie1) {
        sfr().ie1.modify(|r, w| unsafe { w.bits(r.bits() | bits.bits()) });
    }

    #[inline(always)]
    pub fn ie1_clear(bits: Ie1) {
        sfr().ie1.modify(|r, w| unsafe { w.bits(r.bits() & !bits.bits()) });
    }

    #[inline(always)]
    pub fn ifg1_rd() -> Ifg1 {
        Ifg1::from_bits_retain(sfr().ifg1.read().bits())
    }

    #[inline(always)]
    pub fn ifg1_clear(bits: Ifg1) {
        sfr().ifg1.modify(|r, w| unsafe { w.bits(r.bits() & !bits.bits()) });
    }
}

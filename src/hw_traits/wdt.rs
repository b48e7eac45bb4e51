use super::Steal;
use bitflags::bitflags;

/// Upper byte of every WDTCTL write. Reads return 0x69 in the upper byte instead.
pub const PASSWORD: u16 = 0x5A00;

bitflags! {
    /// Watchdog control register (WDTCTL), lower byte
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct WdtCtl: u16 {
        /// Interval select bit 0
        const WDTIS0 = 1 << 0;
        /// Interval select bit 1
        const WDTIS1 = 1 << 1;
        /// Clock source select: 0 = SMCLK, 1 = ACLK
        const WDTSSEL = 1 << 2;
        /// Counter clear
        const WDTCNTCL = 1 << 3;
        /// Mode select: 0 = watchdog, 1 = interval timer
        const WDTTMSEL = 1 << 4;
        /// RST/NMI pin function
        const WDTNMI = 1 << 5;
        /// NMI edge select
        const WDTNMIES = 1 << 6;
        /// Hold the counter
        const WDTHOLD = 1 << 7;
    }
}

pub trait WdtPeriph: Steal {
    fn wdtctl_rd(&self) -> u16;
    /// `bits` must include the password.
    fn wdtctl_wr(&self, bits: u16);

    fn wdtie_rd(&self) -> bool;
    fn wdtie_set(&self);
    fn wdtie_clear(&self);

    fn wdtifg_rd(&self) -> bool;
    fn wdtifg_clear(&self);
}

#[cfg(feature = "msp430g2553")]
mod device {
    use super::*;
    use crate::hw_traits::sfr::{device as sfr, Ie1, Ifg1};
    use crate::pac;

    crate::hw_traits::steal_impl!(WATCHDOG_TIMER);

    impl WdtPeriph for pac::WATCHDOG_TIMER {
        #[inline(always)]
        fn wdtctl_rd(&self) -> u16 {
            self.wdtctl.read().bits()
        }

        #[inline(always)]
        fn wdtctl_wr(&self, bits: u16) {
            self.wdtctl.write(|w| unsafe { w.bits(bits) });
        }

        #[inline(always)]
        fn wdtie_rd(&self) -> bool {
            sfr::ie1_rd().contains(Ie1::WDTIE)
        }

        #[inline(always)]
        fn wdtie_set(&self) {
            sfr::ie1_set(Ie1::WDTIE);
        }

        #[inline(always)]
        fn wdtie_clear(&self) {
            sfr::ie1_clear(Ie1::WDTIE);
        }

        #[inline(always)]
        fn wdtifg_rd(&self) -> bool {
            sfr::ifg1_rd().contains(Ifg1::WDTIFG)
        }

        #[inline(always)]
        fn wdtifg_clear(&self) {
            sfr::ifg1_clear(Ifg1::WDTIFG);
        }
    }
}

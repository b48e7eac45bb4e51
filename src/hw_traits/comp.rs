use super::Steal;
use bitflags::bitflags;

bitflags! {
    /// Comparator_A+ control register 1 (CACTL1)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Cactl1: u8 {
        /// Interrupt flag
        const CAIFG = 1 << 0;
        /// Interrupt enable
        const CAIE = 1 << 1;
        /// Interrupt edge select
        const CAIES = 1 << 2;
        /// Comparator on
        const CAON = 1 << 3;
        /// Reference select bit 0
        const CAREF0 = 1 << 4;
        /// Reference select bit 1
        const CAREF1 = 1 << 5;
        /// Reference applied to the inverting input
        const CARSEL = 1 << 6;
        /// Exchange inputs
        const CAEX = 1 << 7;
    }
}

bitflags! {
    /// Comparator_A+ control register 2 (CACTL2)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Cactl2: u8 {
        /// Comparator output
        const CAOUT = 1 << 0;
        /// Output filter
        const CAF = 1 << 1;
        /// Input select bit 0
        const P2CA0 = 1 << 2;
        /// Input select bit 1
        const P2CA1 = 1 << 3;
        /// Input select bit 2
        const P2CA2 = 1 << 4;
        /// Input select bit 3
        const P2CA3 = 1 << 5;
        /// Input select bit 4
        const P2CA4 = 1 << 6;
        /// Short the two inputs
        const CASHORT = 1 << 7;
    }
}

pub trait CompPeriph: Steal {
    fn cactl1_rd(&self) -> Cactl1;
    fn cactl1_wr(&self, bits: Cactl1);

    fn cactl2_rd(&self) -> Cactl2;
    fn cactl2_wr(&self, bits: Cactl2);

    /// Bit N disables the digital input buffer of CAN
    fn capd_wr(&self, bits: u8);
}

#[cfg(feature = "msp430g2553")]
mod device {
    use super::*;
    use crate::pac;

    crate::hw_traits::steal_impl!(COMPARATOR_A);

    impl CompPeriph for pac::COMPARATOR_A {
        #[inline(always)]
        fn cactl1_rd(&self) -> Cactl1 {
            Cactl1::from_bits_retain(self.cactl1.read().bits())
        }

        #[inline(always)]
        fn cactl1_wr(&self, bits: Cactl1) {
            self.cactl1.write(|w| unsafe { w.bits(bits.bits()) });
        }

        #[inline(always)]
        fn cactl2_rd(&self) -> Cactl2 {
            Cactl2::from_bits_retain(self.cactl2.read().bits())
        }

        #[inline(always)]
        fn cactl2_wr(&self, bits: Cactl2) {
            self.cactl2.write(|w| unsafe { w.bits(bits.bits()) });
        }

        #[inline(always)]
        fn capd_wr(&self, bits: u8) {
            self.capd.write(|w| unsafe { w.bits(bits) });
        }
    }
}

use super::Steal;

pub trait GpioPeriph: Steal {
    fn pxin_rd(&self) -> u8;

    fn pxout_rd(&self) -> u8;
    fn pxout_wr(&self, bits: u8);
    fn pxout_set(&self, bits: u8);
    fn pxout_clear(&self, bits: u8);

    fn pxdir_rd(&self) -> u8;
    fn pxdir_wr(&self, bits: u8);
    fn pxdir_set(&self, bits: u8);
    fn pxdir_clear(&self, bits: u8);

    fn pxren_rd(&self) -> u8;
    fn pxren_wr(&self, bits: u8);
    fn pxren_set(&self, bits: u8);
    fn pxren_clear(&self, bits: u8);

    fn pxsel_rd(&self) -> u8;
    fn pxsel_wr(&self, bits: u8);
    fn pxsel_set(&self, bits: u8);
    fn pxsel_clear(&self, bits: u8);
}

pub trait IntrPeriph: GpioPeriph {
    fn pxies_rd(&self) -> u8;
    fn pxies_wr(&self, bits: u8);
    fn pxies_set(&self, bits: u8);
    fn pxies_clear(&self, bits: u8);

    fn pxie_rd(&self) -> u8;
    fn pxie_wr(&self, bits: u8);
    fn pxie_set(&self, bits: u8);
    fn pxie_clear(&self, bits: u8);

    fn pxifg_rd(&self) -> u8;
    fn pxifg_wr(&self, bits: u8);
    fn pxifg_set(&self, bits: u8);
    fn pxifg_clear(&self, bits: u8);
}

/// Port whose pins 6 and 7 double as the LFXT1 crystal pins (XIN/XOUT).
pub trait CrystalPort: GpioPeriph {}

#[cfg(feature = "msp430g2553")]
pub use device::{P1, P2};

#[cfg(feature = "msp430g2553")]
mod device {
    use super::*;
    use crate::pac;

    /// Port 1 registers. Both ports share the `PORT_1_2` register block in the PAC, so each port
    /// gets its own zero-sized handle.
    pub struct P1(());
    /// Port 2 registers
    pub struct P2(());

    #[inline(always)]
    fn regs() -> &'static pac::port_1_2::RegisterBlock {
        unsafe { &*pac::PORT_1_2::ptr() }
    }

    macro_rules! reg_methods {
        ($reg:ident, $rd:ident, $wr:ident, $set:ident, $clear:ident) => {
            #[inline(always)]
            fn $rd(&self) -> u8 {
                regs().$reg.read().bits()
            }

            #[inline(always)]
            fn $wr(&self, bits: u8) {
                regs().$reg.write(|w| unsafe { w.bits(bits) });
            }

            #[inline(always)]
            fn $set(&self, bits: u8) {
                regs().$reg.modify(|r, w| unsafe { w.bits(r.bits() | bits) });
            }

            #[inline(always)]
            fn $clear(&self, bits: u8) {
                regs().$reg.modify(|r, w| unsafe { w.bits(r.bits() & !bits) });
            }
        };
    }

    macro_rules! gpio_impl {
        ($Px:ident => $pxin:ident, $pxout:ident, $pxdir:ident, $pxren:ident, $pxsel:ident,
         [$pxies:ident, $pxie:ident, $pxifg:ident]) => {
            impl Steal for $Px {
                #[inline(always)]
                unsafe fn steal() -> Self {
                    $Px(())
                }
            }

            impl GpioPeriph for $Px {
                #[inline(always)]
                fn pxin_rd(&self) -> u8 {
                    regs().$pxin.read().bits()
                }

                reg_methods!($pxout, pxout_rd, pxout_wr, pxout_set, pxout_clear);
                reg_methods!($pxdir, pxdir_rd, pxdir_wr, pxdir_set, pxdir_clear);
                reg_methods!($pxren, pxren_rd, pxren_wr, pxren_set, pxren_clear);
                reg_methods!($pxsel, pxsel_rd, pxsel_wr, pxsel_set, pxsel_clear);
            }

            impl IntrPeriph for $Px {
                reg_methods!($pxies, pxies_rd, pxies_wr, pxies_set, pxies_clear);
                reg_methods!($pxie, pxie_rd, pxie_wr, pxie_set, pxie_clear);
                reg_methods!($pxifg, pxifg_rd, pxifg_wr, pxifg_set, pxifg_clear);
            }
        };
    }

    gpio_impl!(P1 => p1in, p1out, p1dir, p1ren, p1sel, [p1ies, p1ie, p1ifg]);
    gpio_impl!(P2 => p2in, p2out, p2dir, p2ren, p2sel, [p2ies, p2ie, p2ifg]);

    impl CrystalPort for P2 {}

    /// Split the shared port block into its two ports.
    #[inline(always)]
    pub fn split(_regs: pac::PORT_1_2) -> (P1, P2) {
        (P1(()), P2(()))
    }
}

#[cfg(feature = "msp430g2553")]
pub use device::split;

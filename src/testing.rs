//! Host-side register file for driver tests.
//!
//! Every mock peripheral reads and writes a thread-local [`Regs`], so each test thread sees its
//! own device. [`MockLpm`] stands in for the CPU: instead of sleeping it advances simulated time
//! by one watchdog period and runs the watchdog interrupt handler. With `tickless_wakes` set, every
//! other wake-up carries no tick, as if an unrelated interrupt had woken the CPU.

#![allow(dead_code)]

use crate::delay::TickCounter;
use crate::hw_traits::bcs::{BcsPeriph, Bcsctl3};
use crate::hw_traits::comp::{Cactl1, Cactl2, CompPeriph};
use crate::hw_traits::gpio::{CrystalPort, GpioPeriph, IntrPeriph};
use crate::hw_traits::wdt::{WdtCtl, WdtPeriph, PASSWORD};
use crate::hw_traits::Steal;
use crate::lpm::{LowPower, PowerMode};
use crate::watchdog::WdtInterval;
use std::cell::RefCell;

// No delay in the tests comes anywhere near this
const MAX_SLEEPS: usize = 1_000_000;

#[derive(Default)]
pub struct PortRegs {
    pub input: u8,
    pub out: u8,
    pub dir: u8,
    pub ren: u8,
    pub sel: u8,
    pub ies: u8,
    pub ie: u8,
    pub ifg: u8,
    /// (time in us, PxOUT) after every PxOUT write
    pub out_log: Vec<(u64, u8)>,
}

pub struct Regs {
    pub wdtctl: u16,
    pub ie1_wdtie: bool,
    pub ifg1_wdtifg: bool,
    pub ifg1_ofifg: bool,

    pub bcsctl1: u8,
    pub bcsctl3: u8,
    pub dcoctl: u8,
    pub dcoctl_log: Vec<u8>,
    pub calbc1_1mhz: u8,
    pub caldco_1mhz: u8,
    /// OFIFG clears that the oscillator fault survives
    pub osc_faults: u16,
    pub ofifg_clears: u16,

    pub cactl1: u8,
    pub cactl1_log: Vec<u8>,
    pub cactl2: u8,
    pub capd: u8,
    /// Level CAOUT takes while the comparator is on
    pub comp_output: bool,
    pub comp_reads_while_on: u16,

    pub p1: PortRegs,
    pub p2: PortRegs,

    pub now_us: u64,
    pub wdt_ticks: u32,
    pub sleeps: Vec<PowerMode>,
    /// Every other wake-up comes from an unrelated interrupt and carries no tick
    pub tickless_wakes: bool,
    pub wakes: u32,
}

impl Default for Regs {
    // Power-on state, with the crystal still starting
    fn default() -> Self {
        Regs {
            wdtctl: 0x0000,
            ie1_wdtie: false,
            ifg1_wdtifg: false,
            ifg1_ofifg: true,
            bcsctl1: 0x87,
            bcsctl3: Bcsctl3::LFXT1OF.bits(),
            dcoctl: 0x60,
            dcoctl_log: Vec::new(),
            calbc1_1mhz: 0x86,
            caldco_1mhz: 0xB4,
            osc_faults: 0,
            ofifg_clears: 0,
            cactl1: 0,
            cactl1_log: Vec::new(),
            cactl2: 0,
            capd: 0,
            comp_output: false,
            comp_reads_while_on: 0,
            p1: PortRegs::default(),
            p2: PortRegs::default(),
            now_us: 0,
            wdt_ticks: 0,
            sleeps: Vec::new(),
            tickless_wakes: false,
            wakes: 0,
        }
    }
}

thread_local! {
    static REGS: RefCell<Regs> = RefCell::new(Regs::default());
}

/// Put the device back into its power-on state
pub fn reset() {
    REGS.with(|r| *r.borrow_mut() = Regs::default());
}

pub fn with<R>(f: impl FnOnce(&mut Regs) -> R) -> R {
    REGS.with(|r| f(&mut r.borrow_mut()))
}

/// A fresh counter for one test. Real firmware uses a `static`.
pub fn leak_counter() -> &'static TickCounter {
    Box::leak(Box::new(TickCounter::new()))
}

pub fn now_us() -> u64 {
    with(|r| r.now_us)
}

pub fn wdt_running() -> bool {
    with(|r| r.wdtctl & WdtCtl::WDTHOLD.bits() == 0)
}

// Interval the watchdog is currently counting towards
fn wdt_interval(ctl: u16) -> WdtInterval {
    let ctl = WdtCtl::from_bits_truncate(ctl);
    let aclk = ctl.contains(WdtCtl::WDTSSEL);
    match (
        aclk,
        ctl.contains(WdtCtl::WDTIS1),
        ctl.contains(WdtCtl::WDTIS0),
    ) {
        (true, false, false) => WdtInterval::Aclk32K,
        (true, false, true) => WdtInterval::Aclk8K,
        (true, true, false) => WdtInterval::Aclk512,
        (true, true, true) => WdtInterval::Aclk64,
        (false, false, false) => WdtInterval::Smclk32K,
        (false, false, true) => WdtInterval::Smclk8K,
        (false, true, false) => WdtInterval::Smclk512,
        (false, true, true) => WdtInterval::Smclk64,
    }
}

// 32768 Hz ACLK, 1 MHz SMCLK
fn period_us(interval: WdtInterval) -> u64 {
    let divider = interval.divider() as u64;
    if interval.uses_aclk() {
        divider * 1_000_000 / 32768
    } else {
        divider
    }
}

pub struct MockWdt;

impl Steal for MockWdt {
    unsafe fn steal() -> Self {
        MockWdt
    }
}

impl WdtPeriph for MockWdt {
    fn wdtctl_rd(&self) -> u16 {
        with(|r| (r.wdtctl & 0x00FF) | 0x6900)
    }

    fn wdtctl_wr(&self, bits: u16) {
        assert_eq!(bits & 0xFF00, PASSWORD, "WDTCTL written without password");
        with(|r| r.wdtctl = bits);
    }

    fn wdtie_rd(&self) -> bool {
        with(|r| r.ie1_wdtie)
    }

    fn wdtie_set(&self) {
        with(|r| r.ie1_wdtie = true);
    }

    fn wdtie_clear(&self) {
        with(|r| r.ie1_wdtie = false);
    }

    fn wdtifg_rd(&self) -> bool {
        with(|r| r.ifg1_wdtifg)
    }

    fn wdtifg_clear(&self) {
        with(|r| r.ifg1_wdtifg = false);
    }
}

pub struct MockBcs;

impl Steal for MockBcs {
    unsafe fn steal() -> Self {
        MockBcs
    }
}

impl BcsPeriph for MockBcs {
    fn bcsctl1_rd(&self) -> u8 {
        with(|r| r.bcsctl1)
    }

    fn bcsctl1_wr(&self, bits: u8) {
        with(|r| r.bcsctl1 = bits);
    }

    fn bcsctl3_rd(&self) -> Bcsctl3 {
        with(|r| Bcsctl3::from_bits_retain(r.bcsctl3))
    }

    fn bcsctl3_clear(&self, bits: Bcsctl3) {
        with(|r| r.bcsctl3 &= !bits.bits());
    }

    fn dcoctl_rd(&self) -> u8 {
        with(|r| r.dcoctl)
    }

    fn dcoctl_wr(&self, bits: u8) {
        with(|r| {
            r.dcoctl = bits;
            r.dcoctl_log.push(bits);
        });
    }

    fn ofifg_rd(&self) -> bool {
        with(|r| r.ifg1_ofifg)
    }

    // An unsettled crystal raises the fault again right away
    fn ofifg_clear(&self) {
        with(|r| {
            r.ofifg_clears += 1;
            if r.osc_faults > 0 {
                r.osc_faults -= 1;
                r.ifg1_ofifg = true;
            } else {
                r.ifg1_ofifg = false;
            }
        });
    }

    fn calbc1_1mhz_rd(&self) -> u8 {
        with(|r| r.calbc1_1mhz)
    }

    fn caldco_1mhz_rd(&self) -> u8 {
        with(|r| r.caldco_1mhz)
    }
}

pub struct MockComp;

impl Steal for MockComp {
    unsafe fn steal() -> Self {
        MockComp
    }
}

impl CompPeriph for MockComp {
    fn cactl1_rd(&self) -> Cactl1 {
        with(|r| Cactl1::from_bits_retain(r.cactl1))
    }

    fn cactl1_wr(&self, bits: Cactl1) {
        with(|r| {
            r.cactl1 = bits.bits();
            r.cactl1_log.push(bits.bits());
        });
    }

    fn cactl2_rd(&self) -> Cactl2 {
        with(|r| {
            let mut ctl2 = Cactl2::from_bits_retain(r.cactl2);
            if r.cactl1 & Cactl1::CAON.bits() != 0 {
                r.comp_reads_while_on += 1;
                ctl2.set(Cactl2::CAOUT, r.comp_output);
            }
            ctl2
        })
    }

    // CAOUT is read-only
    fn cactl2_wr(&self, bits: Cactl2) {
        with(|r| r.cactl2 = bits.difference(Cactl2::CAOUT).bits());
    }

    fn capd_wr(&self, bits: u8) {
        with(|r| r.capd = bits);
    }
}

macro_rules! mock_port {
    ($Px:ident, $px:ident) => {
        pub struct $Px;

        impl Steal for $Px {
            unsafe fn steal() -> Self {
                $Px
            }
        }

        impl $Px {
            fn out_update(f: impl FnOnce(u8) -> u8) {
                with(|r| {
                    r.$px.out = f(r.$px.out);
                    let entry = (r.now_us, r.$px.out);
                    r.$px.out_log.push(entry);
                });
            }
        }

        impl GpioPeriph for $Px {
            fn pxin_rd(&self) -> u8 {
                with(|r| r.$px.input)
            }

            fn pxout_rd(&self) -> u8 {
                with(|r| r.$px.out)
            }
            fn pxout_wr(&self, bits: u8) {
                Self::out_update(|_| bits);
            }
            fn pxout_set(&self, bits: u8) {
                Self::out_update(|out| out | bits);
            }
            fn pxout_clear(&self, bits: u8) {
                Self::out_update(|out| out & !bits);
            }

            mock_port!(@reg $px, dir, pxdir_rd, pxdir_wr, pxdir_set, pxdir_clear);
            mock_port!(@reg $px, ren, pxren_rd, pxren_wr, pxren_set, pxren_clear);
            mock_port!(@reg $px, sel, pxsel_rd, pxsel_wr, pxsel_set, pxsel_clear);
        }

        impl IntrPeriph for $Px {
            mock_port!(@reg $px, ies, pxies_rd, pxies_wr, pxies_set, pxies_clear);
            mock_port!(@reg $px, ie, pxie_rd, pxie_wr, pxie_set, pxie_clear);
            mock_port!(@reg $px, ifg, pxifg_rd, pxifg_wr, pxifg_set, pxifg_clear);
        }
    };
    (@reg $px:ident, $reg:ident, $rd:ident, $wr:ident, $set:ident, $clear:ident) => {
        fn $rd(&self) -> u8 {
            with(|r| r.$px.$reg)
        }
        fn $wr(&self, bits: u8) {
            with(|r| r.$px.$reg = bits);
        }
        fn $set(&self, bits: u8) {
            with(|r| r.$px.$reg |= bits);
        }
        fn $clear(&self, bits: u8) {
            with(|r| r.$px.$reg &= !bits);
        }
    };
}

mock_port!(MockP1, p1);
mock_port!(MockP2, p2);

impl CrystalPort for MockP2 {}

/// Simulated CPU sleep. Each wake-up is one watchdog interval.
pub struct MockLpm {
    counter: &'static TickCounter,
}

impl MockLpm {
    pub fn new(counter: &'static TickCounter) -> Self {
        MockLpm { counter }
    }
}

impl LowPower for MockLpm {
    fn sleep_while(&mut self, mode: PowerMode, mut pending: impl FnMut() -> bool) {
        for _ in 0..MAX_SLEEPS {
            if !pending() {
                return;
            }
            let ctl = with(|r| r.wdtctl);
            assert!(wdt_running(), "sleeping with the watchdog held");
            assert!(
                ctl & WdtCtl::WDTTMSEL.bits() != 0,
                "watchdog in reset mode"
            );
            assert!(with(|r| r.ie1_wdtie), "sleeping with WDTIE masked");

            let interval = wdt_interval(ctl);
            let clock_kept = if interval.uses_aclk() {
                mode.keeps_aclk()
            } else {
                mode.keeps_smclk()
            };
            assert!(clock_kept, "{:?} stops the watchdog clock", mode);

            let tickless = with(|r| {
                r.sleeps.push(mode);
                r.wakes += 1;
                r.tickless_wakes && r.wakes % 2 == 1
            });
            if tickless {
                continue;
            }

            with(|r| {
                r.now_us += period_us(interval);
                r.wdt_ticks += 1;
                // Set by the interval, cleared again when the interrupt is serviced
                r.ifg1_wdtifg = false;
            });
            self.counter.on_interrupt::<MockWdt>();
        }
        panic!("never woke up");
    }
}

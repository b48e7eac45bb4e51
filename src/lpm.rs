//! Low Power Mode (LPM) control
//!
//! The MSP430G2xx supports LPM0 through LPM4. Every mode turns the CPU off; they differ in which
//! clocks keep running.
//! # LPM0
//! CPU and MCLK off. SMCLK and ACLK keep running, so SMCLK driven peripherals such as the
//! watchdog's `Smclk*` intervals still tick.
//!
//! # LPM3
//! CPU, MCLK, SMCLK and the DCO are off. Only ACLK keeps running. Peripherals that must wake the
//! CPU from LPM3 have to run from ACLK.
//!
//! # LPM4
//! All clocks are off. Only external events such as GPIO interrupts can wake the CPU.
//!
//! Waking up is done by an interrupt handler that clears the LPM bits in the status register
//! copy it restores on return (the `wake_cpu` flavour of `#[interrupt]`). Entering an LPM and
//! enabling interrupts happen in the same instruction, so a wake-up that arrives after a
//! condition was checked with interrupts disabled cannot be missed.

// Status register:
// SCG1 SCG0 OSC_OFF CPU_OFF GIE N Z C
// 7    6    5       4       3   2 1 0
const SCG1: u8 = 1 << 7;
const SCG0: u8 = 1 << 6;
const OSC_OFF: u8 = 1 << 5;
const CPU_OFF: u8 = 1 << 4;
#[cfg(feature = "msp430g2553")]
const GIE: u8 = 1 << 3;

/// Low power modes that can be entered while waiting for an interrupt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerMode {
    /// CPU off. SMCLK and ACLK running.
    Lpm0,
    /// CPU, SMCLK and DCO off. ACLK running.
    Lpm3,
    /// All clocks off
    Lpm4,
}

impl PowerMode {
    /// Status register bits that select this mode
    #[inline]
    pub const fn sr_bits(self) -> u8 {
        match self {
            PowerMode::Lpm0 => CPU_OFF,
            PowerMode::Lpm3 => SCG1 | SCG0 | CPU_OFF,
            PowerMode::Lpm4 => SCG1 | SCG0 | OSC_OFF | CPU_OFF,
        }
    }

    /// Whether SMCLK keeps running in this mode
    #[inline]
    pub const fn keeps_smclk(self) -> bool {
        self.sr_bits() & SCG1 == 0
    }

    /// Whether ACLK keeps running in this mode
    #[inline]
    pub const fn keeps_aclk(self) -> bool {
        self.sr_bits() & OSC_OFF == 0
    }
}

/// Sleeping until an interrupt handler decides the CPU should resume.
pub trait LowPower {
    /// Enter `mode` for as long as `pending` returns `true`.
    ///
    /// `pending` is evaluated with interrupts disabled. If it returns `true` the CPU enters `mode`
    /// with interrupts enabled, and `pending` is evaluated again after every wake-up. Interrupts
    /// are enabled when this returns.
    fn sleep_while(&mut self, mode: PowerMode, pending: impl FnMut() -> bool);
}

/// Low power mode entry on the CPU's status register.
#[cfg(feature = "msp430g2553")]
pub struct Lpm(());

#[cfg(feature = "msp430g2553")]
impl Lpm {
    /// Take the low power mode controller.
    ///
    /// Only one context should ever put the CPU to sleep, so this is done once during start-up.
    #[inline]
    pub fn new() -> Self {
        Lpm(())
    }
}

#[cfg(feature = "msp430g2553")]
impl LowPower for Lpm {
    #[inline]
    fn sleep_while(&mut self, mode: PowerMode, mut pending: impl FnMut() -> bool) {
        loop {
            msp430::interrupt::disable();
            if !pending() {
                unsafe { msp430::interrupt::enable() };
                return;
            }
            enter(mode);
        }
    }
}

/// Enter `mode` with interrupts enabled and return once an interrupt handler wakes the CPU.
#[cfg(feature = "msp430g2553")]
#[inline(always)]
pub fn enter(mode: PowerMode) {
    match mode {
        PowerMode::Lpm0 => set_sr_bits::<{ CPU_OFF | GIE }>(),
        PowerMode::Lpm3 => set_sr_bits::<{ SCG1 | SCG0 | CPU_OFF | GIE }>(),
        PowerMode::Lpm4 => set_sr_bits::<{ SCG1 | SCG0 | OSC_OFF | CPU_OFF | GIE }>(),
    }
}

/// For each set bit in the bitmask, set the corresponding bit in the status register.
#[cfg(feature = "msp430g2553")]
#[inline(always)]
fn set_sr_bits<const MASK: u8>() {
    unsafe {
        core::arch::asm!(
            "bis.b #{mask}, SR",
            "nop",
            mask = const MASK,
            options(nostack)
        )
    };
}

//! Low power delays driven by the watchdog interval timer.
//!
//! A delay arms a [`TickCounter`] with the number of watchdog ticks to wait for, starts the
//! watchdog in interval mode and puts the CPU to sleep. The watchdog interrupt handler calls
//! [`TickCounter::on_interrupt`], which counts ticks, and on the last one holds the watchdog,
//! masks its interrupt and reports that the CPU should wake up.
//!
//! The counter must be reachable from the interrupt handler, so it lives in a `static`:
//!
//! ```ignore
//! static TICKS: TickCounter = TickCounter::new();
//!
//! #[interrupt(wake_cpu)]
//! fn WDT() {
//!     TICKS.on_interrupt::<pac::WATCHDOG_TIMER>();
//! }
//! ```
//!
//! Three tick rates are available, see [`DelayClass`]. The 1 ms class runs the watchdog from a
//! 1 MHz SMCLK at 0.5 ms per tick, so it needs two ticks per requested unit and can only use
//! LPM0. The two ACLK classes sleep in LPM3.

use crate::hw_traits::wdt::WdtPeriph;
use crate::lpm::{LowPower, PowerMode};
use crate::watchdog::{self, IntervalMode, Wdt, WdtInterval};
use core::cell::Cell;
use critical_section::Mutex;

/// Tick rates of the delay service
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DelayClass {
    /// 1 s per unit, ACLK / 32768
    Second,
    /// 250 ms per unit, ACLK / 8192
    QuarterSecond,
    /// 1 ms per unit, two SMCLK / 512 ticks
    Millisecond,
}

impl DelayClass {
    /// Watchdog interval that produces this class's ticks
    #[inline]
    pub const fn interval(self) -> WdtInterval {
        match self {
            DelayClass::Second => WdtInterval::Aclk32K,
            DelayClass::QuarterSecond => WdtInterval::Aclk8K,
            DelayClass::Millisecond => WdtInterval::Smclk512,
        }
    }

    /// Deepest low power mode that keeps the watchdog's clock running
    #[inline]
    pub const fn power_mode(self) -> PowerMode {
        match self {
            DelayClass::Second | DelayClass::QuarterSecond => PowerMode::Lpm3,
            DelayClass::Millisecond => PowerMode::Lpm0,
        }
    }

    /// Watchdog ticks per requested unit. The 2:1 ratio of the millisecond class is a property of
    /// the 1 MHz SMCLK calibration and does not follow from the other two classes.
    #[inline]
    pub const fn ticks_per_unit(self) -> u16 {
        match self {
            DelayClass::Second | DelayClass::QuarterSecond => 1,
            DelayClass::Millisecond => 2,
        }
    }

    /// Ticks to wait for `multiplier` units, saturating at `u16::MAX`
    #[inline]
    pub const fn target_ticks(self, multiplier: u16) -> u16 {
        multiplier.saturating_mul(self.ticks_per_unit())
    }
}

/// Where a [`TickCounter`] is in its wait cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum WaitState {
    /// No wait in progress
    Idle,
    /// Watchdog running, counting ticks
    Armed,
    /// Target reached, watchdog held, CPU woken
    Complete,
}

#[derive(Clone, Copy)]
struct Countdown {
    ticks: u16,
    target: u16,
    state: WaitState,
}

/// Tick count and target of the current delay, shared between the delay service and the watchdog
/// interrupt handler.
pub struct TickCounter {
    inner: Mutex<Cell<Countdown>>,
}

impl TickCounter {
    /// An idle counter
    pub const fn new() -> Self {
        TickCounter {
            inner: Mutex::new(Cell::new(Countdown {
                ticks: 0,
                target: 0,
                state: WaitState::Idle,
            })),
        }
    }

    #[inline]
    fn get(&self) -> Countdown {
        critical_section::with(|cs| self.inner.borrow(cs).get())
    }

    // Called before the watchdog interrupt is enabled, so the handler never sees a stale target
    #[inline]
    fn arm(&self, target: u16) {
        critical_section::with(|cs| {
            self.inner.borrow(cs).set(Countdown {
                ticks: 0,
                target,
                state: WaitState::Armed,
            })
        });
    }

    // Keeps the final tick count readable until the next wait
    #[inline]
    fn release(&self) {
        critical_section::with(|cs| {
            let cell = self.inner.borrow(cs);
            cell.set(Countdown {
                state: WaitState::Idle,
                ..cell.get()
            });
        });
    }

    /// Ticks counted by the current or most recent wait
    #[cfg(test)]
    #[inline]
    pub(crate) fn ticks(&self) -> u16 {
        self.get().ticks
    }

    /// Ticks the current or most recent wait was armed with
    #[cfg(test)]
    #[inline]
    pub(crate) fn target(&self) -> u16 {
        self.get().target
    }

    /// Current state of the wait cycle
    #[inline]
    pub(crate) fn state(&self) -> WaitState {
        self.get().state
    }

    /// Count one watchdog tick. Call this from the watchdog interrupt handler.
    ///
    /// On the tick that reaches the target the watchdog is held and its interrupt masked before
    /// this returns `true`, meaning the sleeping main context should be woken. Ticks arriving
    /// while no wait is armed are ignored.
    #[inline]
    pub fn on_interrupt<P: WdtPeriph>(&self) -> bool {
        let done = critical_section::with(|cs| {
            let cell = self.inner.borrow(cs);
            let mut countdown = cell.get();
            if countdown.state != WaitState::Armed {
                return false;
            }
            countdown.ticks = countdown.ticks.wrapping_add(1);
            let done = countdown.ticks == countdown.target;
            if done {
                countdown.state = WaitState::Complete;
            }
            cell.set(countdown);
            done
        });
        if done {
            // The main context is asleep until we return, so nothing else touches the watchdog
            unsafe { watchdog::stop_from_isr::<P>() };
        }
        done
    }
}

impl Default for TickCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Blocking, low power delay provider built on the watchdog interval timer
pub struct Delay<P: WdtPeriph, L: LowPower> {
    wdt: Wdt<P, IntervalMode>,
    lpm: L,
    counter: &'static TickCounter,
}

impl<P: WdtPeriph, L: LowPower> Delay<P, L> {
    /// Create a delay provider. `counter` must be the same counter the watchdog interrupt
    /// handler ticks.
    pub fn new(mut wdt: Wdt<P, IntervalMode>, lpm: L, counter: &'static TickCounter) -> Self {
        wdt.pause();
        wdt.disable_interrupts();
        Delay { wdt, lpm, counter }
    }

    /// Sleep until `multiplier` units of `class` have elapsed.
    ///
    /// A multiplier of zero returns immediately without starting the watchdog.
    pub fn wait(&mut self, class: DelayClass, multiplier: u16) {
        if multiplier == 0 {
            return;
        }
        let target = class.target_ticks(multiplier);
        trace!("delay: {} ticks of {}", target, class);

        self.counter.arm(target);
        self.wdt.clear_ifg().enable_interrupts();
        self.wdt.start(class.interval());

        let counter = self.counter;
        self.lpm
            .sleep_while(class.power_mode(), || counter.state() == WaitState::Armed);
        self.counter.release();
    }

    /// Sleep for `n` seconds
    #[inline]
    pub fn delay_1s(&mut self, n: u16) {
        self.wait(DelayClass::Second, n);
    }

    /// Sleep for `n` quarter seconds
    #[inline]
    pub fn delay_250ms(&mut self, n: u16) {
        self.wait(DelayClass::QuarterSecond, n);
    }

    /// Sleep for `n` milliseconds
    #[inline]
    pub fn delay_1ms(&mut self, n: u16) {
        self.wait(DelayClass::Millisecond, n);
    }

    /// Tick counter shared with the interrupt handler
    #[cfg(test)]
    #[inline]
    pub(crate) fn counter(&self) -> &'static TickCounter {
        self.counter
    }

    /// Give back the watchdog and the low power controller
    pub fn free(self) -> (Wdt<P, IntervalMode>, L) {
        (self.wdt, self.lpm)
    }

    fn wait_long(&mut self, class: DelayClass, mut units: u32) {
        while units > 0 {
            let chunk = units.min(u16::MAX as u32) as u16;
            self.wait(class, chunk);
            units -= chunk as u32;
        }
    }
}

/// Delays are split into whole seconds, quarter seconds and milliseconds, so that as much of the
/// delay as possible is spent in LPM3. Sub-millisecond requests are rounded up to 1 ms.
impl<P: WdtPeriph, L: LowPower> embedded_hal::delay::DelayNs for Delay<P, L> {
    #[inline]
    fn delay_ns(&mut self, ns: u32) {
        self.delay_ms(ns.div_ceil(1_000_000));
    }

    #[inline]
    fn delay_us(&mut self, us: u32) {
        self.delay_ms(us.div_ceil(1_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        let (secs, rest) = (ms / 1000, ms % 1000);
        self.wait_long(DelayClass::Second, secs);
        self.wait(DelayClass::QuarterSecond, (rest / 250) as u16);
        self.wait(DelayClass::Millisecond, (rest % 250) as u16);
    }
}

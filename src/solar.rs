//! Solar sensing loop.
//!
//! Every 250 ms the comparator compares the solar cell on CA6 against 0.25 Vcc. When the cell
//! voltage is above the reference (comparator output low) the LED is pulsed for 200 ms. With a
//! lit cell the LED therefore blinks with a period of about 450 ms; in the dark it stays off and
//! the MCU spends almost all of its time in LPM3.

use crate::clock::{Bcs, Clocks};
use crate::comparator::Comparator;
use crate::delay::Delay;
use crate::fault::Fault;
use crate::gpio::{Input, Output, Pin, Pullup, Xt1Pins};
use crate::hw_traits::bcs::BcsPeriph;
use crate::hw_traits::comp::CompPeriph;
use crate::hw_traits::gpio::{CrystalPort, IntrPeriph};
use crate::hw_traits::wdt::WdtPeriph;
use crate::lpm::LowPower;
use core::convert::Infallible;
use embedded_hal::digital::OutputPin;

/// Quarter seconds between comparator samples
pub const POLL_QUARTERS: u16 = 1;
/// LED pulse length in milliseconds
pub const PULSE_MS: u16 = 200;

/// Outcome of one pass of the sensing loop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Poll {
    /// Cell above the reference, LED pulsed
    Pulsed,
    /// Cell below the reference, LED left off
    Dark,
}

/// The sensing application: delay service, comparator and LED.
///
/// The LED is driven from the sleep/wake loop with no way to report a failure, so only pins that
/// cannot fail are accepted.
pub struct SolarSensor<W, L, C, LED>
where
    W: WdtPeriph,
    L: LowPower,
    C: CompPeriph,
    LED: OutputPin<Error = Infallible>,
{
    delay: Delay<W, L>,
    comparator: Comparator<C>,
    led: LED,
}

impl<W, L, C, LED> SolarSensor<W, L, C, LED>
where
    W: WdtPeriph,
    L: LowPower,
    C: CompPeriph,
    LED: OutputPin<Error = Infallible>,
{
    /// Bring up the clocks and assemble the sensor.
    ///
    /// Fails only if the DCO calibration is missing, in which case the LED has not been touched
    /// and the caller is expected to [`halt`](crate::fault::halt).
    pub fn start<B, X>(
        mut delay: Delay<W, L>,
        bcs: Bcs<B>,
        xt1: &Xt1Pins<X>,
        comparator: Comparator<C>,
        led: LED,
    ) -> Result<(Self, Clocks), Fault>
    where
        B: BcsPeriph,
        X: CrystalPort,
    {
        let clocks = bcs.calibrate(xt1, &mut delay)?;
        Ok((Self::new(delay, comparator, led), clocks))
    }

    /// Assemble the sensor from already running clocks
    pub fn new(delay: Delay<W, L>, comparator: Comparator<C>, led: LED) -> Self {
        SolarSensor {
            delay,
            comparator,
            led,
        }
    }

    /// One pass: sleep, sample, and pulse the LED if the cell is lit
    pub fn poll(&mut self) -> Poll {
        self.delay.delay_250ms(POLL_QUARTERS);
        if self.comparator.sample() {
            return Poll::Dark;
        }
        let Ok(()) = self.led.set_high();
        self.delay.delay_1ms(PULSE_MS);
        let Ok(()) = self.led.set_low();
        Poll::Pulsed
    }

    /// Run the sensing loop until reset
    pub fn run(mut self) -> ! {
        debug!("solar: sensing");
        loop {
            self.poll();
        }
    }

    /// Take the sensor apart again
    pub fn free(self) -> (Delay<W, L>, Comparator<C>, LED) {
        (self.delay, self.comparator, self.led)
    }
}

/// Configure the launchpad switch (P1.3): pulled-up input interrupting on release.
///
/// The switch only wakes the CPU; the port interrupt handler should call
/// [`clear_port_interrupts`](crate::gpio::clear_port_interrupts).
pub fn init_button<P: IntrPeriph>(pin: Pin<P, 3, Output>) -> Pin<P, 3, Input<Pullup>> {
    let mut button = pin.to_input_pullup();
    button.select_rising_edge_trigger().enable_interrupts();
    button
}

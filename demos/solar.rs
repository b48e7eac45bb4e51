#![no_main]
#![no_std]
#![feature(abi_msp430_interrupt)]
#![feature(asm_experimental_arch)]

// Solar cell on P1.6 (CA6), LED on P1.0, switch on P1.3, 32768 Hz crystal on XIN/XOUT.
// While the cell is above 0.25 Vcc the LED blinks (200 ms on, 250 ms off). In the dark it stays off.

use msp430_rt::entry;
use msp430g2553::interrupt;
use msp430g2x_solar::{
    clock::Bcs,
    comparator::{Comparator, SOLAR_CELL},
    delay::{Delay, TickCounter},
    fault,
    gpio::{self, Parts, Xt1Pins},
    hw_traits::gpio::{split, P1},
    lpm::Lpm,
    pac,
    solar::{self, SolarSensor},
    watchdog::Wdt,
};
use panic_msp430 as _;

static TICKS: TickCounter = TickCounter::new();

#[entry]
fn main() -> ! {
    let periph = pac::Peripherals::take().unwrap();

    let wdt = Wdt::constrain(periph.WATCHDOG_TIMER);

    // Floating input pins consume a *huge* amount of power (relatively speaking).
    // Every pin starts out as a low output and only the ones in use are reconfigured.
    let (p1, p2) = split(periph.PORT_1_2);
    let p1 = Parts::new(p1);
    let p2 = Parts::new(p2);
    let xt1 = Xt1Pins::new(p2.pin6, p2.pin7);
    let _ca6 = p1.pin6.to_input_floating();
    let _button = solar::init_button(p1.pin3);
    let led = p1.pin0;

    let delay = Delay::new(wdt.to_interval(), Lpm::new(), &TICKS);
    let comparator = Comparator::new(periph.COMPARATOR_A, SOLAR_CELL);

    match SolarSensor::start(delay, Bcs::new(periph.SYSTEM_CLOCK), &xt1, comparator, led) {
        Ok((sensor, _clocks)) => sensor.run(),
        Err(f) => fault::halt(f),
    }
}

// Interrupt handlers with the `wake_cpu` argument will set the MSP430 back to Active Mode after the interrupt completes.
#[interrupt(wake_cpu)]
fn WDT() {
    TICKS.on_interrupt::<pac::WATCHDOG_TIMER>();
}

#[interrupt(wake_cpu)]
fn PORT1() {
    gpio::clear_port_interrupts::<P1>();
}

// The compiler will emit calls to the abort() compiler intrinsic if debug assertions are
// enabled (default for dev profile). MSP430 does not actually have meaningful abort() support
// so for now, we create our own in each application where debug assertions are present.
#[no_mangle]
extern "C" fn abort() -> ! {
    panic!();
}

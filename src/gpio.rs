//! GPIO pins with typestate direction tracking.
//!
//! [`Parts::new`] takes a port, drives every pin low and makes it an output. Floating inputs draw
//! a surprising amount of current, so this is the right default for every pin the application
//! does not otherwise use. Individual pins are then converted with `to_output`, `to_input_*` or,
//! for the crystal pins, [`Xt1Pins::new`].
//!
//! Pins implement the `embedded_hal` digital traits. None of the operations can fail, so the
//! error type is `Infallible`.

use crate::hw_traits::gpio::{CrystalPort, GpioPeriph, IntrPeriph};
use core::convert::Infallible;
use core::marker::PhantomData;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin, StatefulOutputPin};

/// Output direction typestate
pub struct Output;
/// Input direction typestate
pub struct Input<PULL>(PhantomData<PULL>);
/// Peripheral function typestate (PxSEL set)
pub struct Alternate;

/// Pull-up resistor enabled
pub struct Pullup;
/// Pull-down resistor enabled
pub struct Pulldown;
/// No pull resistor
pub struct Floating;

/// A single GPIO pin
pub struct Pin<P: GpioPeriph, const N: u8, MODE> {
    _periph: PhantomData<P>,
    _mode: PhantomData<MODE>,
}

macro_rules! make_pin {
    () => {
        Pin {
            _periph: PhantomData,
            _mode: PhantomData,
        }
    };
}

impl<P: GpioPeriph, const N: u8, MODE> Pin<P, N, MODE> {
    const MASK: u8 = 1 << N;

    // Pins only exist inside a `Parts`, which hands out each number once
    #[inline(always)]
    fn periph() -> P {
        unsafe { P::steal() }
    }

    /// Configure pin as output
    #[inline]
    pub fn to_output(self) -> Pin<P, N, Output> {
        Self::periph().pxdir_set(Self::MASK);
        make_pin!()
    }

    /// Configure pin as pull-up input
    #[inline]
    pub fn to_input_pullup(self) -> Pin<P, N, Input<Pullup>> {
        let p = Self::periph();
        p.pxdir_clear(Self::MASK);
        p.pxout_set(Self::MASK);
        p.pxren_set(Self::MASK);
        make_pin!()
    }

    /// Configure pin as pull-down input
    #[inline]
    pub fn to_input_pulldown(self) -> Pin<P, N, Input<Pulldown>> {
        let p = Self::periph();
        p.pxdir_clear(Self::MASK);
        p.pxout_clear(Self::MASK);
        p.pxren_set(Self::MASK);
        make_pin!()
    }

    /// Configure pin as floating input
    #[inline]
    pub fn to_input_floating(self) -> Pin<P, N, Input<Floating>> {
        let p = Self::periph();
        p.pxdir_clear(Self::MASK);
        p.pxren_clear(Self::MASK);
        make_pin!()
    }
}

impl<P: IntrPeriph, const N: u8, PULL> Pin<P, N, Input<PULL>> {
    /// Trigger interrupts on low-to-high transitions
    #[inline]
    pub fn select_rising_edge_trigger(&mut self) -> &mut Self {
        Self::periph().pxies_clear(Self::MASK);
        self
    }

    /// Trigger interrupts on high-to-low transitions
    #[inline]
    pub fn select_falling_edge_trigger(&mut self) -> &mut Self {
        Self::periph().pxies_set(Self::MASK);
        self
    }

    /// Clear any stale flag for this pin, then enable its interrupt
    #[inline]
    pub fn enable_interrupts(&mut self) -> &mut Self {
        let p = Self::periph();
        p.pxifg_clear(Self::MASK);
        p.pxie_set(Self::MASK);
        self
    }

    /// Disable this pin's interrupt
    #[inline]
    pub fn disable_interrupts(&mut self) -> &mut Self {
        Self::periph().pxie_clear(Self::MASK);
        self
    }

    /// Whether this pin's interrupt flag is set
    #[inline]
    pub fn interrupt_pending(&self) -> bool {
        Self::periph().pxifg_rd() & Self::MASK != 0
    }
}

/// Clear every interrupt flag of port `P`. Meant for the port's interrupt handler, which has no
/// access to the pins.
#[inline]
pub fn clear_port_interrupts<P: IntrPeriph>() {
    unsafe { P::steal() }.pxifg_wr(0);
}

impl<P: GpioPeriph, const N: u8, MODE> ErrorType for Pin<P, N, MODE> {
    type Error = Infallible;
}

impl<P: GpioPeriph, const N: u8> OutputPin for Pin<P, N, Output> {
    #[inline]
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Self::periph().pxout_clear(Self::MASK);
        Ok(())
    }

    #[inline]
    fn set_high(&mut self) -> Result<(), Self::Error> {
        Self::periph().pxout_set(Self::MASK);
        Ok(())
    }
}

impl<P: GpioPeriph, const N: u8> StatefulOutputPin for Pin<P, N, Output> {
    #[inline]
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(Self::periph().pxout_rd() & Self::MASK != 0)
    }

    #[inline]
    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(Self::periph().pxout_rd() & Self::MASK == 0)
    }
}

impl<P: GpioPeriph, const N: u8, PULL> InputPin for Pin<P, N, Input<PULL>> {
    #[inline]
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(Self::periph().pxin_rd() & Self::MASK != 0)
    }

    #[inline]
    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(Self::periph().pxin_rd() & Self::MASK == 0)
    }
}

/// All pins of a port
pub struct Parts<P: GpioPeriph> {
    /// Pin 0
    pub pin0: Pin<P, 0, Output>,
    /// Pin 1
    pub pin1: Pin<P, 1, Output>,
    /// Pin 2
    pub pin2: Pin<P, 2, Output>,
    /// Pin 3
    pub pin3: Pin<P, 3, Output>,
    /// Pin 4
    pub pin4: Pin<P, 4, Output>,
    /// Pin 5
    pub pin5: Pin<P, 5, Output>,
    /// Pin 6
    pub pin6: Pin<P, 6, Output>,
    /// Pin 7
    pub pin7: Pin<P, 7, Output>,
}

impl<P: GpioPeriph> Parts<P> {
    /// Drive every pin of the port low, then make every pin an output.
    pub fn new(periph: P) -> Self {
        periph.pxout_wr(0x00);
        periph.pxdir_wr(0xFF);
        Parts {
            pin0: make_pin!(),
            pin1: make_pin!(),
            pin2: make_pin!(),
            pin3: make_pin!(),
            pin4: make_pin!(),
            pin5: make_pin!(),
            pin6: make_pin!(),
            pin7: make_pin!(),
        }
    }
}

/// XIN and XOUT switched to their crystal function, a prerequisite for running ACLK from LFXT1.
pub struct Xt1Pins<P: CrystalPort> {
    _xin: Pin<P, 6, Alternate>,
    _xout: Pin<P, 7, Alternate>,
}

impl<P: CrystalPort> Xt1Pins<P> {
    /// Select the crystal function on pins 6 and 7
    pub fn new<M6, M7>(_xin: Pin<P, 6, M6>, _xout: Pin<P, 7, M7>) -> Self {
        unsafe { P::steal() }.pxsel_set((1 << 6) | (1 << 7));
        Xt1Pins {
            _xin: make_pin!(),
            _xout: make_pin!(),
        }
    }
}

//! Comparator_A+
//!
//! The comparator compares one of the CAx pins against an internal reference. Its output bit is
//! high when the non-inverting input is above the inverting one. Here the reference is always on
//! the non-inverting input and the pin on the inverting one, so the output is high while the pin
//! voltage is *below* the reference.
//!
//! The comparator draws current while it is on, so [`Comparator::sample`] only powers it for the
//! duration of a single read.

use crate::hw_traits::comp::{Cactl1, Cactl2, CompPeriph};

/// Internal reference voltage
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reference {
    /// 0.25 Vcc
    QuarterVcc,
    /// 0.5 Vcc
    HalfVcc,
    /// Diode reference, about 0.55 V
    Diode,
}

impl Reference {
    #[inline]
    fn bits(self) -> Cactl1 {
        match self {
            Reference::QuarterVcc => Cactl1::CAREF0,
            Reference::HalfVcc => Cactl1::CAREF1,
            Reference::Diode => Cactl1::CAREF1 | Cactl1::CAREF0,
        }
    }
}

/// Comparator input pin, connected to the inverting input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NegativeInput {
    /// CA1
    Ca1 = 1,
    /// CA2
    Ca2 = 2,
    /// CA3
    Ca3 = 3,
    /// CA4
    Ca4 = 4,
    /// CA5
    Ca5 = 5,
    /// CA6
    Ca6 = 6,
    /// CA7
    Ca7 = 7,
}

impl NegativeInput {
    // P2CA3..P2CA1 hold the channel number
    #[inline]
    fn bits(self) -> Cactl2 {
        Cactl2::from_bits_truncate((self as u8) << 3)
    }

    #[inline]
    fn capd_mask(self) -> u8 {
        1 << (self as u8)
    }
}

/// Comparator configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComparatorConfig {
    /// Pin compared against the reference
    pub input: NegativeInput,
    /// Reference on the non-inverting input
    pub reference: Reference,
    /// Enable the output filter
    pub filter: bool,
}

/// Solar cell on P1.6/CA6 against 0.25 Vcc, output filtered
pub const SOLAR_CELL: ComparatorConfig = ComparatorConfig {
    input: NegativeInput::Ca6,
    reference: Reference::QuarterVcc,
    filter: true,
};

/// Configured comparator, powered down between samples
pub struct Comparator<P: CompPeriph> {
    periph: P,
    on: Cactl1,
}

impl<P: CompPeriph> Comparator<P> {
    /// Route the input, disable its digital input buffer and leave the comparator off
    pub fn new(periph: P, config: ComparatorConfig) -> Self {
        periph.cactl1_wr(Cactl1::empty());
        periph.capd_wr(config.input.capd_mask());
        let mut ctl2 = config.input.bits();
        if config.filter {
            ctl2 |= Cactl2::CAF;
        }
        periph.cactl2_wr(ctl2);
        Comparator {
            periph,
            on: Cactl1::CAON | config.reference.bits(),
        }
    }

    /// Power the comparator, capture its output and power it down again.
    ///
    /// `true` means the input pin is below the reference.
    #[inline]
    pub fn sample(&mut self) -> bool {
        self.periph.cactl1_wr(self.on);
        let out = self.periph.cactl2_rd().contains(Cactl2::CAOUT);
        self.periph.cactl1_wr(Cactl1::empty());
        out
    }

    /// Give back the comparator registers
    #[inline]
    pub fn free(self) -> P {
        self.periph
    }
}

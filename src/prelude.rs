//! Prelude

pub use crate::clock::Clock as _msp430g2x_solar_Clock;
pub use crate::lpm::LowPower as _msp430g2x_solar_LowPower;
pub use crate::watchdog::WatchdogSelect as _msp430g2x_solar_WatchdogSelect;
pub use embedded_hal::delay::DelayNs as _embedded_hal_DelayNs;
pub use embedded_hal::digital::InputPin as _embedded_hal_InputPin;
pub use embedded_hal::digital::OutputPin as _embedded_hal_OutputPin;
pub use embedded_hal::digital::StatefulOutputPin as _embedded_hal_StatefulOutputPin;

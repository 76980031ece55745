//! Line settings: baud rate, parity, data bits and stop bits.

use crate::transport::LineControl;
use crate::{Error, Result};

pub use self::parity::Parity;

// `enumn` derives an undocumented `Parity::n`.
#[allow(missing_docs)]
mod parity;

/// Number of stop bits of a serial line.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum StopBits {
    /// One stop bit.
    #[default]
    One,
    /// Two stop bits.
    Two,
}

impl From<u8> for StopBits {
    /// Only 2 selects two stop bits; every other value means one.
    fn from(value: u8) -> Self {
        if value == 2 {
            Self::Two
        } else {
            Self::One
        }
    }
}

/// The settings applied to a UART by [`UartDriver::initialize`](super::UartDriver::initialize).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct LineConfig {
    /// Baud rate in bits per second.
    pub baud_rate: u32,
    /// Parity mode.
    pub parity: Parity,
    /// Number of data bits per character, from 5 to 8.
    pub data_bits: u8,
    /// Number of stop bits.
    pub stop_bits: StopBits,
}

impl LineConfig {
    /// Returns an 8N1 configuration at the given baud rate.
    pub const fn new(baud_rate: u32) -> Self {
        Self {
            baud_rate,
            parity: Parity::None,
            data_bits: 8,
            stop_bits: StopBits::One,
        }
    }

    /// Composes the line control register value for this configuration.
    ///
    /// The FIFOs are always enabled.
    pub fn line_control(&self) -> Result<LineControl> {
        let word_length = LineControl::word_length(self.data_bits).ok_or(Error::InvalidDataBits)?;
        let mut line_control = LineControl::FEN | LineControl::from(self.parity) | word_length;
        if self.stop_bits == StopBits::Two {
            line_control |= LineControl::STP2;
        }
        Ok(line_control)
    }
}

impl Default for LineConfig {
    fn default() -> Self {
        Self::new(115_200)
    }
}

/// The value of the integer and fractional baud rate divisor registers.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BaudDivisor {
    /// Integer part of the divisor.
    pub integer: u32,
    /// Fractional part of the divisor, in 64ths.
    pub fractional: u32,
}

impl BaudDivisor {
    /// Computes the divisor for the given baud rate from a UART clock of `clock_hz`.
    ///
    /// The divisor is `clock_hz / (16 * baud_rate)`, rounded to the nearest 64th using integer
    /// arithmetic only.
    pub fn new(clock_hz: u32, baud_rate: u32) -> Result<Self> {
        if baud_rate == 0 {
            return Err(Error::InvalidBaudRate);
        }
        let divisor_x128 = u64::from(clock_hz) * 8 / u64::from(baud_rate);
        let divisor_x64 = ((divisor_x128 + 1) / 2) as u32;
        Ok(Self {
            integer: divisor_x64 / 64,
            fractional: divisor_x64 % 64,
        })
    }
}

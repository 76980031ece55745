//! Parity modes.

use crate::transport::LineControl;
use crate::{Error, Result};
use enumn::N;

/// Parity mode of a serial line.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, N)]
#[repr(u8)]
pub enum Parity {
    /// No parity bit.
    #[default]
    None = 0,
    /// Even parity.
    Even = 1,
    /// Odd parity.
    Odd = 2,
}

impl TryFrom<u8> for Parity {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::n(value).ok_or(Error::InvalidParity)
    }
}

impl From<Parity> for LineControl {
    fn from(parity: Parity) -> Self {
        match parity {
            Parity::None => LineControl::empty(),
            Parity::Even => LineControl::PEN | LineControl::EPS,
            Parity::Odd => LineControl::PEN,
        }
    }
}

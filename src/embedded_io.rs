//! Implementation of `embedded-io::Error' trait for `Error`.

use crate::Error;
use embedded_io::ErrorKind;

impl embedded_io::Error for Error {
    fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidPort
            | Error::InvalidBaudRate
            | Error::InvalidParity
            | Error::InvalidDataBits => ErrorKind::InvalidInput,
            Error::InterruptModeActive => ErrorKind::Unsupported,
        }
    }
}

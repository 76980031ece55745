//! Driver for the UARTs of Stellaris / Tiva-C microcontrollers such as the LM4F120.
//!
//! The driver handles any number of UART instances behind one [`UartDriver`], which is intended
//! to live in a `static` shared between normal execution and the UART interrupt handlers. Each
//! port is either polled, with received data fetched by [`UartDriver::read`], or interrupt-driven,
//! with received data handed to a [`ReceiveCallback`] from interrupt context.
//!
//! The platform supplies clock gating and interrupt controller access by implementing [`Hal`].
//! Register access goes through a [`Transport`](transport::Transport), normally
//! [`MmioTransport`](transport::mmio::MmioTransport).
//!
//! # Example
//!
//! ```ignore
//! static UARTS: UartDriver<Board, MmioTransport, PORT_COUNT> = unsafe { UartDriver::lm4f120() };
//!
//! UARTS.initialize(0, &LineConfig::new(115_200), None)?;
//! UARTS.write_text(0, "Hello, world!\r\n")?;
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unused_must_use, missing_docs)]
#![allow(clippy::identity_op)]

pub mod device;
#[cfg(feature = "embedded-io")]
mod embedded_io;
mod hal;
pub mod transport;
mod volatile;

pub use self::device::uart::{
    BaudDivisor, LineConfig, Mode, Parity, Port, ReceiveCallback, Serial, StopBits, UartDriver,
    RX_IRQ_FIFO_SIZE,
};
pub use self::hal::Hal;
pub use self::transport::mmio::PORT_COUNT;
use thiserror::Error;

/// The type returned by driver methods.
pub type Result<T = ()> = core::result::Result<T, Error>;

/// The error type of the UART driver.
#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    /// The port index is not that of a UART the driver knows about.
    #[error("Invalid UART port")]
    InvalidPort,
    /// The baud rate is zero.
    #[error("Invalid baud rate")]
    InvalidBaudRate,
    /// The parity mode is not one of none, even or odd.
    #[error("Invalid parity mode")]
    InvalidParity,
    /// The number of data bits is not between 5 and 8.
    #[error("Invalid number of data bits")]
    InvalidDataBits,
    /// The port is interrupt-driven, so it can't be read directly.
    #[error("UART is in interrupt-driven mode")]
    InterruptModeActive,
}

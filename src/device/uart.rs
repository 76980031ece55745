//! Driver for the UARTs of a Stellaris / Tiva-C microcontroller.

mod callback;
#[cfg(feature = "embedded-io")]
mod embedded_io;
mod line;
mod vectors;

pub use self::callback::{Mode, ReceiveCallback};
pub use self::line::{BaudDivisor, LineConfig, Parity, StopBits};

use self::callback::CallbackSlot;
use crate::hal::Hal;
use crate::transport::mmio::{MmioTransport, BASE_ADDRESSES, INTERRUPT_LINES, PORT_COUNT};
use crate::transport::{Control, Flags, Interrupts, ReceiveErrors, Transport};
use crate::{Error, Result};
use core::{
    fmt::{self, Write},
    hint::spin_loop,
    marker::PhantomData,
};
use log::{debug, trace};

/// The most bytes the interrupt handler drains from a receive FIFO per interrupt.
pub const RX_IRQ_FIFO_SIZE: usize = 16;

/// The interrupt sources enabled while a port is interrupt-driven.
const RX_INTERRUPTS: Interrupts = Interrupts::RX.union(Interrupts::RT);

/// One UART instance: its registers, its interrupt line and its receive callback.
#[derive(Debug)]
pub struct Port<T: Transport> {
    transport: T,
    interrupt_line: u32,
    callback: CallbackSlot,
}

impl<T: Transport> Port<T> {
    /// Creates a port in polled mode.
    pub const fn new(transport: T, interrupt_line: u32) -> Self {
        Self {
            transport,
            interrupt_line,
            callback: CallbackSlot::new(),
        }
    }

    /// Returns the interrupt controller line this port's interrupt is wired to.
    pub fn interrupt_line(&self) -> u32 {
        self.interrupt_line
    }
}

/// Driver for a fixed set of `N` UARTs.
///
/// The driver is meant to live in a `static`, shared between normal execution and the UART
/// interrupt handlers. Each port may be driven in one of two modes:
///
/// - [`Mode::Polled`]: received data stays in the hardware FIFO until [`read`](Self::read) is
///   called, and may be lost if the FIFO overflows first.
/// - [`Mode::InterruptDriven`]: the port's interrupt handler drains the FIFO and passes the data
///   to the [`ReceiveCallback`] given to [`initialize`](Self::initialize).
///
/// Only one caller may use a given port from normal execution at a time.
///
/// # Example
///
/// ```
/// # use stellaris_uart::{Error, Hal};
/// # use stellaris_uart::transport::Transport;
/// use stellaris_uart::device::uart::{LineConfig, UartDriver};
///
/// fn on_receive(port: usize, data: &[u8]) {
///     // Hand `data` off to a queue; this runs in interrupt context.
/// }
///
/// # fn example<HalImpl: Hal, T: Transport>(uarts: &UartDriver<HalImpl, T, 8>) -> Result<(), Error> {
/// // Console on UART0, polled.
/// uarts.initialize(0, &LineConfig::new(115_200), None)?;
/// uarts.write_text(0, "Hello, world!\r\n")?;
///
/// let mut buffer = [0; 32];
/// let count = uarts.read(0, &mut buffer)?;
///
/// // A peripheral on UART1, delivering data from interrupt context.
/// uarts.initialize(1, &LineConfig::new(9600), Some(on_receive))?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct UartDriver<H: Hal, T: Transport, const N: usize> {
    ports: [Port<T>; N],
    _hal: PhantomData<fn() -> H>,
}

impl<H: Hal> UartDriver<H, MmioTransport, PORT_COUNT> {
    /// Creates a driver for the eight UARTs of the LM4F120, all in polled mode.
    ///
    /// # Safety
    ///
    /// The UART register blocks must be mapped at their usual addresses, and no other driver may
    /// exist for them.
    pub const unsafe fn lm4f120() -> Self {
        Self::new([
            Port::new(MmioTransport::from_base_address(BASE_ADDRESSES[0]), INTERRUPT_LINES[0]),
            Port::new(MmioTransport::from_base_address(BASE_ADDRESSES[1]), INTERRUPT_LINES[1]),
            Port::new(MmioTransport::from_base_address(BASE_ADDRESSES[2]), INTERRUPT_LINES[2]),
            Port::new(MmioTransport::from_base_address(BASE_ADDRESSES[3]), INTERRUPT_LINES[3]),
            Port::new(MmioTransport::from_base_address(BASE_ADDRESSES[4]), INTERRUPT_LINES[4]),
            Port::new(MmioTransport::from_base_address(BASE_ADDRESSES[5]), INTERRUPT_LINES[5]),
            Port::new(MmioTransport::from_base_address(BASE_ADDRESSES[6]), INTERRUPT_LINES[6]),
            Port::new(MmioTransport::from_base_address(BASE_ADDRESSES[7]), INTERRUPT_LINES[7]),
        ])
    }
}

impl<H: Hal, T: Transport, const N: usize> UartDriver<H, T, N> {
    /// Creates a driver for the given ports. Port `i` of the array is addressed as index `i`.
    pub const fn new(ports: [Port<T>; N]) -> Self {
        Self {
            ports,
            _hal: PhantomData,
        }
    }

    fn get(&self, port: usize) -> Result<&Port<T>> {
        self.ports.get(port).ok_or(Error::InvalidPort)
    }

    /// Configures a port and enables it.
    ///
    /// If `callback` is given, the port becomes interrupt-driven: its receive and receive timeout
    /// interrupts are enabled and `callback` is called from its interrupt handler. Otherwise the
    /// port is returned to polled mode and its interrupt line is disabled.
    ///
    /// The request is validated before any register is touched. Once validated, the port is
    /// disabled while it is reconfigured, and enabled again as the last step.
    pub fn initialize(
        &self,
        port: usize,
        config: &LineConfig,
        callback: Option<ReceiveCallback>,
    ) -> Result {
        let uart = self.get(port)?;
        let line_control = config.line_control()?;
        let divisor = BaudDivisor::new(H::peripheral_clock_hz(), config.baud_rate)?;

        H::enable_uart_clock(port);

        let transport = &uart.transport;
        transport.set_control(Control::empty());
        transport.set_baud_divisor(divisor.integer, divisor.fractional);
        transport.set_line_control(line_control);
        transport.clear_flags();
        debug!(
            "UART{}: {:?}, divisor {}+{}/64, LCRH {:#04x}",
            port,
            config,
            divisor.integer,
            divisor.fractional,
            line_control.bits()
        );

        if let Some(callback) = callback {
            uart.callback.set(Some(callback));
            transport.set_interrupt_mask(transport.interrupt_mask() | RX_INTERRUPTS);
            H::enable_interrupt(uart.interrupt_line);
            trace!("UART{} is interrupt-driven on line {}", port, uart.interrupt_line);
        } else {
            H::disable_interrupt(uart.interrupt_line);
            transport.set_interrupt_mask(transport.interrupt_mask() - RX_INTERRUPTS);
            uart.callback.set(None);
            trace!("UART{} is polled", port);
        }

        transport.set_control(transport.control() | Control::RXE | Control::TXE | Control::UARTEN);
        Ok(())
    }

    /// Returns whether the port is polled or interrupt-driven.
    pub fn mode(&self, port: usize) -> Result<Mode> {
        Ok(self.get(port)?.callback.mode())
    }

    /// Reads as many bytes as are waiting in the port's receive FIFO, up to the size of `buffer`.
    ///
    /// Returns the number of bytes read, which is 0 if the FIFO is empty. Never waits for data to
    /// arrive.
    ///
    /// Fails with [`Error::InterruptModeActive`] if the port is interrupt-driven, as received
    /// data is then delivered to its callback instead.
    pub fn read(&self, port: usize, buffer: &mut [u8]) -> Result<usize> {
        let uart = self.get(port)?;
        if uart.callback.get().is_some() {
            return Err(Error::InterruptModeActive);
        }

        let mut count = 0;
        for byte in buffer.iter_mut() {
            if uart.transport.rx_fifo_empty() {
                break;
            }
            *byte = (uart.transport.read_data() & 0xFF) as u8;
            count += 1;
        }
        Ok(count)
    }

    /// Writes all of `data` to the port.
    ///
    /// Spins while the transmit FIFO is full, for as long as that takes: if nothing drains the
    /// line this never returns.
    pub fn write(&self, port: usize, data: &[u8]) -> Result {
        let uart = self.get(port)?;
        for &byte in data {
            while uart.transport.tx_fifo_full() {
                spin_loop();
            }
            uart.transport.write_data(byte);
        }
        Ok(())
    }

    /// Writes `text` to the port, blocking as [`write`](Self::write) does.
    ///
    /// Stops at the first NUL character, if there is one.
    pub fn write_text(&self, port: usize, text: &str) -> Result {
        let text = match text.find('\0') {
            Some(end) => &text[..end],
            None => text,
        };
        self.write(port, text.as_bytes())
    }

    /// Writes as much of `data` as fits in the port's transmit FIFO without waiting.
    ///
    /// Returns the number of bytes written, which is 0 if the FIFO is already full.
    pub fn write_nonblocking(&self, port: usize, data: &[u8]) -> Result<usize> {
        let uart = self.get(port)?;
        let mut written = 0;
        for &byte in data {
            if uart.transport.tx_fifo_full() {
                break;
            }
            uart.transport.write_data(byte);
            written += 1;
        }
        Ok(written)
    }

    /// Spins until the port has finished transmitting everything in its transmit FIFO.
    pub fn flush(&self, port: usize) -> Result {
        let uart = self.get(port)?;
        while uart.transport.flags().contains(Flags::BUSY) {
            spin_loop();
        }
        Ok(())
    }

    /// Returns the errors recorded against the port's received data.
    pub fn receive_errors(&self, port: usize) -> Result<ReceiveErrors> {
        Ok(self.get(port)?.transport.receive_errors())
    }

    /// Clears the errors recorded against the port's received data.
    pub fn clear_receive_errors(&self, port: usize) -> Result {
        self.get(port)?.transport.clear_receive_errors();
        Ok(())
    }

    /// Returns all of the port's interrupts which are currently asserted, enabled or not.
    pub fn raw_interrupts(&self, port: usize) -> Result<Interrupts> {
        Ok(self.get(port)?.transport.raw_interrupt_status())
    }

    /// Returns the port's enabled interrupts which are currently asserted.
    pub fn pending_interrupts(&self, port: usize) -> Result<Interrupts> {
        Ok(self.get(port)?.transport.masked_interrupt_status())
    }

    /// Acknowledges the given interrupts of the port.
    ///
    /// The receive path does not need this: draining the receive FIFO deasserts the receive
    /// interrupts.
    pub fn clear_interrupts(&self, port: usize, interrupts: Interrupts) -> Result {
        self.get(port)?.transport.clear_interrupts(interrupts);
        Ok(())
    }

    /// Returns a handle for using the given port through the `core::fmt` and `embedded-io`
    /// traits.
    pub fn port(&self, port: usize) -> Result<Serial<'_, H, T, N>> {
        self.get(port)?;
        Ok(Serial { driver: self, port })
    }

    /// Handles an interrupt from the given port.
    ///
    /// This must be called from the port's interrupt handler, e.g. one generated by
    /// [`uart_interrupt_handlers!`](crate::uart_interrupt_handlers). If the port is
    /// interrupt-driven, drains up to [`RX_IRQ_FIFO_SIZE`] bytes from its receive FIFO and passes
    /// them to its callback, which is called exactly once even if nothing was received. If the port
    /// has been returned to polled mode in the meantime, does nothing.
    pub fn handle_interrupt(&self, port: usize) {
        let Some(uart) = self.ports.get(port) else {
            return;
        };
        let Some(callback) = uart.callback.get() else {
            return;
        };

        let mut buffer = [0; RX_IRQ_FIFO_SIZE];
        let mut count = 0;
        while count < buffer.len() && !uart.transport.rx_fifo_empty() {
            buffer[count] = (uart.transport.read_data() & 0xFF) as u8;
            count += 1;
        }
        callback(port, &buffer[..count]);
    }
}

/// A handle for one port of a [`UartDriver`].
#[derive(Debug)]
pub struct Serial<'a, H: Hal, T: Transport, const N: usize> {
    driver: &'a UartDriver<H, T, N>,
    port: usize,
}

impl<H: Hal, T: Transport, const N: usize> Serial<'_, H, T, N> {
    /// Returns the index of the port.
    pub fn index(&self) -> usize {
        self.port
    }
}

impl<H: Hal, T: Transport, const N: usize> Write for Serial<'_, H, T, N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.driver
            .write_text(self.port, s)
            .map_err(|_| fmt::Error)
    }
}

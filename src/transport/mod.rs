//! Access to the registers of a single UART.

#[cfg(test)]
#[allow(missing_docs)]
pub mod fake;
pub mod mmio;

use bitflags::bitflags;

/// The registers of one UART instance.
///
/// Every method takes `&self`, as the same port is reached both from normal execution and from
/// its interrupt handler.
pub trait Transport {
    /// Reads the flag register.
    fn flags(&self) -> Flags;

    /// Writes zero to the flag register.
    fn clear_flags(&self);

    /// Reads the data register, popping one entry from the receive FIFO.
    ///
    /// The low 8 bits hold the received byte; the bits above it hold the error status for that
    /// byte.
    fn read_data(&self) -> u32;

    /// Writes one byte to the data register, pushing it onto the transmit FIFO.
    fn write_data(&self, byte: u8);

    /// Reads the receive status register.
    fn receive_errors(&self) -> ReceiveErrors;

    /// Clears the receive status register.
    fn clear_receive_errors(&self);

    /// Writes the integer and fractional baud rate divisor registers.
    fn set_baud_divisor(&self, integer: u32, fractional: u32);

    /// Writes the line control register.
    fn set_line_control(&self, line_control: LineControl);

    /// Reads the control register.
    fn control(&self) -> Control;

    /// Writes the control register.
    fn set_control(&self, control: Control);

    /// Reads the interrupt mask register.
    fn interrupt_mask(&self) -> Interrupts;

    /// Writes the interrupt mask register.
    fn set_interrupt_mask(&self, mask: Interrupts);

    /// Reads the raw interrupt status register.
    fn raw_interrupt_status(&self) -> Interrupts;

    /// Reads the masked interrupt status register.
    fn masked_interrupt_status(&self) -> Interrupts;

    /// Writes the interrupt clear register, acknowledging the given interrupts.
    fn clear_interrupts(&self, interrupts: Interrupts);

    /// Returns whether the receive FIFO is empty.
    fn rx_fifo_empty(&self) -> bool {
        self.flags().contains(Flags::RXFE)
    }

    /// Returns whether the transmit FIFO is full.
    fn tx_fifo_full(&self) -> bool {
        self.flags().contains(Flags::TXFF)
    }
}

bitflags! {
    /// The flag register (`UARTFR`).
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
    pub struct Flags: u32 {
        /// Clear to send.
        const CTS = 1 << 0;
        /// The UART is busy transmitting data.
        const BUSY = 1 << 3;
        /// The receive FIFO is empty.
        const RXFE = 1 << 4;
        /// The transmit FIFO is full.
        const TXFF = 1 << 5;
        /// The receive FIFO is full.
        const RXFF = 1 << 6;
        /// The transmit FIFO is empty.
        const TXFE = 1 << 7;
    }
}

bitflags! {
    /// The line control register (`UARTLCRH`).
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
    pub struct LineControl: u32 {
        /// Send break.
        const BRK = 1 << 0;
        /// Parity enable.
        const PEN = 1 << 1;
        /// Even parity select.
        const EPS = 1 << 2;
        /// Two stop bits select.
        const STP2 = 1 << 3;
        /// Enable the transmit and receive FIFOs.
        const FEN = 1 << 4;
        /// 6 data bits. The word length field is two bits wide; both clear selects 5 data bits.
        const WLEN_6 = 1 << 5;
        /// 7 data bits.
        const WLEN_7 = 2 << 5;
        /// 8 data bits.
        const WLEN_8 = 3 << 5;
        /// Stick parity select.
        const SPS = 1 << 7;
    }
}

impl LineControl {
    /// Returns the word length bits for the given number of data bits, if it is supported.
    pub const fn word_length(data_bits: u8) -> Option<Self> {
        match data_bits {
            5 => Some(Self::empty()),
            6 => Some(Self::WLEN_6),
            7 => Some(Self::WLEN_7),
            8 => Some(Self::WLEN_8),
            _ => None,
        }
    }
}

bitflags! {
    /// The control register (`UARTCTL`).
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
    pub struct Control: u32 {
        /// UART enable.
        const UARTEN = 1 << 0;
        /// SIR (IrDA) enable.
        const SIREN = 1 << 1;
        /// SIR low-power mode.
        const SIRLP = 1 << 2;
        /// Loopback enable.
        const LBE = 1 << 7;
        /// Transmit enable.
        const TXE = 1 << 8;
        /// Receive enable.
        const RXE = 1 << 9;
        /// Request to send.
        const RTS = 1 << 11;
    }
}

bitflags! {
    /// Interrupt sources, as laid out in the mask, raw status, masked status and clear registers.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
    pub struct Interrupts: u32 {
        /// Clear to send modem interrupt.
        const CTS = 1 << 1;
        /// Receive FIFO reached its trigger level.
        const RX = 1 << 4;
        /// Transmit FIFO drained to its trigger level.
        const TX = 1 << 5;
        /// Receive timeout: data sat in the receive FIFO without further traffic.
        const RT = 1 << 6;
        /// Framing error.
        const FE = 1 << 7;
        /// Parity error.
        const PE = 1 << 8;
        /// Break error.
        const BE = 1 << 9;
        /// Overrun error.
        const OE = 1 << 10;
    }
}

bitflags! {
    /// The receive status register (`UARTRSR`).
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
    pub struct ReceiveErrors: u32 {
        /// The received character did not have a valid stop bit.
        const FRAMING = 1 << 0;
        /// The received character had the wrong parity.
        const PARITY = 1 << 1;
        /// A break condition was detected.
        const BREAK = 1 << 2;
        /// Data arrived while the receive FIFO was full.
        const OVERRUN = 1 << 3;
    }
}

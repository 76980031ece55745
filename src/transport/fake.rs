use super::{Control, Flags, Interrupts, LineControl, ReceiveErrors, Transport};
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
    vec::Vec,
};

/// The depth of the hardware FIFOs.
const FIFO_DEPTH: usize = 16;

/// A fake implementation of [`Transport`] for unit tests.
#[derive(Clone, Debug, Default)]
pub struct FakeTransport {
    pub state: Arc<Mutex<State>>,
}

/// A write to one of the UART's registers, as recorded by [`FakeTransport`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RegisterWrite {
    Flags(u32),
    Data(u8),
    ReceiveErrorClear,
    BaudDivisor(u32, u32),
    LineControl(LineControl),
    Control(Control),
    InterruptMask(Interrupts),
    InterruptClear(Interrupts),
}

#[derive(Debug, Default)]
pub struct State {
    /// Entries waiting in the receive FIFO, as they would be read from the data register.
    pub rx_fifo: VecDeque<u32>,
    /// Every byte pushed onto the transmit FIFO, in order.
    pub transmitted: Vec<u8>,
    /// The number of further flag register reads which report the transmit FIFO as full.
    pub tx_full_polls: usize,
    /// Whether the transmit FIFO is full forever.
    pub tx_always_full: bool,
    /// If set, the transmit FIFO reports full once this many bytes have been transmitted.
    pub tx_fifo_capacity: Option<usize>,
    /// The number of further flag register reads which report the UART as busy.
    pub busy_polls: usize,
    /// The number of times the flag register has been read.
    pub flag_reads: usize,
    pub receive_errors: ReceiveErrors,
    pub line_control: LineControl,
    pub control: Control,
    pub interrupt_mask: Interrupts,
    pub raw_interrupts: Interrupts,
    /// Every interrupt which has been written to the interrupt clear register.
    pub cleared_interrupts: Interrupts,
    /// Every register write, in order. Reads are not recorded.
    pub writes: Vec<RegisterWrite>,
}

impl State {
    fn tx_fifo_full(&mut self) -> bool {
        if self.tx_full_polls > 0 {
            self.tx_full_polls -= 1;
            return true;
        }
        self.tx_always_full
            || self
                .tx_fifo_capacity
                .is_some_and(|capacity| self.transmitted.len() >= capacity)
    }
}

impl Transport for FakeTransport {
    fn flags(&self) -> Flags {
        let mut state = self.state.lock().unwrap();
        state.flag_reads += 1;

        let mut flags = Flags::empty();
        if state.rx_fifo.is_empty() {
            flags |= Flags::RXFE;
        }
        if state.rx_fifo.len() >= FIFO_DEPTH {
            flags |= Flags::RXFF;
        }
        if state.tx_fifo_full() {
            flags |= Flags::TXFF;
        } else {
            flags |= Flags::TXFE;
        }
        if state.busy_polls > 0 {
            state.busy_polls -= 1;
            flags |= Flags::BUSY;
        }
        flags
    }

    fn clear_flags(&self) {
        self.state
            .lock()
            .unwrap()
            .writes
            .push(RegisterWrite::Flags(0));
    }

    fn read_data(&self) -> u32 {
        self.state.lock().unwrap().rx_fifo.pop_front().unwrap_or(0)
    }

    fn write_data(&self, byte: u8) {
        let mut state = self.state.lock().unwrap();
        state.transmitted.push(byte);
        state.writes.push(RegisterWrite::Data(byte));
    }

    fn receive_errors(&self) -> ReceiveErrors {
        self.state.lock().unwrap().receive_errors
    }

    fn clear_receive_errors(&self) {
        let mut state = self.state.lock().unwrap();
        state.receive_errors = ReceiveErrors::empty();
        state.writes.push(RegisterWrite::ReceiveErrorClear);
    }

    fn set_baud_divisor(&self, integer: u32, fractional: u32) {
        self.state
            .lock()
            .unwrap()
            .writes
            .push(RegisterWrite::BaudDivisor(integer, fractional));
    }

    fn set_line_control(&self, line_control: LineControl) {
        let mut state = self.state.lock().unwrap();
        state.line_control = line_control;
        state.writes.push(RegisterWrite::LineControl(line_control));
    }

    fn control(&self) -> Control {
        self.state.lock().unwrap().control
    }

    fn set_control(&self, control: Control) {
        let mut state = self.state.lock().unwrap();
        state.control = control;
        state.writes.push(RegisterWrite::Control(control));
    }

    fn interrupt_mask(&self) -> Interrupts {
        self.state.lock().unwrap().interrupt_mask
    }

    fn set_interrupt_mask(&self, mask: Interrupts) {
        let mut state = self.state.lock().unwrap();
        state.interrupt_mask = mask;
        state.writes.push(RegisterWrite::InterruptMask(mask));
    }

    fn raw_interrupt_status(&self) -> Interrupts {
        self.state.lock().unwrap().raw_interrupts
    }

    fn masked_interrupt_status(&self) -> Interrupts {
        let state = self.state.lock().unwrap();
        state.raw_interrupts & state.interrupt_mask
    }

    fn clear_interrupts(&self, interrupts: Interrupts) {
        let mut state = self.state.lock().unwrap();
        state.raw_interrupts -= interrupts;
        state.cleared_interrupts |= interrupts;
        state.writes.push(RegisterWrite::InterruptClear(interrupts));
    }
}

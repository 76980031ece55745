//! MMIO transport for the Stellaris UART register block.

use super::{Control, Flags, Interrupts, LineControl, ReceiveErrors, Transport};
use crate::volatile::{volread, volwrite, ReadOnly, Volatile, WriteOnly};
use core::ptr::NonNull;
use zerocopy::{FromBytes, Immutable};

/// The number of UARTs on the LM4F120.
pub const PORT_COUNT: usize = 8;

/// The base address of each UART's register block on the LM4F120.
pub const BASE_ADDRESSES: [usize; PORT_COUNT] = [
    0x4000_C000,
    0x4000_D000,
    0x4000_E000,
    0x4000_F000,
    0x4001_0000,
    0x4001_1000,
    0x4001_2000,
    0x4001_3000,
];

/// The interrupt controller line each UART's interrupt is wired to on the LM4F120.
///
/// Ref: LM4F120H5QR data sheet, table 2-9 "Interrupts".
pub const INTERRUPT_LINES: [u32; PORT_COUNT] = [5, 6, 33, 59, 60, 61, 62, 63];

/// UART register block.
///
/// Ref: LM4F120H5QR data sheet, 14.5 "Register Map"
#[derive(Debug, FromBytes, Immutable)]
#[repr(C)]
pub struct RegisterBlock {
    /// Data (0x000)
    ///
    /// Reading pops the receive FIFO, writing pushes the transmit FIFO.
    dr: Volatile<u32>,

    /// Receive status / error clear (0x004)
    rsr: Volatile<u32>,

    /// Reserved
    __r0: [u32; 4],

    /// Flags (0x018)
    fr: Volatile<u32>,

    /// Reserved
    __r1: u32,

    /// IrDA low-power register (0x020)
    ilpr: Volatile<u32>,

    /// Integer baud rate divisor (0x024)
    ibrd: Volatile<u32>,

    /// Fractional baud rate divisor (0x028)
    fbrd: Volatile<u32>,

    /// Line control (0x02C)
    lcrh: Volatile<u32>,

    /// Control (0x030)
    ctl: Volatile<u32>,

    /// Interrupt FIFO level select (0x034)
    ifls: Volatile<u32>,

    /// Interrupt mask (0x038)
    im: Volatile<u32>,

    /// Raw interrupt status (0x03C)
    ris: ReadOnly<u32>,

    /// Masked interrupt status (0x040)
    mis: ReadOnly<u32>,

    /// Interrupt clear (0x044)
    icr: WriteOnly<u32>,

    /// DMA control (0x048)
    dmactl: Volatile<u32>,
}

/// Transport for one UART, accessing its register block through volatile MMIO.
#[derive(Debug)]
pub struct MmioTransport {
    regs: NonNull<RegisterBlock>,
}

impl MmioTransport {
    /// Constructs a new transport for the UART whose register block is at the given address.
    ///
    /// # Safety
    ///
    /// `regs` must point to the register block of a UART, mapped into the address space of the
    /// process as device memory, and valid for the lifetime of the transport. No other transport
    /// may be constructed for the same register block.
    pub const unsafe fn new(regs: NonNull<RegisterBlock>) -> Self {
        Self { regs }
    }

    /// Constructs a new transport for the UART whose register block starts at `base_address`.
    ///
    /// # Safety
    ///
    /// As for [`MmioTransport::new`]; `base_address` must also be non-zero.
    pub const unsafe fn from_base_address(base_address: usize) -> Self {
        Self::new(NonNull::new_unchecked(base_address as *mut RegisterBlock))
    }
}

// SAFETY: `regs` points to device memory, which can be accessed from any thread or interrupt
// context. Only single-word volatile accesses are made through it.
unsafe impl Send for MmioTransport {}

// SAFETY: `&MmioTransport` only allows single-word volatile register accesses. Coordinating writes
// to the same port is the caller's responsibility.
unsafe impl Sync for MmioTransport {}

impl Transport for MmioTransport {
    fn flags(&self) -> Flags {
        // SAFETY: self.regs points to a valid UART register block.
        Flags::from_bits_retain(unsafe { volread!(self.regs, fr) })
    }

    fn clear_flags(&self) {
        // SAFETY: self.regs points to a valid UART register block.
        unsafe { volwrite!(self.regs, fr, 0) }
    }

    fn read_data(&self) -> u32 {
        // SAFETY: self.regs points to a valid UART register block.
        unsafe { volread!(self.regs, dr) }
    }

    fn write_data(&self, byte: u8) {
        // SAFETY: self.regs points to a valid UART register block.
        unsafe { volwrite!(self.regs, dr, byte.into()) }
    }

    fn receive_errors(&self) -> ReceiveErrors {
        // SAFETY: self.regs points to a valid UART register block.
        ReceiveErrors::from_bits_truncate(unsafe { volread!(self.regs, rsr) })
    }

    fn clear_receive_errors(&self) {
        // Any write to the error clear register clears all of the error flags.
        // SAFETY: self.regs points to a valid UART register block.
        unsafe { volwrite!(self.regs, rsr, 0) }
    }

    fn set_baud_divisor(&self, integer: u32, fractional: u32) {
        // SAFETY: self.regs points to a valid UART register block.
        unsafe {
            volwrite!(self.regs, ibrd, integer);
            volwrite!(self.regs, fbrd, fractional);
        }
    }

    fn set_line_control(&self, line_control: LineControl) {
        // SAFETY: self.regs points to a valid UART register block.
        unsafe { volwrite!(self.regs, lcrh, line_control.bits()) }
    }

    fn control(&self) -> Control {
        // SAFETY: self.regs points to a valid UART register block.
        Control::from_bits_retain(unsafe { volread!(self.regs, ctl) })
    }

    fn set_control(&self, control: Control) {
        // SAFETY: self.regs points to a valid UART register block.
        unsafe { volwrite!(self.regs, ctl, control.bits()) }
    }

    fn interrupt_mask(&self) -> Interrupts {
        // SAFETY: self.regs points to a valid UART register block.
        Interrupts::from_bits_retain(unsafe { volread!(self.regs, im) })
    }

    fn set_interrupt_mask(&self, mask: Interrupts) {
        // SAFETY: self.regs points to a valid UART register block.
        unsafe { volwrite!(self.regs, im, mask.bits()) }
    }

    fn raw_interrupt_status(&self) -> Interrupts {
        // SAFETY: self.regs points to a valid UART register block.
        Interrupts::from_bits_truncate(unsafe { volread!(self.regs, ris) })
    }

    fn masked_interrupt_status(&self) -> Interrupts {
        // SAFETY: self.regs points to a valid UART register block.
        Interrupts::from_bits_truncate(unsafe { volread!(self.regs, mis) })
    }

    fn clear_interrupts(&self, interrupts: Interrupts) {
        // SAFETY: self.regs points to a valid UART register block.
        unsafe { volwrite!(self.regs, icr, interrupts.bits()) }
    }
}

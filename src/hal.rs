#[cfg(test)]
pub mod fake;

/// The interface which a particular board or chip support package must implement.
///
/// These are the collaborators the UART driver relies on but does not own: the clock gating and
/// reset control block, and the interrupt controller. None of them can fail; the driver only ever
/// passes indices and interrupt lines taken from its own port table.
pub trait Hal {
    /// Returns the frequency in Hz of the clock feeding the UART baud rate generators.
    fn peripheral_clock_hz() -> u32;

    /// Enables the clock gate of the UART peripheral with the given index.
    ///
    /// On the LM4F120 this sets bit `index` of the `RCGCUART` register.
    fn enable_uart_clock(index: usize);

    /// Enables the given interrupt line at the interrupt controller.
    ///
    /// Enabling a line which is already enabled has no further effect.
    fn enable_interrupt(line: u32);

    /// Disables the given interrupt line at the interrupt controller.
    ///
    /// Disabling a line which is already disabled has no further effect.
    fn disable_interrupt(line: u32);
}

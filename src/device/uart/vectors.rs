//! Interrupt vector entry points.

/// Defines one `extern "C"` interrupt handler per UART, each forwarding to
/// [`UartDriver::handle_interrupt`](crate::device::uart::UartDriver::handle_interrupt).
///
/// The handlers are exported unmangled so the platform's vector table can refer to them by name.
///
/// # Example
///
/// ```ignore
/// static UARTS: UartDriver<Board, MmioTransport, 8> = unsafe { UartDriver::lm4f120() };
///
/// uart_interrupt_handlers!(UARTS;
///     uart0_irq => 0,
///     uart1_irq => 1,
///     uart2_irq => 2,
///     uart3_irq => 3,
///     uart4_irq => 4,
///     uart5_irq => 5,
///     uart6_irq => 6,
///     uart7_irq => 7,
/// );
/// ```
#[macro_export]
macro_rules! uart_interrupt_handlers {
    ($driver:expr; $($handler:ident => $port:expr),+ $(,)?) => {
        $(
            #[no_mangle]
            pub extern "C" fn $handler() {
                $driver.handle_interrupt($port);
            }
        )+
    };
}

//! Drivers for specific peripherals.

pub mod uart;

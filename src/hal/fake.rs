//! Fake HAL implementation for tests.

use crate::Hal;
use std::{cell::RefCell, collections::BTreeSet, vec::Vec};

/// The clock rate the fake HAL reports, matching the LM4F120 precision internal oscillator.
pub const FAKE_CLOCK_HZ: u32 = 16_000_000;

/// A call made by the driver to one of its platform collaborators.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum HalCall {
    EnableUartClock(usize),
    EnableInterrupt(u32),
    DisableInterrupt(u32),
}

#[derive(Debug, Default)]
pub struct State {
    pub calls: Vec<HalCall>,
    pub enabled_interrupts: BTreeSet<u32>,
}

thread_local! {
    // Each test runs on its own thread, so keeping the state thread-local keeps tests apart.
    static STATE: RefCell<State> = RefCell::new(State::default());
}

/// Fake HAL implementation for use in unit tests.
#[derive(Debug)]
pub struct FakeHal;

impl FakeHal {
    /// Returns every call made on the current thread so far, in order.
    pub fn calls() -> Vec<HalCall> {
        STATE.with(|state| state.borrow().calls.clone())
    }

    /// Returns whether the given interrupt line is currently enabled.
    pub fn interrupt_enabled(line: u32) -> bool {
        STATE.with(|state| state.borrow().enabled_interrupts.contains(&line))
    }

    /// Forgets all calls recorded on the current thread.
    pub fn reset() {
        STATE.with(|state| *state.borrow_mut() = State::default());
    }
}

impl Hal for FakeHal {
    fn peripheral_clock_hz() -> u32 {
        FAKE_CLOCK_HZ
    }

    fn enable_uart_clock(index: usize) {
        STATE.with(|state| {
            state
                .borrow_mut()
                .calls
                .push(HalCall::EnableUartClock(index))
        });
    }

    fn enable_interrupt(line: u32) {
        STATE.with(|state| {
            let mut state = state.borrow_mut();
            state.calls.push(HalCall::EnableInterrupt(line));
            state.enabled_interrupts.insert(line);
        });
    }

    fn disable_interrupt(line: u32) {
        STATE.with(|state| {
            let mut state = state.borrow_mut();
            state.calls.push(HalCall::DisableInterrupt(line));
            state.enabled_interrupts.remove(&line);
        });
    }
}

use core::{
    mem::transmute,
    ptr::null_mut,
    sync::atomic::{AtomicPtr, Ordering},
};

/// Function called from interrupt context with the bytes drained from a port's receive FIFO.
///
/// The first argument is the index of the port, the second the bytes received, which may be
/// empty. The slice is only valid for the duration of the call.
///
/// The callback runs at interrupt priority. It must not block, and must not call back into the
/// driver for the same port.
pub type ReceiveCallback = fn(port: usize, data: &[u8]);

/// Whether a port delivers received data through a callback or waits to be polled.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Mode {
    /// No callback is registered; received data is retrieved with `read`.
    Polled,
    /// A callback is registered and is called from the port's interrupt handler.
    InterruptDriven,
}

/// A port's receive callback, shared between normal and interrupt context.
///
/// Stores and loads are single words, so the interrupt handler sees either the old or the new
/// callback but never a torn value.
#[derive(Debug)]
pub(crate) struct CallbackSlot(AtomicPtr<()>);

impl CallbackSlot {
    pub const fn new() -> Self {
        Self(AtomicPtr::new(null_mut()))
    }

    pub fn set(&self, callback: Option<ReceiveCallback>) {
        let ptr = match callback {
            Some(callback) => callback as *mut (),
            None => null_mut(),
        };
        self.0.store(ptr, Ordering::Release);
    }

    pub fn get(&self) -> Option<ReceiveCallback> {
        let ptr = self.0.load(Ordering::Acquire);
        if ptr.is_null() {
            None
        } else {
            // SAFETY: The only non-null values ever stored are `ReceiveCallback`s, in `set`.
            Some(unsafe { transmute::<*mut (), ReceiveCallback>(ptr) })
        }
    }

    pub fn mode(&self) -> Mode {
        if self.get().is_some() {
            Mode::InterruptDriven
        } else {
            Mode::Polled
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ignore(_port: usize, _data: &[u8]) {}

    #[test]
    fn set_and_clear() {
        let slot = CallbackSlot::new();
        assert!(slot.get().is_none());
        assert_eq!(slot.mode(), Mode::Polled);

        slot.set(Some(ignore));
        assert_eq!(
            slot.get().map(|callback| callback as usize),
            Some(ignore as ReceiveCallback as usize)
        );
        assert_eq!(slot.mode(), Mode::InterruptDriven);

        slot.set(None);
        assert!(slot.get().is_none());
        assert_eq!(slot.mode(), Mode::Polled);
    }
}

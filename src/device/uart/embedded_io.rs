//! Implementation of `embedded-io` traits for `Serial`.

use super::Serial;
use crate::{transport::Transport, Error, Hal};
use core::hint::spin_loop;
use embedded_io::{ErrorType, Read, ReadReady, Write, WriteReady};

impl<H: Hal, T: Transport, const N: usize> Serial<'_, H, T, N> {
    fn transport(&self) -> &T {
        &self.driver.ports[self.port].transport
    }
}

impl<H: Hal, T: Transport, const N: usize> ErrorType for Serial<'_, H, T, N> {
    type Error = Error;
}

impl<H: Hal, T: Transport, const N: usize> Write for Serial<'_, H, T, N> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() {
            return Ok(0);
        }
        loop {
            let written = self.driver.write_nonblocking(self.port, buf)?;
            if written > 0 {
                return Ok(written);
            }
            spin_loop();
        }
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.driver.flush(self.port)
    }
}

impl<H: Hal, T: Transport, const N: usize> WriteReady for Serial<'_, H, T, N> {
    fn write_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.transport().tx_fifo_full())
    }
}

impl<H: Hal, T: Transport, const N: usize> ReadReady for Serial<'_, H, T, N> {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        if self.driver.mode(self.port)? == super::Mode::InterruptDriven {
            return Err(Error::InterruptModeActive);
        }
        Ok(!self.transport().rx_fifo_empty())
    }
}

impl<H: Hal, T: Transport, const N: usize> Read for Serial<'_, H, T, N> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() {
            return Ok(0);
        }
        loop {
            let read = self.driver.read(self.port, buf)?;
            if read > 0 {
                return Ok(read);
            }
            spin_loop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{fake_driver, record};
    use super::super::LineConfig;
    use crate::Error;
    use embedded_io::{Read, ReadReady, Write, WriteReady};

    #[test]
    fn write_and_flush() {
        let (uarts, states) = fake_driver::<1>();
        {
            let mut state = states[0].lock().unwrap();
            state.tx_full_polls = 2;
            state.busy_polls = 2;
        }
        let mut serial = uarts.port(0).unwrap();
        serial.write_all(b"ping").unwrap();
        serial.flush().unwrap();

        let state = states[0].lock().unwrap();
        assert_eq!(state.transmitted, b"ping");
        assert_eq!(state.busy_polls, 0);
    }

    #[test]
    fn write_returns_partial_count() {
        let (uarts, states) = fake_driver::<1>();
        states[0].lock().unwrap().tx_fifo_capacity = Some(2);
        let mut serial = uarts.port(0).unwrap();
        assert_eq!(serial.write(b"abcd"), Ok(2));
        assert_eq!(serial.write_ready(), Ok(false));
        assert_eq!(serial.write(b""), Ok(0));
    }

    #[test]
    fn read_available() {
        let (uarts, states) = fake_driver::<1>();
        let mut serial = uarts.port(0).unwrap();
        assert_eq!(serial.read_ready(), Ok(false));

        states[0]
            .lock()
            .unwrap()
            .rx_fifo
            .extend(b"ok".iter().copied().map(u32::from));
        assert_eq!(serial.read_ready(), Ok(true));
        let mut buffer = [0; 8];
        assert_eq!(serial.read(&mut buffer), Ok(2));
        assert_eq!(&buffer[..2], b"ok");
    }

    #[test]
    fn read_in_interrupt_mode() {
        let (uarts, _states) = fake_driver::<1>();
        uarts
            .initialize(0, &LineConfig::new(9600), Some(record))
            .unwrap();
        let mut serial = uarts.port(0).unwrap();
        assert_eq!(serial.read_ready(), Err(Error::InterruptModeActive));
        assert_eq!(serial.read(&mut [0; 4]), Err(Error::InterruptModeActive));
    }
}

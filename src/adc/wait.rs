//! Polling policies for the calibration handshakes
//!
//! `RSTCAL` and `CAL` are cleared by hardware. How long the driver keeps
//! polling for that is up to the caller:
//!
//! - [`Spin`] polls forever. If the ADC clock is not running, this never
//!   returns.
//! - [`Bounded`] gives up after a fixed number of polls.
//! - [`Delayed`] sleeps between polls and gives up after a time budget.

use embedded_hal::delay::DelayNs;

use crate::time::MicroSeconds;

/// The polled condition did not clear in time
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timeout;

/// Strategy for waiting on a hardware status bit
pub trait Wait {
    /// Polls `busy` until it returns `false`
    fn wait_while<F>(&mut self, busy: F) -> Result<(), Timeout>
    where
        F: FnMut() -> bool;
}

/// Unbounded busy-wait
#[derive(Default, Clone, Copy, Debug)]
pub struct Spin;

impl Wait for Spin {
    fn wait_while<F>(&mut self, mut busy: F) -> Result<(), Timeout>
    where
        F: FnMut() -> bool,
    {
        while busy() {}
        Ok(())
    }
}

/// Busy-wait for at most `max_polls` re-checks after the first one
#[derive(Clone, Copy, Debug)]
pub struct Bounded {
    max_polls: u32,
}

impl Bounded {
    /// Gives up after the condition was seen busy `max_polls + 1` times
    pub const fn new(max_polls: u32) -> Self {
        Self { max_polls }
    }
}

impl Wait for Bounded {
    fn wait_while<F>(&mut self, mut busy: F) -> Result<(), Timeout>
    where
        F: FnMut() -> bool,
    {
        for _ in 0..=self.max_polls {
            if !busy() {
                return Ok(());
            }
        }
        Err(Timeout)
    }
}

/// Sleep `interval` between polls, give up once `timeout` has been spent
/// sleeping
///
/// The last sleep is shortened so the total never exceeds `timeout`.
pub struct Delayed<D> {
    delay: D,
    interval: MicroSeconds,
    timeout: MicroSeconds,
}

impl<D: DelayNs> Delayed<D> {
    /// A zero `interval` is rounded up to 1 µs
    pub fn new(delay: D, interval: MicroSeconds, timeout: MicroSeconds) -> Self {
        let interval = MicroSeconds::from_ticks(interval.ticks().max(1));
        Self {
            delay,
            interval,
            timeout,
        }
    }

    /// Returns the delay provider
    pub fn release(self) -> D {
        self.delay
    }
}

impl<D: DelayNs> Wait for Delayed<D> {
    fn wait_while<F>(&mut self, mut busy: F) -> Result<(), Timeout>
    where
        F: FnMut() -> bool,
    {
        let mut waited = 0u32;
        while busy() {
            let remaining = self.timeout.ticks().saturating_sub(waited);
            if remaining == 0 {
                return Err(Timeout);
            }
            let step = self.interval.ticks().min(remaining);
            self.delay.delay_us(step);
            waited += step;
        }
        Ok(())
    }
}

//! Sampled digital input.
//!
//! Wraps an `embedded-hal` input pin and remembers the last level that
//! read cleanly. A failed read is logged and the previous level is
//! reported again, so one glitch never flips a detector or a key.

use embedded_hal::digital::InputPin;
use log::warn;

use crate::error::SensorError;

pub struct SampledInput<P> {
    pin: P,
    name: &'static str,
    last: bool,
}

impl<P: InputPin> SampledInput<P> {
    /// `initial` is reported until the first successful read.
    pub fn new(pin: P, name: &'static str, initial: bool) -> Self {
        Self {
            pin,
            name,
            last: initial,
        }
    }

    /// Read the line; `true` = high.
    pub fn sample(&mut self) -> bool {
        match self.try_sample() {
            Ok(level) => level,
            Err(e) => {
                warn!("{}: {} (keeping {})", self.name, e, self.last);
                self.last
            }
        }
    }

    pub fn try_sample(&mut self) -> Result<bool, SensorError> {
        let level = self
            .pin
            .is_high()
            .map_err(|_| SensorError::GpioReadFailed)?;
        self.last = level;
        Ok(level)
    }

    /// Last good level without touching the pin.
    pub fn last(&self) -> bool {
        self.last
    }
}

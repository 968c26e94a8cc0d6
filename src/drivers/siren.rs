//! Siren on an open-drain line.
//!
//! Pulling the line low sounds the siren. Releasing it (driving the
//! open-drain output high, which leaves it floating) silences it.

use embedded_hal::digital::OutputPin;
use log::warn;

use crate::error::ActuatorError;
use crate::fsm::context::SirenDrive;

pub struct Siren<P> {
    pin: P,
    drive: SirenDrive,
}

impl<P: OutputPin> Siren<P> {
    /// Takes the pin and releases it straight away.
    pub fn new(pin: P) -> Self {
        // Start from the opposite level to force the first write.
        let mut siren = Self {
            pin,
            drive: SirenDrive::Sounding,
        };
        siren.set(SirenDrive::Released);
        siren
    }

    /// Drive the line; failures are logged and retried on the next call.
    pub fn set(&mut self, drive: SirenDrive) {
        if drive == self.drive {
            return;
        }
        if let Err(e) = self.try_set(drive) {
            warn!("Siren: {} while switching to {:?}", e, drive);
        }
    }

    pub fn try_set(&mut self, drive: SirenDrive) -> Result<(), ActuatorError> {
        let result = match drive {
            SirenDrive::Sounding => self.pin.set_low(),
            SirenDrive::Released => self.pin.set_high(),
        };
        result.map_err(|_| ActuatorError::GpioWriteFailed)?;
        self.drive = drive;
        Ok(())
    }

    pub fn drive(&self) -> SirenDrive {
        self.drive
    }
}

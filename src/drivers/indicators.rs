//! Front-panel indicator LEDs (active-high).

use embedded_hal::digital::{OutputPin, PinState};
use log::warn;

use crate::app::ports::Indicator;

const COUNT: usize = 3;

fn slot(indicator: Indicator) -> usize {
    match indicator {
        Indicator::Alarm => 0,
        Indicator::SystemBlocked => 1,
        Indicator::IncorrectCode => 2,
    }
}

pub struct IndicatorBank<P> {
    pins: [P; COUNT],
    levels: [bool; COUNT],
}

impl<P: OutputPin> IndicatorBank<P> {
    /// Pins in the order alarm, system blocked, incorrect code. All are
    /// switched off.
    pub fn new(alarm: P, system_blocked: P, incorrect_code: P) -> Self {
        // Start from the opposite level to force the first write.
        let mut bank = Self {
            pins: [alarm, system_blocked, incorrect_code],
            levels: [true; COUNT],
        };
        bank.all_off();
        bank
    }

    pub fn set(&mut self, indicator: Indicator, on: bool) {
        let idx = slot(indicator);
        if self.levels[idx] == on {
            return;
        }
        match self.pins[idx].set_state(PinState::from(on)) {
            Ok(()) => self.levels[idx] = on,
            Err(_) => warn!("Indicator {:?}: GPIO write failed", indicator),
        }
    }

    pub fn is_on(&self, indicator: Indicator) -> bool {
        self.levels[slot(indicator)]
    }

    pub fn all_off(&mut self) {
        for indicator in [
            Indicator::Alarm,
            Indicator::SystemBlocked,
            Indicator::IncorrectCode,
        ] {
            self.set(indicator, false);
        }
    }
}

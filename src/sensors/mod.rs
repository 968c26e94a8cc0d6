//! Sensor processing — pure logic on top of raw samples.
//!
//! Adapters hand the core an [`InputSnapshot`] every tick. The modules
//! here turn those raw levels and fractions into domain values: a
//! [`GasState`](gas::GasState), a smoothed
//! [`TemperatureReading`](temperature::TemperatureReading), and a
//! [`KeypadState`] that can be read as a code attempt.

pub mod gas;
pub mod rolling;
pub mod temperature;

use crate::config::CODE_LENGTH;
use gas::GasState;

/// Disarm keypad: four code switches (A–D) plus the Enter button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeypadState {
    pub a: bool,
    pub b: bool,
    pub c: bool,
    pub d: bool,
    pub enter: bool,
}

impl KeypadState {
    /// A–D in code order.
    pub fn code_switches(&self) -> [bool; CODE_LENGTH] {
        [self.a, self.b, self.c, self.d]
    }

    /// All four code switches held with Enter released: the gesture that
    /// acknowledges an incorrect-code indication.
    pub fn is_reset_gesture(&self) -> bool {
        self.a && self.b && self.c && self.d && !self.enter
    }
}

/// Everything the core samples once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    pub gas: GasState,
    /// Momentary alarm-test button.
    pub test_button: bool,
    pub keypad: KeypadState,
    /// LM35 output as a fraction of ADC full scale.
    pub lm35_raw: f32,
}

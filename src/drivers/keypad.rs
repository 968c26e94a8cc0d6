//! Disarm keypad: four code switches (A–D) and Enter.
//!
//! Switches are active-high with pull-downs, so a high line means pressed.
//! No debouncing beyond the control-tick sampling period.

use embedded_hal::digital::InputPin;

use super::input::SampledInput;
use crate::config::CODE_LENGTH;
use crate::sensors::KeypadState;

pub struct Keypad<P> {
    switches: [SampledInput<P>; CODE_LENGTH],
    enter: SampledInput<P>,
}

impl<P: InputPin> Keypad<P> {
    /// `switches` in code order A, B, C, D.
    pub fn new(switches: [P; CODE_LENGTH], enter: P) -> Self {
        let [a, b, c, d] = switches;
        Self {
            switches: [
                SampledInput::new(a, "key A", false),
                SampledInput::new(b, "key B", false),
                SampledInput::new(c, "key C", false),
                SampledInput::new(d, "key D", false),
            ],
            enter: SampledInput::new(enter, "key Enter", false),
        }
    }

    pub fn read(&mut self) -> KeypadState {
        let [a, b, c, d] = &mut self.switches;
        KeypadState {
            a: a.sample(),
            b: b.sample(),
            c: c.sample(),
            d: d.sample(),
            enter: self.enter.sample(),
        }
    }
}

//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns every input and output driver and exposes them through
//! [`SensorPort`] and [`ActuatorPort`].  Generic over the `embedded-hal`
//! pin traits and [`AnalogInput`], so the same adapter runs on the
//! ESP-IDF HAL and on in-memory pins in tests.
//!
//! | Signal        | Level                                   |
//! |---------------|-----------------------------------------|
//! | MQ-2 gas      | active low (low = gas detected)         |
//! | test button   | active high                             |
//! | keypad A–D, ⏎ | active high, pulled down                |
//! | siren         | open drain, low = sounding              |
//! | LEDs          | active high                             |

use embedded_hal::digital::{InputPin, OutputPin};
use log::warn;

use crate::app::ports::{ActuatorPort, AnalogInput, Indicator, SensorPort};
use crate::drivers::indicators::IndicatorBank;
use crate::drivers::input::SampledInput;
use crate::drivers::keypad::Keypad;
use crate::drivers::siren::Siren;
use crate::fsm::context::SirenDrive;
use crate::sensors::InputSnapshot;
use crate::sensors::gas::GasState;

/// An analog channel that keeps its last good reading.
struct AnalogChannel<A> {
    input: A,
    name: &'static str,
    last: f32,
}

impl<A: AnalogInput> AnalogChannel<A> {
    fn new(input: A, name: &'static str) -> Self {
        Self {
            input,
            name,
            last: 0.0,
        }
    }

    fn sample(&mut self) -> f32 {
        match self.input.read() {
            Ok(value) => {
                self.last = value;
                value
            }
            Err(e) => {
                warn!("{}: {} (keeping {:.3})", self.name, e, self.last);
                self.last
            }
        }
    }
}

/// Digital inputs, grouped so the adapter constructor stays readable.
pub struct InputPins<I> {
    pub gas: I,
    pub test_button: I,
    /// A, B, C, D.
    pub keys: [I; 4],
    pub enter: I,
}

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<I, O, S, T, P> {
    gas: SampledInput<I>,
    test_button: SampledInput<I>,
    keypad: Keypad<I>,
    lm35: AnalogChannel<T>,
    potentiometer: AnalogChannel<P>,
    siren: Siren<S>,
    indicators: IndicatorBank<O>,
}

impl<I, O, S, T, P> HardwareAdapter<I, O, S, T, P>
where
    I: InputPin,
    O: OutputPin,
    S: OutputPin,
    T: AnalogInput,
    P: AnalogInput,
{
    /// `leds` in the order alarm, system blocked, incorrect code.
    pub fn new(inputs: InputPins<I>, lm35: T, potentiometer: P, siren: S, leds: [O; 3]) -> Self {
        let [alarm, blocked, incorrect] = leds;
        Self {
            // Idle level of the MQ-2 output is high.
            gas: SampledInput::new(inputs.gas, "gas detector", true),
            test_button: SampledInput::new(inputs.test_button, "test button", false),
            keypad: Keypad::new(inputs.keys, inputs.enter),
            lm35: AnalogChannel::new(lm35, "LM35"),
            potentiometer: AnalogChannel::new(potentiometer, "potentiometer"),
            siren: Siren::new(siren),
            indicators: IndicatorBank::new(alarm, blocked, incorrect),
        }
    }

    pub fn siren_drive(&self) -> SirenDrive {
        self.siren.drive()
    }

    pub fn indicator(&self, indicator: Indicator) -> bool {
        self.indicators.is_on(indicator)
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<I, O, S, T, P> SensorPort for HardwareAdapter<I, O, S, T, P>
where
    I: InputPin,
    O: OutputPin,
    S: OutputPin,
    T: AnalogInput,
    P: AnalogInput,
{
    fn read_inputs(&mut self) -> InputSnapshot {
        InputSnapshot {
            gas: GasState::from_line_level(self.gas.sample()),
            test_button: self.test_button.sample(),
            keypad: self.keypad.read(),
            lm35_raw: self.lm35.sample(),
        }
    }

    fn read_potentiometer(&mut self) -> f32 {
        self.potentiometer.sample()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<I, O, S, T, P> ActuatorPort for HardwareAdapter<I, O, S, T, P>
where
    I: InputPin,
    O: OutputPin,
    S: OutputPin,
    T: AnalogInput,
    P: AnalogInput,
{
    fn set_siren(&mut self, drive: SirenDrive) {
        self.siren.set(drive);
    }

    fn set_indicator(&mut self, indicator: Indicator, on: bool) {
        self.indicators.set(indicator, on);
    }

    fn all_off(&mut self) {
        self.siren.set(SirenDrive::Released);
        self.indicators.all_off();
    }
}

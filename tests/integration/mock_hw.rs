//! Mock hardware for integration tests.
//!
//! Records every actuator call so tests can assert on the full command
//! history without touching real GPIO, and scripts the serial line.

use std::collections::VecDeque;

use homesentry::app::events::AppEvent;
use homesentry::app::ports::{ActuatorPort, EventSink, Indicator, SensorPort};
use homesentry::console::transport::Transport;
use homesentry::fsm::context::SirenDrive;
use homesentry::sensors::gas::GasState;
use homesentry::sensors::{InputSnapshot, KeypadState};

/// LM35 fraction of full scale for a given temperature (3.3 V, 10 mV/°C).
pub fn lm35_raw_for(celsius: f32) -> f32 {
    celsius * 0.01 / 3.3
}

pub fn keys(code: [bool; 4], enter: bool) -> KeypadState {
    KeypadState {
        a: code[0],
        b: code[1],
        c: code[2],
        d: code[3],
        enter,
    }
}

/// A–D held, Enter released.
pub fn reset_gesture() -> KeypadState {
    keys([true; 4], false)
}

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorCall {
    Siren(SirenDrive),
    Indicator(Indicator, bool),
    AllOff,
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub inputs: InputSnapshot,
    pub potentiometer: f32,
    pub calls: Vec<ActuatorCall>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            inputs: InputSnapshot::default(),
            potentiometer: 0.0,
            calls: Vec::new(),
        }
    }

    pub fn set_gas(&mut self, present: bool) {
        self.inputs.gas = if present {
            GasState::Detected
        } else {
            GasState::Clear
        };
    }

    pub fn siren(&self) -> SirenDrive {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::Siren(drive) => Some(*drive),
                ActuatorCall::AllOff => Some(SirenDrive::Released),
                ActuatorCall::Indicator(..) => None,
            })
            .unwrap_or_default()
    }

    pub fn indicator(&self, which: Indicator) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::Indicator(i, on) if *i == which => Some(*on),
                ActuatorCall::AllOff => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn read_inputs(&mut self) -> InputSnapshot {
        self.inputs
    }

    fn read_potentiometer(&mut self) -> f32 {
        self.potentiometer
    }
}

impl ActuatorPort for MockHardware {
    fn set_siren(&mut self, drive: SirenDrive) {
        self.calls.push(ActuatorCall::Siren(drive));
    }

    fn set_indicator(&mut self, indicator: Indicator, on: bool) {
        self.calls.push(ActuatorCall::Indicator(indicator, on));
    }

    fn all_off(&mut self) {
        self.calls.push(ActuatorCall::AllOff);
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── ScriptedSerial ────────────────────────────────────────────

#[derive(Debug, PartialEq, Eq)]
pub struct LineFault;

#[derive(Default)]
pub struct ScriptedSerial {
    pub rx: VecDeque<u8>,
    pub tx: Vec<u8>,
    pub fail_reads: bool,
}

#[allow(dead_code)]
impl ScriptedSerial {
    pub fn type_bytes(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes.iter().copied());
    }

    /// Everything written so far, clearing the buffer.
    pub fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.tx)
    }
}

impl Transport for ScriptedSerial {
    type Error = LineFault;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, LineFault> {
        if self.fail_reads {
            return Err(LineFault);
        }
        let mut n = 0;
        for slot in buf.iter_mut() {
            match self.rx.pop_front() {
                Some(b) => {
                    *slot = b;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, LineFault> {
        self.tx.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<(), LineFault> {
        Ok(())
    }

    fn available(&self) -> bool {
        self.fail_reads || !self.rx.is_empty()
    }
}

//! Fuzz target: console + alarm service
//!
//! Each pair of input bytes is one control tick: the first byte drives
//! the digital inputs (gas, test button, keypad), the second arrives on
//! the serial line. Asserts that the console never errors and that the
//! siren always follows the alarm state.
//!
//! cargo fuzz run fuzz_console

#![no_main]

use std::collections::VecDeque;

use homesentry::app::events::AppEvent;
use homesentry::app::ports::{ActuatorPort, EventSink, Indicator, SensorPort};
use homesentry::app::service::AppService;
use homesentry::config::SystemConfig;
use homesentry::console::Console;
use homesentry::console::transport::Transport;
use homesentry::fsm::context::SirenDrive;
use homesentry::sensors::gas::GasState;
use homesentry::sensors::{InputSnapshot, KeypadState};
use libfuzzer_sys::fuzz_target;

#[derive(Default)]
struct Serial {
    rx: VecDeque<u8>,
}

impl Transport for Serial {
    type Error = ();

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ()> {
        match (buf.first_mut(), self.rx.pop_front()) {
            (Some(slot), Some(b)) => {
                *slot = b;
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, ()> {
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<(), ()> {
        Ok(())
    }

    fn available(&self) -> bool {
        !self.rx.is_empty()
    }
}

#[derive(Default)]
struct Board {
    inputs: InputSnapshot,
    siren: SirenDrive,
}

impl SensorPort for Board {
    fn read_inputs(&mut self) -> InputSnapshot {
        self.inputs
    }

    fn read_potentiometer(&mut self) -> f32 {
        self.inputs.lm35_raw
    }
}

impl ActuatorPort for Board {
    fn set_siren(&mut self, drive: SirenDrive) {
        self.siren = drive;
    }

    fn set_indicator(&mut self, _indicator: Indicator, _on: bool) {}

    fn all_off(&mut self) {
        self.siren = SirenDrive::Released;
    }
}

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &AppEvent) {}
}

fn bit(byte: u8, n: u8) -> bool {
    byte & (1 << n) != 0
}

fuzz_target!(|data: &[u8]| {
    let mut app = AppService::new(SystemConfig::default());
    let mut board = Board::default();
    let mut serial = Serial::default();
    let mut console = Console::new();
    let mut sink = Discard;

    app.start(&mut board, &mut sink);

    for pair in data.chunks(2) {
        let levels = pair[0];
        board.inputs = InputSnapshot {
            gas: GasState::from_line_level(!bit(levels, 0)),
            test_button: bit(levels, 1),
            keypad: KeypadState {
                a: bit(levels, 2),
                b: bit(levels, 3),
                c: bit(levels, 4),
                d: bit(levels, 5),
                enter: bit(levels, 6),
            },
            lm35_raw: if bit(levels, 7) { 0.5 } else { 0.05 },
        };
        if let Some(&byte) = pair.get(1) {
            serial.rx.push_back(byte);
        }

        app.tick(&mut board, &mut sink);
        assert!(console.poll(&mut serial, &mut app, &mut board, &mut sink).is_ok());

        let expected = if app.is_alarming() {
            SirenDrive::Sounding
        } else {
            SirenDrive::Released
        };
        assert_eq!(board.siren, expected, "siren must follow the alarm state");
        if app.vault().incorrect_code() {
            assert!(app.vault().failed_attempts() > 0);
        }
    }
});

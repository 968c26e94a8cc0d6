//! Serial console replies and dialogs, byte for byte.

use crate::mock_hw::{MockHardware, RecordingSink, ScriptedSerial, lm35_raw_for};

use homesentry::app::events::AppEvent;
use homesentry::app::ports::Indicator;
use homesentry::app::service::AppService;
use homesentry::config::SystemConfig;
use homesentry::console::Console;
use homesentry::console::dialog::DialogKind;
use homesentry::console::messages;
use homesentry::error::{CommsError, Error};

struct Bench {
    app: AppService,
    hw: MockHardware,
    sink: RecordingSink,
    serial: ScriptedSerial,
    console: Console,
}

impl Bench {
    fn new() -> Self {
        let mut app = AppService::new(SystemConfig::default());
        let mut hw = MockHardware::new();
        let mut sink = RecordingSink::default();
        app.start(&mut hw, &mut sink);
        Self {
            app,
            hw,
            sink,
            serial: ScriptedSerial::default(),
            console: Console::new(),
        }
    }

    fn tick(&mut self, n: usize) {
        for _ in 0..n {
            self.app.tick(&mut self.hw, &mut self.sink);
        }
    }

    /// Type `bytes` and poll until the line is drained; return the output.
    fn send(&mut self, bytes: &[u8]) -> Vec<u8> {
        self.serial.type_bytes(bytes);
        while !self.serial.rx.is_empty() {
            self.console
                .poll(&mut self.serial, &mut self.app, &mut self.hw, &mut self.sink)
                .unwrap();
        }
        self.serial.take_output()
    }
}

#[test]
fn alarm_state_query() {
    let mut b = Bench::new();
    assert_eq!(b.send(b"1"), b"The alarm is not activated\r\n");

    b.hw.inputs.test_button = true;
    b.tick(1);
    assert_eq!(b.send(b"1"), b"The alarm is activated\r\n");
}

#[test]
fn gas_query_reports_the_live_reading() {
    let mut b = Bench::new();
    b.hw.set_gas(true);
    b.tick(1);
    assert_eq!(b.send(b"2"), b"Gas is being detected\r\n");

    // Still latched by the alarm, but the line has cleared.
    b.hw.set_gas(false);
    b.tick(1);
    assert!(b.app.is_alarming());
    assert_eq!(b.send(b"2"), b"Gas is not being detected\r\n");
}

#[test]
fn over_temperature_query() {
    let mut b = Bench::new();
    assert_eq!(b.send(b"3"), b"Temperature is below the maximum level\r\n");

    b.hw.inputs.lm35_raw = lm35_raw_for(80.0);
    b.tick(100);
    assert_eq!(b.send(b"3"), b"Temperature is above the maximum level\r\n");
}

#[test]
fn temperature_readings_use_the_degree_byte() {
    let mut b = Bench::new();
    b.hw.inputs.lm35_raw = 0.1;
    b.tick(100);
    assert_eq!(b.send(b"c"), b"Temperature: 33.00 \xB0 C\r\n");
    assert_eq!(b.send(b"C"), b"Temperature: 33.00 \xB0 C\r\n");
    assert_eq!(b.send(b"f"), b"Temperature: 91.40 \xB0 F\r\n");
}

#[test]
fn potentiometer_reading() {
    let mut b = Bench::new();
    b.hw.potentiometer = 0.756;
    assert_eq!(b.send(b"p"), b"Potentiometer: 0.76\r\n");
    assert_eq!(b.send(b"P"), b"Potentiometer: 0.76\r\n");
}

#[test]
fn anything_else_prints_help() {
    let mut b = Bench::new();
    for byte in [b'x', b'\n', b'6', b'0'] {
        assert_eq!(b.send(&[byte]), messages::HELP);
    }
}

#[test]
fn verify_dialog_disarms_with_the_right_code() {
    let mut b = Bench::new();
    b.hw.inputs.test_button = true;
    b.tick(1);
    b.hw.inputs.test_button = false;

    let out = b.send(b"41100");

    let mut expected = messages::VERIFY_PROMPT.to_vec();
    expected.extend_from_slice(b"****\r\nThe code is correct\r\n\r\n");
    assert_eq!(out, expected);
    assert!(!b.app.is_alarming());
    assert_eq!(b.app.vault().failed_attempts(), 0);
    assert!(!b.hw.indicator(Indicator::IncorrectCode));
}

#[test]
fn stray_byte_in_verify_dialog_is_a_mismatch() {
    let mut b = Bench::new();
    let out = b.send(b"41a00");
    assert!(out.ends_with(b"****\r\nThe code is incorrect\r\n\r\n"));
    assert_eq!(b.app.vault().failed_attempts(), 1);
    assert!(b.hw.indicator(Indicator::IncorrectCode));
}

#[test]
fn wrong_serial_codes_share_the_keypad_lockout_counter() {
    let mut b = Bench::new();
    for attempt in 1..=10u32 {
        let out = b.send(b"40000");
        assert!(out.ends_with(b"\r\nThe code is incorrect\r\n\r\n"));
        b.tick(1);

        assert_eq!(b.app.vault().failed_attempts(), attempt);
        let blocked = attempt >= 5;
        assert_eq!(b.app.vault().is_blocked(), blocked, "attempt {attempt}");
        assert_eq!(b.hw.indicator(Indicator::SystemBlocked), blocked, "attempt {attempt}");
    }
    assert!(b.hw.indicator(Indicator::IncorrectCode));
    let blocked_events = b
        .sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::SystemBlocked { .. }))
        .count();
    assert_eq!(blocked_events, 1);

    // Serial entry still works past the lockout.
    assert!(b.send(b"41100").ends_with(b"The code is correct\r\n\r\n"));
    assert_eq!(b.app.vault().failed_attempts(), 0);
}

#[test]
fn new_code_dialog_updates_only_valid_positions() {
    let mut b = Bench::new();
    let out = b.send(b"51x01");

    let mut expected = messages::NEW_CODE_PROMPT.to_vec();
    expected.extend_from_slice(b"****\r\nNew code generated\r\n\r\n");
    assert_eq!(out, expected);
    // Default [1,1,0,0]: positions 0, 2 and 3 rewritten, 1 kept.
    assert_eq!(b.app.vault().secret(), [true, true, false, true]);
    assert!(b.sink.events.contains(&AppEvent::CodeChanged { positions_changed: 1 }));

    // The old code no longer disarms; the new one does.
    b.hw.inputs.test_button = true;
    b.tick(1);
    b.hw.inputs.test_button = false;
    assert!(b.send(b"41100").ends_with(b"The code is incorrect\r\n\r\n"));
    assert!(b.send(b"41101").ends_with(b"The code is correct\r\n\r\n"));
    assert!(!b.app.is_alarming());
}

#[test]
fn dialog_digits_arrive_across_polls() {
    let mut b = Bench::new();
    b.send(b"5");
    assert_eq!(b.console.open_dialog(), Some(DialogKind::SetNewCode));

    for (i, byte) in b"001".iter().enumerate() {
        let out = b.send(&[*byte]);
        assert_eq!(out, b"*", "digit {i}");
    }
    let out = b.send(b"1");
    assert_eq!(out, b"*\r\nNew code generated\r\n\r\n");
    assert_eq!(b.app.vault().secret(), [false, false, true, true]);
}

#[test]
fn one_command_byte_per_poll() {
    let mut b = Bench::new();
    b.serial.type_bytes(b"123");
    b.console
        .poll(&mut b.serial, &mut b.app, &mut b.hw, &mut b.sink)
        .unwrap();
    assert_eq!(b.serial.take_output(), b"The alarm is not activated\r\n");
    assert_eq!(b.serial.rx.len(), 2);
}

#[test]
fn read_failure_surfaces_as_comms_error() {
    let mut b = Bench::new();
    b.serial.fail_reads = true;
    let err = b
        .console
        .poll(&mut b.serial, &mut b.app, &mut b.hw, &mut b.sink)
        .unwrap_err();
    assert_eq!(err, Error::Comms(CommsError::SerialReadFailed));
}

//! End-to-end alarm flows through `AppService` with mock hardware:
//! detection, blinking, keypad disarm, lockout and serial override.

use crate::mock_hw::{MockHardware, RecordingSink, ScriptedSerial, keys, lm35_raw_for, reset_gesture};

use homesentry::app::events::{AppEvent, CodeSource};
use homesentry::app::ports::Indicator;
use homesentry::app::service::AppService;
use homesentry::config::SystemConfig;
use homesentry::console::Console;
use homesentry::fsm::StateId;
use homesentry::fsm::context::SirenDrive;
use homesentry::sensors::KeypadState;

const RIGHT: [bool; 4] = [true, true, false, false];
const WRONG: [bool; 4] = [true, false, true, false];

fn make_app() -> (AppService, MockHardware, RecordingSink) {
    let mut app = AppService::new(SystemConfig::default());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::default();
    app.start(&mut hw, &mut sink);
    (app, hw, sink)
}

fn tick_n(app: &mut AppService, hw: &mut MockHardware, sink: &mut RecordingSink, n: usize) {
    for _ in 0..n {
        app.tick(hw, sink);
    }
}

/// Count alarm LED edges over `n` ticks.
fn alarm_led_toggles(app: &mut AppService, hw: &mut MockHardware, sink: &mut RecordingSink, n: usize) -> usize {
    let mut led = hw.indicator(Indicator::Alarm);
    let mut toggles = 0;
    for _ in 0..n {
        app.tick(hw, sink);
        let now = hw.indicator(Indicator::Alarm);
        if now != led {
            toggles += 1;
            led = now;
        }
    }
    toggles
}

/// Enter a code on the keypad for one tick, then release everything.
fn press(app: &mut AppService, hw: &mut MockHardware, sink: &mut RecordingSink, keypad: KeypadState) {
    hw.inputs.keypad = keypad;
    app.tick(hw, sink);
    hw.inputs.keypad = KeypadState::default();
}

fn raise_with_test_button(app: &mut AppService, hw: &mut MockHardware, sink: &mut RecordingSink) {
    hw.inputs.test_button = true;
    app.tick(hw, sink);
    hw.inputs.test_button = false;
    assert!(app.is_alarming());
}

#[test]
fn start_leaves_outputs_idle() {
    let (app, hw, sink) = make_app();
    assert_eq!(app.state(), StateId::Idle);
    assert_eq!(hw.siren(), SirenDrive::Released);
    assert!(!hw.indicator(Indicator::Alarm));
    assert_eq!(sink.events, vec![AppEvent::Started(StateId::Idle)]);
}

#[test]
fn gas_alarm_blinks_once_a_second_and_keypad_disarms() {
    let (mut app, mut hw, mut sink) = make_app();

    hw.set_gas(true);
    app.tick(&mut hw, &mut sink);
    assert!(app.is_alarming());
    assert_eq!(hw.siren(), SirenDrive::Sounding);

    // The detector is sticky once the gas clears.
    hw.set_gas(false);
    assert_eq!(alarm_led_toggles(&mut app, &mut hw, &mut sink, 300), 3);
    assert!(app.is_alarming());

    press(&mut app, &mut hw, &mut sink, keys(RIGHT, true));
    assert_eq!(app.state(), StateId::Idle);
    assert_eq!(hw.siren(), SirenDrive::Released);
    assert!(!hw.indicator(Indicator::Alarm));
    assert!(sink.events.contains(&AppEvent::Disarmed(CodeSource::Keypad)));
}

#[test]
fn gas_and_over_temperature_blink_every_100_ms() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.inputs.test_button = true;
    app.tick(&mut hw, &mut sink);
    hw.inputs.test_button = false;

    assert_eq!(alarm_led_toggles(&mut app, &mut hw, &mut sink, 100), 10);
}

#[test]
fn over_temperature_waits_for_the_rolling_average() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.inputs.lm35_raw = lm35_raw_for(66.0);

    // 75 samples average to 49.5 °C, the 76th crosses 50 °C.
    tick_n(&mut app, &mut hw, &mut sink, 75);
    assert!(!app.is_alarming());
    app.tick(&mut hw, &mut sink);
    assert!(app.is_alarming());
    assert!(app.over_temp_now());
    assert!(sink.events.contains(&AppEvent::DetectorLatched(0b10)));

    // Over-temperature alone blinks at 500 ms.
    assert_eq!(alarm_led_toggles(&mut app, &mut hw, &mut sink, 100), 2);
}

#[test]
fn keypad_does_nothing_while_idle() {
    let (mut app, mut hw, mut sink) = make_app();
    press(&mut app, &mut hw, &mut sink, keys(WRONG, true));
    assert_eq!(app.vault().failed_attempts(), 0);
    assert!(!hw.indicator(Indicator::IncorrectCode));
}

#[test]
fn wrong_code_lights_incorrect_led_until_reset_gesture() {
    let (mut app, mut hw, mut sink) = make_app();
    raise_with_test_button(&mut app, &mut hw, &mut sink);

    press(&mut app, &mut hw, &mut sink, keys(WRONG, true));
    assert!(hw.indicator(Indicator::IncorrectCode));

    // Right code is ignored while the indicator is lit.
    press(&mut app, &mut hw, &mut sink, keys(RIGHT, true));
    assert!(app.is_alarming());
    assert_eq!(app.vault().failed_attempts(), 1);

    press(&mut app, &mut hw, &mut sink, reset_gesture());
    assert!(!hw.indicator(Indicator::IncorrectCode));

    press(&mut app, &mut hw, &mut sink, keys(RIGHT, true));
    assert!(!app.is_alarming());
    assert_eq!(app.vault().failed_attempts(), 0);
}

#[test]
fn five_keypad_failures_block_the_keypad() {
    let (mut app, mut hw, mut sink) = make_app();
    raise_with_test_button(&mut app, &mut hw, &mut sink);

    for _ in 0..5 {
        press(&mut app, &mut hw, &mut sink, keys(WRONG, true));
        press(&mut app, &mut hw, &mut sink, reset_gesture());
    }
    assert!(hw.indicator(Indicator::SystemBlocked));
    assert!(app.vault().is_blocked());
    assert_eq!(
        sink.events
            .iter()
            .filter(|e| matches!(e, AppEvent::SystemBlocked { .. }))
            .count(),
        1
    );

    // A sixth, correct attempt is never evaluated.
    press(&mut app, &mut hw, &mut sink, keys(RIGHT, true));
    assert!(app.is_alarming());
    assert_eq!(app.vault().failed_attempts(), 5);
    assert!(hw.indicator(Indicator::SystemBlocked));
}

#[test]
fn serial_code_overrides_the_lockout() {
    let (mut app, mut hw, mut sink) = make_app();
    let mut serial = ScriptedSerial::default();
    let mut console = Console::new();
    raise_with_test_button(&mut app, &mut hw, &mut sink);

    for _ in 0..5 {
        press(&mut app, &mut hw, &mut sink, keys(WRONG, true));
        press(&mut app, &mut hw, &mut sink, reset_gesture());
    }
    assert!(app.vault().is_blocked());

    serial.type_bytes(b"41100");
    console.poll(&mut serial, &mut app, &mut hw, &mut sink).unwrap();

    assert!(serial.tx.ends_with(b"\r\nThe code is correct\r\n\r\n"));
    assert!(!app.is_alarming());
    assert_eq!(app.vault().failed_attempts(), 0);
    assert_eq!(hw.siren(), SirenDrive::Released);
    // The blocked LED never goes out once lit.
    assert!(hw.indicator(Indicator::SystemBlocked));

    // The keypad evaluates again on the next alarm.
    raise_with_test_button(&mut app, &mut hw, &mut sink);
    press(&mut app, &mut hw, &mut sink, keys(RIGHT, true));
    assert!(!app.is_alarming());
}

#[test]
fn alarm_keeps_running_while_a_dialog_waits() {
    let (mut app, mut hw, mut sink) = make_app();
    let mut serial = ScriptedSerial::default();
    let mut console = Console::new();

    serial.type_bytes(b"41");
    console.poll(&mut serial, &mut app, &mut hw, &mut sink).unwrap();
    assert!(console.open_dialog().is_some());

    hw.set_gas(true);
    tick_n(&mut app, &mut hw, &mut sink, 5);
    hw.set_gas(false);
    assert!(app.is_alarming());
    assert_eq!(hw.siren(), SirenDrive::Sounding);

    serial.type_bytes(b"100");
    console.poll(&mut serial, &mut app, &mut hw, &mut sink).unwrap();
    assert!(console.open_dialog().is_none());
    assert!(!app.is_alarming());
}

#[test]
fn persisting_gas_rearms_after_disarm() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.set_gas(true);
    app.tick(&mut hw, &mut sink);

    press(&mut app, &mut hw, &mut sink, keys(RIGHT, true));
    assert!(!app.is_alarming());

    app.tick(&mut hw, &mut sink);
    assert!(app.is_alarming());
}

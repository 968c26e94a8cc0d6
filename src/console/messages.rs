//! Console replies, byte for byte.
//!
//! Temperature lines carry the degree sign as the single Latin-1 byte
//! `0xB0`, so everything here is handled as bytes rather than `str`.

use core::fmt::Write as _;

use heapless::{String, Vec};

pub const ALARM_ACTIVATED: &[u8] = b"The alarm is activated\r\n";
pub const ALARM_NOT_ACTIVATED: &[u8] = b"The alarm is not activated\r\n";

pub const GAS_DETECTED: &[u8] = b"Gas is being detected\r\n";
pub const GAS_NOT_DETECTED: &[u8] = b"Gas is not being detected\r\n";

pub const OVER_TEMP: &[u8] = b"Temperature is above the maximum level\r\n";
pub const NOT_OVER_TEMP: &[u8] = b"Temperature is below the maximum level\r\n";

pub const VERIFY_PROMPT: &[u8] = concat!(
    "Please enter the code sequence.\r\n",
    "First enter 'A', then 'B', then 'C', and ",
    "finally 'D' button\r\n",
    "In each case type 1 for pressed or 0 for ",
    "not pressed\r\n",
    "For example, for 'A' = pressed, ",
    "'B' = pressed, 'C' = not pressed, ",
    "'D' = not pressed, enter '1', then '1', ",
    "then '0', and finally '0'\r\n\r\n",
)
.as_bytes();

pub const NEW_CODE_PROMPT: &[u8] = concat!(
    "Please enter new code sequence\r\n",
    "First enter 'A', then 'B', then 'C', and ",
    "finally 'D' button\r\n",
    "In each case type 1 for pressed or 0 for not ",
    "pressed\r\n",
    "For example, for 'A' = pressed, 'B' = pressed,",
    " 'C' = not pressed,",
    "'D' = not pressed, enter '1', then '1', ",
    "then '0', and finally '0'\r\n\r\n",
)
.as_bytes();

/// Echoed for every dialog byte.
pub const MASK: &[u8] = b"*";

pub const CODE_CORRECT: &[u8] = b"\r\nThe code is correct\r\n\r\n";
pub const CODE_INCORRECT: &[u8] = b"\r\nThe code is incorrect\r\n\r\n";
pub const NEW_CODE_GENERATED: &[u8] = b"\r\nNew code generated\r\n\r\n";

pub const HELP: &[u8] = concat!(
    "Available commands:\r\n",
    "Press '1' to get the alarm state\r\n",
    "Press '2' to get the gas detector state\r\n",
    "Press '3' to get the over temperature detector state\r\n",
    "Press '4' to enter the code sequence\r\n",
    "Press '5' to enter a new code\r\n",
    "Press 'P' or 'p' to get potentiometer reading\r\n",
    "Press 'f' or 'F' to get lm35 reading in Fahrenheit\r\n",
    "Press 'c' or 'C' to get lm35 reading in Celsius\r\n\r\n",
)
.as_bytes();

/// Longest formatted line: prefix, sign, 39 integer digits of `f32::MAX`,
/// two decimals and the unit suffix.
pub const LINE_CAPACITY: usize = 96;

pub type Line = Vec<u8, LINE_CAPACITY>;

/// `"Potentiometer: X.XX\r\n"`.
pub fn potentiometer(fraction: f32) -> Option<Line> {
    reading_line(b"Potentiometer: ", fraction, b"\r\n")
}

/// `"Temperature: X.XX \xB0 C\r\n"`.
pub fn celsius(value: f32) -> Option<Line> {
    reading_line(b"Temperature: ", value, b" \xB0 C\r\n")
}

/// `"Temperature: X.XX \xB0 F\r\n"`.
pub fn fahrenheit(value: f32) -> Option<Line> {
    reading_line(b"Temperature: ", value, b" \xB0 F\r\n")
}

fn reading_line(prefix: &[u8], value: f32, suffix: &[u8]) -> Option<Line> {
    let mut number: String<48> = String::new();
    write!(number, "{value:.2}").ok()?;

    let mut line = Line::new();
    line.extend_from_slice(prefix).ok()?;
    line.extend_from_slice(number.as_bytes()).ok()?;
    line.extend_from_slice(suffix).ok()?;
    Some(line)
}

//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (sensors, actuators, event sinks) implement these
//! traits.  The [`AppService`](super::service::AppService) consumes them via
//! generics, so the domain core never touches hardware directly.  The
//! serial byte stream has its own port in
//! [`console::transport`](crate::console::transport).

use crate::error::SensorError;
use crate::fsm::context::SirenDrive;
use crate::sensors::InputSnapshot;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain sensor data.
pub trait SensorPort {
    /// Sample every digital input and the LM35 once.
    fn read_inputs(&mut self) -> InputSnapshot;

    /// Potentiometer position as a fraction of full scale (0.0 – 1.0).
    fn read_potentiometer(&mut self) -> f32;
}

/// One analog channel returning a normalised reading in `[0.0, 1.0]`.
///
/// Implemented for any `FnMut() -> Result<f32, SensorError>`, so a board
/// can wire an ADC read in as a closure.
pub trait AnalogInput {
    fn read(&mut self) -> Result<f32, SensorError>;
}

impl<F> AnalogInput for F
where
    F: FnMut() -> Result<f32, SensorError>,
{
    fn read(&mut self) -> Result<f32, SensorError> {
        self()
    }
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Front-panel LEDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    /// Blinks while the alarm is active.
    Alarm,
    /// Keypad lockout.
    SystemBlocked,
    /// Last code attempt was wrong.
    IncorrectCode,
}

/// Write-side port: the domain calls this to command actuators.
pub trait ActuatorPort {
    /// Drive or release the siren line.
    fn set_siren(&mut self, drive: SirenDrive);

    /// Switch one indicator LED.
    fn set_indicator(&mut self, indicator: Indicator, on: bool);

    /// Siren released, every indicator off.
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

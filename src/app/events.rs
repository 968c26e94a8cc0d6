//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them; the firmware logs them.

use crate::fsm::StateId;

/// Where a code attempt came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeSource {
    Keypad,
    Serial,
}

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The application service has started (carries initial state).
    Started(StateId),

    /// The alarm state machine moved.
    StateChanged { from: StateId, to: StateId },

    /// Detector bits latched for the first time since the last disarm.
    DetectorLatched(u8),

    /// A correct code silenced an active alarm.
    Disarmed(CodeSource),

    /// A wrong code was entered.
    CodeRejected {
        source: CodeSource,
        failed_attempts: u32,
    },

    /// The keypad lockout engaged.
    SystemBlocked { failed_attempts: u32 },

    /// The secret was rewritten from the console.
    CodeChanged { positions_changed: usize },

    /// Periodic status snapshot.
    Status(StatusSnapshot),
}

/// A point-in-time view of the controller, suitable for logging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusSnapshot {
    pub state: StateId,
    /// Latched detector bitmask.
    pub detectors: u8,
    /// Instantaneous gas reading (not latched).
    pub gas_now: bool,
    pub temperature_c: f32,
    pub over_temp_now: bool,
    pub failed_attempts: u32,
    pub blocked: bool,
    pub incorrect_code: bool,
}

//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (the ESP-IDF logger on the device, which goes to the
//! USB serial console).

use log::{error, info, warn};

use crate::app::events::{AppEvent, CodeSource};
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

fn source_tag(source: CodeSource) -> &'static str {
    match source {
        CodeSource::Keypad => "keypad",
        CodeSource::Serial => "serial",
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::DetectorLatched(flags) => {
                warn!("ALARM | detectors latched, flags=0b{:02b}", flags);
            }
            AppEvent::Disarmed(source) => {
                info!("ALARM | disarmed via {}", source_tag(*source));
            }
            AppEvent::CodeRejected {
                source,
                failed_attempts,
            } => {
                warn!(
                    "CODE  | rejected via {}, consecutive failures={}",
                    source_tag(*source),
                    failed_attempts
                );
            }
            AppEvent::SystemBlocked { failed_attempts } => {
                error!("CODE  | keypad blocked after {} failures", failed_attempts);
            }
            AppEvent::CodeChanged { positions_changed } => {
                info!("CODE  | replaced, {} position(s) changed", positions_changed);
            }
            AppEvent::Status(s) => {
                info!(
                    "STATUS | state={:?} | detectors=0b{:02b} | gas={} | \
                     T={:.2}\u{00b0}C{} | failures={} | blocked={} | incorrect={}",
                    s.state,
                    s.detectors,
                    if s.gas_now { "DETECTED" } else { "clear" },
                    s.temperature_c,
                    if s.over_temp_now { " (OVER)" } else { "" },
                    s.failed_attempts,
                    s.blocked,
                    s.incorrect_code,
                );
            }
        }
    }
}

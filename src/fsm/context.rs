//! Shared mutable context threaded through every FSM handler.
//!
//! `AlarmContext` is the single struct that state handlers read from and
//! write to: the latched detectors, the blink accumulator, the output
//! commands and the configuration.

use crate::config::SystemConfig;
use crate::detectors::DetectorLatch;

// ---------------------------------------------------------------------------
// Output commands (written by state handlers; applied by the service)
// ---------------------------------------------------------------------------

/// Siren output drive.
///
/// The siren sits on an open-drain line: it sounds while the line is pulled
/// low and is silent while the line floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SirenDrive {
    /// Line driven low.
    Sounding,
    /// Line high-impedance.
    #[default]
    Released,
}

/// Commands that state handlers write to request output actions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputCommands {
    /// Alarm LED level (blinks while alarming).
    pub alarm_led: bool,
    pub siren: SirenDrive,
}

impl OutputCommands {
    /// Alarm LED off, siren released.
    pub fn all_off() -> Self {
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// AlarmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct AlarmContext {
    /// Duration of one tick in milliseconds.
    pub tick_period_ms: u32,

    // -- Detectors --
    /// Sticky detector flags, latched before each FSM tick.
    pub detectors: DetectorLatch,

    // -- Blink timing --
    /// Milliseconds accumulated toward the next alarm LED toggle.
    pub blink_elapsed_ms: u32,

    // -- Outputs --
    pub commands: OutputCommands,

    // -- Configuration --
    pub config: SystemConfig,
}

impl AlarmContext {
    /// Create a new context with the given configuration.
    pub fn new(config: SystemConfig) -> Self {
        Self {
            tick_period_ms: config.tick_period_ms,
            detectors: DetectorLatch::new(),
            blink_elapsed_ms: 0,
            commands: OutputCommands::all_off(),
            config,
        }
    }

    /// Blink interval selected by the latched detectors, highest priority
    /// first: both, gas only, over-temperature only.
    pub fn blink_interval_ms(&self) -> Option<u32> {
        let gas = self.detectors.gas_detected();
        let over_temp = self.detectors.over_temp_detected();
        match (gas, over_temp) {
            (true, true) => Some(self.config.blink_gas_and_over_temp_ms),
            (true, false) => Some(self.config.blink_gas_ms),
            (false, true) => Some(self.config.blink_over_temp_ms),
            (false, false) => None,
        }
    }
}

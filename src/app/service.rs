//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the alarm arbiter, the code vault and the
//! temperature monitor.  It exposes a clean, hardware-agnostic API.  All
//! I/O flows through port traits injected at call sites, making the
//! entire service testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                 │        AppService        │
//! ActuatorPort ◀──│ Arbiter · Vault · LM35   │
//!                 └──────────────────────────┘
//! ```

use log::info;

use crate::arbiter::AlarmArbiter;
use crate::config::SystemConfig;
use crate::detectors::Triggers;
use crate::fsm::StateId;
use crate::sensors::InputSnapshot;
use crate::sensors::temperature::{TemperatureMonitor, TemperatureReading};
use crate::vault::{CodeVault, KeypadOutcome};

use super::commands::{AppCommand, CommandOutcome};
use super::events::{AppEvent, CodeSource, StatusSnapshot};
use super::ports::{ActuatorPort, EventSink, Indicator, SensorPort};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    arbiter: AlarmArbiter,
    vault: CodeVault,
    temperature: TemperatureMonitor,
    /// Inputs sampled on the most recent tick.
    inputs: InputSnapshot,
    reading: TemperatureReading,
    tick_count: u64,
}

impl AppService {
    /// Construct the service from configuration.  The arbiter starts in
    /// `Idle`; call [`start`](Self::start) before the first tick.
    pub fn new(config: SystemConfig) -> Self {
        let vault = CodeVault::new(&config);
        let temperature = TemperatureMonitor::new(&config);
        Self {
            arbiter: AlarmArbiter::new(config),
            vault,
            temperature,
            inputs: InputSnapshot::default(),
            reading: TemperatureReading::default(),
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Put every output in its idle level and announce start-up.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        hw.all_off();
        self.apply_outputs(hw);
        sink.emit(&AppEvent::Started(self.arbiter.state()));
        info!("AppService started in {:?}", self.arbiter.state());
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control cycle: sample → filter → arbitrate → keypad → outputs.
    ///
    /// `hw` is one value implementing both [`SensorPort`] and
    /// [`ActuatorPort`], so a single mutable borrow covers the whole cycle.
    pub fn tick(&mut self, hw: &mut (impl SensorPort + ActuatorPort), sink: &mut impl EventSink) {
        self.tick_count += 1;

        // 1. Sample inputs
        self.inputs = hw.read_inputs();

        // 2. Smooth and convert the LM35 reading
        self.reading = self.temperature.update(self.inputs.lm35_raw);

        // 3. Arbitrate
        let triggers = Triggers {
            gas: self.inputs.gas.is_detected(),
            over_temp: self.reading.over_temp,
            test: self.inputs.test_button,
        };
        let eval = self.arbiter.evaluate(triggers);
        if eval.newly_latched != 0 {
            sink.emit(&AppEvent::DetectorLatched(eval.newly_latched));
        }
        if eval.changed_state() {
            sink.emit(&AppEvent::StateChanged {
                from: eval.from,
                to: eval.to,
            });
        }

        // 4. Keypad deactivation
        let was_blocked = self.vault.is_blocked();
        match self
            .vault
            .evaluate_keypad(&self.inputs.keypad, self.arbiter.is_alarming())
        {
            KeypadOutcome::Accepted => self.disarm(CodeSource::Keypad, sink),
            KeypadOutcome::Rejected {
                failed_attempts, ..
            } => sink.emit(&AppEvent::CodeRejected {
                source: CodeSource::Keypad,
                failed_attempts,
            }),
            KeypadOutcome::NoAttempt | KeypadOutcome::IndicatorCleared | KeypadOutcome::Locked => {}
        }
        if !was_blocked && self.vault.is_blocked() {
            sink.emit(&AppEvent::SystemBlocked {
                failed_attempts: self.vault.failed_attempts(),
            });
        }

        // 5. Drive outputs
        self.apply_outputs(hw);
    }

    // ── Command handling ──────────────────────────────────────

    /// Process a command from the serial console.
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) -> CommandOutcome {
        let outcome = match cmd {
            AppCommand::VerifyCode(entries) => {
                if self.vault.verify_serial(&entries) {
                    self.disarm(CodeSource::Serial, sink);
                    CommandOutcome::CodeAccepted
                } else {
                    sink.emit(&AppEvent::CodeRejected {
                        source: CodeSource::Serial,
                        failed_attempts: self.vault.failed_attempts(),
                    });
                    CommandOutcome::CodeRejected
                }
            }
            AppCommand::ReplaceCode(entries) => {
                let positions_changed = self.vault.apply_entries(&entries);
                sink.emit(&AppEvent::CodeChanged { positions_changed });
                CommandOutcome::CodeReplaced
            }
        };
        self.apply_outputs(hw);
        outcome
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current arbiter state.
    pub fn state(&self) -> StateId {
        self.arbiter.state()
    }

    pub fn is_alarming(&self) -> bool {
        self.arbiter.is_alarming()
    }

    /// Gas line as sampled on the last tick, independent of the latch.
    pub fn gas_detected_now(&self) -> bool {
        self.inputs.gas.is_detected()
    }

    /// Over-temperature on the last tick's smoothed reading.
    pub fn over_temp_now(&self) -> bool {
        self.reading.over_temp
    }

    /// Latest smoothed temperature.
    pub fn temperature(&self) -> TemperatureReading {
        self.reading
    }

    pub fn vault(&self) -> &CodeVault {
        &self.vault
    }

    pub fn arbiter(&self) -> &AlarmArbiter {
        &self.arbiter
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Build a status snapshot from the current state.
    pub fn status(&self) -> StatusSnapshot {
        StatusSnapshot {
            state: self.arbiter.state(),
            detectors: self.arbiter.detectors().flags(),
            gas_now: self.gas_detected_now(),
            temperature_c: self.reading.celsius,
            over_temp_now: self.reading.over_temp,
            failed_attempts: self.vault.failed_attempts(),
            blocked: self.vault.is_blocked(),
            incorrect_code: self.vault.incorrect_code(),
        }
    }

    // ── Internal ──────────────────────────────────────────────

    fn disarm(&mut self, source: CodeSource, sink: &mut impl EventSink) {
        let from = self.arbiter.state();
        if self.arbiter.disarm() {
            sink.emit(&AppEvent::StateChanged {
                from,
                to: self.arbiter.state(),
            });
            sink.emit(&AppEvent::Disarmed(source));
        }
    }

    /// Translate arbiter commands and vault indicators into port calls.
    fn apply_outputs(&self, hw: &mut impl ActuatorPort) {
        let cmds = self.arbiter.commands();
        hw.set_siren(cmds.siren);
        hw.set_indicator(Indicator::Alarm, cmds.alarm_led);
        hw.set_indicator(Indicator::SystemBlocked, self.vault.is_blocked());
        hw.set_indicator(Indicator::IncorrectCode, self.vault.incorrect_code());
    }
}

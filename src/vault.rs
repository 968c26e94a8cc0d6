//! Code vault: the secret 4-bit sequence, attempt verification and lockout.
//!
//! Two paths feed attempts into the vault:
//!
//! - **Keypad** ([`CodeVault::evaluate_keypad`]), once per tick. Subject to
//!   the lockout: once `max_failed_attempts` consecutive failures have been
//!   counted the keypad stops evaluating and the blocked indicator lights.
//! - **Serial** ([`CodeVault::verify_serial`]). Never checks the lockout and
//!   keeps counting failures past the threshold. The counter is shared, so
//!   serial failures reaching the threshold light the blocked indicator on
//!   the next keypad evaluation. A correct serial code resets the counter,
//!   which re-enables the keypad path.
//!
//! The blocked indicator is never cleared once lit.

use log::{error, info, warn};

use crate::config::{CODE_LENGTH, SystemConfig};
use crate::sensors::KeypadState;

/// Ordered binary digits, `true` = pressed / `'1'`.
pub type CodeSequence = [bool; CODE_LENGTH];

/// One digit typed over the serial console. `None` marks a byte that was
/// neither `'1'` nor `'0'`.
pub type CodeEntries = [Option<bool>; CODE_LENGTH];

/// Result of one keypad evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadOutcome {
    /// Nothing to evaluate this tick.
    NoAttempt,
    /// A–D held with Enter released: incorrect-code indicator cleared.
    IndicatorCleared,
    /// Correct code entered while alarming. The caller disarms.
    Accepted,
    /// Wrong code. `locked_out` is set when this failure reached the limit.
    Rejected { failed_attempts: u32, locked_out: bool },
    /// Lockout active, keypad ignored.
    Locked,
}

pub struct CodeVault {
    secret: CodeSequence,
    failed_attempts: u32,
    max_failed_attempts: u32,
    blocked: bool,
    incorrect_code: bool,
}

impl CodeVault {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            secret: config.default_code,
            failed_attempts: 0,
            max_failed_attempts: config.max_failed_attempts,
            blocked: false,
            incorrect_code: false,
        }
    }

    /// Element-wise comparison with the secret. No side effects.
    pub fn verify(&self, attempt: &CodeSequence) -> bool {
        self.secret == *attempt
    }

    /// Like [`verify`](Self::verify), but any invalid entry is a mismatch.
    pub fn verify_entries(&self, entries: &CodeEntries) -> bool {
        entries
            .iter()
            .zip(self.secret.iter())
            .all(|(entry, bit)| *entry == Some(*bit))
    }

    // ── Keypad path ───────────────────────────────────────────

    /// Run the keypad deactivation rules for one tick.
    ///
    /// `alarm_active` gates evaluation: Enter does nothing while idle.
    pub fn evaluate_keypad(&mut self, keypad: &KeypadState, alarm_active: bool) -> KeypadOutcome {
        if self.failed_attempts >= self.max_failed_attempts {
            if !self.blocked {
                self.block();
            }
            return KeypadOutcome::Locked;
        }

        if keypad.is_reset_gesture() {
            if self.incorrect_code {
                info!("Incorrect-code indicator cleared from keypad");
            }
            self.incorrect_code = false;
            return KeypadOutcome::IndicatorCleared;
        }

        let attempt = keypad.enter && !self.incorrect_code && alarm_active;
        if !attempt {
            return KeypadOutcome::NoAttempt;
        }

        if self.verify(&keypad.code_switches()) {
            self.failed_attempts = 0;
            info!("Keypad code accepted");
            return KeypadOutcome::Accepted;
        }

        self.incorrect_code = true;
        self.failed_attempts = self.failed_attempts.saturating_add(1);
        warn!(
            "Keypad code rejected ({}/{})",
            self.failed_attempts, self.max_failed_attempts
        );
        let locked_out = self.failed_attempts >= self.max_failed_attempts;
        if locked_out {
            self.block();
        }
        KeypadOutcome::Rejected {
            failed_attempts: self.failed_attempts,
            locked_out,
        }
    }

    // ── Serial path ───────────────────────────────────────────

    /// Record a code typed over the serial console. Returns `true` when
    /// it matched; the caller disarms.
    pub fn verify_serial(&mut self, entries: &CodeEntries) -> bool {
        if self.verify_entries(entries) {
            self.failed_attempts = 0;
            self.incorrect_code = false;
            info!("Serial code accepted");
            true
        } else {
            self.incorrect_code = true;
            self.failed_attempts = self.failed_attempts.saturating_add(1);
            warn!("Serial code rejected ({} consecutive)", self.failed_attempts);
            false
        }
    }

    // ── Code management ───────────────────────────────────────

    /// Overwrite the whole secret.
    pub fn set_code(&mut self, code: CodeSequence) {
        self.secret = code;
        info!("Secret code replaced");
    }

    /// Overwrite only the positions holding a valid digit.
    /// Returns how many positions changed value.
    pub fn apply_entries(&mut self, entries: &CodeEntries) -> usize {
        let mut changed = 0;
        for (slot, entry) in self.secret.iter_mut().zip(entries.iter()) {
            if let Some(bit) = *entry {
                if *slot != bit {
                    changed += 1;
                }
                *slot = bit;
            }
        }
        info!("Secret code updated ({changed} position(s) changed)");
        changed
    }

    // ── Accessors ─────────────────────────────────────────────

    pub fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// Level of the incorrect-code indicator.
    pub fn incorrect_code(&self) -> bool {
        self.incorrect_code
    }

    /// Current secret.
    pub fn secret(&self) -> CodeSequence {
        self.secret
    }

    fn block(&mut self) {
        self.blocked = true;
        error!(
            "System blocked after {} failed code attempts",
            self.failed_attempts
        );
    }
}

//! Code dialogs: collect four digits without blocking the control loop.
//!
//! ```text
//!  Awaiting(0) ──byte──▶ Awaiting(1) ──byte──▶ … Awaiting(3) ──byte──▶ done
//! ```
//!
//! Every byte fills one position whatever its value. `'1'` and `'0'` are
//! digits; anything else is recorded as `None`.

use crate::app::commands::AppCommand;
use crate::config::CODE_LENGTH;
use crate::vault::CodeEntries;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    /// `'4'`: check a code against the secret.
    VerifyCode,
    /// `'5'`: overwrite the secret.
    SetNewCode,
}

/// Map a typed byte onto a code digit.
pub fn digit_from_byte(byte: u8) -> Option<bool> {
    match byte {
        b'1' => Some(true),
        b'0' => Some(false),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialog {
    kind: DialogKind,
    entries: CodeEntries,
    next: usize,
}

impl Dialog {
    pub fn new(kind: DialogKind) -> Self {
        Self {
            kind,
            entries: [None; CODE_LENGTH],
            next: 0,
        }
    }

    pub fn kind(&self) -> DialogKind {
        self.kind
    }

    /// Index of the position the next byte will fill.
    pub fn position(&self) -> usize {
        self.next
    }

    /// Record one byte. Returns the finished command once the last
    /// position has been filled.
    pub fn feed(&mut self, byte: u8) -> Option<AppCommand> {
        if let Some(slot) = self.entries.get_mut(self.next) {
            *slot = digit_from_byte(byte);
            self.next += 1;
        }
        if self.next < CODE_LENGTH {
            return None;
        }
        Some(match self.kind {
            DialogKind::VerifyCode => AppCommand::VerifyCode(self.entries),
            DialogKind::SetNewCode => AppCommand::ReplaceCode(self.entries),
        })
    }
}

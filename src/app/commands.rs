//! Inbound commands to the application service.
//!
//! The serial console turns a finished dialog into one of these and hands
//! it to [`AppService::handle_command`](super::service::AppService::handle_command).

use crate::vault::CodeEntries;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Check a typed code; disarm on match.
    VerifyCode(CodeEntries),

    /// Overwrite the secret position by position. `None` positions keep
    /// their current digit.
    ReplaceCode(CodeEntries),
}

/// What a command did, so the caller can pick its reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    CodeAccepted,
    CodeRejected,
    CodeReplaced,
}

//! Concrete state handler functions and table builder.
//!
//! Each state is defined by plain `fn` pointers, with no closures or
//! dynamic dispatch.
//!
//! ```text
//!  IDLE ──[any detector latched]──▶ ALARMING
//!    ▲                                  │
//!    └─────────[disarm (forced)]────────┘
//! ```
//!
//! ALARMING never leaves on its own: only a correct code, entered on the
//! keypad or over the serial console, forces the transition back.

use super::context::{AlarmContext, SirenDrive};
use super::{StateDescriptor, StateId};
use log::info;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0 — Idle
        StateDescriptor {
            id: StateId::Idle,
            name: "Idle",
            on_enter: Some(idle_enter),
            on_exit: None,
            on_update: idle_update,
        },
        // Index 1 — Alarming
        StateDescriptor {
            id: StateId::Alarming,
            name: "Alarming",
            on_enter: Some(alarming_enter),
            on_exit: Some(alarming_exit),
            on_update: alarming_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE state
// ═══════════════════════════════════════════════════════════════════════════

fn idle_enter(ctx: &mut AlarmContext) {
    ctx.commands.alarm_led = false;
    ctx.commands.siren = SirenDrive::Released;
    info!("IDLE: monitoring gas and temperature");
}

fn idle_update(ctx: &mut AlarmContext) -> Option<StateId> {
    if ctx.detectors.any() {
        return Some(StateId::Alarming);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  ALARMING state
// ═══════════════════════════════════════════════════════════════════════════

fn alarming_enter(ctx: &mut AlarmContext) {
    ctx.blink_elapsed_ms = 0;
    ctx.commands.siren = SirenDrive::Sounding;
    info!(
        "ALARMING: detectors=0b{:02b}, siren on",
        ctx.detectors.flags()
    );
}

fn alarming_update(ctx: &mut AlarmContext) -> Option<StateId> {
    ctx.blink_elapsed_ms = ctx.blink_elapsed_ms.saturating_add(ctx.tick_period_ms);
    ctx.commands.siren = SirenDrive::Sounding;

    if let Some(interval) = ctx.blink_interval_ms() {
        if ctx.blink_elapsed_ms >= interval {
            ctx.blink_elapsed_ms = 0;
            ctx.commands.alarm_led = !ctx.commands.alarm_led;
        }
    }

    None
}

fn alarming_exit(ctx: &mut AlarmContext) {
    ctx.detectors.clear();
    ctx.commands.alarm_led = false;
    ctx.commands.siren = SirenDrive::Released;
    info!("ALARMING: disarmed, siren released");
}

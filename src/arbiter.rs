//! Alarm arbiter.
//!
//! Wraps the [`Fsm`] engine and its [`AlarmContext`]. Each tick the
//! triggers are latched into the sticky detector mask and the FSM is
//! advanced; the resulting [`OutputCommands`] say what the siren and the
//! alarm LED should be doing. Disarm is the only way out of `Alarming`.

use crate::config::SystemConfig;
use crate::detectors::{DetectorLatch, Triggers};
use crate::fsm::context::{AlarmContext, OutputCommands};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};

/// What a call to [`AlarmArbiter::evaluate`] changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub from: StateId,
    pub to: StateId,
    /// Detector bits latched for the first time this tick.
    pub newly_latched: u8,
}

impl Evaluation {
    pub fn changed_state(&self) -> bool {
        self.from != self.to
    }
}

pub struct AlarmArbiter {
    fsm: Fsm,
    ctx: AlarmContext,
}

impl AlarmArbiter {
    /// Build the arbiter and run the initial `Idle` entry action.
    pub fn new(config: SystemConfig) -> Self {
        let mut ctx = AlarmContext::new(config);
        let mut fsm = Fsm::new(build_state_table(), StateId::Idle);
        fsm.start(&mut ctx);
        Self { fsm, ctx }
    }

    /// Latch this tick's triggers and advance the state machine.
    pub fn evaluate(&mut self, triggers: Triggers) -> Evaluation {
        let from = self.fsm.current_state();
        let newly_latched = self.ctx.detectors.latch(triggers);
        self.fsm.tick(&mut self.ctx);
        Evaluation {
            from,
            to: self.fsm.current_state(),
            newly_latched,
        }
    }

    /// Leave `Alarming`: clears the detectors, silences the siren and
    /// turns the alarm LED off. Returns `false` if already idle.
    pub fn disarm(&mut self) -> bool {
        if self.fsm.current_state() == StateId::Idle {
            return false;
        }
        self.fsm.force_transition(StateId::Idle, &mut self.ctx);
        true
    }

    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    pub fn is_alarming(&self) -> bool {
        self.fsm.current_state() == StateId::Alarming
    }

    pub fn detectors(&self) -> DetectorLatch {
        self.ctx.detectors
    }

    pub fn commands(&self) -> OutputCommands {
        self.ctx.commands
    }
}

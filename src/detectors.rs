//! Sticky detector latch.
//!
//! The latch runs **every tick before the arbiter FSM** and accumulates a
//! detector bitmask in `AlarmContext.detectors`. The FSM state handlers
//! read this mask to decide whether to raise the alarm and how fast to
//! blink.
//!
//! ## Latch lifecycle
//!
//! 1. A trigger is seen (gas line asserted, over-temperature, test button).
//! 2. The latch sets the corresponding bit; the test button sets both.
//! 3. The bit stays set while the condition clears and comes back.
//! 4. Only a disarm clears the mask (`alarming_exit` calls [`DetectorLatch::clear`]).

use core::fmt;

use log::warn;

/// One detector channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Detector {
    /// MQ-2 gas detector asserted.
    Gas = 0b0000_0001,
    /// Smoothed LM35 temperature above the limit.
    OverTemp = 0b0000_0010,
}

impl Detector {
    /// Return the bitmask for this detector.
    pub const fn mask(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Detector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gas => write!(f, "gas"),
            Self::OverTemp => write!(f, "over temperature"),
        }
    }
}

/// Raw trigger conditions for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Triggers {
    pub gas: bool,
    pub over_temp: bool,
    pub test: bool,
}

impl Triggers {
    pub fn any(&self) -> bool {
        self.gas || self.over_temp || self.test
    }
}

/// Latched detector bitmask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetectorLatch {
    flags: u8,
}

impl DetectorLatch {
    pub const fn new() -> Self {
        Self { flags: 0 }
    }

    /// Latch every active trigger. Returns the bits that were newly set.
    pub fn latch(&mut self, triggers: Triggers) -> u8 {
        let before = self.flags;
        if triggers.gas || triggers.test {
            self.set(Detector::Gas);
        }
        if triggers.over_temp || triggers.test {
            self.set(Detector::OverTemp);
        }
        self.flags & !before
    }

    /// Drop every latched bit.
    pub fn clear(&mut self) {
        self.flags = 0;
    }

    /// Current bitmask.
    pub fn flags(&self) -> u8 {
        self.flags
    }

    /// True if **any** detector is latched.
    pub fn any(&self) -> bool {
        self.flags != 0
    }

    /// Check if a specific detector is latched.
    pub fn has(&self, detector: Detector) -> bool {
        self.flags & detector.mask() != 0
    }

    pub fn gas_detected(&self) -> bool {
        self.has(Detector::Gas)
    }

    pub fn over_temp_detected(&self) -> bool {
        self.has(Detector::OverTemp)
    }

    // ── Internal ──────────────────────────────────────────────────

    fn set(&mut self, detector: Detector) {
        if self.flags & detector.mask() == 0 {
            warn!("DETECTOR LATCHED: {detector}");
        }
        self.flags |= detector.mask();
    }
}

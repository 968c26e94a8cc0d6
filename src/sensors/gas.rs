//! MQ-2 gas detector.
//!
//! The detector module pulls its digital output LOW while gas is present.
//! The raw level is translated into [`GasState`] right at the edge so the
//! rest of the firmware never deals with the inverted sense.

/// Named state of the active-low gas line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GasState {
    /// Line pulled low: gas present.
    Detected,
    /// Line high: no gas.
    #[default]
    Clear,
}

impl GasState {
    /// Interpret the electrical level of the detector output.
    pub fn from_line_level(high: bool) -> Self {
        if high { Self::Clear } else { Self::Detected }
    }

    pub fn is_detected(self) -> bool {
        self == Self::Detected
    }
}

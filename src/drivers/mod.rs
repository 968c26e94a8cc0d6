//! Pin-level drivers built on the `embedded-hal` 1.0 digital traits.

pub mod indicators;
pub mod input;
pub mod keypad;
pub mod siren;

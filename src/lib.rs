//! HomeSentry firmware library.
//!
//! Gas and over-temperature alarm controller: a rolling-average LM35
//! filter, a two-state alarm arbiter, a code vault with keypad lockout,
//! and a serial command console. Everything here runs on the host; the
//! ESP-IDF pieces are behind the `espidf` feature.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod arbiter;
pub mod config;
pub mod console;
pub mod detectors;
pub mod drivers;
pub mod error;
pub mod fsm;
pub mod sensors;
pub mod vault;

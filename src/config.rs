//! System configuration parameters
//!
//! All tunable parameters for the HomeSentry controller.
//! Values are compiled in; the secret code itself is never persisted.

use serde::{Deserialize, Serialize};

/// Number of positions in a disarm code.
pub const CODE_LENGTH: usize = 4;

/// Window length of the LM35 rolling average (samples).
pub const TEMPERATURE_AVG_SAMPLES: usize = 100;

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Timing ---
    /// Control loop period (milliseconds)
    pub tick_period_ms: u32,

    // --- Temperature ---
    /// Temperature (Celsius) above which the over-temperature detector trips
    pub over_temp_threshold_c: f32,
    /// ADC full-scale reference voltage
    pub adc_reference_volts: f32,
    /// LM35 transfer function (volts per degree Celsius)
    pub lm35_volts_per_degree: f32,

    // --- Alarm indicator blink intervals ---
    /// Blink interval with only the gas detector latched (milliseconds)
    pub blink_gas_ms: u32,
    /// Blink interval with only the over-temperature detector latched (milliseconds)
    pub blink_over_temp_ms: u32,
    /// Blink interval with both detectors latched (milliseconds)
    pub blink_gas_and_over_temp_ms: u32,

    // --- Access ---
    /// Consecutive keypad failures before the keypad is locked out
    pub max_failed_attempts: u32,
    /// Code loaded at power-on
    pub default_code: [bool; CODE_LENGTH],

    // --- Serial console ---
    /// UART baud rate
    pub uart_baud: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Timing
            tick_period_ms: 10, // 100 Hz

            // Temperature
            over_temp_threshold_c: 50.0,
            adc_reference_volts: 3.3,
            lm35_volts_per_degree: 0.01, // 10 mV/°C

            // Blink intervals
            blink_gas_ms: 1000,
            blink_over_temp_ms: 500,
            blink_gas_and_over_temp_ms: 100,

            // Access
            max_failed_attempts: 5,
            default_code: [true, true, false, false],

            // Serial
            uart_baud: 115_200,
        }
    }
}

impl SystemConfig {
    /// Reject values that would stall the blink timer, disable the lockout
    /// or break the temperature conversion.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_period_ms == 0 {
            return Err(ConfigError::ValidationFailed("tick_period_ms must be > 0"));
        }
        if self.blink_gas_ms == 0 || self.blink_over_temp_ms == 0 || self.blink_gas_and_over_temp_ms == 0 {
            return Err(ConfigError::ValidationFailed("blink intervals must be > 0"));
        }
        if self.max_failed_attempts == 0 {
            return Err(ConfigError::ValidationFailed("max_failed_attempts must be > 0"));
        }
        if self.adc_reference_volts.is_nan() || self.adc_reference_volts <= 0.0 {
            return Err(ConfigError::ValidationFailed("adc_reference_volts must be > 0"));
        }
        if self.lm35_volts_per_degree.is_nan() || self.lm35_volts_per_degree <= 0.0 {
            return Err(ConfigError::ValidationFailed("lm35_volts_per_degree must be > 0"));
        }
        if !self.over_temp_threshold_c.is_finite() {
            return Err(ConfigError::ValidationFailed("over_temp_threshold_c must be finite"));
        }
        if self.uart_baud == 0 {
            return Err(ConfigError::ValidationFailed("uart_baud must be > 0"));
        }
        Ok(())
    }
}

/// Errors from [`SystemConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

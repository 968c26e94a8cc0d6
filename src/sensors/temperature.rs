//! LM35 temperature sensing.
//!
//! The LM35 outputs 10 mV/°C. The ADC reports its input as a fraction of
//! the 3.3 V reference, so a normalised reading maps to Celsius as
//! `raw * 3.3 / 0.01`. Readings are smoothed by a
//! [`RollingAverage`](super::rolling::RollingAverage) before conversion,
//! and the over-temperature decision is taken on the smoothed value.

use super::rolling::RollingAverage;
use crate::config::{SystemConfig, TEMPERATURE_AVG_SAMPLES};

/// Convert a normalised ADC reading (0.0 – 1.0 of full scale) to Celsius.
pub fn raw_to_celsius(raw: f32, adc_reference_volts: f32, volts_per_degree: f32) -> f32 {
    raw * adc_reference_volts / volts_per_degree
}

pub fn celsius_to_fahrenheit(celsius: f32) -> f32 {
    celsius * 9.0 / 5.0 + 32.0
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TemperatureReading {
    /// Smoothed normalised ADC value.
    pub average: f32,
    pub celsius: f32,
    pub over_temp: bool,
}

impl TemperatureReading {
    pub fn fahrenheit(&self) -> f32 {
        celsius_to_fahrenheit(self.celsius)
    }
}

/// Rolling-average filter, LM35 conversion and threshold in one place.
pub struct TemperatureMonitor {
    window: RollingAverage<TEMPERATURE_AVG_SAMPLES>,
    threshold_c: f32,
    adc_reference_volts: f32,
    volts_per_degree: f32,
    last: TemperatureReading,
}

impl TemperatureMonitor {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            window: RollingAverage::new(),
            threshold_c: config.over_temp_threshold_c,
            adc_reference_volts: config.adc_reference_volts,
            volts_per_degree: config.lm35_volts_per_degree,
            last: TemperatureReading::default(),
        }
    }

    /// Feed one raw sample and return the updated reading.
    pub fn update(&mut self, raw: f32) -> TemperatureReading {
        self.window.push(raw);
        let average = self.window.average();
        let celsius = raw_to_celsius(average, self.adc_reference_volts, self.volts_per_degree);
        self.last = TemperatureReading {
            average,
            celsius,
            over_temp: self.is_over_threshold(celsius),
        };
        self.last
    }

    /// Strictly above the threshold counts as over-temperature.
    pub fn is_over_threshold(&self, celsius: f32) -> bool {
        celsius > self.threshold_c
    }

    /// The reading produced by the most recent [`update`](Self::update).
    pub fn last(&self) -> TemperatureReading {
        self.last
    }

    pub fn is_warm(&self) -> bool {
        self.window.is_warm()
    }
}

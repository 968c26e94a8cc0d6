//! HomeSentry Firmware — Main Entry Point
//!
//! Hexagonal architecture with a fixed 10 ms control tick.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter        LogEventSink        UartTransport      │
//! │  (Sensor+Actuator)      (EventSink)         (Transport)        │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  Arbiter · Vault · LM35 filter                         │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Console (serial command dialogs)                              │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Pin map (ESP32-S3)
//!
//! | GPIO | Function                    |
//! |------|-----------------------------|
//! | 4    | LM35 (ADC1 CH3)             |
//! | 5    | potentiometer (ADC1 CH4)    |
//! | 6    | MQ-2 digital out (low=gas)  |
//! | 7    | alarm test button           |
//! | 8–11 | keypad A, B, C, D           |
//! | 12   | keypad Enter                |
//! | 13   | siren (open drain)          |
//! | 14   | alarm LED                   |
//! | 15   | system blocked LED          |
//! | 16   | incorrect code LED          |
//! | 17   | console UART1 TX            |
//! | 18   | console UART1 RX            |
#![deny(unused_must_use)]

use anyhow::Result;
use log::{info, warn};

use esp_idf_hal::adc::attenuation::DB_11;
use esp_idf_hal::adc::oneshot::config::AdcChannelConfig;
use esp_idf_hal::adc::oneshot::{AdcChannelDriver, AdcDriver};
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{AnyIOPin, IOPin, Input, OutputPin, PinDriver, Pull};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::prelude::*;
use esp_idf_hal::uart::{UartDriver, config::Config as UartConfig};

use homesentry::adapters::hardware::{HardwareAdapter, InputPins};
use homesentry::adapters::log_sink::LogEventSink;
use homesentry::adapters::uart::UartTransport;
use homesentry::app::events::AppEvent;
use homesentry::app::ports::EventSink;
use homesentry::app::service::AppService;
use homesentry::config::SystemConfig;
use homesentry::console::Console;
use homesentry::error::{Error, SensorError};

/// 12-bit oneshot ADC full scale.
const ADC_FULL_SCALE: f32 = 4095.0;

/// Ticks between status log lines (10 s at 100 Hz).
const STATUS_EVERY_TICKS: u64 = 1000;

fn input(pin: AnyIOPin, pull: Pull) -> Result<PinDriver<'static, AnyIOPin, Input>> {
    let mut driver = PinDriver::input(pin)?;
    driver.set_pull(pull)?;
    Ok(driver)
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  HomeSentry v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = SystemConfig::default();
    config.validate()?;

    let peripherals = Peripherals::take().map_err(|_| Error::Init("peripherals already taken"))?;
    let pins = peripherals.pins;

    // ── 3. Analog inputs ──────────────────────────────────────
    let adc = AdcDriver::new(peripherals.adc1)?;
    let adc_cfg = AdcChannelConfig {
        attenuation: DB_11,
        ..Default::default()
    };
    let mut lm35_ch = AdcChannelDriver::new(&adc, pins.gpio4, &adc_cfg)?;
    let mut pot_ch = AdcChannelDriver::new(&adc, pins.gpio5, &adc_cfg)?;

    let lm35 = || {
        adc.read_raw(&mut lm35_ch)
            .map(|raw| f32::from(raw) / ADC_FULL_SCALE)
            .map_err(|_| SensorError::AdcReadFailed)
    };
    let potentiometer = || {
        adc.read_raw(&mut pot_ch)
            .map(|raw| f32::from(raw) / ADC_FULL_SCALE)
            .map_err(|_| SensorError::AdcReadFailed)
    };

    // ── 4. Digital I/O ────────────────────────────────────────
    let inputs = InputPins {
        gas: input(pins.gpio6.downgrade(), Pull::Up)?,
        test_button: input(pins.gpio7.downgrade(), Pull::Down)?,
        keys: [
            input(pins.gpio8.downgrade(), Pull::Down)?,
            input(pins.gpio9.downgrade(), Pull::Down)?,
            input(pins.gpio10.downgrade(), Pull::Down)?,
            input(pins.gpio11.downgrade(), Pull::Down)?,
        ],
        enter: input(pins.gpio12.downgrade(), Pull::Down)?,
    };
    let siren = PinDriver::input_output_od(pins.gpio13)?;
    let leds = [
        PinDriver::output(pins.gpio14.downgrade_output())?,
        PinDriver::output(pins.gpio15.downgrade_output())?,
        PinDriver::output(pins.gpio16.downgrade_output())?,
    ];

    let mut hw = HardwareAdapter::new(inputs, lm35, potentiometer, siren, leds);

    // ── 5. Serial console ─────────────────────────────────────
    let uart_cfg = UartConfig::default().baudrate(Hertz(config.uart_baud));
    let uart = UartDriver::new(
        peripherals.uart1,
        pins.gpio17,
        pins.gpio18,
        Option::<AnyIOPin>::None,
        Option::<AnyIOPin>::None,
        &uart_cfg,
    )?;
    let mut serial = UartTransport::new(uart);
    let mut console = Console::new();

    // ── 6. Application service ────────────────────────────────
    let mut log_sink = LogEventSink::new();
    let mut app = AppService::new(config.clone());
    app.start(&mut hw, &mut log_sink);

    info!("System ready. Entering control loop.");

    // ── 7. Control loop ───────────────────────────────────────
    loop {
        app.tick(&mut hw, &mut log_sink);

        if let Err(e) = console.poll(&mut serial, &mut app, &mut hw, &mut log_sink) {
            warn!("Console: {}", e);
        }

        if app.tick_count() % STATUS_EVERY_TICKS == 0 {
            log_sink.emit(&AppEvent::Status(app.status()));
        }

        FreeRtos::delay_ms(config.tick_period_ms);
    }
}

//! Serial command console.
//!
//! Single-byte commands over any [`Transport`]:
//!
//! | byte        | reply                                        |
//! |-------------|----------------------------------------------|
//! | `1`         | alarm activated / not activated              |
//! | `2`         | gas detected now / not                       |
//! | `3`         | over temperature now / not                   |
//! | `4`         | verify-code dialog                           |
//! | `5`         | new-code dialog                              |
//! | `p` `P`     | potentiometer fraction                       |
//! | `c` `C`     | LM35 temperature in Celsius                  |
//! | `f` `F`     | LM35 temperature in Fahrenheit               |
//! | anything    | help list                                    |
//!
//! Dialogs do not block. [`Console::poll`] dispatches at most one command
//! byte; once a dialog is open it keeps consuming whatever bytes are
//! waiting, echoing `*` for each, and replies after the fourth. If the
//! input runs dry the dialog stays open until the next poll.

pub mod dialog;
pub mod messages;
pub mod transport;

use log::debug;

use crate::app::commands::CommandOutcome;
use crate::app::ports::{ActuatorPort, EventSink, SensorPort};
use crate::app::service::AppService;
use crate::error::Result;

use dialog::{Dialog, DialogKind};
use transport::{Transport, read_byte, write_all};

#[derive(Debug, Default)]
pub struct Console {
    dialog: Option<Dialog>,
}

impl Console {
    pub fn new() -> Self {
        Self { dialog: None }
    }

    /// The dialog waiting for more digits, if any.
    pub fn open_dialog(&self) -> Option<DialogKind> {
        self.dialog.map(|d| d.kind())
    }

    /// Service the serial line once.
    pub fn poll<T: Transport>(
        &mut self,
        io: &mut T,
        app: &mut AppService,
        hw: &mut (impl SensorPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) -> Result<()> {
        if self.dialog.is_none() {
            let Some(byte) = read_byte(io)? else {
                return Ok(());
            };
            self.dispatch(byte, io, app, hw)?;
        }
        self.pump_dialog(io, app, hw, sink)?;
        io.flush().map_err(|e| {
            log::warn!("Serial flush failed: {:?}", e);
            crate::error::CommsError::SerialWriteFailed.into()
        })
    }

    fn dispatch<T: Transport>(
        &mut self,
        byte: u8,
        io: &mut T,
        app: &AppService,
        hw: &mut impl SensorPort,
    ) -> Result<()> {
        debug!("Console command 0x{byte:02x}");
        match byte {
            b'1' => write_all(
                io,
                if app.is_alarming() {
                    messages::ALARM_ACTIVATED
                } else {
                    messages::ALARM_NOT_ACTIVATED
                },
            ),
            b'2' => write_all(
                io,
                if app.gas_detected_now() {
                    messages::GAS_DETECTED
                } else {
                    messages::GAS_NOT_DETECTED
                },
            ),
            b'3' => write_all(
                io,
                if app.over_temp_now() {
                    messages::OVER_TEMP
                } else {
                    messages::NOT_OVER_TEMP
                },
            ),
            b'4' => {
                self.dialog = Some(Dialog::new(DialogKind::VerifyCode));
                write_all(io, messages::VERIFY_PROMPT)
            }
            b'5' => {
                self.dialog = Some(Dialog::new(DialogKind::SetNewCode));
                write_all(io, messages::NEW_CODE_PROMPT)
            }
            b'p' | b'P' => write_line(io, messages::potentiometer(hw.read_potentiometer())),
            b'c' | b'C' => write_line(io, messages::celsius(app.temperature().celsius)),
            b'f' | b'F' => write_line(io, messages::fahrenheit(app.temperature().fahrenheit())),
            _ => write_all(io, messages::HELP),
        }
    }

    /// Feed waiting bytes into the open dialog until it completes or the
    /// input runs dry.
    ///
    /// The fourth byte always closes the dialog and runs its command, even
    /// when echoing it fails; the echo error is reported afterwards.
    fn pump_dialog<T: Transport>(
        &mut self,
        io: &mut T,
        app: &mut AppService,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        while let Some(dialog) = self.dialog.as_mut() {
            let Some(byte) = read_byte(io)? else {
                return Ok(());
            };
            let finished = dialog.feed(byte);
            let echo = write_all(io, messages::MASK);

            let Some(cmd) = finished else {
                echo?;
                continue;
            };
            self.dialog = None;
            let reply = match app.handle_command(cmd, hw, sink) {
                CommandOutcome::CodeAccepted => messages::CODE_CORRECT,
                CommandOutcome::CodeRejected => messages::CODE_INCORRECT,
                CommandOutcome::CodeReplaced => messages::NEW_CODE_GENERATED,
            };
            echo?;
            write_all(io, reply)?;
        }
        Ok(())
    }
}

fn write_line<T: Transport>(io: &mut T, line: Option<messages::Line>) -> Result<()> {
    match line {
        Some(line) => write_all(io, &line),
        None => {
            log::warn!("Console reading did not fit the line buffer");
            Ok(())
        }
    }
}

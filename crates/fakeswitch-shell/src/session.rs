//! One interactive shell session
//!
//! A session owns its mode stack and shares the switch configuration with
//! every other session of the same switch. Each line is processed with the
//! configuration locked, so commands from concurrent sessions never
//! interleave.

use std::io;

use tracing::{debug, info, instrument, warn};

use fakeswitch_config::SharedConfiguration;

use crate::emitter::ResponseEmitter;
use crate::mode::Mode;
use crate::processor::{dispatch, CommandContext, Transition};
use crate::settings::{ShellSettings, UnknownCommandPolicy};

static PRIVILEGED_EXEC: Mode = Mode::PrivilegedExec;

#[derive(Debug)]
pub struct Session {
    config: SharedConfiguration,
    settings: ShellSettings,
    /// Never empty; the bottom entry is privileged exec
    stack: Vec<Mode>,
    closed: bool,
}

impl Session {
    pub fn new(config: SharedConfiguration, settings: ShellSettings) -> Self {
        Self {
            config,
            settings,
            stack: vec![Mode::PrivilegedExec],
            closed: false,
        }
    }

    pub fn mode(&self) -> &Mode {
        self.stack.last().unwrap_or(&PRIVILEGED_EXEC)
    }

    /// Nesting depth, 1 in privileged exec
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn config(&self) -> &SharedConfiguration {
        &self.config
    }

    pub fn prompt(&self) -> String {
        let config = self.config.lock();
        self.mode().prompt(&config)
    }

    /// Process one input line, writing any response lines to `out`
    ///
    /// Only failures of `out` are returned; refused commands are reported
    /// through `out` and leave the configuration untouched.
    #[instrument(skip(self, out), fields(mode = %self.mode()))]
    pub fn process_line(&mut self, line: &str, out: &mut dyn ResponseEmitter) -> io::Result<()> {
        if self.closed {
            warn!("Line received on a closed session");
            return Ok(());
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            return Ok(());
        }

        let mode = self.mode().clone();
        let result = {
            let mut config = self.config.lock();
            dispatch(&mut CommandContext::new(&mut *config, &mode), &tokens)
        };

        match result {
            Ok(transition) => {
                self.apply(transition);
                Ok(())
            }
            Err(err)
                if err.is_invalid_input()
                    && self.settings.unknown_command == UnknownCommandPolicy::Silent =>
            {
                debug!("Ignoring unknown input: {}", err);
                Ok(())
            }
            Err(err) => {
                warn!("Command refused: {}", err);
                out.write_error(&err)
            }
        }
    }

    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Stay => {}
            Transition::Enter(mode) => {
                info!("Entering {}", mode);
                self.stack.push(mode);
            }
            Transition::Exit if self.stack.len() > 1 => {
                if let Some(mode) = self.stack.pop() {
                    info!("Leaving {}", mode);
                }
            }
            Transition::Exit => {
                info!("Session closed");
                self.closed = true;
            }
            Transition::End => {
                self.stack.truncate(1);
                info!("Back to {}", self.mode());
            }
        }
    }
}

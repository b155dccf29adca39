//! Verification helpers for shell sessions
//!
//! Provides assertion helpers to check what a session prints and where it
//! ends up after each line

use std::io;

use fakeswitch_config::ConfigError;
use fakeswitch_shell::Session;
use thiserror::Error;

/// Verification error types
#[derive(Error, Debug)]
pub enum VerificationError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Fixture error: {0}")]
    Fixture(#[from] ConfigError),

    #[error("Unexpected output for '{line}': expected {expected:?}, got {actual:?}")]
    OutputMismatch {
        line: String,
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("Prompt mismatch: expected '{expected}', got '{actual}'")]
    PromptMismatch { expected: String, actual: String },

    #[error("Session closed before '{line}'")]
    SessionClosed { line: String },
}

/// Result type for verification operations
pub type VerifyResult<T> = Result<T, VerificationError>;

/// Drives one session and checks its responses
pub struct SessionVerifier<'a> {
    session: &'a mut Session,
}

impl<'a> SessionVerifier<'a> {
    pub fn new(session: &'a mut Session) -> Self {
        Self { session }
    }

    /// Send a line and return what was printed
    pub fn run(&mut self, line: &str) -> VerifyResult<Vec<String>> {
        if self.session.is_closed() {
            return Err(VerificationError::SessionClosed {
                line: line.to_string(),
            });
        }
        let mut out: Vec<String> = Vec::new();
        self.session.process_line(line, &mut out)?;
        Ok(out)
    }

    /// Send a line and check the exact output
    pub fn assert_output(&mut self, line: &str, expected: &[&str]) -> VerifyResult<()> {
        let actual = self.run(line)?;
        if actual != expected {
            return Err(VerificationError::OutputMismatch {
                line: line.to_string(),
                expected: expected.iter().map(|s| s.to_string()).collect(),
                actual,
            });
        }
        Ok(())
    }

    /// Send a line that must print nothing
    pub fn assert_silent(&mut self, line: &str) -> VerifyResult<()> {
        self.assert_output(line, &[])
    }

    /// Send several lines that must all print nothing
    pub fn assert_all_silent(&mut self, lines: &[&str]) -> VerifyResult<()> {
        for line in lines {
            self.assert_silent(line)?;
        }
        Ok(())
    }

    pub fn assert_prompt(&self, expected: &str) -> VerifyResult<()> {
        let actual = self.session.prompt();
        if actual != expected {
            return Err(VerificationError::PromptMismatch {
                expected: expected.to_string(),
                actual,
            });
        }
        Ok(())
    }
}

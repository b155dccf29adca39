//! Line-oriented output of command responses

use std::io::{self, Write};

use crate::error::CommandError;

/// Sink for the lines a command prints
pub trait ResponseEmitter {
    fn write_line(&mut self, line: &str) -> io::Result<()>;

    /// Write every line of a possibly multi-line error
    fn write_error(&mut self, err: &CommandError) -> io::Result<()> {
        for line in err.to_string().lines() {
            self.write_line(line)?;
        }
        Ok(())
    }
}

/// Collects lines in memory
impl ResponseEmitter for Vec<String> {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.push(line.to_string());
        Ok(())
    }
}

/// Writes `\n`-terminated lines to any writer, flushing after each one
#[derive(Debug)]
pub struct LineWriter<W: Write> {
    inner: W,
}

impl<W: Write> LineWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> ResponseEmitter for LineWriter<W> {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.inner, "{}", line)?;
        self.inner.flush()
    }
}

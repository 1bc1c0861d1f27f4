//! Captured program output.

use std::io::Write;

use tracing::warn;

/// Buffer collecting everything method bodies echo.
///
/// Text is always buffered so a caller can compare it afterwards; it is
/// additionally written to stdout when echoing is enabled.
#[derive(Debug, Default)]
pub struct Output {
    buffer: String,
    echo_stdout: bool,
}

impl Output {
    /// Create an empty buffer, optionally mirrored to stdout.
    pub fn new(echo_stdout: bool) -> Self {
        Self {
            buffer: String::new(),
            echo_stdout,
        }
    }

    /// Append text.
    pub fn write(&mut self, text: &str) {
        self.buffer.push_str(text);
        if self.echo_stdout {
            let mut stdout = std::io::stdout().lock();
            let written = stdout.write_all(text.as_bytes());
            if let Err(err) = written.and_then(|()| stdout.flush()) {
                warn!(error = %err, "failed to echo output to stdout");
            }
        }
    }

    /// Everything written so far.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Take the buffered text, leaving the buffer empty.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }

    /// Buffered text split into lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.buffer.lines()
    }
}

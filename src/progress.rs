//! Shared progress tracking utilities.
//!
//! `ProgressWriter` wraps the output sink, counts bytes written and reports
//! the running total to a callback, which the CLI uses to drive a byte-based
//! spinner.

use std::io::Write;

/// A writer wrapper that tracks bytes written and calls a progress callback.
pub struct ProgressWriter<W: Write> {
    writer: W,
    callback: Box<dyn Fn(u64)>,
    bytes_written: u64,
}

impl<W: Write> ProgressWriter<W> {
    /// The callback receives the total bytes written so far after each
    /// successful write.
    pub fn new<F>(writer: W, callback: F) -> Self
    where
        F: Fn(u64) + 'static,
    {
        Self {
            writer,
            callback: Box::new(callback),
            bytes_written: 0,
        }
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Write for ProgressWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.writer.write(buf)?;
        self.bytes_written += n as u64;
        (self.callback)(self.bytes_written);
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}

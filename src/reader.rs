//! Reading newline-terminated records from a byte stream.

use crate::buffer::LineBuffer;
use anyhow::{Context, Result};
use std::io::{ErrorKind, Read, Write};

/// Result of a single [`LineReader::read_line`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A record of this many bytes was read, including its `\n` if it had one.
    Line(usize),
    /// The stream had nothing left before the first byte.
    EndOfInput,
}

/// Byte-at-a-time reader that fills a caller-owned [`LineBuffer`].
pub struct LineReader<R> {
    inner: R,
}

impl<R: Read> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Read one record into `buf`, replacing its previous content.
    ///
    /// Stops after a `\n` (which is kept) or at end-of-input. A final record
    /// without a newline is still a [`ReadOutcome::Line`]; only a stream that
    /// is already exhausted reports [`ReadOutcome::EndOfInput`].
    pub fn read_line(&mut self, buf: &mut LineBuffer) -> Result<ReadOutcome> {
        buf.clear();
        while let Some(byte) = self.read_byte()? {
            buf.push(byte)?;
            if byte == b'\n' {
                break;
            }
        }
        if buf.is_empty() {
            Ok(ReadOutcome::EndOfInput)
        } else {
            Ok(ReadOutcome::Line(buf.len()))
        }
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e).context("failed to read from input"),
            }
        }
    }
}

/// Anything the interpreter loop can pull command lines from.
pub trait LineSource {
    /// Next line with its trailing newline removed, or `None` at end-of-input.
    fn next_line(&mut self) -> Result<Option<&[u8]>>;
}

struct Prompt {
    text: &'static str,
    out: Box<dyn Write>,
}

/// [`LineSource`] over a plain byte stream, optionally prompting before reads.
pub struct StreamSource<R> {
    reader: LineReader<R>,
    buffer: LineBuffer,
    prompt: Option<Prompt>,
}

impl<R: Read> StreamSource<R> {
    pub fn new(input: R) -> Self {
        Self {
            reader: LineReader::new(input),
            buffer: LineBuffer::new(),
            prompt: None,
        }
    }

    /// Write `text` to `out` before every read.
    pub fn with_prompt(mut self, text: &'static str, out: Box<dyn Write>) -> Self {
        self.prompt = Some(Prompt { text, out });
        self
    }
}

impl<R: Read> LineSource for StreamSource<R> {
    fn next_line(&mut self) -> Result<Option<&[u8]>> {
        if let Some(prompt) = &mut self.prompt {
            prompt.out.write_all(prompt.text.as_bytes())?;
            prompt.out.flush()?;
        }
        match self.reader.read_line(&mut self.buffer)? {
            ReadOutcome::EndOfInput => Ok(None),
            ReadOutcome::Line(_) => {
                self.buffer.strip_newline();
                Ok(Some(self.buffer.as_bytes()))
            }
        }
    }
}

//! Character-level source and sink traits.
//!
//! Readers and writers operate on characters, not bytes. A text source whose
//! encoding is already fixed (an in-memory string, a decoding adapter the caller
//! set up) implements [`CharSource`] directly; byte streams go through
//! [`DecodingSource`](super::DecodingSource) first.

use std::io;

/// A source of characters.
pub trait CharSource: Send {
    /// Read characters into `buf`.
    ///
    /// Blocks until `buf` is full or the source is exhausted, so a return value
    /// smaller than `buf.len()` means end of input. Returns `Ok(0)` on every call
    /// after the end was reached.
    fn read_block(&mut self, buf: &mut [char]) -> io::Result<usize>;
}

impl<S: CharSource + ?Sized> CharSource for &mut S {
    fn read_block(&mut self, buf: &mut [char]) -> io::Result<usize> {
        (**self).read_block(buf)
    }
}

impl<S: CharSource + ?Sized> CharSource for Box<S> {
    fn read_block(&mut self, buf: &mut [char]) -> io::Result<usize> {
        (**self).read_block(buf)
    }
}

/// A sink for characters.
pub trait CharSink: Send {
    /// Write the whole string.
    fn write_str(&mut self, text: &str) -> io::Result<()>;

    /// Flush anything the sink buffers itself.
    fn flush(&mut self) -> io::Result<()>;

    /// Flush and emit any trailing bytes the encoding needs.
    ///
    /// Called once when the writer is closed or dropped. Must not close the
    /// underlying stream; a stream the writer opened itself is released when
    /// the sink is dropped.
    fn finish(&mut self) -> io::Result<()> {
        self.flush()
    }
}

impl CharSink for String {
    fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.push_str(text);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<S: CharSink + ?Sized> CharSink for &mut S {
    fn write_str(&mut self, text: &str) -> io::Result<()> {
        (**self).write_str(text)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }

    fn finish(&mut self) -> io::Result<()> {
        (**self).finish()
    }
}

impl<S: CharSink + ?Sized> CharSink for Box<S> {
    fn write_str(&mut self, text: &str) -> io::Result<()> {
        (**self).write_str(text)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }

    fn finish(&mut self) -> io::Result<()> {
        (**self).finish()
    }
}

/// An in-memory text source.
#[derive(Debug, Clone)]
pub struct StrSource {
    text: String,
    pos: usize,
}

impl StrSource {
    /// Create a source over the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            pos: 0,
        }
    }

    /// The part of the text not read yet.
    pub fn remaining(&self) -> &str {
        &self.text[self.pos..]
    }
}

impl CharSource for StrSource {
    fn read_block(&mut self, buf: &mut [char]) -> io::Result<usize> {
        let mut count = 0;
        let mut consumed = 0;
        for (slot, c) in buf.iter_mut().zip(self.text[self.pos..].chars()) {
            *slot = c;
            count += 1;
            consumed += c.len_utf8();
        }
        self.pos += consumed;
        Ok(count)
    }
}

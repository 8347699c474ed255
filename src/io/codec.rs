//! Byte stream adapters that decode to / encode from characters via `encoding_rs`.

use std::fmt;
use std::io::{self, Read, Write};

use encoding_rs::{CoderResult, Decoder, Encoder, Encoding, UTF_8};

const BYTE_CHUNK: usize = 8 * 1024;

fn too_large() -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, "chunk too large to transcode")
}

/// Decodes a byte stream into characters.
///
/// A byte order mark at the start of the stream overrides the configured
/// encoding and is not part of the output. Malformed sequences decode to
/// U+FFFD.
pub struct DecodingSource<R> {
    inner: R,
    decoder: Decoder,
    bytes: Vec<u8>,
    decoded: String,
    offset: usize,
    finished: bool,
}

impl<R: Read> DecodingSource<R> {
    pub fn new(inner: R, encoding: &'static Encoding) -> Self {
        Self {
            inner,
            decoder: encoding.new_decoder(),
            bytes: vec![0; BYTE_CHUNK],
            decoded: String::new(),
            offset: 0,
            finished: false,
        }
    }

    /// Decode the stream as UTF-8.
    pub fn utf8(inner: R) -> Self {
        Self::new(inner, UTF_8)
    }

    /// Consume the adapter and return the byte stream.
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn refill(&mut self) -> io::Result<()> {
        self.decoded.clear();
        self.offset = 0;

        // a partial multi-byte sequence decodes to nothing, keep reading
        while self.decoded.is_empty() && !self.finished {
            let n = loop {
                match self.inner.read(&mut self.bytes) {
                    Ok(n) => break n,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e),
                }
            };
            let last = n == 0;

            let needed = self
                .decoder
                .max_utf8_buffer_length(n)
                .ok_or_else(too_large)?;
            self.decoded.reserve(needed);

            let (result, read, _) =
                self.decoder
                    .decode_to_string(&self.bytes[..n], &mut self.decoded, last);
            debug_assert!(matches!(result, CoderResult::InputEmpty) && read == n);

            if last {
                self.finished = true;
            }
        }

        Ok(())
    }
}

impl<R: Read + Send> super::CharSource for DecodingSource<R> {
    fn read_block(&mut self, buf: &mut [char]) -> io::Result<usize> {
        let mut count = 0;
        while count < buf.len() {
            if self.offset == self.decoded.len() {
                if self.finished {
                    break;
                }
                self.refill()?;
                if self.decoded.is_empty() {
                    break;
                }
            }

            let mut consumed = 0;
            for (slot, c) in buf[count..].iter_mut().zip(self.decoded[self.offset..].chars()) {
                *slot = c;
                count += 1;
                consumed += c.len_utf8();
            }
            self.offset += consumed;
        }
        Ok(count)
    }
}

impl<R> fmt::Debug for DecodingSource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodingSource")
            .field("encoding", &self.decoder.encoding().name())
            .field("finished", &self.finished)
            .finish()
    }
}

/// Encodes characters into a byte stream.
///
/// Characters the target encoding cannot represent are written as HTML numeric
/// character references, the `encoding_rs` replacement convention. UTF-16
/// targets encode as UTF-8, since `encoding_rs` has no UTF-16 encoder.
pub struct EncodingSink<W> {
    inner: W,
    encoder: Encoder,
    bytes: Vec<u8>,
}

impl<W: Write> EncodingSink<W> {
    pub fn new(inner: W, encoding: &'static Encoding) -> Self {
        Self {
            inner,
            encoder: encoding.new_encoder(),
            bytes: Vec::new(),
        }
    }

    /// Encode characters as UTF-8.
    pub fn utf8(inner: W) -> Self {
        Self::new(inner, UTF_8)
    }

    /// Get a reference to the byte stream.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Consume the adapter and return the byte stream.
    pub fn into_inner(self) -> W {
        self.inner
    }

    fn encode(&mut self, text: &str, last: bool) -> io::Result<()> {
        let mut rest = text;
        loop {
            let needed = self
                .encoder
                .max_buffer_length_from_utf8_if_no_unmappables(rest.len())
                .ok_or_else(too_large)?;
            self.bytes.reserve(needed.max(16));

            let (result, read, _) = self
                .encoder
                .encode_from_utf8_to_vec(rest, &mut self.bytes, last);
            rest = &rest[read..];

            self.inner.write_all(&self.bytes)?;
            self.bytes.clear();

            if let CoderResult::InputEmpty = result {
                return Ok(());
            }
        }
    }
}

impl<W: Write + Send> super::CharSink for EncodingSink<W> {
    fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.encode(text, false)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    fn finish(&mut self) -> io::Result<()> {
        self.encode("", true)?;
        self.inner.flush()
    }
}

impl<W> fmt::Debug for EncodingSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodingSink")
            .field("encoding", &self.encoder.encoding().name())
            .finish()
    }
}

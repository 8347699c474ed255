//! Tests for the encoding_rs adapters.

use std::io::{self, Read};

use encoding_rs::{UTF_8, WINDOWS_1252};

use crate::{CharSink, CharSource, DecodingSource, EncodingSink};

fn drain<S: CharSource>(source: &mut S, block: usize) -> String {
    let mut buf = vec!['\0'; block];
    let mut out = String::new();
    loop {
        let n = source.read_block(&mut buf).unwrap();
        out.extend(&buf[..n]);
        if n < block {
            return out;
        }
    }
}

/// Hands out one byte per read call.
struct Trickle<'a>(&'a [u8]);

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.0.split_first() {
            Some((&b, rest)) if !buf.is_empty() => {
                buf[0] = b;
                self.0 = rest;
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

#[test]
fn decodes_multibyte_sequences_split_across_reads() {
    let text = "ä;ö🦀\r\nü";
    let mut source = DecodingSource::utf8(Trickle(text.as_bytes()));
    assert_eq!(drain(&mut source, 3), text);
    assert_eq!(source.read_block(&mut ['\0'; 4]).unwrap(), 0);
}

#[test]
fn decodes_single_byte_encoding() {
    let mut source = DecodingSource::new(&b"\x80 \xe4"[..], WINDOWS_1252);
    assert_eq!(drain(&mut source, 16), "€ ä");
}

#[test]
fn byte_order_mark_overrides_the_encoding() {
    let bytes = b"\xef\xbb\xbf\xc3\xa4";
    let mut source = DecodingSource::new(&bytes[..], WINDOWS_1252);
    assert_eq!(drain(&mut source, 8), "ä");
}

#[test]
fn malformed_input_becomes_replacement_characters() {
    let mut source = DecodingSource::new(&b"a\xffb"[..], UTF_8);
    assert_eq!(drain(&mut source, 8), "a\u{fffd}b");
}

#[test]
fn encodes_to_single_byte_encoding() {
    let mut sink = EncodingSink::new(Vec::new(), WINDOWS_1252);
    sink.write_str("Grüße ").unwrap();
    sink.write_str("€").unwrap();
    sink.finish().unwrap();
    assert_eq!(sink.into_inner(), b"Gr\xfc\xdfe \x80");
}

#[test]
fn unmappable_characters_become_numeric_references() {
    let mut sink = EncodingSink::new(Vec::new(), WINDOWS_1252);
    sink.write_str("a日b").unwrap();
    sink.finish().unwrap();
    assert_eq!(sink.get_ref().as_slice(), b"a&#26085;b");
}

#[test]
fn long_text_is_encoded_completely() {
    let text: String = "ü;".repeat(10_000);
    let mut sink = EncodingSink::utf8(Vec::new());
    sink.write_str(&text).unwrap();
    sink.flush().unwrap();
    assert_eq!(sink.into_inner(), text.as_bytes());
}

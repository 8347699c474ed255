//! Buffering, flushing and the life cycle of the sink.

use std::io;
use std::sync::{Arc, Mutex};

use encoding_rs::WINDOWS_1252;

use crate::{CharSink, CsvError, CsvWriter, InMemorySink, WriterOptions};

#[derive(Debug, Default)]
struct Log {
    writes: Vec<String>,
    flushes: usize,
    finishes: usize,
}

#[derive(Debug, Clone, Default)]
struct RecordingSink {
    log: Arc<Mutex<Log>>,
}

impl RecordingSink {
    fn writes(&self) -> Vec<String> {
        self.log.lock().unwrap().writes.clone()
    }

    fn flushes(&self) -> usize {
        self.log.lock().unwrap().flushes
    }

    fn finishes(&self) -> usize {
        self.log.lock().unwrap().finishes
    }
}

impl CharSink for RecordingSink {
    fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.log.lock().unwrap().writes.push(text.to_string());
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.log.lock().unwrap().flushes += 1;
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.log.lock().unwrap().finishes += 1;
        Ok(())
    }
}

#[test]
fn buffer_drains_exactly_when_full() {
    let sink = RecordingSink::default();
    let writer = CsvWriter::new(sink.clone(), &WriterOptions::new().with_chunk_size(4)).unwrap();

    writer.write("abcdefghij").unwrap();
    assert_eq!(sink.writes(), vec!["abcd", "efgh"]);

    writer.flush().unwrap();
    assert_eq!(sink.writes(), vec!["abcd", "efgh", "ij"]);
    assert_eq!(sink.flushes(), 1);

    // nothing buffered, nothing written
    writer.flush().unwrap();
    assert_eq!(sink.writes().len(), 3);
}

#[test]
fn default_buffer_writes_through() {
    let sink = RecordingSink::default();
    let writer = CsvWriter::new(sink.clone(), &WriterOptions::default()).unwrap();
    assert_eq!(writer.chunk_size(), 1);

    writer.write("ab").unwrap();
    assert_eq!(sink.writes(), vec!["a", "b"]);
}

#[test]
fn zero_chunk_size_is_clamped_to_one() {
    let writer = CsvWriter::new(
        RecordingSink::default(),
        &WriterOptions::new().with_chunk_size(0),
    )
    .unwrap();
    assert_eq!(writer.chunk_size(), 1);
}

#[test]
fn drop_drains_and_finishes_once() {
    let sink = RecordingSink::default();
    {
        let writer =
            CsvWriter::new(sink.clone(), &WriterOptions::new().with_chunk_size(100)).unwrap();
        writer.write_row(["a", "b"]).unwrap();
        assert!(sink.writes().is_empty());
    }
    assert_eq!(sink.writes(), vec!["a;b"]);
    assert_eq!(sink.finishes(), 1);
}

#[test]
fn close_finishes_and_drop_does_not_repeat_it() {
    let sink = RecordingSink::default();
    let writer = CsvWriter::new(sink.clone(), &WriterOptions::new().with_chunk_size(100)).unwrap();
    writer.write("x").unwrap();
    writer.close().unwrap();

    assert_eq!(sink.writes(), vec!["x"]);
    assert_eq!(sink.finishes(), 1);
}

#[test]
fn borrowed_string_stays_usable_after_drop() {
    let mut out = String::from("header\r\n");
    {
        let writer = CsvWriter::new(&mut out, &WriterOptions::new().with_chunk_size(64)).unwrap();
        writer.write_row(["1", "2"]).unwrap();
    }
    out.push_str("!");
    assert_eq!(out, "header\r\n1;2!");
}

struct FailingSink;

impl CharSink for FailingSink {
    fn write_str(&mut self, _text: &str) -> io::Result<()> {
        Err(io::Error::other("sink closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn sink_failure_propagates() {
    let writer = CsvWriter::new(FailingSink, &WriterOptions::default()).unwrap();
    let err = writer.write("a").unwrap_err();
    assert!(matches!(err, CsvError::Io(_)));
}

#[test]
fn close_reports_failure_and_drop_only_logs() {
    let writer = CsvWriter::new(FailingSink, &WriterOptions::new().with_chunk_size(16)).unwrap();
    writer.write("buffered").unwrap();
    assert!(writer.close().is_err());

    let writer = CsvWriter::new(FailingSink, &WriterOptions::new().with_chunk_size(16)).unwrap();
    writer.write("buffered").unwrap();
    drop(writer);
}

#[test]
fn text_sink_rejects_encoding_and_append() {
    let err = CsvWriter::new(
        String::new(),
        &WriterOptions::new().with_encoding(WINDOWS_1252),
    )
    .unwrap_err();
    assert!(matches!(err, CsvError::Config(_)));

    let err = CsvWriter::new(String::new(), &WriterOptions::new().with_append(true)).unwrap_err();
    assert!(matches!(err, CsvError::Config(_)));

    let mut bytes = Vec::new();
    let err = CsvWriter::from_writer(&mut bytes, &WriterOptions::new().with_append(true))
        .unwrap_err();
    assert!(err.is_config());
}

#[test]
fn encodes_byte_stream() {
    let mut bytes = Vec::new();
    {
        let options = WriterOptions::new().with_encoding(WINDOWS_1252);
        let writer = CsvWriter::from_writer(&mut bytes, &options).unwrap();
        writer.write("Grüße").unwrap().write("€").unwrap();
    }
    assert_eq!(bytes, b"Gr\xfc\xdfe;\x80");
}

#[test]
fn writes_to_target_with_overwrite_and_append() {
    let sink = InMemorySink::new("mem");

    CsvWriter::from_target(&sink, &WriterOptions::default())
        .unwrap()
        .write_row_line(["a", "b"])
        .unwrap();
    CsvWriter::from_target(&sink, &WriterOptions::new().with_append(true))
        .unwrap()
        .write_row(["c"])
        .unwrap();
    assert_eq!(sink.contents_string(), "a;b\r\nc");

    CsvWriter::from_target(&sink, &WriterOptions::default())
        .unwrap()
        .write("new")
        .unwrap();
    assert_eq!(sink.contents_string(), "new");
}

#[test]
fn writes_to_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");

    let writer = CsvWriter::from_path(&path, &WriterOptions::new().with_chunk_size(1024)).unwrap();
    writer.write_rows([["x", "y"], ["1", "2"]]).unwrap();
    writer.close().unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "x;y\r\n1;2");
}

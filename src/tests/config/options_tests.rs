//! Tests for ReaderOptions / WriterOptions and their serde representation.

use encoding_rs::{UTF_8, WINDOWS_1252};

use crate::{
    CsvReader, CsvWriter, MAX_CHUNK_SIZE, QuotingBehavior, ReaderOptions, StrSource,
    WriterOptions, encoding_for_label,
};

#[test]
fn option_defaults() {
    let reader = ReaderOptions::default();
    assert_eq!(reader.chunk_size, 16384);
    assert_eq!(reader.encoding, None);
    assert_eq!(reader.effective_chunk_size(), 16384);

    let writer = WriterOptions::default();
    assert_eq!(writer.chunk_size, 1);
    assert_eq!(writer.quoting, QuotingBehavior::Minimal);
    assert!(!writer.append);
}

#[test]
fn reader_chunk_size_clamps_to_row_separator() {
    let mut options = ReaderOptions::new().with_chunk_size(2);
    options.format.row_separator = "<end>".into();
    assert_eq!(options.effective_chunk_size(), 5);
}

#[test]
fn encoding_labels() {
    assert_eq!(encoding_for_label("utf-8").unwrap(), UTF_8);
    assert_eq!(encoding_for_label(" latin1 ").unwrap(), WINDOWS_1252);
    assert!(encoding_for_label("klingon").unwrap_err().is_config());
}

#[test]
fn reader_options_from_json() {
    let json = r#"{
        "column_separator": ",",
        "row_separator": "\n",
        "field_delimiter": null,
        "chunk_size": 64,
        "encoding": "windows-1252"
    }"#;

    let options: ReaderOptions = serde_json::from_str(json).unwrap();
    assert_eq!(options.format.column_separator, ',');
    assert_eq!(options.format.row_separator, "\n");
    assert_eq!(options.format.field_delimiter, None);
    assert_eq!(options.chunk_size, 64);
    assert_eq!(options.encoding, Some(WINDOWS_1252));
}

#[test]
fn missing_fields_keep_defaults() {
    let options: WriterOptions = serde_json::from_str(r#"{"quoting": "all"}"#).unwrap();
    assert_eq!(options.quoting, QuotingBehavior::All);
    assert_eq!(options.format.column_separator, ';');
    assert_eq!(options.format.row_separator, "\r\n");
    assert_eq!(options.chunk_size, 1);
}

#[test]
fn writer_options_from_yaml() {
    let yaml = r#"
column_separator: "\t"
row_separator: "\r\n"
field_delimiter: "'"
chunk_size: 4096
quoting: minimal
encoding: utf-8
append: true
"#;

    let options: WriterOptions = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(options.format.column_separator, '\t');
    assert_eq!(options.format.field_delimiter, Some('\''));
    assert_eq!(options.chunk_size, 4096);
    assert_eq!(options.encoding, Some(UTF_8));
    assert!(options.append);
}

#[test]
fn unknown_encoding_label_fails_deserialization() {
    let result: Result<ReaderOptions, _> = serde_json::from_str(r#"{"encoding": "klingon"}"#);
    assert!(result.is_err());
}

#[cfg(feature = "json")]
#[test]
fn from_json_str_validates() {
    let options = ReaderOptions::from_json_str(r#"{"column_separator": "|"}"#).unwrap();
    assert_eq!(options.format.column_separator, '|');

    let err = ReaderOptions::from_json_str(r#"{"row_separator": ""}"#).unwrap_err();
    assert!(err.is_config());

    let err = WriterOptions::from_json_str("not json").unwrap_err();
    assert!(err.is_config());
}

#[cfg(feature = "yaml")]
#[test]
fn from_yaml_str_validates() {
    let options = WriterOptions::from_yaml_str("quoting: all\nappend: true\n").unwrap();
    assert_eq!(options.quoting, QuotingBehavior::All);
    assert!(options.append);

    let err = ReaderOptions::from_yaml_str("column_separator: \"\\\"\"\n").unwrap_err();
    assert!(err.is_config());
}

#[test]
fn oversized_chunk_sizes_are_config_errors() {
    let reader = ReaderOptions::new().with_chunk_size(usize::MAX);
    assert!(reader.validate().unwrap_err().is_config());

    let writer = WriterOptions::new().with_chunk_size(MAX_CHUNK_SIZE + 1);
    assert!(writer.validate().unwrap_err().is_config());

    assert!(
        WriterOptions::new()
            .with_chunk_size(MAX_CHUNK_SIZE)
            .validate()
            .is_ok()
    );
}

#[test]
fn oversized_chunk_size_fails_construction() {
    let err = CsvReader::new(
        StrSource::new("a;b"),
        &ReaderOptions::default().with_chunk_size(usize::MAX),
    )
    .unwrap_err();
    assert!(err.is_config());

    let mut out = String::new();
    let err = CsvWriter::new(
        &mut out,
        &WriterOptions::default().with_chunk_size(usize::MAX),
    )
    .unwrap_err();
    assert!(err.is_config());
}

#[test]
fn large_writer_buffer_is_not_preallocated() {
    let mut out = String::new();
    {
        let writer =
            CsvWriter::new(&mut out, &WriterOptions::new().with_chunk_size(MAX_CHUNK_SIZE))
                .unwrap();
        writer.write_row(["a", "b"]).unwrap();
    }
    assert_eq!(out, "a;b");
}

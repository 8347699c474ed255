//! Tests for loading reader/writer options from documents and using them.

use csvstream::{CsvReader, CsvWriter, QuotingBehavior, ReaderOptions, StrSource, WriterOptions};

#[test]
fn parse_reader_and_writer_options_from_yaml() {
    let yaml = r#"
reader:
  column_separator: ","
  row_separator: "\n"
  chunk_size: 2
writer:
  column_separator: "\t"
  row_separator: "\n"
  quoting: all
  chunk_size: 256
"#;

    #[derive(serde::Deserialize)]
    struct Conversion {
        reader: ReaderOptions,
        writer: WriterOptions,
    }

    let cfg: Conversion = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(cfg.reader.format.column_separator, ',');
    assert_eq!(cfg.reader.chunk_size, 2);
    assert_eq!(cfg.writer.quoting, QuotingBehavior::All);

    let reader = CsvReader::new(StrSource::new("a,\"b,c\"\nd\n"), &cfg.reader).unwrap();
    let rows = reader.read_all_rows().unwrap().unwrap();

    let mut out = String::new();
    {
        let writer = CsvWriter::new(&mut out, &cfg.writer).unwrap();
        writer.write_rows(&rows).unwrap();
    }
    assert_eq!(out, "\"a\"\t\"b,c\"\n\"d\"");
}

#[test]
fn parse_writer_options_from_json() {
    let json = r#"{"column_separator": "|", "field_delimiter": "'", "encoding": "latin1"}"#;

    let options: WriterOptions = serde_json::from_str(json).unwrap();
    assert_eq!(options.format.column_separator, '|');
    assert_eq!(options.format.field_delimiter, Some('\''));
    assert_eq!(options.encoding, Some(encoding_rs::WINDOWS_1252));

    let mut bytes = Vec::new();
    {
        let writer = CsvWriter::from_writer(&mut bytes, &options).unwrap();
        writer.write_row(["ä", "x|y"]).unwrap();
    }
    assert_eq!(bytes, b"\xe4|'x|y'");
}

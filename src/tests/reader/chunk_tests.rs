//! Parsing must not depend on how the input is chunked.

use super::{options, read_rows};
use crate::{CsvReader, ReaderOptions, StrSource};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn long_row_separator_with_any_chunk_size() {
    init_logger();

    let text = "a;\"b\"\"tooLong\nc\";tooLontooLong\ntooLongtooLong\nx;;tooLong\n";
    let expected = vec![
        vec!["a", "b\"tooLong\nc", "tooLon"],
        vec!["tooLong"],
        vec!["x", "", ""],
    ];

    for chunk_size in (1..=10).chain([16384]) {
        let opts = options(';', "tooLong\n", Some('"')).with_chunk_size(chunk_size);
        assert_eq!(read_rows(text, &opts), expected, "chunk size {chunk_size}");
    }
}

#[test]
fn doubled_delimiter_across_chunk_boundary() {
    init_logger();

    let text = "\"a\"\"b\";c\n\"\"\"\";d";
    for chunk_size in [1, 2, 3, 16384] {
        let opts = options(';', "\n", Some('"')).with_chunk_size(chunk_size);
        assert_eq!(
            read_rows(text, &opts),
            vec![vec!["a\"b", "c"], vec!["\"", "d"]],
            "chunk size {chunk_size}"
        );
    }
}

#[test]
fn chunk_size_is_clamped_to_row_separator_length() {
    let opts = options(';', "tooLong\n", None).with_chunk_size(1);
    let reader = CsvReader::new(StrSource::new("a;btooLong\nc;d"), &opts).unwrap();

    assert_eq!(reader.chunk_size(), 8);
    assert_eq!(
        reader.read_all_rows().unwrap().unwrap(),
        vec![vec!["a", "b"], vec!["c", "d"]]
    );
}

#[test]
fn many_rows_small_and_large_chunks_agree() {
    let text: String = (0..1000)
        .map(|i| match i % 4 {
            0 => format!("{i};plain;\r\n"),
            1 => format!("\"{i};quoted\";\"with \"\"quotes\"\"\"\r\n"),
            2 => format!("{i};\"multi\r\nline\";ünïcödé\r\n"),
            _ => "\r\n".to_string(),
        })
        .collect();

    let small = read_rows(&text, &ReaderOptions::default().with_chunk_size(3));
    let large = read_rows(&text, &ReaderOptions::default());

    assert_eq!(small.len(), 1000);
    assert_eq!(small, large);
    assert_eq!(small[1], vec!["1;quoted", "with \"quotes\""]);
    assert_eq!(small[2], vec!["2", "multi\r\nline", "ünïcödé"]);
    assert_eq!(small[3], vec![""]);
}

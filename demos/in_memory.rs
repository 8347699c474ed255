//! Example reading and writing CSV entirely in memory.
//!
//! Run with: cargo run --example in_memory

use std::sync::Arc;

use csvstream::{
    CsvReaderBuilder, CsvWriterBuilder, InMemorySink, InMemorySource, QuotingBehavior,
};
use encoding_rs::WINDOWS_1252;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Comma separated, LF terminated input
    let reader = CsvReaderBuilder::new()
        .text("city,comment\nBerlin,\"big, busy\"\nOslo,\"\"\"cold\"\"\"\n")
        .column_separator(',')
        .row_separator("\n")
        .build()?;

    let rows = reader.read_all_rows()?.unwrap_or_default();
    println!("Read {} row(s):", rows.len());
    for row in &rows {
        println!("  - {row:?}");
    }

    // Write the same rows with the default dialect (";" and CRLF), quoting everything
    let mut text = String::new();
    {
        let writer = CsvWriterBuilder::new()
            .text(&mut text)
            .quoting(QuotingBehavior::All)
            .build()?;
        writer.write_rows(&rows)?;
    }
    println!("Rewritten:\n{text}");

    // Round trip through Windows-1252 encoded bytes
    let sink = Arc::new(InMemorySink::new("latin"));
    CsvWriterBuilder::new()
        .target(sink.clone())
        .encoding(WINDOWS_1252)
        .build()?
        .write_row(["Grüße", "€"])?;
    println!("Encoded bytes: {:?}", sink.contents());

    let source = Arc::new(InMemorySource::new("latin", sink.contents()));
    let reader = CsvReaderBuilder::new()
        .input(source)
        .encoding(WINDOWS_1252)
        .build()?;
    println!("Decoded again: {:?}", reader.read_row()?);

    Ok(())
}

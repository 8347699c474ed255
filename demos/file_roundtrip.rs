//! Example converting a semicolon separated file into a tab separated one.
//!
//! Run with: cargo run --example file_roundtrip

use csvstream::{CsvReader, CsvWriter, FormatConfig, ReaderOptions, WriterOptions};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dir = std::env::temp_dir().join("csvstream-demo");
    std::fs::create_dir_all(&dir)?;
    let input = dir.join("input.csv");
    let output = dir.join("output.tsv");

    std::fs::write(&input, "name;notes\r\nAda;\"wrote;the\r\nfirst program\"\r\n;\r\n")?;

    // Small chunks to show that rows may span many refills
    let reader = CsvReader::from_path(&input, &ReaderOptions::new().with_chunk_size(4))?;

    let tsv = FormatConfig::new()
        .with_column_separator('\t')
        .with_row_separator("\n");
    let writer = CsvWriter::from_path(
        &output,
        &WriterOptions::new().with_format(tsv).with_chunk_size(4096),
    )?;

    let mut count = 0;
    for row in reader.rows() {
        writer.write_row_line(row?)?;
        count += 1;
    }
    writer.close()?;

    println!("Converted {count} row(s) into {}", output.display());
    println!("{}", std::fs::read_to_string(&output)?);

    Ok(())
}

use std::error::Error;

use csvstream::cli::{ConvertArgs, FormatArgs, Separator};
use sarge::prelude::*;

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  csvstream_convert --input <path|-> --output <path|-> [format options]");
    eprintln!();
    eprintln!("Format options (escapes \\t \\n \\r \\\\ are accepted):");
    eprintln!("  --in-col <c>       Input column separator (default ;)");
    eprintln!("  --in-row <s>       Input row separator (default \\r\\n)");
    eprintln!("  --in-quote <c>     Input field delimiter, empty to disable (default \")");
    eprintln!("  --out-col <c>      Output column separator");
    eprintln!("  --out-row <s>      Output row separator");
    eprintln!("  --out-quote <c>    Output field delimiter, empty to disable");
    eprintln!("  --quote-all        Quote every output field");
    eprintln!("  --append           Append to the output file instead of truncating it");
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut reader = ArgumentReader::new();

    let input_ref = reader.add::<String>(tag::both('i', "input"));
    let output_ref = reader.add::<String>(tag::both('o', "output"));
    let in_col = reader.add::<Separator>(tag::long("in-col"));
    let in_row = reader.add::<Separator>(tag::long("in-row"));
    let in_quote = reader.add::<Separator>(tag::long("in-quote"));
    let out_col = reader.add::<Separator>(tag::long("out-col"));
    let out_row = reader.add::<Separator>(tag::long("out-row"));
    let out_quote = reader.add::<Separator>(tag::long("out-quote"));
    let quote_all = reader.add::<bool>(tag::long("quote-all"));
    let append = reader.add::<bool>(tag::long("append"));

    let args = reader.parse()?;

    macro_rules! raw {
        ($arg:expr) => {
            match $arg.get(&args) {
                Some(Ok(sep)) => Some(Separator::into_raw(sep)),
                Some(Err(e)) => return Err(e.into()),
                None => None,
            }
        };
    }

    let input = input_ref.get(&args).and_then(Result::ok);
    let output = output_ref.get(&args).and_then(Result::ok);
    let (Some(input), Some(output)) = (input, output) else {
        return Err("missing --input/--output".into());
    };

    let mut convert = ConvertArgs::new(input, output);
    convert.input_format = FormatArgs {
        column_separator: raw!(in_col),
        row_separator: raw!(in_row),
        field_delimiter: raw!(in_quote),
    };
    convert.output_format = FormatArgs {
        column_separator: raw!(out_col),
        row_separator: raw!(out_row),
        field_delimiter: raw!(out_quote),
    };
    convert.quote_all = matches!(quote_all.get(&args), Some(Ok(true)));
    convert.append = matches!(append.get(&args), Some(Ok(true)));

    let csv_reader = convert.reader_builder()?.build()?;
    let csv_writer = convert.writer_builder()?.build()?;

    for row in csv_reader.rows() {
        csv_writer.write_row_line(row?)?;
    }
    csv_writer.close()?;

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("csvstream_convert error: {e}");
        print_usage();
        std::process::exit(1);
    }
}

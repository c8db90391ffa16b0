//! CLI Tool Example
//!
//! This example demonstrates how to build a command-line tool
//! using xlsxtex for converting Excel worksheets to LaTeX longtables.
//!
//! Set `RUST_LOG=xlsxtex=debug` to see layout and rendering events.

use std::fs::{self, File};
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;
use xlsxtex::{ConverterBuilder, FontSize, RenderOptions, SheetSelector, XlsxToTexError};

fn print_usage(program: &str) {
    eprintln!("Usage: {} <input.xlsx> <output-dir|output.zip> [options]", program);
    eprintln!("\nOptions:");
    eprintln!("  --exclude <A,B,...>      Columns to exclude (default: B,C,D,E; empty string for none)");
    eprintln!("  --width <letter>=<cm>    Column width for A, B or C (C applies to C-I); repeatable");
    eprintln!("  --total-width <cm>       Auto-distribute widths over this total width");
    eprintln!("  --font-size <size>       tiny, scriptsize, footnotesize (default), small, normalsize");
    eprintln!("  --options <file.json>    Load render options from a JSON file");
    eprintln!("  --sheet-index <n>        Select sheet by index (0-based)");
    eprintln!("  --sheet-name <name>      Select sheet by name");
    eprintln!("  --all-sheets             Convert all sheets (default)");
    eprintln!("\nExamples:");
    eprintln!("  {} input.xlsx tables/", program);
    eprintln!("  {} input.xlsx tables.zip --total-width 15.6", program);
    eprintln!("  {} input.xlsx tables/ --exclude C,D --width A=5.0 --font-size scriptsize", program);
}

fn value_of<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    match args.get(i + 1) {
        Some(value) => value,
        None => {
            eprintln!("Error: {} requires a value", flag);
            process::exit(1);
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        print_usage(&args[0]);
        process::exit(1);
    }

    let input_path = &args[1];
    let output_path = &args[2];

    // Parse options
    let mut builder = ConverterBuilder::new();
    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "--exclude" => {
                let value = value_of(&args, i, "--exclude");
                let columns: Vec<&str> = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .collect();
                builder = builder.with_excluded_columns(columns);
                i += 2;
            }
            "--width" => {
                let value = value_of(&args, i, "--width");
                let Some((letter, width)) = value.split_once('=') else {
                    eprintln!("Error: --width expects <letter>=<cm>, got {}", value);
                    process::exit(1);
                };
                builder = builder.with_column_width_str(letter.trim(), width.trim());
                i += 2;
            }
            "--total-width" => {
                let value = value_of(&args, i, "--total-width");
                let total = value.trim().parse::<f64>().unwrap_or_else(|_| {
                    eprintln!("Error: Invalid total width: {}", value);
                    process::exit(1);
                });
                builder = builder.with_total_table_width(total);
                i += 2;
            }
            "--font-size" => {
                let value = value_of(&args, i, "--font-size");
                let size = value.parse::<FontSize>().unwrap_or_else(|e| {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                });
                builder = builder.with_font_size(size);
                i += 2;
            }
            "--options" => {
                let path = value_of(&args, i, "--options");
                match load_options(path) {
                    Ok(options) => builder = builder.with_options(options),
                    Err(e) => {
                        handle_error(e);
                        process::exit(1);
                    }
                }
                i += 2;
            }
            "--sheet-index" => {
                let value = value_of(&args, i, "--sheet-index");
                let index = value.parse::<usize>().unwrap_or_else(|_| {
                    eprintln!("Error: Invalid sheet index: {}", value);
                    process::exit(1);
                });
                builder = builder.with_sheet_selector(SheetSelector::Index(index));
                i += 2;
            }
            "--sheet-name" => {
                let value = value_of(&args, i, "--sheet-name");
                builder = builder.with_sheet_selector(SheetSelector::Name(value.to_string()));
                i += 2;
            }
            "--all-sheets" => {
                builder = builder.with_sheet_selector(SheetSelector::All);
                i += 1;
            }
            _ => {
                eprintln!("Error: Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
    }

    match convert_excel(builder, input_path, output_path) {
        Ok(count) => {
            println!(
                "Conversion completed: {} -> {} ({} table(s))",
                input_path, output_path, count
            );
        }
        Err(e) => {
            handle_error(e);
            process::exit(1);
        }
    }
}

fn load_options(path: &str) -> Result<RenderOptions, XlsxToTexError> {
    let json = fs::read_to_string(path)?;
    RenderOptions::from_json(&json)
}

/// Writes one `.tex` file per sheet into a directory, or a single zip archive
/// when the output path ends in `.zip`.
fn convert_excel(
    builder: ConverterBuilder,
    input_path: &str,
    output_path: &str,
) -> Result<usize, XlsxToTexError> {
    let converter = builder.build()?;
    let files = converter.convert(File::open(input_path)?)?;

    let output = Path::new(output_path);
    let is_zip = output
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("zip"))
        .unwrap_or(false);

    if is_zip {
        xlsxtex::write_archive(&files, File::create(output)?)?;
    } else {
        fs::create_dir_all(output)?;
        for (name, latex) in &files {
            fs::write(output.join(name), latex)?;
        }
    }

    Ok(files.len())
}

fn handle_error(error: XlsxToTexError) {
    match error {
        XlsxToTexError::Io(io_err) => {
            eprintln!("I/O Error: {}", io_err);
            eprintln!("Please check that the file exists and you have permission to access it.");
        }
        XlsxToTexError::Parse(parse_err) => {
            eprintln!("Parse Error: {}", parse_err);
            eprintln!("The file may not be a valid spreadsheet or may be corrupted.");
        }
        XlsxToTexError::Config(msg) => {
            eprintln!("Configuration Error: {}", msg);
            eprintln!("Please check the excluded columns, widths and sheet selection.");
        }
        XlsxToTexError::Zip(msg) => {
            eprintln!("ZIP Archive Error: {}", msg);
        }
        XlsxToTexError::SecurityViolation(msg) => {
            eprintln!("Security Violation: {}", msg);
            eprintln!("The file violates security constraints (e.g., file size limit).");
        }
        XlsxToTexError::NoSheets => {
            eprintln!("No sheets were selected for conversion.");
        }
    }
}

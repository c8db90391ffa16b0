//! Custom Configuration Example
//!
//! This example demonstrates how to use custom configuration options
//! such as sheet selection, excluded columns, auto-distributed widths and font size,
//! and how to load the same settings from JSON.

use std::fs::File;
use xlsxtex::{ConverterBuilder, FontSize, RenderOptions, SheetSelector};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Get input file path from command line arguments or use default
    let input_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "demos/fixtures/sample.xlsx".to_string());

    // Get output archive path from command line arguments or use default
    let output_path = std::env::args()
        .nth(2)
        .unwrap_or_else(|| "demos/fixtures/tables.zip".to_string());

    println!(
        "Converting {} to {} with custom settings...",
        input_path, output_path
    );

    // Create a converter with custom settings
    let converter = ConverterBuilder::new()
        // Select only the first sheet (index 0)
        .with_sheet_selector(SheetSelector::Index(0))
        // Keep A, B and F-I
        .with_excluded_columns(["C", "D", "E"])
        // A and B get three times the width of every other column
        .with_total_table_width(15.6)
        // Smaller type for wide tables
        .with_font_size(FontSize::Scriptsize)
        .build()?;

    println!(
        "Layout: {} column(s), {:.2}cm total",
        converter.column_count(),
        converter.total_width_cm()
    );

    // Convert and package every table into a zip archive
    let input = File::open(&input_path)?;
    let output = File::create(&output_path)?;
    converter.convert_to_archive(input, output)?;

    println!("Conversion completed successfully!");
    println!("Output written to: {}", output_path);

    // The same settings expressed as JSON, with manual widths instead
    let options = RenderOptions::from_json(
        r#"{
            "excluded_columns": ["C", "D", "E"],
            "column_widths": {"A": "6.7", "B": "4.0", "C": "2.0"},
            "font_size": "scriptsize"
        }"#,
    )?;
    let manual = ConverterBuilder::new().with_options(options).build()?;

    println!(
        "\nManual layout from JSON: {} column(s), {:.2}cm total",
        manual.column_count(),
        manual.total_width_cm()
    );

    Ok(())
}

//! xlsxtex - Excel worksheets to LaTeX longtables
//!
//! This crate reads spreadsheet workbooks (XLSX, XLS, XLSB, ODS via calamine) and
//! renders every worksheet as a LaTeX `longtable` that breaks across pages, with a
//! colored title banner, a repeated header row and highlighted section rows.
//!
//! Each worksheet is expected to hold the table title in A1, column headers in
//! row 2 and data from row 3 on. Only columns A–I are considered.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::fs::File;
//! use xlsxtex::ConverterBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Default settings: columns B-E excluded, A = 4cm, others 2cm, \footnotesize
//!     let converter = ConverterBuilder::new().build()?;
//!
//!     // One entry per worksheet, keyed by "<sanitized sheet name>.tex"
//!     let files = converter.convert(File::open("example.xlsx")?)?;
//!     for (name, latex) in &files {
//!         std::fs::write(name, latex)?;
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Auto-distributed widths
//!
//! With a total table width, columns A and B get three times the width of every
//! other participating column:
//!
//! ```rust,no_run
//! use std::fs::File;
//! use xlsxtex::{ConverterBuilder, FontSize};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new()
//!         .with_excluded_columns(["C", "D", "E"])
//!         .with_total_table_width(15.6)
//!         .with_font_size(FontSize::Scriptsize)
//!         .build()?;
//!
//!     // Package every rendered table into a single zip archive
//!     let output = File::create("tables.zip")?;
//!     converter.convert_to_archive(File::open("example.xlsx")?, output)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # JSON options
//!
//! ```rust
//! use xlsxtex::{ConverterBuilder, RenderOptions};
//!
//! # fn main() -> Result<(), xlsxtex::XlsxToTexError> {
//! let options = RenderOptions::from_json(
//!     r#"{"excluded_columns": ["B", "C", "D", "E"], "column_widths": {"A": "4.0", "C": "2.0"}}"#,
//! )?;
//! let converter = ConverterBuilder::new().with_options(options).build()?;
//! assert_eq!(converter.column_count(), 5);
//! # Ok(())
//! # }
//! ```
//!
//! # Rendering in-memory sheets
//!
//! ```rust
//! use xlsxtex::{CellValue, ConverterBuilder, Worksheet};
//!
//! # fn main() -> Result<(), xlsxtex::XlsxToTexError> {
//! let sheet = Worksheet::new(
//!     "Tasks",
//!     vec![
//!         vec![CellValue::from("Tasks")],
//!         vec![CellValue::from("Name")],
//!         vec![CellValue::from("• draft\n• review")],
//!     ],
//! );
//!
//! let converter = ConverterBuilder::new()
//!     .with_excluded_columns(["B", "C", "D", "E", "F", "G", "H", "I"])
//!     .build()?;
//! let latex = converter.render_sheet(&sheet)?;
//! assert!(latex.contains("• draft \\newline • review"));
//! # Ok(())
//! # }
//! ```

mod api;
mod archive;
mod builder;
mod error;
mod formatter;
mod layout;
mod options;
mod output;
mod parser;
mod security;
mod table;
mod types;

// 公開API
pub use api::{FontSize, SheetSelector};
pub use archive::write_archive;
pub use builder::{Converter, ConverterBuilder};
pub use error::XlsxToTexError;
pub use layout::{DEFAULT_OTHER_WIDTH_CM, DEFAULT_PRIMARY_WIDTH_CM};
pub use options::{RenderOptions, WidthValue};
pub use types::{CellValue, Worksheet};

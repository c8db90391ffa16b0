//! LaTeX longtable Writer
//!
//! `TableDocument`のセクションを`longtable`環境として書き出します。

use std::io::Write;

use crate::api::ColumnAlignment;
use crate::error::XlsxToTexError;
use crate::layout::ColumnSpec;
use crate::table::{BodyRow, TableDocument, TableSection};

/// ヘッダー行・見出し行の背景色（HTML形式）
pub(crate) const HEADER_COLOR_HTML: &str = "00ACD2";

const COLOR_PREAMBLE: &str = "\
% Add these packages to your LaTeX document preamble:
% \\usepackage{array}
% \\usepackage{xcolor}
% \\usepackage{colortbl}
% \\usepackage{longtable}
";

/// LaTeX形式のライター
pub(crate) struct LatexWriter;

impl LatexWriter {
    pub fn render<W: Write>(
        &self,
        doc: &TableDocument,
        writer: &mut W,
    ) -> Result<(), XlsxToTexError> {
        let n = doc.column_count;
        let width = format!("{:.2}cm", doc.total_width_cm);

        for section in &doc.sections {
            match section {
                TableSection::ColorPreamble => {
                    write!(writer, "{}", COLOR_PREAMBLE)?;
                    writeln!(writer, "\\definecolor{{headercolor}}{{HTML}}{{{}}}", HEADER_COLOR_HTML)?;
                    writeln!(writer)?;
                }
                TableSection::FontSize(size) => {
                    writeln!(writer, "\\{}", size.as_command())?;
                }
                TableSection::Begin(columns) => {
                    writeln!(writer, "\\begin{{longtable}}{{{}}}", tabular_spec(columns))?;
                }
                TableSection::FirstHead { title, headers } => {
                    write_head(writer, n, &width, title, headers)?;
                    writeln!(writer, "\\endfirsthead")?;
                    writeln!(writer)?;
                }
                TableSection::RepeatHead { title, headers } => {
                    let continued = format!("{} (continued)", title);
                    write_head(writer, n, &width, &continued, headers)?;
                    writeln!(writer, "\\endhead")?;
                    writeln!(writer)?;
                }
                TableSection::Foot => {
                    writeln!(writer, "\\hline")?;
                    writeln!(
                        writer,
                        "\\multicolumn{{{}}}{{|r|}}{{\\textit{{Continued on next page...}}}} \\\\",
                        n
                    )?;
                    writeln!(writer, "\\hline")?;
                    writeln!(writer, "\\endfoot")?;
                    writeln!(writer)?;
                }
                TableSection::LastFoot => {
                    writeln!(writer, "\\hline")?;
                    writeln!(writer, "\\endlastfoot")?;
                }
                TableSection::Body(rows) => {
                    // 行間に罫線を入れる。最終行の罫線は\endlastfootが出力する
                    for (i, row) in rows.iter().enumerate() {
                        if i > 0 {
                            writeln!(writer, "\\hline")?;
                        }
                        writeln!(writer, "{}", body_row(row))?;
                    }
                }
                TableSection::End => {
                    writeln!(writer, "\\end{{longtable}}")?;
                }
            }
        }

        writer.flush()?;
        Ok(())
    }
}

/// 列指定を生成（例: `|m{4.00cm}|>{\centering\arraybackslash}m{2.00cm}|`）
fn tabular_spec(columns: &[ColumnSpec]) -> String {
    let parts: Vec<String> = columns
        .iter()
        .map(|column| match column.alignment {
            ColumnAlignment::Paragraph => format!("m{{{:.2}cm}}", column.width_cm),
            ColumnAlignment::Centered => {
                format!(">{{\\centering\\arraybackslash}}m{{{:.2}cm}}", column.width_cm)
            }
        })
        .collect();
    format!("|{}|", parts.join("|"))
}

fn write_head<W: Write>(
    writer: &mut W,
    n: usize,
    width: &str,
    title: &str,
    headers: &[String],
) -> Result<(), XlsxToTexError> {
    writeln!(writer, "\\hline")?;
    writeln!(
        writer,
        "\\rowcolor{{headercolor}}\\multicolumn{{{}}}{{|c|}}{{\\parbox[c][4ex][c]{{{}}}{{\\centering\\textcolor{{white}}{{\\textbf{{\\normalsize{{{}}}}}}}}}}} \\\\",
        n, width, title
    )?;
    writeln!(writer, "\\hline")?;
    let cells: Vec<String> = headers
        .iter()
        .map(|h| format!("\\textcolor{{white}}{{\\textbf{{{}}}}}", h))
        .collect();
    writeln!(writer, "\\rowcolor{{headercolor}}{} \\\\", cells.join(" & "))?;
    writeln!(writer, "\\hline")?;
    Ok(())
}

fn body_row(row: &BodyRow) -> String {
    let line = format!("{} \\\\", row.cells().join(" & "));
    match row {
        BodyRow::Normal(_) => line,
        BodyRow::SectionHeader(_) => format!("\\rowcolor{{headercolor}}{}", line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FontSize;
    use crate::formatter::CellFormatter;
    use crate::layout::{TableLayout, WidthMode};
    use crate::types::{CellValue, Worksheet};
    use std::collections::BTreeSet;

    fn render(sheet: &Worksheet, excluded: &[char], mode: WidthMode, font: FontSize) -> String {
        let excluded: BTreeSet<char> = excluded.iter().copied().collect();
        let layout = TableLayout::plan(&excluded, mode);
        let doc = TableDocument::build(sheet, &layout, &CellFormatter::new(), font);
        let mut out = Vec::new();
        LatexWriter.render(&doc, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn sample() -> Worksheet {
        Worksheet::new(
            "Projects",
            vec![
                vec![CellValue::from("Projects")],
                vec![CellValue::from("Name"), CellValue::from("Status")],
                vec![CellValue::from("Alpha"), CellValue::from("Done")],
                vec![CellValue::from(""), CellValue::from("")],
                vec![CellValue::from("Beta"), CellValue::from("50%")],
            ],
        )
    }

    const AB_ONLY: [char; 7] = ['C', 'D', 'E', 'F', 'G', 'H', 'I'];

    #[test]
    fn test_tabular_spec_manual() {
        let out = render(
            &sample(),
            &AB_ONLY,
            WidthMode::Manual { a: 4.0, b: 2.0, other: 2.0 },
            FontSize::Footnotesize,
        );
        assert!(out.contains("\\begin{longtable}{|m{4.00cm}|m{2.00cm}|}"));
        assert!(out.contains("\\parbox[c][4ex][c]{6.00cm}"));
    }

    #[test]
    fn test_tabular_spec_centered_columns() {
        let out = render(
            &sample(),
            &['B', 'C', 'D', 'E', 'G', 'H', 'I'],
            WidthMode::Auto { total: 8.0 },
            FontSize::Scriptsize,
        );
        // A: 3×2.00, F: 2.00
        assert!(out.contains(
            "\\begin{longtable}{|m{6.00cm}|>{\\centering\\arraybackslash}m{2.00cm}|}"
        ));
        assert!(out.contains("\\scriptsize\n"));
    }

    /// 出力されたcm値を列挙
    fn cm_values(line: &str) -> Vec<f64> {
        line.split("cm}")
            .filter_map(|part| part.rsplit('{').next())
            .filter_map(|value| value.parse::<f64>().ok())
            .collect()
    }

    #[test]
    fn test_banner_width_matches_column_sum() {
        let sheet = Worksheet::new("Wide", vec![vec![CellValue::from("Wide")]]);
        for total in [13.052, 15.6, 9.99, 21.0, 7.777] {
            let out = render(&sheet, &[], WidthMode::Auto { total }, FontSize::Footnotesize);

            let spec = out
                .lines()
                .find(|l| l.starts_with("\\begin{longtable}"))
                .unwrap();
            let columns = cm_values(spec);
            assert_eq!(columns.len(), 9);
            let sum: f64 = columns.iter().sum();

            let banner = out.lines().find(|l| l.contains("\\parbox")).unwrap();
            let declared = cm_values(banner)[0];

            assert_eq!(format!("{:.2}", sum), format!("{:.2}", declared), "total {}", total);
        }
    }

    #[test]
    fn test_heads_and_foot() {
        let out = render(&sample(), &AB_ONLY, WidthMode::default(), FontSize::Footnotesize);

        assert!(out.contains("\\definecolor{headercolor}{HTML}{00ACD2}"));
        assert!(out.contains("\\textbf{\\normalsize{Projects}}"));
        assert!(out.contains("\\textbf{\\normalsize{Projects (continued)}}"));
        assert!(out.contains(
            "\\rowcolor{headercolor}\\textcolor{white}{\\textbf{Name}} & \\textcolor{white}{\\textbf{Status}} \\\\"
        ));
        assert!(out.contains("\\multicolumn{2}{|r|}{\\textit{Continued on next page...}} \\\\"));
        assert_eq!(out.matches("\\endfirsthead").count(), 1);
        assert_eq!(out.matches("\\endhead").count(), 1);
        assert_eq!(out.matches("\\endlastfoot").count(), 1);
        assert!(out.trim_end().ends_with("\\end{longtable}"));
    }

    #[test]
    fn test_body_rows() {
        let out = render(&sample(), &AB_ONLY, WidthMode::default(), FontSize::Footnotesize);
        let body = out.split("\\endlastfoot\n").nth(1).unwrap();
        assert_eq!(
            body,
            "Alpha & Done \\\\\n\\hline\nBeta & 50\\% \\\\\n\\end{longtable}\n"
        );
    }

    #[test]
    fn test_section_header_row_highlighted() {
        let sheet = Worksheet::new(
            "S",
            vec![
                vec![CellValue::from("T")],
                vec![],
                vec![CellValue::from("Phase 1")],
            ],
        );
        let out = render(&sheet, &AB_ONLY, WidthMode::default(), FontSize::Footnotesize);
        assert!(out.contains("\\rowcolor{headercolor}Phase 1 &  \\\\\n"));
    }

    #[test]
    fn test_zero_columns_does_not_fail() {
        let all = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I'];
        let out = render(&sample(), &all, WidthMode::default(), FontSize::Footnotesize);
        assert!(out.contains("\\begin{longtable}{||}"));
        assert!(out.contains("\\multicolumn{0}"));
        assert!(out.contains("{0.00cm}"));
    }
}

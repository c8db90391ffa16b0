//! Table Module
//!
//! ワークシートとレイアウトから、出力マークアップに依存しないテーブル構造
//! （`TableSection`の順序付きリスト）を構築するモジュール。
//! データ行の走査（空行のスキップ、セクション見出し行の検出）もここで行います。

use crate::api::FontSize;
use crate::formatter::CellFormatter;
use crate::layout::{ColumnSpec, TableLayout};
use crate::types::{CellValue, Worksheet, FIRST_DATA_ROW, HEADER_ROW};

/// タイトルが空の場合の既定値
pub(crate) const DEFAULT_TITLE: &str = "Table";

/// 本文の1行
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BodyRow {
    /// 通常のデータ行（エスケープ済みセル）
    Normal(Vec<String>),

    /// A列のみに内容がある行。背景色付きの見出し行として出力する
    SectionHeader(Vec<String>),
}

impl BodyRow {
    pub fn cells(&self) -> &[String] {
        match self {
            BodyRow::Normal(cells) | BodyRow::SectionHeader(cells) => cells,
        }
    }
}

/// テーブルを構成するセクション
///
/// 出力時はこの順序で直列化されます。
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TableSection {
    /// 色定義と必要パッケージのコメント
    ColorPreamble,

    /// フォントサイズ宣言
    FontSize(FontSize),

    /// `\begin{longtable}`と列指定
    Begin(Vec<ColumnSpec>),

    /// 最初のページのヘッダー（タイトル帯と列見出し）
    FirstHead { title: String, headers: Vec<String> },

    /// 改ページ後に繰り返すヘッダー（"(continued)"付きタイトル帯）
    RepeatHead { title: String, headers: Vec<String> },

    /// 改ページ前のフッター（"Continued on next page..."）
    Foot,

    /// 最終ページのフッター
    LastFoot,

    /// データ行
    Body(Vec<BodyRow>),

    /// `\end{longtable}`
    End,
}

/// 1シート分のテーブル構造
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TableDocument {
    /// 参加列の数
    pub column_count: usize,

    /// テーブル全体の幅（cm）
    pub total_width_cm: f64,

    /// セクション（出力順）
    pub sections: Vec<TableSection>,
}

impl TableDocument {
    /// ワークシートからテーブル構造を構築
    pub fn build(
        sheet: &Worksheet,
        layout: &TableLayout,
        formatter: &CellFormatter,
        font_size: FontSize,
    ) -> Self {
        let columns: Vec<ColumnSpec> = layout.participating().copied().collect();

        let title = if is_missing(sheet.title()) {
            DEFAULT_TITLE.to_string()
        } else {
            formatter.format_cell(sheet.title())
        };

        let headers: Vec<String> = columns
            .iter()
            .map(|column| {
                let value = sheet.cell(HEADER_ROW, column.index);
                if is_missing(value) {
                    format!("Column {}", column.letter)
                } else {
                    formatter.format_cell(value)
                }
            })
            .collect();

        let rows = emit_rows(sheet, layout, &columns, formatter);

        tracing::debug!(
            sheet = sheet.name(),
            columns = columns.len(),
            rows = rows.len(),
            "built table document"
        );

        let sections = vec![
            TableSection::ColorPreamble,
            TableSection::FontSize(font_size),
            TableSection::Begin(columns.clone()),
            TableSection::FirstHead {
                title: title.clone(),
                headers: headers.clone(),
            },
            TableSection::RepeatHead { title, headers },
            TableSection::Foot,
            TableSection::LastFoot,
            TableSection::Body(rows),
            TableSection::End,
        ];

        Self {
            column_count: columns.len(),
            total_width_cm: layout.total_width_cm(),
            sections,
        }
    }

    /// 本文の行
    pub fn body_rows(&self) -> &[BodyRow] {
        self.sections
            .iter()
            .find_map(|s| match s {
                TableSection::Body(rows) => Some(rows.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }
}

fn is_missing(value: &CellValue) -> bool {
    value.is_blank() || value.is_falsy()
}

/// データ行（3行目以降）を1回の走査で本文行に変換
///
/// 参加列がすべて空白の行は出力しません。A列が参加していて、A列のみに内容が
/// ある行はセクション見出し行になります。行の順序はシート上の順序のままです。
fn emit_rows(
    sheet: &Worksheet,
    layout: &TableLayout,
    columns: &[ColumnSpec],
    formatter: &CellFormatter,
) -> Vec<BodyRow> {
    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for row_number in FIRST_DATA_ROW..=sheet.row_count() {
        let raw: Vec<&CellValue> = columns
            .iter()
            .map(|column| sheet.cell(row_number, column.index))
            .collect();

        if raw.iter().all(|value| value.is_blank()) {
            skipped += 1;
            continue;
        }

        let cells: Vec<String> = raw.iter().map(|value| formatter.format_cell(value)).collect();

        let only_first_column = layout.includes_first_column()
            && !raw[0].is_blank()
            && raw[1..].iter().all(|value| value.is_blank());

        if only_first_column {
            rows.push(BodyRow::SectionHeader(cells));
        } else {
            rows.push(BodyRow::Normal(cells));
        }
    }

    if skipped > 0 {
        tracing::trace!(sheet = sheet.name(), skipped, "skipped empty rows");
    }

    rows
}

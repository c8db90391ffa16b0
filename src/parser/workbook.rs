//! Workbook Parser
//!
//! calamineを使用してワークブックを開き、シートを`Worksheet`として読み込みます。
//! XLSX以外にも、calamineが自動判別できる形式（XLS、XLSB、ODS）を受け付けます。

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use std::io::{Cursor, Read, Seek};

use crate::api::SheetSelector;
use crate::error::XlsxToTexError;
use crate::security::SecurityConfig;
use crate::types::{CellValue, Worksheet, COLUMN_LETTERS};

/// ワークブックパーサー
///
/// calamineのラッパーとして、ワークブックレベルの操作を提供します。
pub(crate) struct WorkbookParser {
    workbook: Sheets<Cursor<Vec<u8>>>,
}

impl WorkbookParser {
    /// ワークブックを開く
    ///
    /// 入力全体をメモリに読み込んでから解析します。
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - ワークブックの読み込みに成功した場合
    /// * `Err(XlsxToTexError::SecurityViolation)` - 入力サイズが上限を超えた場合
    /// * `Err(XlsxToTexError::Parse)` - ワークブックとして解析できなかった場合
    pub fn open<R: Read + Seek>(mut reader: R) -> Result<Self, XlsxToTexError> {
        let security_config = SecurityConfig::default();

        let mut buffer = Vec::new();
        let bytes_read = reader.read_to_end(&mut buffer)?;

        if bytes_read as u64 > security_config.max_input_file_size {
            return Err(XlsxToTexError::SecurityViolation(format!(
                "Input file size exceeds maximum: {} bytes (max: {} bytes)",
                bytes_read, security_config.max_input_file_size
            )));
        }

        let workbook = open_workbook_auto_from_rs(Cursor::new(buffer))?;
        Ok(Self { workbook })
    }

    /// すべてのシート名をワークブック順で取得
    pub fn get_sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    /// シート選択方式に基づいてシートを選択
    ///
    /// # 戻り値
    ///
    /// * `Ok(Vec<String>)` - 選択されたシート名のリスト
    /// * `Err(XlsxToTexError::Config)` - シートが見つからない、またはインデックスが範囲外の場合
    pub fn select_sheets(&self, selector: &SheetSelector) -> Result<Vec<String>, XlsxToTexError> {
        let all_sheet_names = self.get_sheet_names();

        let by_index = |index: usize| -> Result<String, XlsxToTexError> {
            all_sheet_names.get(index).cloned().ok_or_else(|| {
                XlsxToTexError::Config(format!(
                    "Sheet index {} is out of range (total: {})",
                    index,
                    all_sheet_names.len()
                ))
            })
        };
        let by_name = |name: &String| -> Result<String, XlsxToTexError> {
            if all_sheet_names.contains(name) {
                Ok(name.clone())
            } else {
                Err(XlsxToTexError::Config(format!("Sheet '{}' not found", name)))
            }
        };

        match selector {
            SheetSelector::All => Ok(all_sheet_names.clone()),
            SheetSelector::Index(index) => Ok(vec![by_index(*index)?]),
            SheetSelector::Name(name) => Ok(vec![by_name(name)?]),
            SheetSelector::Indices(indices) => indices.iter().map(|&i| by_index(i)).collect(),
            SheetSelector::Names(names) => names.iter().map(by_name).collect(),
        }
    }

    /// シートを読み込み、A1を原点とする`Worksheet`を生成
    ///
    /// 列はA〜Iのみを読み込みます。
    pub fn read_sheet(&mut self, sheet_name: &str) -> Result<Worksheet, XlsxToTexError> {
        let range = self.workbook.worksheet_range(sheet_name)?;
        let rows = dense_rows(&range);

        tracing::debug!(sheet = sheet_name, rows = rows.len(), "read worksheet");

        Ok(Worksheet::new(sheet_name, rows))
    }
}

/// calamineの範囲を、A1から最終セルまでの稠密な行データに変換
///
/// calamineの範囲は最初の非空セルから始まるため、絶対座標で取得します。
fn dense_rows(range: &Range<Data>) -> Vec<Vec<CellValue>> {
    let Some((end_row, end_col)) = range.end() else {
        return Vec::new();
    };
    let cols = (end_col as usize + 1).min(COLUMN_LETTERS.len());

    (0..=end_row)
        .map(|row| {
            (0..cols)
                .map(|col| {
                    range
                        .get_value((row, col as u32))
                        .map(convert_cell)
                        .unwrap_or(CellValue::Empty)
                })
                .collect()
        })
        .collect()
}

/// calamineのセルデータを`CellValue`に変換
fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        // 1900/1904年システムの判別はcalamineに任せる
        Data::DateTime(dt) if dt.is_datetime() => dt
            .as_datetime()
            .map(CellValue::DateTime)
            .unwrap_or(CellValue::Number(dt.as_f64())),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
        Data::Empty => CellValue::Empty,
    }
}

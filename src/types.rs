//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use chrono::{NaiveDateTime, Timelike};

use crate::error::XlsxToTexError;

/// 列の全体集合（A〜I、固定9列）
pub const COLUMN_LETTERS: [char; 9] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I'];

/// タイトルが置かれる行（1始まり、A列）
pub const TITLE_ROW: u32 = 1;

/// 列見出しが置かれる行（1始まり）
pub const HEADER_ROW: u32 = 2;

/// データ行の開始行（1始まり）
pub const FIRST_DATA_ROW: u32 = 3;

/// セルの値を表す列挙型
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// 数値（f64）
    Number(f64),

    /// 文字列
    String(String),

    /// 論理値
    Bool(bool),

    /// 日時
    DateTime(NaiveDateTime),

    /// エラー値（例: #DIV/0!）
    Error(String),

    /// 空セル
    Empty,
}

static EMPTY_CELL: CellValue = CellValue::Empty;

impl CellValue {
    /// 値が空白かどうかを判定
    ///
    /// 空セル、または文字列化してtrimした結果が空になる値を空白とみなします。
    /// 行のスキップ判定とセクション見出し行の判定に使用します。
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::String(s) => s.trim().is_empty(),
            other => other.to_display_string().trim().is_empty(),
        }
    }

    /// 値が偽値かどうかを判定
    ///
    /// 空セル、空文字列、数値の0、`false`は偽値として扱い、エスケープ結果は空文字列になります。
    pub fn is_falsy(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::String(s) => s.is_empty(),
            CellValue::Number(n) => *n == 0.0,
            CellValue::Bool(b) => !b,
            CellValue::DateTime(_) | CellValue::Error(_) => false,
        }
    }

    /// 値を文字列として取得（エスケープ前）
    pub fn to_display_string(&self) -> String {
        match self {
            CellValue::Number(n) => n.to_string(),
            CellValue::String(s) => s.clone(),
            CellValue::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
            CellValue::DateTime(dt) => {
                if dt.num_seconds_from_midnight() == 0 && dt.nanosecond() == 0 {
                    dt.format("%Y-%m-%d").to_string()
                } else {
                    dt.format("%Y-%m-%d %H:%M:%S").to_string()
                }
            }
            CellValue::Error(e) => e.clone(),
            CellValue::Empty => String::new(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Empty)
    }
}

/// 列文字（A〜I）を0始まりのインデックスに変換
///
/// 大文字・小文字は区別しません。全体集合に含まれない文字は設定エラーになります。
pub(crate) fn column_index(letter: &str) -> Result<usize, XlsxToTexError> {
    let mut chars = letter.trim().chars();
    let index = match (chars.next(), chars.next()) {
        (Some(c), None) => COLUMN_LETTERS
            .iter()
            .position(|&l| l == c.to_ascii_uppercase()),
        _ => None,
    };

    index.ok_or_else(|| {
        XlsxToTexError::Config(format!(
            "Unknown column '{}' (expected a single letter from A to I)",
            letter
        ))
    })
}

/// ワークシート（メモリ上のセルグリッド）
///
/// 1行目A列がタイトル、2行目が列見出し、3行目以降がデータ行です。
/// 範囲外の座標は空セルとして扱います。
///
/// ```rust
/// use xlsxtex::{CellValue, Worksheet};
///
/// let sheet = Worksheet::new(
///     "Projects",
///     vec![
///         vec![CellValue::from("Projects")],
///         vec![CellValue::from("Name"), CellValue::from("Status")],
///         vec![CellValue::from("Alpha"), CellValue::from("Done")],
///     ],
/// );
/// assert_eq!(sheet.cell(3, 1), &CellValue::from("Done"));
/// assert_eq!(sheet.cell(9, 8), &CellValue::Empty);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Worksheet {
    name: String,
    rows: Vec<Vec<CellValue>>,
}

impl Worksheet {
    /// 行データからワークシートを生成
    ///
    /// `rows[0]`が1行目に対応します。行ごとに列数が異なっていても構いません。
    pub fn new(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// シート名
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 行数（最終行の行番号）
    pub fn row_count(&self) -> u32 {
        self.rows.len() as u32
    }

    /// セル値を取得（行は1始まり、列は0始まり）
    pub fn cell(&self, row: u32, col: usize) -> &CellValue {
        if row == 0 {
            return &EMPTY_CELL;
        }
        self.rows
            .get(row as usize - 1)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    /// タイトルセル（1行目A列）
    pub fn title(&self) -> &CellValue {
        self.cell(TITLE_ROW, 0)
    }

    /// データ行（3行目以降）をシート順に列挙
    pub fn data_rows(&self) -> impl Iterator<Item = &[CellValue]> {
        self.rows
            .iter()
            .skip(FIRST_DATA_ROW as usize - 1)
            .map(|r| r.as_slice())
    }
}

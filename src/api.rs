//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::error::XlsxToTexError;

/// テーブル全体に適用するフォントサイズ
///
/// `longtable`の直前に出力されるサイズ宣言（例: `\footnotesize`）を指定します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
#[non_exhaustive]
pub enum FontSize {
    /// `\tiny`
    Tiny,

    /// `\scriptsize`
    ///
    /// 列数が多い場合に使用します。
    Scriptsize,

    /// `\footnotesize`（デフォルト）
    #[default]
    Footnotesize,

    /// `\small`
    Small,

    /// `\normalsize`
    Normalsize,
}

impl FontSize {
    /// LaTeXのサイズ宣言名（バックスラッシュなし）
    pub fn as_command(&self) -> &'static str {
        match self {
            FontSize::Tiny => "tiny",
            FontSize::Scriptsize => "scriptsize",
            FontSize::Footnotesize => "footnotesize",
            FontSize::Small => "small",
            FontSize::Normalsize => "normalsize",
        }
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_command())
    }
}

impl FromStr for FontSize {
    type Err = XlsxToTexError;

    /// サイズ名を解析します。先頭のバックスラッシュは許容します。
    ///
    /// ```rust
    /// use xlsxtex::FontSize;
    ///
    /// assert_eq!("scriptsize".parse::<FontSize>().unwrap(), FontSize::Scriptsize);
    /// assert_eq!("\\footnotesize".parse::<FontSize>().unwrap(), FontSize::Footnotesize);
    /// assert!("huge".parse::<FontSize>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('\\') {
            "tiny" => Ok(FontSize::Tiny),
            "scriptsize" => Ok(FontSize::Scriptsize),
            "footnotesize" => Ok(FontSize::Footnotesize),
            "small" => Ok(FontSize::Small),
            "normalsize" => Ok(FontSize::Normalsize),
            other => Err(XlsxToTexError::Config(format!(
                "Unknown font size '{}' (expected one of: tiny, scriptsize, footnotesize, small, normalsize)",
                other
            ))),
        }
    }
}

impl TryFrom<String> for FontSize {
    type Error = XlsxToTexError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// 列内のテキスト配置
///
/// A列・B列は段落ブロック（折り返しあり）、それ以外の列は水平・垂直中央揃えです。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColumnAlignment {
    /// 段落ブロック: `m{<width>cm}`
    Paragraph,

    /// 中央揃え: `>{\centering\arraybackslash}m{<width>cm}`
    Centered,
}

/// シート選択方式
///
/// 変換対象のシートを選択する方法を指定します。
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SheetSelector {
    /// すべてのシートを変換（デフォルト）
    All,

    /// インデックス指定（0始まり）
    Index(usize),

    /// シート名指定
    Name(String),

    /// 複数のインデックス指定
    Indices(Vec<usize>),

    /// 複数のシート名指定
    Names(Vec<String>),
}

//! Render Options
//!
//! JSON形式のレンダリング設定を読み込むモジュール。
//! 列幅は数値（`4.0`）と数値文字列（`"4.0"`）のどちらでも指定できます。

use serde::Deserialize;
use std::collections::BTreeMap;

use crate::api::FontSize;
use crate::error::XlsxToTexError;

/// 列幅の指定値
///
/// JSONの数値または文字列を受け付け、`ConverterBuilder::build()`時に検証されます。
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WidthValue {
    /// 数値指定
    Number(f64),

    /// 文字列指定（例: `"4.0"`）
    Text(String),
}

impl WidthValue {
    /// 幅をcm単位の数値に解決
    ///
    /// 数値として解析できない値、負の値、有限でない値は設定エラーになります。
    /// `label`はエラーメッセージ内で値を識別するために使用します。
    pub(crate) fn resolve(&self, label: &str) -> Result<f64, XlsxToTexError> {
        let value = match self {
            WidthValue::Number(n) => *n,
            WidthValue::Text(s) => s.trim().parse::<f64>().map_err(|_| {
                XlsxToTexError::Config(format!("{} must be a valid number, got '{}'", label, s))
            })?,
        };

        if !value.is_finite() || value < 0.0 {
            return Err(XlsxToTexError::Config(format!(
                "{} must be a finite, non-negative number, got {}",
                label, value
            )));
        }

        Ok(value)
    }

    /// 空白のみの文字列かどうか
    pub(crate) fn is_blank(&self) -> bool {
        matches!(self, WidthValue::Text(s) if s.trim().is_empty())
    }
}

impl From<f64> for WidthValue {
    fn from(value: f64) -> Self {
        WidthValue::Number(value)
    }
}

impl From<&str> for WidthValue {
    fn from(value: &str) -> Self {
        WidthValue::Text(value.to_string())
    }
}

/// レンダリング設定
///
/// 省略されたフィールドは`ConverterBuilder`の現在の値を変更しません。
///
/// # 使用例
///
/// ```rust
/// use xlsxtex::{ConverterBuilder, RenderOptions};
///
/// # fn main() -> Result<(), xlsxtex::XlsxToTexError> {
/// let options = RenderOptions::from_json(
///     r#"{"excluded_columns": ["C", "D"], "column_widths": {"A": "5.0"}, "font_size": "scriptsize"}"#,
/// )?;
/// let converter = ConverterBuilder::new().with_options(options).build()?;
/// # let _ = converter;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    /// 除外する列文字
    pub excluded_columns: Option<Vec<String>>,

    /// 列文字ごとの幅（cm）
    pub column_widths: BTreeMap<String, WidthValue>,

    /// テーブル全体の幅（cm）。指定すると自動配分モードになる
    pub total_table_width: Option<WidthValue>,

    /// フォントサイズ
    pub font_size: Option<FontSize>,
}

impl RenderOptions {
    /// JSON文字列から設定を読み込む
    ///
    /// # 戻り値
    ///
    /// * `Ok(RenderOptions)` - 読み込みに成功した場合
    /// * `Err(XlsxToTexError::Config)` - JSONが不正な場合
    pub fn from_json(json: &str) -> Result<Self, XlsxToTexError> {
        serde_json::from_str(json)
            .map_err(|e| XlsxToTexError::Config(format!("Invalid render options: {}", e)))
    }
}

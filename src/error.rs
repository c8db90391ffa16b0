//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// xlsxtexクレート全体で使用するエラー型
///
/// ワークブックの読み込み、設定の検証、LaTeX出力、ZIPアーカイブの書き込み中に
/// 発生するすべてのエラーを統一的に扱うために使用されます。
///
/// # エラーの種類
///
/// - `Io`: I/O操作中に発生したエラー
/// - `Parse`: ワークブックを開けなかった・解析できなかったエラー（calamine由来）
/// - `Zip`: ZIPアーカイブの書き込みエラー
/// - `Config`: 設定の検証に失敗したエラー（数値でない列幅、存在しない列など）
/// - `SecurityViolation`: 入力サイズ制限やエントリ名の検証に違反したエラー
/// - `NoSheets`: ワークブックに変換対象のシートが1枚も無いエラー
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxtex::{ConverterBuilder, XlsxToTexError};
///
/// let result = ConverterBuilder::new()
///     .with_column_width_str("A", "wide")
///     .build();
///
/// match result {
///     Err(XlsxToTexError::Config(msg)) => println!("設定エラー: {}", msg),
///     _ => {}
/// }
/// ```
#[derive(Error, Debug)]
pub enum XlsxToTexError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ワークブックの解析中に発生したエラー
    ///
    /// 破損したファイルやサポートされていない形式など、calamineがワークブックを
    /// 開けなかった場合に発生します。バッチ全体がこのエラーで失敗します。
    #[error("Error processing Excel file: {0}")]
    Parse(#[from] calamine::Error),

    /// ZIPアーカイブの書き込みエラー
    #[error("ZIP archive error: {0}")]
    Zip(String),

    /// 設定の検証に失敗したエラー
    ///
    /// `ConverterBuilder::build()`時に設定を検証し、無効な設定が検出された
    /// 場合に発生します。例えば、列幅が数値として解析できない場合や、
    /// A〜I以外の列が指定された場合などです。
    ///
    /// # 例
    ///
    /// ```rust,no_run
    /// use xlsxtex::{ConverterBuilder, XlsxToTexError};
    ///
    /// let result = ConverterBuilder::new()
    ///     .with_excluded_columns(["Z"])
    ///     .build();
    ///
    /// assert!(matches!(result, Err(XlsxToTexError::Config(_))));
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// セキュリティ制限に違反したエラー
    ///
    /// 入力ファイルサイズの上限超過や、アーカイブのエントリ名に
    /// パストラバーサルが含まれる場合に発生します。
    #[error("Security violation: {0}")]
    SecurityViolation(String),

    /// 変換対象のシートが存在しない
    #[error("No LaTeX files could be generated: the workbook has no sheets")]
    NoSheets,
}

impl From<zip::result::ZipError> for XlsxToTexError {
    fn from(err: zip::result::ZipError) -> Self {
        XlsxToTexError::Zip(err.to_string())
    }
}

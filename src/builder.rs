//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。

use indexmap::IndexMap;
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::io::{Read, Seek, Write};

use crate::api::{FontSize, SheetSelector};
use crate::error::XlsxToTexError;
use crate::formatter::CellFormatter;
use crate::layout::{TableLayout, WidthMode, DEFAULT_OTHER_WIDTH_CM, DEFAULT_PRIMARY_WIDTH_CM};
use crate::options::{RenderOptions, WidthValue};
use crate::output::LatexWriter;
use crate::parser::WorkbookParser;
use crate::security::sanitize_sheet_name;
use crate::table::TableDocument;
use crate::types::{column_index, Worksheet, COLUMN_LETTERS};

/// 出力ファイル名の拡張子
const TEX_EXTENSION: &str = "tex";

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct ConversionConfig {
    /// シート選択方式
    pub sheet_selector: SheetSelector,

    /// 除外する列文字
    pub excluded_columns: Vec<String>,

    /// 列文字ごとの幅（指定順。後の指定が優先される）
    pub column_widths: Vec<(String, WidthValue)>,

    /// テーブル全体の幅（Noneの場合は手動幅モード）
    pub total_table_width: Option<WidthValue>,

    /// フォントサイズ
    pub font_size: FontSize,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            sheet_selector: SheetSelector::All,
            excluded_columns: ["B", "C", "D", "E"].iter().map(|s| s.to_string()).collect(),
            column_widths: Vec::new(),
            total_table_width: None,
            font_size: FontSize::default(),
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// `Converter`インスタンスを段階的に構築するためのビルダーです。
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust
/// use xlsxtex::{ConverterBuilder, FontSize, SheetSelector};
///
/// # fn main() -> Result<(), xlsxtex::XlsxToTexError> {
/// let converter = ConverterBuilder::new()
///     .with_sheet_selector(SheetSelector::Index(0))
///     .with_excluded_columns(["C", "D"])
///     .with_column_width("A", 5.0)
///     .with_font_size(FontSize::Scriptsize)
///     .build()?;
/// # let _ = converter;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConverterBuilder {
    /// 内部設定（構築中）
    config: ConversionConfig,
}

impl Default for ConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - シート選択: すべてのシート
    /// - 除外列: B, C, D, E
    /// - 列幅: A = 4.0cm, B = 4.0cm, その他 = 2.0cm
    /// - テーブル全体の幅: なし（手動幅モード）
    /// - フォントサイズ: `\footnotesize`
    pub fn new() -> Self {
        Self {
            config: ConversionConfig::default(),
        }
    }

    /// 変換対象のシートを選択する
    pub fn with_sheet_selector(mut self, selector: SheetSelector) -> Self {
        self.config.sheet_selector = selector;
        self
    }

    /// 除外する列を設定する（既存の設定を置き換える）
    ///
    /// 列文字は大文字・小文字を区別しません。A〜I以外の文字は`build()`時にエラーになります。
    pub fn with_excluded_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.config.excluded_columns = columns
            .into_iter()
            .map(|c| c.as_ref().to_string())
            .collect();
        self
    }

    /// 列幅（cm）を設定する
    ///
    /// A・Bはそれぞれ独立した幅を持ち、Cに設定した幅はC〜Iのすべての参加列に適用されます。
    /// D〜Iに設定した幅は無視されます。
    pub fn with_column_width(mut self, letter: &str, width_cm: f64) -> Self {
        self.config
            .column_widths
            .push((letter.to_string(), WidthValue::Number(width_cm)));
        self
    }

    /// 列幅を文字列で設定する（例: `"4.0"`）
    ///
    /// 数値として解析できない場合は`build()`時にエラーになります。
    pub fn with_column_width_str(mut self, letter: &str, width_cm: &str) -> Self {
        self.config
            .column_widths
            .push((letter.to_string(), WidthValue::from(width_cm)));
        self
    }

    /// テーブル全体の幅（cm）を設定し、自動配分モードにする
    ///
    /// 自動配分モードでは、A・Bの幅はその他の列の3倍になります。
    pub fn with_total_table_width(mut self, width_cm: f64) -> Self {
        self.config.total_table_width = Some(WidthValue::Number(width_cm));
        self
    }

    /// フォントサイズを設定する
    pub fn with_font_size(mut self, size: FontSize) -> Self {
        self.config.font_size = size;
        self
    }

    /// `RenderOptions`の指定済みフィールドを適用する
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        if let Some(excluded) = options.excluded_columns {
            self.config.excluded_columns = excluded;
        }
        self.config.column_widths.extend(options.column_widths);
        if let Some(total) = options.total_table_width {
            self.config.total_table_width = Some(total);
        }
        if let Some(size) = options.font_size {
            self.config.font_size = size;
        }
        self
    }

    /// 設定を検証し、`Converter`インスタンスを生成する
    ///
    /// # 戻り値
    ///
    /// * `Ok(Converter)` - 設定が有効な場合
    /// * `Err(XlsxToTexError::Config)` - 列文字が不正、列幅が数値でない・負の値、
    ///   またはテーブル全体の幅が正の数でない場合
    pub fn build(self) -> Result<Converter, XlsxToTexError> {
        // 1. 除外列の検証
        let excluded = self
            .config
            .excluded_columns
            .iter()
            .map(|letter| column_index(letter).map(|index| COLUMN_LETTERS[index]))
            .collect::<Result<BTreeSet<char>, _>>()?;

        // 2. 列幅の検証（自動配分モードでも検証する）
        let mut primary = [DEFAULT_PRIMARY_WIDTH_CM; 2];
        let mut other = DEFAULT_OTHER_WIDTH_CM;
        for (letter, value) in &self.config.column_widths {
            let index = column_index(letter)?;
            let width = value.resolve(&format!("Width of column {}", letter))?;
            match index {
                0 | 1 => primary[index] = width,
                2 => other = width,
                _ => tracing::warn!(
                    column = letter.as_str(),
                    width,
                    "per-column widths for D-I are not supported; use C for all non-primary columns"
                ),
            }
        }

        // 3. 列幅モードの決定（空白文字列は未指定として扱う）
        let mode = match &self.config.total_table_width {
            Some(value) if !value.is_blank() => {
                let total = value.resolve("total_table_width")?;
                if total <= 0.0 {
                    return Err(XlsxToTexError::Config(format!(
                        "total_table_width must be greater than 0, got {}",
                        total
                    )));
                }
                WidthMode::Auto { total }
            }
            _ => WidthMode::Manual {
                a: primary[0],
                b: primary[1],
                other,
            },
        };

        // 4. Converterインスタンス生成
        let layout = TableLayout::plan(&excluded, mode);
        Ok(Converter::new(self.config, layout))
    }
}

/// ワークシートをLaTeXの`longtable`に変換するコンバーター
///
/// `ConverterBuilder::build()`で生成します。レイアウトは構築時に一度だけ計算され、
/// すべてのシートで共有されます。
#[derive(Debug)]
pub struct Converter {
    config: ConversionConfig,

    layout: TableLayout,

    formatter: CellFormatter,
}

impl Converter {
    pub(crate) fn new(config: ConversionConfig, layout: TableLayout) -> Self {
        Self {
            config,
            layout,
            formatter: CellFormatter::new(),
        }
    }

    /// 参加列の数
    pub fn column_count(&self) -> usize {
        self.layout.column_count()
    }

    /// テーブル全体の幅（cm）
    pub fn total_width_cm(&self) -> f64 {
        self.layout.total_width_cm()
    }

    /// 1枚のシートを`longtable`として書き出す
    pub fn render_sheet_to<W: Write>(
        &self,
        sheet: &Worksheet,
        writer: &mut W,
    ) -> Result<(), XlsxToTexError> {
        let doc = TableDocument::build(sheet, &self.layout, &self.formatter, self.config.font_size);
        tracing::debug!(
            sheet = sheet.name(),
            rows = doc.body_rows().len(),
            "rendered worksheet"
        );
        LatexWriter.render(&doc, writer)
    }

    /// 1枚のシートを`longtable`の文字列に変換する
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use xlsxtex::{CellValue, ConverterBuilder, Worksheet};
    ///
    /// # fn main() -> Result<(), xlsxtex::XlsxToTexError> {
    /// let sheet = Worksheet::new(
    ///     "Sheet1",
    ///     vec![
    ///         vec![CellValue::from("Budget")],
    ///         vec![CellValue::from("Item"), CellValue::from("Cost")],
    ///         vec![CellValue::from("R&D"), CellValue::from("$5")],
    ///     ],
    /// );
    ///
    /// let converter = ConverterBuilder::new()
    ///     .with_excluded_columns(["C", "D", "E", "F", "G", "H", "I"])
    ///     .build()?;
    /// let latex = converter.render_sheet(&sheet)?;
    /// assert!(latex.contains("R\\&D & \\$5 \\\\"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn render_sheet(&self, sheet: &Worksheet) -> Result<String, XlsxToTexError> {
        let mut buffer = Vec::new();
        self.render_sheet_to(sheet, &mut buffer)?;

        let result = String::from_utf8(buffer).map_err(|e| {
            XlsxToTexError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;

        Ok(result)
    }

    /// 複数のシートを変換し、`<シート名>.tex`をキーとするマップを返す
    ///
    /// シートは並列に変換されますが、結果は入力順に並びます。
    /// 安全化後に同じ名前になるシートには`_2`、`_3`…の接尾辞を付けます。
    pub fn render_workbook(
        &self,
        sheets: &[Worksheet],
    ) -> Result<IndexMap<String, String>, XlsxToTexError> {
        let rendered: Result<Vec<(usize, String)>, XlsxToTexError> = sheets
            .par_iter()
            .enumerate()
            .map(|(sheet_idx, sheet)| self.render_sheet(sheet).map(|latex| (sheet_idx, latex)))
            .collect();

        let mut rendered = rendered?;

        // 結果をインデックス順にソート（並列処理の順序を保証）
        rendered.sort_by_key(|(idx, _)| *idx);

        let mut files = IndexMap::with_capacity(rendered.len());
        for (sheet_idx, latex) in rendered {
            let key = unique_file_name(&files, sheets[sheet_idx].name());
            files.insert(key, latex);
        }

        Ok(files)
    }

    /// ワークブックを読み込み、選択されたシートをすべて変換する
    ///
    /// # 戻り値
    ///
    /// * `Ok(IndexMap)` - ワークブック順の`<シート名>.tex` → LaTeX文字列
    /// * `Err(XlsxToTexError::Parse)` - ワークブックを開けなかった場合
    /// * `Err(XlsxToTexError::NoSheets)` - 変換対象のシートが無い場合
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use std::fs::File;
    /// use xlsxtex::ConverterBuilder;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let converter = ConverterBuilder::new().build()?;
    /// let files = converter.convert(File::open("tables.xlsx")?)?;
    /// for (name, latex) in &files {
    ///     std::fs::write(name, latex)?;
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn convert<R: Read + Seek>(
        &self,
        input: R,
    ) -> Result<IndexMap<String, String>, XlsxToTexError> {
        let mut parser = WorkbookParser::open(input)?;

        let sheet_names = parser.select_sheets(&self.config.sheet_selector)?;
        if sheet_names.is_empty() {
            return Err(XlsxToTexError::NoSheets);
        }

        let sheets = sheet_names
            .iter()
            .map(|name| parser.read_sheet(name))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(
            sheets = sheets.len(),
            columns = self.layout.column_count(),
            total_width_cm = self.layout.total_width_cm(),
            "converting workbook"
        );

        self.render_workbook(&sheets)
    }

    /// ワークブックを変換し、すべての`.tex`ファイルをZIPアーカイブとして書き出す
    ///
    /// 書き込み先を返します。
    pub fn convert_to_archive<R: Read + Seek, W: Write + Seek>(
        &self,
        input: R,
        output: W,
    ) -> Result<W, XlsxToTexError> {
        let files = self.convert(input)?;
        crate::archive::write_archive(&files, output)
    }
}

/// 既存のキーと衝突しないファイル名を生成
fn unique_file_name(files: &IndexMap<String, String>, sheet_name: &str) -> String {
    let stem = sanitize_sheet_name(sheet_name);
    let mut key = format!("{}.{}", stem, TEX_EXTENSION);
    let mut suffix = 2;
    while files.contains_key(&key) {
        key = format!("{}_{}.{}", stem, suffix, TEX_EXTENSION);
        suffix += 1;
    }
    key
}

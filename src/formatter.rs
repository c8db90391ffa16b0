//! Formatter Module
//!
//! セル値をLaTeXとして安全なテキストに変換するモジュール。
//! 特殊文字のエスケープと、箇条書き（`•`区切り）セルの複数行化を行います。

/// 箇条書きの区切り文字
pub(crate) const BULLET: char = '•';

/// セル内改行マーカー
pub(crate) const LINE_BREAK: &str = " \\newline ";

/// セルフォーマッター
///
/// セル値のエスケープ処理のファサードとして機能します。状態を持たないため、
/// 複数シートの並列レンダリングから共有できます。
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct CellFormatter;

impl CellFormatter {
    /// 新しいCellFormatterインスタンスを生成
    pub fn new() -> Self {
        Self
    }

    /// セル値をエスケープ済みLaTeXテキストに変換
    ///
    /// 偽値（空セル、空文字列、0、`false`）は空文字列になります。
    pub fn format_cell(&self, value: &crate::types::CellValue) -> String {
        if value.is_falsy() {
            return String::new();
        }
        self.format_text(&value.to_display_string())
    }

    /// 文字列をエスケープ
    ///
    /// `•`を含む場合は箇条書きとして扱い、各項目を個別にエスケープして
    /// `\newline`で連結します。
    pub fn format_text(&self, text: &str) -> String {
        if text.contains(BULLET) {
            self.format_bullets(text)
        } else {
            escape_latex(text)
        }
    }

    fn format_bullets(&self, text: &str) -> String {
        let flattened = text.replace('\n', " ");
        flattened
            .split(BULLET)
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| format!("{} {}", BULLET, escape_latex(item)))
            .collect::<Vec<_>>()
            .join(LINE_BREAK)
    }
}

/// LaTeX特殊文字をエスケープ
///
/// 1文字ずつ置換するため、`\textbackslash{}`が導入する波括弧が
/// 再度エスケープされることはありません。
pub(crate) fn escape_latex(text: &str) -> String {
    if !text.chars().any(is_latex_special) {
        return text.to_string();
    }

    let mut buffer = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '\\' => buffer.push_str("\\textbackslash{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                buffer.push('\\');
                buffer.push(ch);
            }
            '~' => buffer.push_str("\\textasciitilde{}"),
            '^' => buffer.push_str("\\textasciicircum{}"),
            _ => buffer.push(ch),
        }
    }
    buffer
}

#[inline]
fn is_latex_special(ch: char) -> bool {
    matches!(
        ch,
        '\\' | '&' | '%' | '$' | '#' | '_' | '{' | '}' | '~' | '^'
    )
}

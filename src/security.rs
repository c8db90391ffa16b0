//! Security Module
//!
//! 入力サイズの制限と、出力ファイル名の安全化を提供するモジュール。
//! シート名から生成するファイル名は、ZIPアーカイブやディレクトリへ書き出す前に検証します。

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // ファイル名として使用できない文字
    static ref UNSAFE_FILENAME_CHARS: Regex = Regex::new(r#"[<>:"/\\|?*]"#).unwrap();
    static ref WHITESPACE_RUNS: Regex = Regex::new(r"\s+").unwrap();
}

/// セキュリティ設定
///
/// ファイル処理時のセキュリティ制限を定義します。
#[derive(Debug, Clone)]
pub(crate) struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    /// デフォルト: 2GB (2_147_483_648 bytes)
    pub max_input_file_size: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_file_size: 2_147_483_648, // 2GB
        }
    }
}

/// シート名をファイル名として安全な文字列に変換
///
/// `<>:"/\|?*` をアンダースコアに置換し、前後の空白を除去した上で、
/// 連続する空白を1つのアンダースコアにまとめます。
pub(crate) fn sanitize_sheet_name(name: &str) -> String {
    let replaced = UNSAFE_FILENAME_CHARS.replace_all(name, "_");
    WHITESPACE_RUNS
        .replace_all(replaced.trim(), "_")
        .into_owned()
}

/// アーカイブのエントリ名の検証
///
/// パストラバーサル攻撃を防ぐため、エントリ名を検証します。
///
/// # 戻り値
///
/// * `Ok(())` - エントリ名が安全な場合
/// * `Err(String)` - エントリ名が危険な場合（`..`や絶対パスを含む）
pub(crate) fn validate_entry_name(path: &str) -> Result<(), String> {
    // 空のパスは拒否
    if path.is_empty() {
        return Err("Empty path is not allowed".to_string());
    }

    // 絶対パスを拒否（Windows形式の`C:\`やUnix形式の`/`で始まるパス）
    if path.starts_with('/') || path.starts_with("C:\\") || path.starts_with("c:\\") {
        return Err(format!("Absolute path is not allowed: {}", path));
    }

    // `..`のパス要素を拒否（ディレクトリトラバーサル攻撃）
    if path.split('/').any(|component| component == "..") {
        return Err(format!("Path traversal detected: {}", path));
    }

    // `\`を含むパスを拒否（Windows形式のパスセパレータ）
    if path.contains('\\') {
        return Err(format!("Backslash in path is not allowed: {}", path));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_sheet_name_plain() {
        assert_eq!(sanitize_sheet_name("Sheet1"), "Sheet1");
    }

    #[test]
    fn test_sanitize_sheet_name_unsafe_chars() {
        assert_eq!(sanitize_sheet_name("Q1/Q2: plan?"), "Q1_Q2__plan_");
        assert_eq!(sanitize_sheet_name("a<b>c|d*e\"f\\g"), "a_b_c_d_e_f_g");
    }

    #[test]
    fn test_sanitize_sheet_name_whitespace() {
        assert_eq!(sanitize_sheet_name("  LOD   Matrix \t v2 "), "LOD_Matrix_v2");
    }

    #[test]
    fn test_sanitized_names_pass_validation() {
        for name in ["../etc/passwd", "C:\\Windows", "/abs", "a\\b", "Notes..v2"] {
            let sanitized = format!("{}.tex", sanitize_sheet_name(name));
            assert!(validate_entry_name(&sanitized).is_ok(), "{}", sanitized);
        }
    }

    #[test]
    fn test_validate_entry_name_valid() {
        assert!(validate_entry_name("Sheet1.tex").is_ok());
        assert!(validate_entry_name("tables/Sheet1.tex").is_ok());
    }

    #[test]
    fn test_validate_entry_name_empty() {
        assert!(validate_entry_name("").is_err());
    }

    #[test]
    fn test_validate_entry_name_absolute() {
        assert!(validate_entry_name("/etc/passwd").is_err());
        assert!(validate_entry_name("C:\\Windows\\system32").is_err());
    }

    #[test]
    fn test_validate_entry_name_traversal() {
        assert!(validate_entry_name("../etc/passwd").is_err());
        assert!(validate_entry_name("..").is_err());
        assert!(validate_entry_name("tables/../x.tex").is_err());
    }

    #[test]
    fn test_default_input_limit() {
        assert_eq!(SecurityConfig::default().max_input_file_size, 2_147_483_648);
    }
}

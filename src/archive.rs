//! Archive Module
//!
//! 変換結果の`.tex`ファイル群をZIPアーカイブとして書き出すモジュール。

use indexmap::IndexMap;
use std::io::{Seek, Write};
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

use crate::error::XlsxToTexError;
use crate::security::validate_entry_name;

/// ファイル名 → 内容のマップをZIPアーカイブとして書き出す
///
/// エントリはマップの順序で追加され、Deflateで圧縮されます。
/// 書き込み完了後の書き込み先を返します。
///
/// # 戻り値
///
/// * `Ok(W)` - 書き込みに成功した場合
/// * `Err(XlsxToTexError::SecurityViolation)` - エントリ名が不正な場合（`..`や絶対パス）
/// * `Err(XlsxToTexError::Zip)` - ZIPの書き込みに失敗した場合
///
/// # 使用例
///
/// ```rust
/// use indexmap::IndexMap;
/// use std::io::Cursor;
///
/// # fn main() -> Result<(), xlsxtex::XlsxToTexError> {
/// let mut files = IndexMap::new();
/// files.insert("Sheet1.tex".to_string(), "\\begin{longtable}{||}\n".to_string());
///
/// let cursor = xlsxtex::write_archive(&files, Cursor::new(Vec::new()))?;
/// assert!(!cursor.into_inner().is_empty());
/// # Ok(())
/// # }
/// ```
pub fn write_archive<W: Write + Seek>(
    files: &IndexMap<String, String>,
    writer: W,
) -> Result<W, XlsxToTexError> {
    let mut zip = ZipWriter::new(writer);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, content) in files {
        validate_entry_name(name).map_err(XlsxToTexError::SecurityViolation)?;
        zip.start_file(name.as_str(), options)?;
        zip.write_all(content.as_bytes())?;
    }

    let writer = zip.finish()?;
    tracing::debug!(entries = files.len(), "wrote zip archive");
    Ok(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};
    use zip::ZipArchive;

    fn files(entries: &[(&str, &str)]) -> IndexMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_write_archive_entries_in_order() {
        let input = files(&[("B.tex", "second"), ("A.tex", "first")]);
        let cursor = write_archive(&input, Cursor::new(Vec::new())).unwrap();

        let mut archive = ZipArchive::new(Cursor::new(cursor.into_inner())).unwrap();
        assert_eq!(archive.len(), 2);
        assert_eq!(archive.by_index(0).unwrap().name(), "B.tex");

        let mut content = String::new();
        archive
            .by_name("A.tex")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "first");
    }

    #[test]
    fn test_write_archive_empty() {
        let cursor = write_archive(&IndexMap::new(), Cursor::new(Vec::new())).unwrap();
        let archive = ZipArchive::new(Cursor::new(cursor.into_inner())).unwrap();
        assert_eq!(archive.len(), 0);
    }

    #[test]
    fn test_write_archive_rejects_traversal() {
        let input = files(&[("../escape.tex", "x")]);
        let result = write_archive(&input, Cursor::new(Vec::new()));
        assert!(matches!(result, Err(XlsxToTexError::SecurityViolation(_))));
    }
}

//! Column Selector
//!
//! 固定の列集合（A〜I）から除外列を取り除き、参加列を決定します。

use std::collections::BTreeSet;

use crate::types::COLUMN_LETTERS;

/// 参加列（列文字と0始まりインデックス）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SelectedColumn {
    pub letter: char,
    pub index: usize,
}

impl SelectedColumn {
    /// A列・B列（主要列）かどうか
    pub fn is_primary(&self) -> bool {
        matches!(self.letter, 'A' | 'B')
    }
}

/// 除外列を除いた参加列をアルファベット順で返す
///
/// すべての列が除外された場合は空のリストを返します（エラーではありません）。
pub(crate) fn select_columns(excluded: &BTreeSet<char>) -> Vec<SelectedColumn> {
    COLUMN_LETTERS
        .iter()
        .enumerate()
        .filter(|(_, letter)| !excluded.contains(letter))
        .map(|(index, &letter)| SelectedColumn { letter, index })
        .collect()
}

//! Layout Module
//!
//! 参加列の選択と列幅の計画を行い、テーブルのレイアウト（列記述子の順序付きリスト）を構築する。
//! レイアウトは出力マークアップから独立しており、同じ設定のすべてのシートで共有されます。

mod columns;
mod widths;

use std::collections::BTreeSet;

use crate::api::ColumnAlignment;
use crate::types::COLUMN_LETTERS;

use columns::select_columns;
pub use widths::{DEFAULT_OTHER_WIDTH_CM, DEFAULT_PRIMARY_WIDTH_CM};
pub(crate) use widths::WidthMode;
use widths::plan_widths;

/// 列記述子
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ColumnSpec {
    /// 列文字（A〜I）
    pub letter: char,

    /// 0始まりの列インデックス
    pub index: usize,

    /// 除外列かどうか
    pub excluded: bool,

    /// 列幅（cm）。除外列は0
    pub width_cm: f64,

    /// 列内の配置
    pub alignment: ColumnAlignment,
}

/// テーブルレイアウト
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TableLayout {
    columns: Vec<ColumnSpec>,
    total_width_cm: f64,
}

impl TableLayout {
    /// 除外列と列幅モードからレイアウトを計画
    pub fn plan(excluded: &BTreeSet<char>, mode: WidthMode) -> Self {
        let selected = select_columns(excluded);
        let widths = plan_widths(&selected, mode);

        let columns: Vec<ColumnSpec> = COLUMN_LETTERS
            .iter()
            .enumerate()
            .map(|(index, &letter)| {
                let width_cm = selected
                    .iter()
                    .position(|c| c.index == index)
                    .map(|pos| widths[pos])
                    .unwrap_or(0.0);
                ColumnSpec {
                    letter,
                    index,
                    excluded: excluded.contains(&letter),
                    width_cm,
                    alignment: if matches!(letter, 'A' | 'B') {
                        ColumnAlignment::Paragraph
                    } else {
                        ColumnAlignment::Centered
                    },
                }
            })
            .collect();

        // 合計幅は各列幅の総和から再計算する
        let total_width_cm: f64 = widths.iter().sum();

        tracing::debug!(
            participating = selected.len(),
            total_width_cm,
            mode = ?mode,
            "planned table layout"
        );

        Self {
            columns,
            total_width_cm,
        }
    }

    /// 参加列をアルファベット順に列挙
    pub fn participating(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.columns.iter().filter(|c| !c.excluded)
    }

    /// 参加列の数
    pub fn column_count(&self) -> usize {
        self.participating().count()
    }

    /// テーブル全体の幅（cm）
    pub fn total_width_cm(&self) -> f64 {
        self.total_width_cm
    }

    /// A列が参加しているか
    pub fn includes_first_column(&self) -> bool {
        self.columns.first().map(|c| !c.excluded).unwrap_or(false)
    }
}

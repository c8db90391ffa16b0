//! Width Planner
//!
//! 列幅（cm）を決定します。明示指定（Manual）と、合計幅からの自動配分（Auto）の
//! 2つのモードがあります。

use super::columns::SelectedColumn;

/// 主要列（A/B）と他列の幅の比率
pub(crate) const PRIMARY_RATIO: f64 = 3.0;

/// A列のデフォルト幅（cm）
pub const DEFAULT_PRIMARY_WIDTH_CM: f64 = 4.0;

/// C〜I列で共有するデフォルト幅（cm）
pub const DEFAULT_OTHER_WIDTH_CM: f64 = 2.0;

/// 列幅の決定方式
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum WidthMode {
    /// A・B列は個別の幅、C〜I列はC列に設定された1つの幅を共有
    Manual { a: f64, b: f64, other: f64 },

    /// 合計幅を主要列:他列 = 3:1 の比率で配分
    Auto { total: f64 },
}

impl Default for WidthMode {
    fn default() -> Self {
        WidthMode::Manual {
            a: DEFAULT_PRIMARY_WIDTH_CM,
            b: DEFAULT_PRIMARY_WIDTH_CM,
            other: DEFAULT_OTHER_WIDTH_CM,
        }
    }
}

/// 参加列ごとの幅を計算（入力と同じ順序）
///
/// 各幅は出力と同じ0.01cm単位に丸めます。合計幅はこの丸めた値の総和です。
pub(crate) fn plan_widths(columns: &[SelectedColumn], mode: WidthMode) -> Vec<f64> {
    let widths: Vec<f64> = match mode {
        WidthMode::Manual { a, b, other } => columns
            .iter()
            .map(|c| match c.letter {
                'A' => a,
                'B' => b,
                _ => other,
            })
            .collect(),
        WidthMode::Auto { total } => {
            let (w_primary, w_other) = distribute(total, columns);
            columns
                .iter()
                .map(|c| if c.is_primary() { w_primary } else { w_other })
                .collect()
        }
    };
    widths.into_iter().map(round_cm).collect()
}

/// 0.01cm単位に丸める
fn round_cm(width: f64) -> f64 {
    (width * 100.0).round() / 100.0
}

/// 自動配分の主要列幅・他列幅を求める
///
/// `w_other = W / (3 * n_AB + n_other)`、`w_AB = 3 * w_other`。
/// 参加列が無い場合は両方とも `W` を返します。
pub(crate) fn distribute(total: f64, columns: &[SelectedColumn]) -> (f64, f64) {
    let n_primary = columns.iter().filter(|c| c.is_primary()).count();
    let n_other = columns.len() - n_primary;
    let units = PRIMARY_RATIO * n_primary as f64 + n_other as f64;

    if units > 0.0 {
        let w_other = total / units;
        (PRIMARY_RATIO * w_other, w_other)
    } else {
        (total, total)
    }
}

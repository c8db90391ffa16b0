//! Output Module
//!
//! テーブル構造（`TableDocument`）を出力マークアップへ直列化するモジュール。
//! レイアウトの決定とマークアップの構文はここで分離されます。

mod latex;

pub(crate) use latex::LatexWriter;

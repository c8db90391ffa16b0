//! Parser Module
//!
//! calamineを使用したワークブック解析。
//! シートはA1を原点とする`Worksheet`として読み込まれ、レンダリングはメモリ上で行います。

mod workbook;

pub(crate) use workbook::WorkbookParser;

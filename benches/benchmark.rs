//! パフォーマンスベンチマーク
//!
//! xlsxtexクレートのレンダリングとワークブック変換の速度を測定します。
//! ワークブックはベンチマーク内でrust_xlsxwriterを使って生成します。

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_xlsxwriter::Workbook;
use std::io::Cursor;
use xlsxtex::{CellValue, ConverterBuilder, Worksheet};

/// メモリ上のシートを生成（A列は箇条書き、その他は数値と特殊文字）
fn build_sheet(name: &str, rows: usize) -> Worksheet {
    let mut data = vec![
        vec![CellValue::from("Benchmark table")],
        (0..9)
            .map(|c| CellValue::from(format!("Header {}", c)))
            .collect(),
    ];
    for i in 0..rows {
        let mut row = vec![CellValue::from(format!("• step {}\n• check_{} & log", i, i))];
        row.extend((1..9).map(|c| CellValue::from((i * c) as f64 + 0.25)));
        data.push(row);
    }
    Worksheet::new(name, data)
}

/// ワークブックをXLSXとして生成
fn build_workbook(sheets: usize, rows: u32) -> Vec<u8> {
    let mut workbook = Workbook::new();
    for s in 0..sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.write_string(0, 0, &format!("Table {}", s)).unwrap();
        for row in 2..rows + 2 {
            worksheet
                .write_string(row, 0, &format!("Item {} 100%", row))
                .unwrap();
            for col in 1..9u16 {
                worksheet.write_number(row, col, row as f64).unwrap();
            }
        }
    }
    workbook.save_to_buffer().unwrap()
}

fn benchmark_render_sheet(c: &mut Criterion) {
    let converter = ConverterBuilder::new()
        .with_excluded_columns(Vec::<String>::new())
        .build()
        .unwrap();

    let mut group = c.benchmark_group("render_sheet");
    for rows in [100usize, 1_000, 10_000] {
        let sheet = build_sheet("Bench", rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &sheet, |b, sheet| {
            b.iter(|| black_box(converter.render_sheet(black_box(sheet)).unwrap()));
        });
    }
    group.finish();
}

fn benchmark_render_workbook(c: &mut Criterion) {
    let converter = ConverterBuilder::new().with_total_table_width(15.6).build().unwrap();
    let sheets: Vec<Worksheet> = (0..16)
        .map(|i| build_sheet(&format!("Sheet {}", i), 2_000))
        .collect();

    let mut group = c.benchmark_group("render_workbook");
    group.sample_size(20);
    group.bench_function("16_sheets_parallel", |b| {
        b.iter(|| black_box(converter.render_workbook(black_box(&sheets)).unwrap()));
    });
    group.finish();
}

fn benchmark_convert(c: &mut Criterion) {
    let converter = ConverterBuilder::new().build().unwrap();
    let data = build_workbook(4, 5_000);

    let mut group = c.benchmark_group("convert");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.sample_size(10);
    group.bench_function("xlsx_4_sheets", |b| {
        b.iter(|| {
            let files = converter.convert(Cursor::new(black_box(&data))).unwrap();
            black_box(files)
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    benchmark_render_sheet,
    benchmark_render_workbook,
    benchmark_convert
);
criterion_main!(benches);

use chrono::NaiveDate;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_decimal_macros::dec;

use bijak::core::*;
use bijak::engine::validate_with;
use bijak::report::build_report;
use bijak::rules::RuleContext;
use bijak::score::ScoreConfig;

fn ctx() -> RuleContext {
    RuleContext {
        today: NaiveDate::from_ymd_opt(2026, 6, 15).unwrap(),
    }
}

fn build_invoice(lines: u32) -> Invoice {
    let mut builder = InvoiceBuilder::new("BENCH/001", "2026-01-15")
        .supplier_gstin("27AAPFU0939F1ZV")
        .buyer_gstin("27AABCU9603R1ZJ")
        .place_of_supply("27");

    for n in 1..=lines {
        builder = builder.add_line(
            LineItemBuilder::new(n, format!("Item {n}"), "8518")
                .quantity_rate(dec!(2), dec!(500))
                .tax(dec!(18), TaxType::CgstSgst)
                .build(),
        );
    }

    let taxable = dec!(1000) * rust_decimal::Decimal::from(lines);
    let tax = dec!(180) * rust_decimal::Decimal::from(lines);
    builder.totals(taxable, tax, taxable + tax).build()
}

fn bench_validate(c: &mut Criterion) {
    let invoice = build_invoice(10);
    let ctx = ctx();
    let config = ScoreConfig::default();
    c.bench_function("validate_10_lines", |b| {
        b.iter(|| black_box(validate_with(black_box(&invoice), &ctx, &config)));
    });
}

fn bench_validate_large(c: &mut Criterion) {
    let invoice = build_invoice(1000);
    let ctx = ctx();
    let config = ScoreConfig::default();
    c.bench_function("validate_1000_lines", |b| {
        b.iter(|| black_box(validate_with(black_box(&invoice), &ctx, &config)));
    });
}

fn bench_normalize(c: &mut Criterion) {
    let invoice = build_invoice(10);
    c.bench_function("normalize_10_lines", |b| {
        b.iter(|| black_box(normalize(black_box(&invoice))));
    });
}

fn bench_report(c: &mut Criterion) {
    let invoice = build_invoice(10);
    let result = validate_with(&invoice, &ctx(), &ScoreConfig::default());
    c.bench_function("build_report_and_flatten", |b| {
        b.iter(|| {
            let report = build_report(black_box(&result));
            black_box(report.to_plain_text())
        });
    });
}

criterion_group!(
    benches,
    bench_validate,
    bench_validate_large,
    bench_normalize,
    bench_report,
);
criterion_main!(benches);

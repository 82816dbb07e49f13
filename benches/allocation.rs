use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tribudget::domain::{
    default_categories, BudgetProfile, BudgetRule, Category, DenominationFormat,
    DenominationOptions, Expense, YearMonth,
};
use tribudget::engine::{format_denominated, AllocationService, PeriodService};

fn build_records(count: usize) -> (Vec<Category>, Vec<Expense>) {
    let categories = default_categories();
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let records = (0..count)
        .map(|idx| {
            let category = &categories[idx % categories.len()];
            let date = start + Duration::days((idx % 730) as i64);
            Expense::new(
                format!("Expense {idx}"),
                5.0 + (idx % 250) as f64,
                category.bucket,
                category.name.clone(),
                date,
            )
        })
        .collect();
    (categories, records)
}

fn bench_allocation(c: &mut Criterion) {
    let (categories, records) = build_records(black_box(10_000));
    let profile = BudgetProfile::new(5200.0, BudgetRule::default());
    let period = YearMonth::new(2025, 3);

    c.bench_function("allocate_month_10k", |b| {
        b.iter(|| AllocationService::allocate_period(&profile, &categories, &records, period))
    });

    c.bench_function("allocate_all_10k", |b| {
        b.iter(|| AllocationService::allocate_period(&profile, &categories, &records, None))
    });

    c.bench_function("monthly_totals_10k", |b| {
        b.iter(|| PeriodService::monthly_totals(&records))
    });
}

fn bench_formatting(c: &mut Criterion) {
    let options = DenominationOptions::default().with_format(DenominationFormat::International);
    c.bench_function("format_international", |b| {
        b.iter(|| {
            for value in [999.0, 1_000.0, 12_345.67, 999_999.0, 4.2e9] {
                black_box(format_denominated(black_box(value), &options));
            }
        })
    });
}

criterion_group!(benches, bench_allocation, bench_formatting);
criterion_main!(benches);

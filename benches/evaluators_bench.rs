//! Per-render evaluator cost: tier progression and shop open checks.
//!
//! Run with: `cargo bench`

use chrono::{NaiveDate, NaiveDateTime, Weekday};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rescuebag::hours::{is_open_now, BusinessHours, DayHours, WeeklySchedule};
use rescuebag::tier::get_progression;

fn full_week() -> BusinessHours {
    let mut schedule = WeeklySchedule::default();
    for day in [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
    ] {
        schedule.set_day(day, Some(DayHours::new("08:30", "20:00")));
    }
    BusinessHours::weekly(schedule)
}

fn friday_evening() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 7)
        .and_then(|d| d.and_hms_opt(19, 45, 0))
        .expect("valid date")
}

fn bench_progression(c: &mut Criterion) {
    let mut group = c.benchmark_group("progression");
    group.throughput(Throughput::Elements(64));
    group.bench_function("get_progression_0_to_63", |b| {
        b.iter(|| {
            for n in 0..64_u32 {
                black_box(get_progression(black_box(n)));
            }
        })
    });
    group.finish();
}

fn bench_hours(c: &mut Criterion) {
    let weekly = full_week();
    let legacy = BusinessHours::legacy("10:00", "18:00", &["sat", "sun"]);
    let now = friday_evening();

    let mut group = c.benchmark_group("is_open_now");
    group.bench_function("weekly_schedule", |b| {
        b.iter(|| is_open_now(black_box(&weekly), black_box(now)))
    });
    group.bench_function("legacy_fields", |b| {
        b.iter(|| is_open_now(black_box(&legacy), black_box(now)))
    });
    group.finish();
}

criterion_group!(benches, bench_progression, bench_hours);
criterion_main!(benches);

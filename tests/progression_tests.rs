//! Tier ladder and availability properties checked through the public API.

use chrono::{NaiveDate, NaiveDateTime, Weekday};
use rescuebag::hours::{is_open_now, BusinessHours, DayHours, WeeklySchedule};
use rescuebag::storage::{JsonFileStore, KeyValueStore};
use rescuebag::tier::{
    cycle_debug, get_progression, tier_for, TierEngine, TierName, UpgradeTracker,
    COMPLETED_ORDERS_KEY, TIERS,
};

// 2024-06-03 is a Monday.
fn at(weekday: Weekday, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 3 + weekday.num_days_from_monday())
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .expect("valid fixture date")
}

#[test]
fn every_count_maps_to_exactly_one_tier() {
    for n in (0..1_000).chain([u32::MAX - 1, u32::MAX]) {
        let owners: Vec<TierName> = TIERS
            .iter()
            .filter(|tier| tier.contains(n))
            .map(|tier| tier.name)
            .collect();
        assert_eq!(owners, vec![tier_for(n).name], "count {n}");
    }
}

#[test]
fn top_tier_is_unbounded() {
    for k in [0, 1, 100, 10_000] {
        assert_eq!(get_progression(20 + k).current_tier, TierName::Zeus);
    }
}

#[test]
fn progress_is_monotone_within_a_tier_and_resets_after() {
    let mut previous = get_progression(0);
    for n in 1..=25 {
        let current = get_progression(n);
        if current.current_tier == previous.current_tier {
            assert!(current.progress_percent >= previous.progress_percent, "count {n}");
        } else if current.next_tier.is_some() {
            assert_eq!(current.progress_percent, 0.0, "count {n}");
        } else {
            assert_eq!(current.progress_percent, 100.0, "top tier is always full");
        }
        assert!((0.0..=100.0).contains(&current.progress_percent));
        previous = current;
    }
}

#[test]
fn upgrade_sequence_fires_at_five_and_twenty_only() {
    let mut tracker = UpgradeTracker::new();
    let events: Vec<(u32, TierName)> = [0, 3, 5, 5, 7, 20, 19]
        .into_iter()
        .filter_map(|n| tracker.observe(tier_for(n).name).map(|e| (n, e.to)))
        .collect();
    assert_eq!(events, vec![(5, TierName::Shrek), (20, TierName::Zeus)]);
}

#[test]
fn debug_cycle_table() {
    let cases = [(0, 5), (4, 5), (5, 20), (19, 20), (20, 0), (1000, 0)];
    for (input, expected) in cases {
        assert_eq!(cycle_debug(input), expected, "cycle_debug({input})");
    }
}

#[test]
fn counter_round_trips_through_file_store() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("progress.json");

    let mut engine = TierEngine::load(JsonFileStore::new(&path));
    engine.set_completed_orders(7);

    let reloaded = TierEngine::load(JsonFileStore::new(&path));
    assert_eq!(reloaded.completed_orders(), 7);
    assert_eq!(
        JsonFileStore::new(&path)
            .get(COMPLETED_ORDERS_KEY)
            .expect("readable")
            .as_deref(),
        Some("7")
    );
}

#[test]
fn per_day_hours_examples() {
    let mut schedule = WeeklySchedule::default();
    schedule.set_day(Weekday::Mon, Some(DayHours::new("09:00", "21:00")));
    let hours = BusinessHours::weekly(schedule);

    assert!(is_open_now(&hours, at(Weekday::Mon, 20, 59)));
    assert!(!is_open_now(&hours, at(Weekday::Mon, 21, 0)));
    assert!(is_open_now(&hours, at(Weekday::Mon, 9, 0)));
    assert!(!is_open_now(&hours, at(Weekday::Sun, 12, 0)));
}

#[test]
fn legacy_hours_examples() {
    let hours = BusinessHours::legacy("10:00", "18:00", &["sat", "sun"]);
    assert!(is_open_now(&hours, at(Weekday::Sat, 12, 0)));
    assert!(!is_open_now(&hours, at(Weekday::Wed, 12, 0)));
}

#[test]
fn no_hours_data_is_open() {
    let hours: BusinessHours = serde_json::from_str(
        r#"{"weekly": null, "opening_time": null, "closing_time": null, "days_open": null}"#,
    )
    .expect("nulls should deserialize");
    assert!(is_open_now(&hours, at(Weekday::Tue, 3, 30)));
}

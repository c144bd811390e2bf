//! Parsing for the loosely-typed hour fields shop owners fill in.

use chrono::{Local, NaiveDateTime, NaiveTime, Weekday};

/// Accepts `HH:MM` and the backend's `HH:MM:SS`. Anything else is `None`.
pub fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}

/// `mon`, `Mon`, `monday`, `MONDAY` all resolve to Monday.
pub fn parse_weekday(raw: &str) -> Option<Weekday> {
    raw.trim().parse::<Weekday>().ok()
}

pub fn weekday_key(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "mon",
        Weekday::Tue => "tue",
        Weekday::Wed => "wed",
        Weekday::Thu => "thu",
        Weekday::Fri => "fri",
        Weekday::Sat => "sat",
        Weekday::Sun => "sun",
    }
}

/// Wall-clock instant as `YYYY-MM-DDTHH:MM[:SS]` (a space also works as separator).
pub fn parse_local_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// The `at` override when one is given, else this device's wall clock.
/// `None` only when the override does not parse.
pub fn resolve_local_datetime(at: Option<&str>) -> Option<NaiveDateTime> {
    match at {
        Some(raw) => parse_local_datetime(raw),
        None => Some(Local::now().naive_local()),
    }
}

pub fn format_time_of_day(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

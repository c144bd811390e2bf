//! Business hours: is a shop open right now, and what are today's hours.
//!
//! Shops carry either a per-weekday schedule or the legacy trio of
//! `opening_time` / `closing_time` / `days_open`. The per-day schedule wins whenever it
//! has any entry; the legacy fields are only consulted when it is missing entirely.
//!
//! Known limitations, kept on purpose:
//! - Windows are half-open `[open, close)`. An overnight window (`22:00`-`02:00`) has
//!   `close < open` and therefore never matches.
//! - `now` is taken as the shop's wall clock. No timezone conversion happens here.

use chrono::{Datelike, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

pub mod shop;
pub mod time;

pub use shop::{availability, Shop, ShopAvailability};
pub use time::{
    format_time_of_day, parse_local_datetime, parse_time_of_day, parse_weekday,
    resolve_local_datetime, weekday_key,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    #[serde(default)]
    pub open: Option<String>,
    #[serde(default)]
    pub close: Option<String>,
}

impl DayHours {
    pub fn new(open: &str, close: &str) -> Self {
        Self {
            open: Some(open.to_string()),
            close: Some(close.to_string()),
        }
    }

    /// Both bounds parsed, or `None` (closed all day).
    pub fn window(&self) -> Option<(NaiveTime, NaiveTime)> {
        let open = parse_time_of_day(self.open.as_deref()?)?;
        let close = parse_time_of_day(self.close.as_deref()?)?;
        Some((open, close))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    #[serde(default, alias = "monday", skip_serializing_if = "Option::is_none")]
    pub mon: Option<DayHours>,
    #[serde(default, alias = "tuesday", skip_serializing_if = "Option::is_none")]
    pub tue: Option<DayHours>,
    #[serde(default, alias = "wednesday", skip_serializing_if = "Option::is_none")]
    pub wed: Option<DayHours>,
    #[serde(default, alias = "thursday", skip_serializing_if = "Option::is_none")]
    pub thu: Option<DayHours>,
    #[serde(default, alias = "friday", skip_serializing_if = "Option::is_none")]
    pub fri: Option<DayHours>,
    #[serde(default, alias = "saturday", skip_serializing_if = "Option::is_none")]
    pub sat: Option<DayHours>,
    #[serde(default, alias = "sunday", skip_serializing_if = "Option::is_none")]
    pub sun: Option<DayHours>,
}

impl WeeklySchedule {
    pub fn day(&self, day: Weekday) -> Option<&DayHours> {
        match day {
            Weekday::Mon => self.mon.as_ref(),
            Weekday::Tue => self.tue.as_ref(),
            Weekday::Wed => self.wed.as_ref(),
            Weekday::Thu => self.thu.as_ref(),
            Weekday::Fri => self.fri.as_ref(),
            Weekday::Sat => self.sat.as_ref(),
            Weekday::Sun => self.sun.as_ref(),
        }
    }

    pub fn set_day(&mut self, day: Weekday, hours: Option<DayHours>) {
        let slot = match day {
            Weekday::Mon => &mut self.mon,
            Weekday::Tue => &mut self.tue,
            Weekday::Wed => &mut self.wed,
            Weekday::Thu => &mut self.thu,
            Weekday::Fri => &mut self.fri,
            Weekday::Sat => &mut self.sat,
            Weekday::Sun => &mut self.sun,
        };
        *slot = hours;
    }

    pub fn is_empty(&self) -> bool {
        [
            &self.mon, &self.tue, &self.wed, &self.thu, &self.fri, &self.sat, &self.sun,
        ]
        .iter()
        .all(|day| day.is_none())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyHours {
    #[serde(default)]
    pub opening_time: Option<String>,
    #[serde(default)]
    pub closing_time: Option<String>,
    #[serde(default)]
    pub days_open: Option<Vec<String>>,
}

impl LegacyHours {
    fn is_unset(&self) -> bool {
        let blank = |v: &Option<String>| v.as_deref().map_or(true, |s| s.trim().is_empty());
        blank(&self.opening_time) && blank(&self.closing_time)
    }

    /// A missing or empty day list means the window applies every day, not "no day
    /// matches". Rows saved before the day picker existed have no list at all.
    fn applies_on(&self, day: Weekday) -> bool {
        match self.days_open.as_deref() {
            None | Some([]) => true,
            Some(days) => days.iter().any(|raw| parse_weekday(raw) == Some(day)),
        }
    }

    fn window(&self) -> Option<(NaiveTime, NaiveTime)> {
        let open = parse_time_of_day(self.opening_time.as_deref()?)?;
        let close = parse_time_of_day(self.closing_time.as_deref()?)?;
        Some((open, close))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessHours {
    #[serde(default)]
    pub weekly: Option<WeeklySchedule>,
    #[serde(flatten)]
    pub legacy: LegacyHours,
}

impl BusinessHours {
    pub fn weekly(schedule: WeeklySchedule) -> Self {
        Self {
            weekly: Some(schedule),
            legacy: LegacyHours::default(),
        }
    }

    pub fn legacy(opening_time: &str, closing_time: &str, days_open: &[&str]) -> Self {
        Self {
            weekly: None,
            legacy: LegacyHours {
                opening_time: Some(opening_time.to_string()),
                closing_time: Some(closing_time.to_string()),
                days_open: Some(days_open.iter().map(|d| d.to_string()).collect()),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TodaysHours {
    Window { open: NaiveTime, close: NaiveTime },
    Closed,
    /// No hours on record at all.
    Unrestricted,
}

impl TodaysHours {
    pub fn contains(&self, time: NaiveTime) -> bool {
        match self {
            TodaysHours::Window { open, close } => *open <= time && time < *close,
            TodaysHours::Closed => false,
            TodaysHours::Unrestricted => true,
        }
    }

    pub fn label(&self) -> String {
        match self {
            TodaysHours::Window { open, close } => format!(
                "{} - {}",
                format_time_of_day(*open),
                format_time_of_day(*close)
            ),
            TodaysHours::Closed => "Closed today".to_string(),
            TodaysHours::Unrestricted => "Open all day".to_string(),
        }
    }
}

pub fn todays_hours(hours: &BusinessHours, day: Weekday) -> TodaysHours {
    if let Some(schedule) = hours.weekly.as_ref().filter(|s| !s.is_empty()) {
        return schedule
            .day(day)
            .and_then(DayHours::window)
            .map_or(TodaysHours::Closed, |(open, close)| TodaysHours::Window {
                open,
                close,
            });
    }

    let legacy = &hours.legacy;
    if legacy.is_unset() {
        return TodaysHours::Unrestricted;
    }
    if !legacy.applies_on(day) {
        return TodaysHours::Closed;
    }
    legacy
        .window()
        .map_or(TodaysHours::Closed, |(open, close)| TodaysHours::Window {
            open,
            close,
        })
}

pub fn is_open_now(hours: &BusinessHours, now: NaiveDateTime) -> bool {
    todays_hours(hours, now.weekday()).contains(now.time())
}

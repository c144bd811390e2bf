//! Shop rows as the backend returns them, and the availability snapshot the map and
//! drawer render from.

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{todays_hours, weekday_key, BusinessHours, LegacyHours, TodaysHours, WeeklySchedule};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Shop {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "businessHours")]
    pub business_hours: Option<WeeklySchedule>,
    #[serde(default, alias = "openingTime")]
    pub opening_time: Option<String>,
    #[serde(default, alias = "closingTime")]
    pub closing_time: Option<String>,
    #[serde(default, alias = "daysOpen")]
    pub days_open: Option<Vec<String>>,
    /// Mystery bags left today. `None` when the row did not include inventory.
    #[serde(default, alias = "bagsAvailable")]
    pub bags_available: Option<u32>,
}

impl Shop {
    pub fn hours(&self) -> BusinessHours {
        BusinessHours {
            weekly: self.business_hours.clone(),
            legacy: LegacyHours {
                opening_time: self.opening_time.clone(),
                closing_time: self.closing_time.clone(),
                days_open: self.days_open.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShopAvailability {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop_id: Option<String>,
    pub weekday: &'static str,
    pub open_now: bool,
    pub today: TodaysHours,
    pub today_label: String,
    /// Gate for the reserve button: open now and not sold out.
    pub can_reserve: bool,
}

pub fn availability(shop: &Shop, now: NaiveDateTime) -> ShopAvailability {
    let today = todays_hours(&shop.hours(), now.weekday());
    let open_now = today.contains(now.time());
    // Rows without inventory are gated on hours alone.
    let in_stock = shop.bags_available.map_or(true, |bags| bags > 0);

    ShopAvailability {
        shop_id: shop.id.clone(),
        weekday: weekday_key(now.weekday()),
        open_now,
        today,
        today_label: today.label(),
        can_reserve: open_now && in_stock,
    }
}

//! Loyalty ladder: static tier table, derived progression and upgrade detection.
//! Counter is a monotonic completed-orders count; everything else is derived from it.

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod celebration;
pub mod engine;
pub mod theme;
pub mod tracker;

pub use celebration::{celebrate, BurstPattern, CelebrationPlan, CelebrationSink};
pub use engine::{TierEngine, TierEvaluation, COMPLETED_ORDERS_KEY};
pub use theme::{ColorTheme, ThemeAdapter};
pub use tracker::{TrackerState, UpgradeTracker};

/// Tier names in rank order. `Ord` follows rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierName {
    Joe,
    Shrek,
    Zeus,
}

impl TierName {
    pub fn as_str(&self) -> &'static str {
        match self {
            TierName::Joe => "joe",
            TierName::Shrek => "shrek",
            TierName::Zeus => "zeus",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TierName::Joe => "Joe",
            TierName::Shrek => "Shrek",
            TierName::Zeus => "Zeus",
        }
    }

    pub fn rank(&self) -> usize {
        match self {
            TierName::Joe => 0,
            TierName::Shrek => 1,
            TierName::Zeus => 2,
        }
    }

    pub fn definition(&self) -> &'static TierDefinition {
        &TIERS[self.rank()]
    }
}

impl fmt::Display for TierName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TierDefinition {
    pub name: TierName,
    pub min_orders: u32,
    /// Inclusive upper bound; `None` for the top tier.
    pub max_orders: Option<u32>,
    pub mascot_asset: &'static str,
    #[serde(skip)]
    pub color_theme: &'static ColorTheme,
}

impl TierDefinition {
    pub fn contains(&self, completed_orders: u32) -> bool {
        completed_orders >= self.min_orders
            && self.max_orders.map_or(true, |max| completed_orders <= max)
    }
}

/// The ladder, ascending by `min_orders`. Ranges partition `0..`.
pub static TIERS: [TierDefinition; 3] = [
    TierDefinition {
        name: TierName::Joe,
        min_orders: 0,
        max_orders: Some(4),
        mascot_asset: "/mascots/joe.png",
        color_theme: &theme::JOE_THEME,
    },
    TierDefinition {
        name: TierName::Shrek,
        min_orders: 5,
        max_orders: Some(19),
        mascot_asset: "/mascots/shrek.png",
        color_theme: &theme::SHREK_THEME,
    },
    TierDefinition {
        name: TierName::Zeus,
        min_orders: 20,
        max_orders: None,
        mascot_asset: "/mascots/zeus.png",
        color_theme: &theme::ZEUS_THEME,
    },
];

pub fn tier_for(completed_orders: u32) -> &'static TierDefinition {
    // Table is ascending, so the last tier whose floor we cleared is the match.
    TIERS
        .iter()
        .rev()
        .find(|tier| completed_orders >= tier.min_orders)
        .unwrap_or(&TIERS[0])
}

pub fn next_tier(current: TierName) -> Option<&'static TierDefinition> {
    TIERS.get(current.rank() + 1)
}

/// Snapshot of derived progression for one counter value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Progression {
    pub completed_orders: u32,
    pub current_tier: TierName,
    pub next_tier: Option<TierName>,
    pub progress_percent: f64,
    pub orders_remaining: u32,
    pub mascot_asset: &'static str,
}

pub fn get_progression(completed_orders: u32) -> Progression {
    let current = tier_for(completed_orders);
    let next = next_tier(current.name);

    let (progress_percent, orders_remaining) = match next {
        Some(next) => {
            let span = f64::from(next.min_orders - current.min_orders);
            let done = f64::from(completed_orders.saturating_sub(current.min_orders));
            let pct = (done / span * 100.0).clamp(0.0, 100.0);
            (pct, next.min_orders.saturating_sub(completed_orders))
        }
        None => (100.0, 0),
    };

    Progression {
        completed_orders,
        current_tier: current.name,
        next_tier: next.map(|tier| tier.name),
        progress_percent,
        orders_remaining,
        mascot_asset: current.mascot_asset,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpgradeEvent {
    pub from: TierName,
    pub to: TierName,
    pub mascot_asset: &'static str,
}

/// Fires only when rank strictly increased. Same tier or a drop yields `None`.
pub fn detect_upgrade(previous: TierName, current: TierName) -> Option<UpgradeEvent> {
    if current.rank() > previous.rank() {
        Some(UpgradeEvent {
            from: previous,
            to: current,
            mascot_asset: current.definition().mascot_asset,
        })
    } else {
        None
    }
}

/// Manual-testing cycle: `<5 -> 5`, `[5, 20) -> 20`, `>=20 -> 0`.
pub fn cycle_debug(current: u32) -> u32 {
    let shrek = TIERS[1].min_orders;
    let zeus = TIERS[2].min_orders;
    if current < shrek {
        shrek
    } else if current < zeus {
        zeus
    } else {
        0
    }
}

//! Session-scoped tier engine: owns the counter, persists every mutation best-effort,
//! and reports tier, theme and any upgrade on each evaluation.

use serde::Serialize;
use tracing::{debug, info, warn};

use super::theme::ColorTheme;
use super::tracker::UpgradeTracker;
use super::{cycle_debug, get_progression, Progression, TierName, UpgradeEvent};
use crate::storage::KeyValueStore;

pub const COMPLETED_ORDERS_KEY: &str = "rescuebag.completed_orders";

/// What a host needs after one evaluation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierEvaluation {
    pub progression: Progression,
    pub theme: &'static ColorTheme,
    pub upgrade: Option<UpgradeEvent>,
}

#[derive(Debug)]
pub struct TierEngine<S> {
    store: S,
    completed_orders: u32,
    tracker: UpgradeTracker,
}

impl<S: KeyValueStore> TierEngine<S> {
    /// Reads the persisted counter. Missing, unreadable or non-numeric values start at 0.
    pub fn load(store: S) -> Self {
        let completed_orders = match store.get(COMPLETED_ORDERS_KEY) {
            Ok(Some(raw)) => parse_counter(&raw),
            Ok(None) => 0,
            Err(err) => {
                warn!("could not read completed orders, starting at 0: {err}");
                0
            }
        };
        debug!(completed_orders, "tier engine loaded");
        Self {
            store,
            completed_orders,
            tracker: UpgradeTracker::new(),
        }
    }

    pub fn completed_orders(&self) -> u32 {
        self.completed_orders
    }

    pub fn current_tier(&self) -> TierName {
        self.progression().current_tier
    }

    pub fn progression(&self) -> Progression {
        get_progression(self.completed_orders)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Replaces the counter. The in-memory value always updates; persistence is best-effort.
    pub fn set_completed_orders(&mut self, completed_orders: u32) {
        debug!(
            from = self.completed_orders,
            to = completed_orders,
            "setting completed orders"
        );
        self.completed_orders = completed_orders;
        if let Err(err) = self
            .store
            .set(COMPLETED_ORDERS_KEY, &completed_orders.to_string())
        {
            warn!("completed orders not persisted: {err}");
        }
    }

    pub fn increment_completed_orders(&mut self) {
        self.set_completed_orders(self.completed_orders.saturating_add(1));
    }

    /// Debug affordance: jumps to the next tier threshold, wrapping to 0 from the top.
    pub fn cycle_debug(&mut self) -> u32 {
        let next = cycle_debug(self.completed_orders);
        self.set_completed_orders(next);
        next
    }

    /// One evaluation pass. The first pass of a session never reports an upgrade.
    pub fn evaluate(&mut self) -> TierEvaluation {
        let progression = self.progression();
        let upgrade = self.tracker.observe(progression.current_tier);
        if let Some(event) = &upgrade {
            info!(from = %event.from, to = %event.to, "tier upgraded");
        }
        TierEvaluation {
            theme: progression.current_tier.definition().color_theme,
            progression,
            upgrade,
        }
    }
}

fn parse_counter(raw: &str) -> u32 {
    match raw.trim().parse::<u32>() {
        Ok(value) => value,
        Err(_) => {
            warn!(raw, "stored completed orders is not a number, starting at 0");
            0
        }
    }
}

//! Remembers the last evaluated tier so a recompute at the same tier never re-celebrates.

use super::{detect_upgrade, TierName, UpgradeEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    Initializing,
    Stable(TierName),
}

#[derive(Debug, Clone)]
pub struct UpgradeTracker {
    state: TrackerState,
}

impl Default for UpgradeTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl UpgradeTracker {
    pub fn new() -> Self {
        Self {
            state: TrackerState::Initializing,
        }
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    /// First observation settles silently. Later ones emit only on a strict rank increase;
    /// a drop still moves the baseline so a later climb celebrates again.
    pub fn observe(&mut self, current: TierName) -> Option<UpgradeEvent> {
        let event = match self.state {
            TrackerState::Initializing => None,
            TrackerState::Stable(previous) => detect_upgrade(previous, current),
        };
        self.state = TrackerState::Stable(current);
        event
    }
}

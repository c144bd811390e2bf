//! Unlock celebration: confetti, vibration and the unlock modal.
//! All three are fire-and-forget; a failing effect is logged and skipped.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::{TierName, UpgradeEvent};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BurstPattern {
    Single { particles: u32 },
    /// Repeated bursts spaced `interval_ms` apart.
    Waves { waves: u32, particles: u32, interval_ms: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfettiSpec {
    pub colors: Vec<&'static str>,
    pub burst: BurstPattern,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnlockModal {
    pub tier_name: TierName,
    pub mascot_asset: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CelebrationPlan {
    pub confetti: ConfettiSpec,
    /// Alternating on/off durations in milliseconds.
    pub vibration_ms: Vec<u32>,
    pub modal: UnlockModal,
}

impl CelebrationPlan {
    /// Plan for reaching `tier`. The entry tier is never "unlocked", so it has none.
    pub fn for_tier(tier: TierName) -> Option<Self> {
        let definition = tier.definition();
        let colors = definition.color_theme.confetti.to_vec();
        let (burst, vibration_ms) = match tier {
            TierName::Joe => return None,
            TierName::Shrek => (BurstPattern::Single { particles: 120 }, vec![80, 40, 80]),
            TierName::Zeus => (
                BurstPattern::Waves {
                    waves: 3,
                    particles: 180,
                    interval_ms: 350,
                },
                vec![120, 60, 120, 60, 300],
            ),
        };
        Some(Self {
            confetti: ConfettiSpec { colors, burst },
            vibration_ms,
            modal: UnlockModal {
                tier_name: tier,
                mascot_asset: definition.mascot_asset,
            },
        })
    }
}

#[derive(Debug, Error)]
pub enum CelebrationError {
    #[error("effect not supported on this device: {0}")]
    Unsupported(&'static str),
    #[error("effect failed: {0}")]
    Failed(String),
}

/// External UI collaborator that actually renders the effects.
pub trait CelebrationSink {
    fn confetti(&mut self, spec: &ConfettiSpec) -> Result<(), CelebrationError>;
    fn vibrate(&mut self, pattern_ms: &[u32]) -> Result<(), CelebrationError>;
    fn open_unlock_modal(&mut self, modal: &UnlockModal) -> Result<(), CelebrationError>;
}

/// Fires every effect for `event`. Returns the plan that was attempted, if any.
pub fn celebrate(event: &UpgradeEvent, sink: &mut dyn CelebrationSink) -> Option<CelebrationPlan> {
    let plan = CelebrationPlan::for_tier(event.to)?;
    debug!(from = %event.from, to = %event.to, "firing unlock celebration");

    if let Err(err) = sink.confetti(&plan.confetti) {
        warn!(tier = %event.to, "confetti skipped: {err}");
    }
    if let Err(err) = sink.vibrate(&plan.vibration_ms) {
        warn!(tier = %event.to, "vibration skipped: {err}");
    }
    if let Err(err) = sink.open_unlock_modal(&plan.modal) {
        warn!(tier = %event.to, "unlock modal skipped: {err}");
    }
    Some(plan)
}

/// Records effects instead of rendering them; hosts forward the record to the real UI.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct RecordedEffects {
    pub confetti: Vec<ConfettiSpec>,
    pub vibrations: Vec<Vec<u32>>,
    pub modals: Vec<UnlockModal>,
}

impl CelebrationSink for RecordedEffects {
    fn confetti(&mut self, spec: &ConfettiSpec) -> Result<(), CelebrationError> {
        self.confetti.push(spec.clone());
        Ok(())
    }

    fn vibrate(&mut self, pattern_ms: &[u32]) -> Result<(), CelebrationError> {
        self.vibrations.push(pattern_ms.to_vec());
        Ok(())
    }

    fn open_unlock_modal(&mut self, modal: &UnlockModal) -> Result<(), CelebrationError> {
        self.modals.push(modal.clone());
        Ok(())
    }
}

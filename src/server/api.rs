use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hours::{availability, resolve_local_datetime, Shop, ShopAvailability};
use crate::tier::celebration::RecordedEffects;
use crate::tier::theme::StyleSheet;
use crate::tier::{
    celebrate, Progression, ThemeAdapter, TierEvaluation, TierName, UpgradeEvent, TIERS,
};

use super::AppState;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Parse(#[from] serde_json::Error),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    Internal(String),
}

pub fn health_payload() -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "service": "rescuebag-api",
        "version": env!("CARGO_PKG_VERSION")
    }))?)
}

#[derive(Debug, Clone, Serialize)]
pub struct TierListItem {
    pub name: TierName,
    pub display_name: &'static str,
    pub min_orders: u32,
    pub max_orders: Option<u32>,
    pub mascot_asset: &'static str,
}

pub fn tiers_payload() -> Result<String, ApiError> {
    let list: Vec<TierListItem> = TIERS
        .iter()
        .map(|tier| TierListItem {
            name: tier.name,
            display_name: tier.name.display_name(),
            min_orders: tier.min_orders,
            max_orders: tier.max_orders,
            mascot_asset: tier.mascot_asset,
        })
        .collect();
    Ok(serde_json::to_string_pretty(&serde_json::json!({ "tiers": list }))?)
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgressionResponse {
    pub status: &'static str,
    pub progression: Progression,
    pub data_tier: &'static str,
    pub theme: BTreeMap<&'static str, &'static str>,
    pub upgrade: Option<UpgradeEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub celebration: Option<RecordedEffects>,
}

impl ProgressionResponse {
    pub fn from_evaluation(evaluation: TierEvaluation) -> Self {
        // Effects are collected here and forwarded to the client, which renders them.
        let celebration = evaluation.upgrade.as_ref().and_then(|event| {
            let mut effects = RecordedEffects::default();
            celebrate(event, &mut effects).map(|_| effects)
        });
        Self {
            status: "ok",
            data_tier: evaluation.progression.current_tier.as_str(),
            theme: evaluation.theme.style_vars(),
            progression: evaluation.progression,
            upgrade: evaluation.upgrade,
            celebration,
        }
    }
}

fn respond(evaluation: TierEvaluation) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(
        &ProgressionResponse::from_evaluation(evaluation),
    )?)
}

pub fn progression_payload(state: &AppState) -> Result<String, ApiError> {
    let evaluation = state.with_engine(|engine| engine.evaluate())?;
    respond(evaluation)
}

pub fn complete_order_payload(state: &AppState) -> Result<String, ApiError> {
    let evaluation = state.with_engine(|engine| {
        engine.increment_completed_orders();
        engine.evaluate()
    })?;
    respond(evaluation)
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetOrdersRequest {
    pub completed_orders: i64,
}

pub fn set_orders_payload(state: &AppState, body: &str) -> Result<String, ApiError> {
    let req: SetOrdersRequest = serde_json::from_str(body)?;
    let completed_orders = u32::try_from(req.completed_orders).map_err(|_| {
        ApiError::Validation(format!(
            "completed_orders must be between 0 and {}, got {}",
            u32::MAX,
            req.completed_orders
        ))
    })?;
    let evaluation = state.with_engine(|engine| {
        engine.set_completed_orders(completed_orders);
        engine.evaluate()
    })?;
    respond(evaluation)
}

pub fn debug_cycle_payload(state: &AppState) -> Result<String, ApiError> {
    if !state.debug_tools() {
        return Err(ApiError::NotFound("Route not found"));
    }
    let evaluation = state.with_engine(|engine| {
        engine.cycle_debug();
        engine.evaluate()
    })?;
    respond(evaluation)
}

/// Stylesheet for the active tier. Reads progression without touching upgrade tracking.
pub fn theme_css(state: &AppState) -> Result<String, ApiError> {
    let tier = state.with_engine(|engine| engine.current_tier())?;
    let mut sheet = StyleSheet::default();
    sheet.apply(tier, tier.definition().color_theme);
    Ok(sheet.css)
}

#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityRequest {
    pub shop: Shop,
    /// Wall-clock override; defaults to this machine's local time.
    #[serde(default)]
    pub at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityResponse {
    pub status: &'static str,
    pub at: String,
    pub availability: ShopAvailability,
}

pub fn availability_payload(body: &str) -> Result<String, ApiError> {
    let req: AvailabilityRequest = serde_json::from_str(body)?;
    let at = req.at.as_deref();
    let now = resolve_local_datetime(at).ok_or_else(|| {
        ApiError::Validation(format!(
            "at must look like YYYY-MM-DDTHH:MM, got '{}'",
            at.unwrap_or_default()
        ))
    })?;
    let response = AvailabilityResponse {
        status: "ok",
        at: now.format("%Y-%m-%dT%H:%M:%S").to_string(),
        availability: availability(&req.shop, now),
    };
    Ok(serde_json::to_string_pretty(&response)?)
}

//! Tier color themes. The engine hands the active theme out as data; a single
//! presentation adapter decides how to apply it.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;

use super::TierName;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorTheme {
    pub primary: &'static str,
    pub primary_contrast: &'static str,
    pub secondary: &'static str,
    pub secondary_contrast: &'static str,
    pub background: &'static str,
    pub foreground: &'static str,
    pub muted: &'static str,
    pub muted_contrast: &'static str,
    pub accent: &'static str,
    pub accent_contrast: &'static str,
    pub card: &'static str,
    pub card_contrast: &'static str,
    pub border: &'static str,
    /// Confetti palette used when this tier is unlocked.
    pub confetti: &'static [&'static str],
}

pub static JOE_THEME: ColorTheme = ColorTheme {
    primary: "#2f6f4f",
    primary_contrast: "#ffffff",
    secondary: "#e8f1ea",
    secondary_contrast: "#1f3d2c",
    background: "#fbfaf6",
    foreground: "#1c1c1a",
    muted: "#efede6",
    muted_contrast: "#6b6a63",
    accent: "#f4b942",
    accent_contrast: "#2a1f00",
    card: "#ffffff",
    card_contrast: "#1c1c1a",
    border: "#dedbd0",
    confetti: &["#2f6f4f", "#f4b942", "#ffffff"],
};

pub static SHREK_THEME: ColorTheme = ColorTheme {
    primary: "#6a9a1f",
    primary_contrast: "#ffffff",
    secondary: "#dcebc0",
    secondary_contrast: "#2d4009",
    background: "#f6f9ee",
    foreground: "#1e2610",
    muted: "#e6edd6",
    muted_contrast: "#5c6848",
    accent: "#8b5a2b",
    accent_contrast: "#ffffff",
    card: "#ffffff",
    card_contrast: "#1e2610",
    border: "#c9d8a8",
    confetti: &["#6a9a1f", "#a4c639", "#8b5a2b", "#dcebc0"],
};

pub static ZEUS_THEME: ColorTheme = ColorTheme {
    primary: "#1d3fbf",
    primary_contrast: "#ffffff",
    secondary: "#f5d76e",
    secondary_contrast: "#2b2100",
    background: "#0f1330",
    foreground: "#f2f4ff",
    muted: "#1c2250",
    muted_contrast: "#a9b1e0",
    accent: "#ffd23f",
    accent_contrast: "#1a1400",
    card: "#171d45",
    card_contrast: "#f2f4ff",
    border: "#2e3772",
    confetti: &["#ffd23f", "#f5d76e", "#1d3fbf", "#ffffff", "#8fb3ff"],
};

impl ColorTheme {
    /// Flat map of CSS custom properties, keyed by variable name.
    pub fn style_vars(&self) -> BTreeMap<&'static str, &'static str> {
        BTreeMap::from([
            ("--primary", self.primary),
            ("--primary-contrast", self.primary_contrast),
            ("--secondary", self.secondary),
            ("--secondary-contrast", self.secondary_contrast),
            ("--background", self.background),
            ("--foreground", self.foreground),
            ("--muted", self.muted),
            ("--muted-contrast", self.muted_contrast),
            ("--accent", self.accent),
            ("--accent-contrast", self.accent_contrast),
            ("--card", self.card),
            ("--card-contrast", self.card_contrast),
            ("--border", self.border),
        ])
    }
}

/// Presentation-layer hook. Called on every evaluation, so implementations must be idempotent.
pub trait ThemeAdapter {
    fn apply(&mut self, tier: TierName, theme: &ColorTheme);
}

/// Renders the active theme as a `:root` stylesheet plus the `data-tier` attribute value.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StyleSheet {
    pub data_tier: Option<&'static str>,
    pub css: String,
}

impl ThemeAdapter for StyleSheet {
    fn apply(&mut self, tier: TierName, theme: &ColorTheme) {
        let mut css = String::from(":root {\n");
        for (name, value) in theme.style_vars() {
            let _ = writeln!(&mut css, "  {name}: {value};");
        }
        css.push_str("}\n");
        self.data_tier = Some(tier.as_str());
        self.css = css;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tier::TIERS;

    #[test]
    fn every_tier_exposes_all_tokens() {
        for tier in &TIERS {
            let vars = tier.color_theme.style_vars();
            assert_eq!(vars.len(), 13);
            assert!(vars.values().all(|v| v.starts_with('#')));
        }
    }

    #[test]
    fn stylesheet_apply_is_idempotent() {
        let mut sheet = StyleSheet::default();
        sheet.apply(TierName::Shrek, &SHREK_THEME);
        let first = sheet.clone();
        sheet.apply(TierName::Shrek, &SHREK_THEME);
        assert_eq!(first, sheet);
        assert_eq!(sheet.data_tier, Some("shrek"));
        assert!(sheet.css.contains("  --primary: #6a9a1f;\n"));
    }
}

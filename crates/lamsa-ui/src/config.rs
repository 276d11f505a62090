//! # UI Configuration
//!
//! Display text, currency formatting and every animation timing used by the
//! page.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     LAMSA_STORAGE_KEY=lamsa-cart-staging                               │
//! │     LAMSA_CURRENCY_SUFFIX=SAR                                          │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/storefront/storefront.toml (Linux)                       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     The timings the storefront shipped with                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! [currency]
//! suffix = "ريال"
//!
//! [toast]
//! dwell_ms = 3000
//! exit_ms = 400
//!
//! [reveal]
//! threshold = 0.1
//! root_margin_bottom_px = -40
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use lamsa_core::{Money, ProductId, CART_STORAGE_KEY};

use crate::error::{UiError, UiResult};

// =============================================================================
// Sections
// =============================================================================

/// Where the cart is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    pub key: String,
}

impl Default for StorageSection {
    fn default() -> Self {
        StorageSection {
            key: CART_STORAGE_KEY.to_string(),
        }
    }
}

/// Price display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencySection {
    /// Appended after every amount, separated by a space.
    pub suffix: String,
}

impl Default for CurrencySection {
    fn default() -> Self {
        CurrencySection {
            suffix: "ريال".to_string(),
        }
    }
}

/// Shopper-facing strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextSection {
    pub empty_icon: String,
    pub empty_title: String,
    pub empty_hint: String,
    /// `{name}` is replaced with the product name.
    pub added_template: String,
    pub checkout_message: String,
    pub remove_label: String,
    pub details_label: String,
}

impl Default for TextSection {
    fn default() -> Self {
        TextSection {
            empty_icon: "🍰".to_string(),
            empty_title: "سلتك فارغة".to_string(),
            empty_hint: "أضف بعض الحلويات الشهية!".to_string(),
            added_template: "تمت إضافة \"{name}\" للسلة! 🛒".to_string(),
            checkout_message: "شكراً لطلبك! سيتم التواصل معك قريباً 🎉".to_string(),
            remove_label: "✕".to_string(),
            details_label: "عرض التفاصيل".to_string(),
        }
    }
}

/// Toast lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastSection {
    /// Delay before the slide-in starts (one animation frame).
    pub frame_ms: u64,
    /// Time from show until the exit animation starts.
    pub dwell_ms: u64,
    /// Exit animation length; the element is removed when it ends.
    pub exit_ms: u64,
}

impl Default for ToastSection {
    fn default() -> Self {
        ToastSection {
            frame_ms: 16,
            dwell_ms: 3000,
            exit_ms: 400,
        }
    }
}

/// Scroll-triggered reveal of cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealSection {
    /// Visible fraction (0..=1) needed to trigger.
    pub threshold: f64,
    /// Added to the viewport's bottom edge; negative shrinks it.
    pub root_margin_bottom_px: f64,
    pub stagger_ms: u64,
    pub offset_px: i32,
    pub duration_ms: u64,
}

impl Default for RevealSection {
    fn default() -> Self {
        RevealSection {
            threshold: 0.1,
            root_margin_bottom_px: -40.0,
            stagger_ms: 50,
            offset_px: 30,
            duration_ms: 500,
        }
    }
}

/// Navbar shadow on scroll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavbarSection {
    pub scrolled_threshold_px: f64,
}

impl Default for NavbarSection {
    fn default() -> Self {
        NavbarSection {
            scrolled_threshold_px: 20.0,
        }
    }
}

/// Server flash notices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlashSection {
    pub delay_ms: u64,
    pub fade_ms: u64,
    pub offset_px: i32,
}

impl Default for FlashSection {
    fn default() -> Self {
        FlashSection {
            delay_ms: 4000,
            fade_ms: 300,
            offset_px: -10,
        }
    }
}

/// Hero entrance on page ready.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntrySection {
    /// Delay before the hero elements are released.
    pub release_ms: u64,
    pub hero_base_delay_ms: u64,
    pub hero_stagger_ms: u64,
    pub hero_offset_px: i32,
    pub hero_duration_ms: u64,
    pub visual_delay_ms: u64,
    pub visual_offset_px: i32,
    pub visual_duration_ms: u64,
}

impl Default for EntrySection {
    fn default() -> Self {
        EntrySection {
            release_ms: 50,
            hero_base_delay_ms: 100,
            hero_stagger_ms: 100,
            hero_offset_px: 24,
            hero_duration_ms: 600,
            visual_delay_ms: 400,
            visual_offset_px: -30,
            visual_duration_ms: 800,
        }
    }
}

/// Cart button bump after an add.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartButtonSection {
    pub pulse_ms: u64,
    /// Scale in percent while pulsed.
    pub pulse_scale_pct: u32,
}

impl Default for CartButtonSection {
    fn default() -> Self {
        CartButtonSection {
            pulse_ms: 200,
            pulse_scale_pct: 120,
        }
    }
}

/// Page paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutesSection {
    pub product_prefix: String,
}

impl Default for RoutesSection {
    fn default() -> Self {
        RoutesSection {
            product_prefix: "/product/".to_string(),
        }
    }
}

// =============================================================================
// UiConfig
// =============================================================================

/// Complete presentation configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub storage: StorageSection,
    pub currency: CurrencySection,
    pub text: TextSection,
    pub toast: ToastSection,
    pub reveal: RevealSection,
    pub navbar: NavbarSection,
    pub flash: FlashSection,
    pub entry: EntrySection,
    pub cart_button: CartButtonSection,
    pub routes: RoutesSection,
}

impl UiConfig {
    /// Loads configuration from file (if present) and environment.
    ///
    /// A missing file is not an error; an unreadable or invalid one is.
    pub fn load(config_path: Option<PathBuf>) -> UiResult<Self> {
        let mut config = UiConfig::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
                info!(?path, "Loaded storefront config");
            } else {
                debug!(?path, "No config file, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> UiResult<()> {
        if self.storage.key.trim().is_empty() {
            return Err(UiError::InvalidConfig("storage key must not be empty".into()));
        }

        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(UiError::InvalidConfig(format!(
                "reveal threshold must be between 0 and 1, got {}",
                self.reveal.threshold
            )));
        }

        if self.toast.dwell_ms == 0 {
            return Err(UiError::InvalidConfig(
                "toast dwell must be greater than 0".into(),
            ));
        }

        if !self.text.added_template.contains("{name}") {
            warn!("added_template has no {{name}} placeholder");
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("LAMSA_STORAGE_KEY") {
            debug!(key = %key, "Overriding storage key from environment");
            self.storage.key = key;
        }

        if let Ok(suffix) = std::env::var("LAMSA_CURRENCY_SUFFIX") {
            self.currency.suffix = suffix;
        }

        if let Ok(ms) = std::env::var("LAMSA_TOAST_DWELL_MS") {
            match ms.parse::<u64>() {
                Ok(ms) => self.toast.dwell_ms = ms,
                Err(_) => warn!(value = %ms, "Ignoring LAMSA_TOAST_DWELL_MS"),
            }
        }

        if let Ok(px) = std::env::var("LAMSA_NAVBAR_THRESHOLD_PX") {
            match px.parse::<f64>() {
                Ok(px) => self.navbar.scrolled_threshold_px = px,
                Err(_) => warn!(value = %px, "Ignoring LAMSA_NAVBAR_THRESHOLD_PX"),
            }
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "lamsa", "storefront")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    // =========================================================================
    // Formatting
    // =========================================================================

    /// Fixed two-decimal amount with the currency suffix: `25.00 ريال`.
    pub fn format_total(&self, amount: Money) -> String {
        format!("{} {}", amount, self.currency.suffix)
    }

    /// Per-row price line: `2 × 12.5 ريال`.
    pub fn format_line(&self, quantity: u32, unit_price: Money) -> String {
        format!(
            "{} × {} {}",
            quantity,
            unit_price.compact(),
            self.currency.suffix
        )
    }

    /// Confirmation toast text for an add.
    pub fn added_message(&self, name: &str) -> String {
        self.text.added_template.replace("{name}", name)
    }

    /// Details page path for a product.
    pub fn product_path(&self, id: &ProductId) -> String {
        format!("{}{}", self.routes.product_prefix, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_shipped_timings() {
        let config = UiConfig::default();
        assert_eq!(config.storage.key, "lamsa-cart");
        assert_eq!(config.toast.dwell_ms + config.toast.exit_ms, 3400);
        assert_eq!(config.reveal.threshold, 0.1);
        assert_eq!(config.reveal.root_margin_bottom_px, -40.0);
        assert_eq!(config.navbar.scrolled_threshold_px, 20.0);
        assert_eq!(config.flash.delay_ms, 4000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_format_total_and_line() {
        let config = UiConfig::default();
        assert_eq!(config.format_total(Money::from_cents(2500)), "25.00 ريال");
        assert_eq!(
            config.format_line(2, Money::from_cents(1250)),
            "2 × 12.5 ريال"
        );
    }

    #[test]
    fn test_added_message() {
        let config = UiConfig::default();
        assert_eq!(
            config.added_message("مافن التوت البري"),
            "تمت إضافة \"مافن التوت البري\" للسلة! 🛒"
        );
    }

    #[test]
    fn test_product_path() {
        let config = UiConfig::default();
        assert_eq!(config.product_path(&ProductId::from(4)), "/product/4");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: UiConfig = toml::from_str(
            r#"
            [currency]
            suffix = "SAR"

            [toast]
            dwell_ms = 1500
            "#,
        )
        .unwrap();

        assert_eq!(config.currency.suffix, "SAR");
        assert_eq!(config.toast.dwell_ms, 1500);
        assert_eq!(config.toast.exit_ms, 400);
        assert_eq!(config.flash.delay_ms, 4000);
    }

    #[test]
    fn test_validation() {
        let mut config = UiConfig::default();
        config.reveal.threshold = 1.5;
        assert!(config.validate().is_err());

        config.reveal.threshold = 0.25;
        config.toast.dwell_ms = 0;
        assert!(config.validate().is_err());

        config.toast.dwell_ms = 10;
        config.storage.key = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("lamsa-ui-config-does-not-exist.toml");
        let config = UiConfig::load(Some(path)).unwrap();
        assert_eq!(config.flash.fade_ms, 300);
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = toml::to_string_pretty(&UiConfig::default()).unwrap();
        assert!(toml_str.contains("[toast]"));
        assert!(toml_str.contains("[reveal]"));
    }
}

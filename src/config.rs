//! Navigation configuration.
//!
//! Handles loading, validating, and merging `docnav.toml`. Stock defaults are
//! overridden by a user file; only the keys present in the file change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [menu]
//! container_id = "table-of-contents-wrapper"  # Element hosting the menu
//! mobile_toggle_id = "hamburger-menu"         # Control showing the menu on small screens
//! hidden_titles = []                          # Titles built but never shown
//!
//! [highlight]
//! duration_ms = 1000        # How long a heading stays highlighted
//! settle_ms = 1             # Wait for layout before measuring the scroll offset
//! top_tolerance_px = 5.0    # Headings this close to the viewport top are not flashed
//! repeat = "restart"        # "restart" or "preserve"; see RepeatPolicy
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::menu::MenuOptions;

/// File name looked up in the config directory.
pub const CONFIG_FILE: &str = "docnav.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `docnav.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    /// Menu container and entry visibility.
    pub menu: MenuConfig,
    /// Hash-target highlighting.
    pub highlight: HighlightConfig,
}

impl NavConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.menu.container_id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "menu.container_id must not be empty".into(),
            ));
        }
        if self.menu.mobile_toggle_id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "menu.mobile_toggle_id must not be empty".into(),
            ));
        }
        if self.highlight.duration_ms == 0 {
            return Err(ConfigError::Validation(
                "highlight.duration_ms must be greater than 0".into(),
            ));
        }
        let tolerance = self.highlight.top_tolerance_px;
        if tolerance.is_nan() || tolerance < 0.0 {
            return Err(ConfigError::Validation(
                "highlight.top_tolerance_px must be a non-negative number".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MenuConfig {
    /// Id of the element the menu is rendered into.
    pub container_id: String,
    /// Id of the control that shows and hides the menu on small screens.
    pub mobile_toggle_id: String,
    /// Entries with these titles are built but not rendered.
    pub hidden_titles: Vec<String>,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            container_id: "table-of-contents-wrapper".to_string(),
            mobile_toggle_id: "hamburger-menu".to_string(),
            hidden_titles: Vec::new(),
        }
    }
}

impl MenuConfig {
    pub fn menu_options(&self) -> MenuOptions {
        MenuOptions {
            hidden_titles: self.hidden_titles.clone(),
        }
    }
}

/// What a repeated highlight of the same heading does to the pending clear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatPolicy {
    /// Cancel the pending clear and start a fresh one.
    #[default]
    Restart,
    /// Leave earlier clears running; the first one to fire ends the highlight.
    Preserve,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HighlightConfig {
    /// Milliseconds a heading stays active.
    pub duration_ms: u64,
    /// Delay before measuring the scroll offset after a hash jump.
    pub settle_ms: u64,
    /// Distance from the viewport top under which highlighting is skipped.
    pub top_tolerance_px: f64,
    pub repeat: RepeatPolicy,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            duration_ms: 1000,
            settle_ms: 1,
            top_tolerance_px: 5.0,
            repeat: RepeatPolicy::Restart,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(NavConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `docnav.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<NavConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: NavConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `docnav.toml` in `dir`, falling back to defaults.
pub fn load_config(dir: &Path) -> Result<NavConfig, ConfigError> {
    resolve_config(load_raw_config(dir)?)
}

/// Returns a fully-commented stock `docnav.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# docnav configuration
# ====================
# Every key is optional. Omitted keys keep the values shown here.

[menu]
# Id of the element the generated menu is placed into.
container_id = "table-of-contents-wrapper"

# Id of the control that shows the menu on small screens. A click anywhere
# outside the menu hides it again.
mobile_toggle_id = "hamburger-menu"

# Entries with these exact titles are still built (so their anchors can be
# highlighted) but are left out of the rendered menu.
hidden_titles = []

[highlight]
# Milliseconds a heading targeted by the URL hash stays highlighted.
duration_ms = 1000

# Milliseconds to wait after a hash jump before measuring the scroll offset.
settle_ms = 1

# Headings already within this many pixels of the viewport top are not
# highlighted; the reader can see them in place.
top_tolerance_px = 5.0

# What happens when the same heading is highlighted again while still active:
#   "restart"  - the highlight lasts duration_ms from the latest request
#   "preserve" - the first pending clear still fires and ends it early
repeat = "restart"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_expected_values() {
        let config = NavConfig::default();
        assert_eq!(config.menu.container_id, "table-of-contents-wrapper");
        assert_eq!(config.menu.mobile_toggle_id, "hamburger-menu");
        assert!(config.menu.hidden_titles.is_empty());
        assert_eq!(config.highlight.duration_ms, 1000);
        assert_eq!(config.highlight.settle_ms, 1);
        assert_eq!(config.highlight.top_tolerance_px, 5.0);
        assert_eq!(config.highlight.repeat, RepeatPolicy::Restart);
    }

    #[test]
    fn parse_partial_config() {
        let config: NavConfig = toml::from_str(
            r#"
            [highlight]
            duration_ms = 1500
            "#,
        )
        .unwrap();
        assert_eq!(config.highlight.duration_ms, 1500);
        assert_eq!(config.highlight.settle_ms, 1);
        assert_eq!(config.menu.container_id, "table-of-contents-wrapper");
    }

    #[test]
    fn parse_repeat_policy() {
        let config: NavConfig = toml::from_str("[highlight]\nrepeat = \"preserve\"").unwrap();
        assert_eq!(config.highlight.repeat, RepeatPolicy::Preserve);
    }

    #[test]
    fn unknown_key_rejected() {
        let result: Result<NavConfig, _> = toml::from_str("[menu]\ncontainer = \"x\"");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<NavConfig, _> = toml::from_str("[search]\nenabled = true");
        assert!(result.is_err());
    }

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("b = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("a").unwrap().as_integer(), Some(1));
        assert_eq!(merged.get("b").unwrap().as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_nested_tables() {
        let base = stock_defaults_value();
        let overlay: toml::Value = toml::from_str("[menu]\nhidden_titles = [\"Search\"]").unwrap();
        let merged = merge_toml(base, overlay);
        let menu = merged.get("menu").unwrap();
        assert_eq!(
            menu.get("container_id").unwrap().as_str(),
            Some("table-of-contents-wrapper")
        );
        assert_eq!(menu.get("hidden_titles").unwrap().as_array().unwrap().len(), 1);
    }

    #[test]
    fn validate_default_config_passes() {
        assert!(NavConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_zero_duration() {
        let mut config = NavConfig::default();
        config.highlight.duration_ms = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_negative_tolerance() {
        let mut config = NavConfig::default();
        config.highlight.top_tolerance_px = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_empty_container_id() {
        let mut config = NavConfig::default();
        config.menu.container_id = "  ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_raw_config_returns_none_when_no_file() {
        let tmp = TempDir::new().unwrap();
        assert!(load_raw_config(tmp.path()).unwrap().is_none());
    }

    #[test]
    fn load_config_merges_file_over_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            "[menu]\ncontainer_id = \"sidebar\"\n",
        )
        .unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.menu.container_id, "sidebar");
        assert_eq!(config.highlight.duration_ms, 1000);
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "[highlight]\nduration_ms = 0\n").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn load_config_reports_bad_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "[menu\n").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let parsed: NavConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = NavConfig::default();
        assert_eq!(parsed.menu.container_id, defaults.menu.container_id);
        assert_eq!(parsed.highlight.duration_ms, defaults.highlight.duration_ms);
        assert_eq!(parsed.highlight.top_tolerance_px, defaults.highlight.top_tolerance_px);
        assert_eq!(parsed.highlight.repeat, defaults.highlight.repeat);
    }

    #[test]
    fn menu_options_carry_hidden_titles() {
        let mut config = MenuConfig::default();
        config.hidden_titles.push("Search".into());
        assert_eq!(config.menu_options().hidden_titles, vec!["Search".to_string()]);
    }
}

//! Site configuration.
//!
//! Loaded once at startup and shared read-only with every request. The
//! server-level settings (media root, port, bind address) come from the
//! command line or environment; this module covers what the pages look like.
//!
//! ## Config File Location
//!
//! `--config <path>` wins. Without it, `config.toml` in the media root is
//! used if present. The file is not media, so it never shows up in the
//! gallery.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! title = "Gallery"          # Page <title> and heading
//! author = ""                # Footer credit, hidden when empty
//!
//! [colors.light]
//! background = "#fafafa"
//! surface = "#ffffff"        # Tiles and modal chrome
//! text = "#1a1a1a"
//! text_muted = "#6b6b6b"     # Captions, breadcrumb
//! accent = "#2f6fdf"         # Links, focus rings
//!
//! [colors.dark]
//! background = "#111111"
//! surface = "#1c1c1c"
//! text = "#eeeeee"
//! text_muted = "#9a9a9a"
//! accent = "#7fa8ff"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse: user values are merged over stock defaults key
//! by key, so overriding one color keeps the rest. Unknown keys are rejected
//! to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Page title and top heading.
    pub title: String,
    /// Credit line in the footer. Empty hides the footer.
    pub author: String,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Gallery".to_string(),
            author: String::new(),
            colors: ColorConfig::default(),
        }
    }
}

impl SiteConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::Validation("title must not be empty".into()));
        }
        for (scheme, colors) in [("light", &self.colors.light), ("dark", &self.colors.dark)] {
            for (key, value) in colors.entries() {
                if value.contains([';', '{', '}', '<']) {
                    return Err(ConfigError::Validation(format!(
                        "colors.{scheme}.{key} is not a CSS color: {value:?}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    /// Tile and modal chrome background.
    pub surface: String,
    pub text: String,
    /// Captions and breadcrumb.
    pub text_muted: String,
    /// Links and focus rings.
    pub accent: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#fafafa".to_string(),
            surface: "#ffffff".to_string(),
            text: "#1a1a1a".to_string(),
            text_muted: "#6b6b6b".to_string(),
            accent: "#2f6fdf".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#111111".to_string(),
            surface: "#1c1c1c".to_string(),
            text: "#eeeeee".to_string(),
            text_muted: "#9a9a9a".to_string(),
            accent: "#7fa8ff".to_string(),
        }
    }

    fn entries(&self) -> [(&'static str, &str); 5] {
        [
            ("background", self.background.as_str()),
            ("surface", self.surface.as_str()),
            ("text", self.text.as_str()),
            ("text_muted", self.text_muted.as_str()),
            ("accent", self.accent.as_str()),
        ]
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
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

/// Read a config file as a raw TOML value. `Ok(None)` when it does not exist.
pub fn load_raw_config(config_path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the site config.
///
/// An explicit path must exist. Without one, `<root>/config.toml` is used if
/// present and stock defaults otherwise.
pub fn load_config(explicit: Option<&Path>, root: &Path) -> Result<SiteConfig, ConfigError> {
    let overlay = match explicit {
        Some(path) => Some(toml::from_str(&fs::read_to_string(path)?)?),
        None => load_raw_config(&root.join("config.toml"))?,
    };
    resolve_config(stock_defaults_value(), overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# folio configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file at <media root>/config.toml or pass --config <path>.
# Unknown keys will cause an error.

# Page title and top heading.
title = "Gallery"

# Footer credit line. Leave empty to hide the footer.
author = ""

# ---------------------------------------------------------------------------
# Colors - Light mode
# ---------------------------------------------------------------------------
[colors.light]
background = "#fafafa"
surface = "#ffffff"       # Tiles and modal chrome
text = "#1a1a1a"
text_muted = "#6b6b6b"    # Captions, breadcrumb
accent = "#2f6fdf"        # Links, focus rings

# ---------------------------------------------------------------------------
# Colors - Dark mode (system preference or the page's theme toggle)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#111111"
surface = "#1c1c1c"
text = "#eeeeee"
text_muted = "#9a9a9a"
accent = "#7fa8ff"
"##
}

/// Generate CSS custom properties from color config.
///
/// Dark colors apply when the system prefers dark and no explicit choice was
/// made, or when `<html data-theme="dark">` is set by the theme toggle.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    let vars = |c: &ColorScheme| {
        format!(
            "--color-bg: {}; --color-surface: {}; --color-text: {}; --color-text-muted: {}; --color-accent: {};",
            c.background, c.surface, c.text, c.text_muted, c.accent
        )
    };
    format!(
        r#":root {{ {light} }}
@media (prefers-color-scheme: dark) {{
    :root:not([data-theme="light"]) {{ {dark} }}
}}
:root[data-theme="dark"] {{ {dark} }}"#,
        light = vars(&colors.light),
        dark = vars(&colors.dark),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Gallery");
        assert_eq!(config.author, "");
        assert_eq!(config.colors.light.background, "#fafafa");
        assert_eq!(config.colors.dark.background, "#111111");
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(None, tmp.path()).unwrap();
        assert_eq!(config.title, "Gallery");
    }

    #[test]
    fn load_config_reads_root_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "title = \"Summer 2024\"\nauthor = \"Sam\"\n",
        )
        .unwrap();

        let config = load_config(None, tmp.path()).unwrap();
        assert_eq!(config.title, "Summer 2024");
        assert_eq!(config.author, "Sam");
        assert_eq!(config.colors.light.accent, "#2f6fdf");
    }

    #[test]
    fn explicit_path_wins_over_root_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "title = \"Root\"").unwrap();
        let other = tmp.path().join("other.toml");
        fs::write(&other, "title = \"Explicit\"").unwrap();

        let config = load_config(Some(&other), tmp.path()).unwrap();
        assert_eq!(config.title, "Explicit");
    }

    #[test]
    fn explicit_missing_path_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = load_config(Some(&tmp.path().join("nope.toml")), tmp.path());
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn partial_color_override_keeps_siblings() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "[colors.dark]\nbackground = \"#000000\"\n",
        )
        .unwrap();

        let config = load_config(None, tmp.path()).unwrap();
        assert_eq!(config.colors.dark.background, "#000000");
        assert_eq!(config.colors.dark.text, "#eeeeee");
        assert_eq!(config.colors.light.background, "#fafafa");
    }

    #[test]
    fn invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "title = [unclosed").unwrap();
        assert!(matches!(
            load_config(None, tmp.path()),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn unknown_key_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "titel = \"typo\"").unwrap();
        assert!(load_config(None, tmp.path()).is_err());
    }

    #[test]
    fn unknown_nested_key_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "[colors.light]\nbackgroud = \"#fff\"\n",
        )
        .unwrap();
        assert!(load_config(None, tmp.path()).is_err());
    }

    #[test]
    fn empty_title_rejected() {
        let config = SiteConfig {
            title: "  ".into(),
            ..SiteConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn css_injection_in_color_rejected() {
        let mut config = SiteConfig::default();
        config.colors.light.text = "red; } body { display:none".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("colors.light.text"));
    }

    #[test]
    fn default_config_passes_validation() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn stock_config_toml_parses_to_defaults() {
        let value: toml::Value = toml::from_str(stock_config_toml()).unwrap();
        let config = resolve_config(stock_defaults_value(), Some(value)).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.title, defaults.title);
        assert_eq!(config.colors.dark.accent, defaults.colors.dark.accent);
    }

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("b = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_integer(), Some(1));
        assert_eq!(merged["b"].as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_deep_nested() {
        let base: toml::Value = toml::from_str("[x.y]\np = 1\nq = 2").unwrap();
        let overlay: toml::Value = toml::from_str("[x.y]\nq = 9").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["x"]["y"]["p"].as_integer(), Some(1));
        assert_eq!(merged["x"]["y"]["q"].as_integer(), Some(9));
    }

    #[test]
    fn color_css_has_both_schemes() {
        let css = generate_color_css(&ColorConfig::default());
        assert!(css.contains("--color-bg: #fafafa"));
        assert!(css.contains("--color-bg: #111111"));
        assert!(css.contains("prefers-color-scheme: dark"));
        assert!(css.contains(r#"[data-theme="dark"]"#));
    }
}

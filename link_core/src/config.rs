//! Configuration loaded from TOML.

use crate::annotation::LinkStyle;
use serde::Deserialize;
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub link: LinkConfig,
    pub clipboard: ClipboardConfig,
}

/// Link presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkConfig {
    /// `#RRGGBB` or `#AARRGGBB`.
    pub color: String,
    pub underline: bool,
}

/// Clipboard integration.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipboardConfig {
    /// Offer the clipboard URL when no link is selected.
    pub enabled: bool,
}

/// Errors that can occur during config loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("validation error: {0}")]
    Validation(String),
}

// ── Serde intermediate structs ──────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawConfig {
    link: RawLinkConfig,
    clipboard: RawClipboardConfig,
}

#[derive(Deserialize)]
#[serde(default)]
struct RawLinkConfig {
    color: String,
    underline: bool,
}

impl Default for RawLinkConfig {
    fn default() -> Self {
        let defaults = LinkConfig::default();
        Self {
            color: defaults.color,
            underline: defaults.underline,
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct RawClipboardConfig {
    enabled: bool,
}

impl Default for RawClipboardConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

// ── Default impls ───────────────────────────────────────────────────────

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            color: "#0087be".to_string(),
            underline: true,
        }
    }
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

// ── Config implementation ───────────────────────────────────────────────

impl Config {
    /// Load config from a TOML file path. Returns defaults if file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::Io(e)),
        }
    }

    /// Parse a TOML string into a Config.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig =
            toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;

        let config = Self {
            link: LinkConfig {
                color: raw.link.color,
                underline: raw.link.underline,
            },
            clipboard: ClipboardConfig {
                enabled: raw.clipboard.enabled,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the config, returning an error if any values are out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        parse_color(&self.link.color)?;
        Ok(())
    }

    /// Builds the style every link annotation is created with.
    pub fn link_style(&self) -> Result<LinkStyle, ConfigError> {
        Ok(LinkStyle::new(parse_color(&self.link.color)?, self.link.underline))
    }
}

/// Parses `#RRGGBB` (opaque) or `#AARRGGBB` into ARGB.
fn parse_color(color: &str) -> Result<u32, ConfigError> {
    let invalid = || {
        ConfigError::Validation(format!(
            "invalid link color '{}', expected #RRGGBB or #AARRGGBB",
            color
        ))
    };
    let hex = color.strip_prefix('#').ok_or_else(invalid)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let value = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
    match hex.len() {
        6 => Ok(0xFF00_0000 | value),
        8 => Ok(value),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_link_style() {
        let style = Config::default().link_style().unwrap();
        assert_eq!(style, LinkStyle::default());
    }

    #[test]
    fn test_default_clipboard_enabled() {
        assert!(Config::default().clipboard.enabled);
    }

    #[test]
    fn test_parse_full_config() {
        let config = Config::from_toml(
            r##"
            [link]
            color = "#80ff0000"
            underline = false

            [clipboard]
            enabled = false
            "##,
        )
        .unwrap();
        assert!(!config.clipboard.enabled);
        let style = config.link_style().unwrap();
        assert_eq!(style.color, 0x80FF_0000);
        assert!(!style.underline);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = Config::from_toml("[link]\nunderline = false\n").unwrap();
        assert_eq!(config.link.color, "#0087be");
        assert!(!config.link.underline);
        assert!(config.clipboard.enabled);
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_rgb_color_is_opaque() {
        let config = Config::from_toml("[link]\ncolor = \"#00ff00\"\n").unwrap();
        assert_eq!(config.link_style().unwrap().color, 0xFF00_FF00);
    }

    #[test]
    fn test_invalid_color_rejected() {
        for bad in ["0087be", "#12345", "#gggggg", "#0087be00ff"] {
            let toml = format!("[link]\ncolor = \"{}\"\n", bad);
            let err = Config::from_toml(&toml).unwrap_err();
            assert!(matches!(err, ConfigError::Validation(_)), "{bad} accepted");
        }
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = Config::from_toml("[link\ncolor = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("linkspan.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[clipboard]\nenabled = false").unwrap();

        let config = Config::load(&path).unwrap();
        assert!(!config.clipboard.enabled);
    }
}

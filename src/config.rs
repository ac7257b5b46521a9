//! Normalizer configuration.
//!
//! Options are fixed once a [`Normalizer`](crate::Normalizer) is built. A numeric option
//! set to zero counts as unset and falls back to its default, so a zero multiplier can
//! never silence an input family by accident.
//!
//! With the `config` feature the same options can be read from a TOML file:
//!
//! ```toml
//! target = { element = "viewport" }
//! mouse_multiplier = 1.5
//! touch_multiplier = 3
//! prevent_touch = true
//! ```

use crate::error::{Result, ScrollnormError};

/// Default scale applied to wheel deltas.
pub const DEFAULT_MOUSE_MULTIPLIER: f64 = 1.0;
/// Default scale applied to touch and pointer drag deltas.
pub const DEFAULT_TOUCH_MULTIPLIER: f64 = 2.0;
/// Default extra scale for line-mode wheel events on engines with the line-delta quirk.
pub const DEFAULT_FIREFOX_MULTIPLIER: f64 = 15.0;
/// Default magnitude of a single arrow key press.
pub const DEFAULT_KEY_STEP: f64 = 120.0;

/// Where device (wheel, touch, pointer) listeners are attached.
///
/// Keyboard listeners always go to the document scope regardless of this value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "config", derive(serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "lowercase"))]
pub enum AttachTarget {
    /// The global scope (the window)
    #[default]
    Global,
    /// A host element, identified by a host-defined selector or id
    Element(String),
}

/// Recognized normalizer options.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default, deny_unknown_fields))]
pub struct Config {
    pub target: AttachTarget,
    pub mouse_multiplier: f64,
    pub touch_multiplier: f64,
    pub firefox_multiplier: f64,
    pub key_step: f64,
    pub prevent_touch: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: AttachTarget::Global,
            mouse_multiplier: DEFAULT_MOUSE_MULTIPLIER,
            touch_multiplier: DEFAULT_TOUCH_MULTIPLIER,
            firefox_multiplier: DEFAULT_FIREFOX_MULTIPLIER,
            key_step: DEFAULT_KEY_STEP,
            prevent_touch: false,
        }
    }
}

impl Config {
    pub fn with_target(mut self, target: AttachTarget) -> Self {
        self.target = target;
        self
    }

    pub fn with_mouse_multiplier(mut self, value: f64) -> Self {
        self.mouse_multiplier = value;
        self
    }

    pub fn with_touch_multiplier(mut self, value: f64) -> Self {
        self.touch_multiplier = value;
        self
    }

    pub fn with_firefox_multiplier(mut self, value: f64) -> Self {
        self.firefox_multiplier = value;
        self
    }

    pub fn with_key_step(mut self, value: f64) -> Self {
        self.key_step = value;
        self
    }

    pub fn with_prevent_touch(mut self, value: bool) -> Self {
        self.prevent_touch = value;
        self
    }

    /// Replace unset (zero) numeric options with their defaults.
    pub fn resolved(mut self) -> Self {
        fn or_default(value: f64, default: f64) -> f64 {
            if value == 0.0 {
                default
            } else {
                value
            }
        }

        self.mouse_multiplier = or_default(self.mouse_multiplier, DEFAULT_MOUSE_MULTIPLIER);
        self.touch_multiplier = or_default(self.touch_multiplier, DEFAULT_TOUCH_MULTIPLIER);
        self.firefox_multiplier = or_default(self.firefox_multiplier, DEFAULT_FIREFOX_MULTIPLIER);
        self.key_step = or_default(self.key_step, DEFAULT_KEY_STEP);
        self
    }

    /// Reject options that would poison the running totals.
    pub fn validate(&self) -> Result<()> {
        let numeric = [
            ("mouse_multiplier", self.mouse_multiplier),
            ("touch_multiplier", self.touch_multiplier),
            ("firefox_multiplier", self.firefox_multiplier),
            ("key_step", self.key_step),
        ];

        for (name, value) in numeric {
            if !value.is_finite() {
                return Err(ScrollnormError::config(format!(
                    "{name} must be a finite number, got {value}"
                )));
            }
        }

        if let AttachTarget::Element(id) = &self.target {
            if id.trim().is_empty() {
                return Err(ScrollnormError::config("target element id is empty"));
            }
        }

        Ok(())
    }
}

#[cfg(feature = "config")]
impl Config {
    /// Parse, validate and resolve a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Config = toml::from_str(source)
            .map_err(|err| ScrollnormError::config(format!("invalid TOML: {err}")))?;
        config.validate()?;
        Ok(config.resolved())
    }

    /// Load a configuration file from `path`.
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|err| {
            ScrollnormError::config(format!("cannot read {}: {err}", path.display()))
        })?;
        log::debug!("loading configuration from {}", path.display());
        Self::from_toml_str(&source)
    }

    /// `<config_dir>/scrollnorm/config.toml`, if the platform has a config directory.
    pub fn default_path() -> Option<std::path::PathBuf> {
        dirs::config_dir().map(|dir| dir.join("scrollnorm").join("config.toml"))
    }

    /// Load the default configuration file when it exists, defaults otherwise.
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.target, AttachTarget::Global);
        assert_eq!(config.mouse_multiplier, 1.0);
        assert_eq!(config.touch_multiplier, 2.0);
        assert_eq!(config.firefox_multiplier, 15.0);
        assert_eq!(config.key_step, 120.0);
        assert!(!config.prevent_touch);
    }

    #[test]
    fn test_zero_falls_back_to_default() {
        let config = Config::default()
            .with_mouse_multiplier(0.0)
            .with_touch_multiplier(0.0)
            .with_key_step(0.0)
            .resolved();

        assert_eq!(config.mouse_multiplier, DEFAULT_MOUSE_MULTIPLIER);
        assert_eq!(config.touch_multiplier, DEFAULT_TOUCH_MULTIPLIER);
        assert_eq!(config.key_step, DEFAULT_KEY_STEP);
    }

    #[test]
    fn test_negative_multiplier_is_kept() {
        let config = Config::default().with_mouse_multiplier(-1.0).resolved();
        assert_eq!(config.mouse_multiplier, -1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let err = Config::default()
            .with_touch_multiplier(f64::NAN)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("touch_multiplier"));

        assert!(Config::default()
            .with_key_step(f64::INFINITY)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_rejects_blank_element() {
        let config = Config::default().with_target(AttachTarget::Element("  ".into()));
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "config")]
    mod toml_loading {
        use super::super::*;
        use std::io::Write;

        #[test]
        fn parses_partial_document() {
            let config = Config::from_toml_str(
                r#"
                mouse_multiplier = 2.5
                prevent_touch = true
                target = { element = "viewport" }
                "#,
            )
            .unwrap();

            assert_eq!(config.mouse_multiplier, 2.5);
            assert!(config.prevent_touch);
            assert_eq!(config.target, AttachTarget::Element("viewport".into()));
            assert_eq!(config.touch_multiplier, DEFAULT_TOUCH_MULTIPLIER);
        }

        #[test]
        fn global_target_and_zero_values() {
            let config = Config::from_toml_str(
                r#"
                target = "global"
                key_step = 0
                "#,
            )
            .unwrap();
            assert_eq!(config.target, AttachTarget::Global);
            assert_eq!(config.key_step, DEFAULT_KEY_STEP);
        }

        #[test]
        fn rejects_unknown_keys() {
            let err = Config::from_toml_str("wheel_speed = 3").unwrap_err();
            assert!(matches!(err, ScrollnormError::ConfigError { .. }));
        }

        #[test]
        fn loads_from_file() {
            let mut file = tempfile::NamedTempFile::new().expect("create temp file");
            writeln!(file, "touch_multiplier = 4").expect("write config");

            let config = Config::load(file.path()).unwrap();
            assert_eq!(config.touch_multiplier, 4.0);
        }

        #[test]
        fn missing_file_is_config_error() {
            let dir = tempfile::tempdir().expect("create temp dir");
            let err = Config::load(&dir.path().join("absent.toml")).unwrap_err();
            assert!(matches!(err, ScrollnormError::ConfigError { .. }));
        }
    }
}

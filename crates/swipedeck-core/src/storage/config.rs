//! TOML-based application configuration.
//!
//! Stores:
//! - Deck geometry and classification threshold
//! - Swipe animation timing and spring parameters
//! - Boost duration and tick interval
//!
//! Configuration is stored at `~/.config/swipedeck/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, CoreError, ValidationError};

/// Damped spring used when a card returns to rest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    #[serde(default = "default_stiffness")]
    pub stiffness: f64,
    #[serde(default = "default_damping")]
    pub damping: f64,
    #[serde(default = "default_mass")]
    pub mass: f64,
    /// Distance from rest (px) below which the spring may settle.
    #[serde(default = "default_rest_threshold")]
    pub rest_displacement: f64,
    /// Speed (px/s) below which the spring may settle.
    #[serde(default = "default_rest_threshold")]
    pub rest_speed: f64,
    /// Hard cap after which the card snaps to rest.
    #[serde(default = "default_spring_max_duration")]
    pub max_duration_ms: u64,
}

/// Swipe deck configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckConfig {
    /// Classification threshold as a fraction of `viewport_width`.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_viewport_width")]
    pub viewport_width: f64,
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f64,
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u64,
    /// Extra distance past the viewport edge a dismissed card travels.
    #[serde(default = "default_offscreen_margin")]
    pub offscreen_margin: f64,
    #[serde(default = "default_max_rotation")]
    pub max_rotation_deg: f64,
    #[serde(default)]
    pub spring: SpringConfig,
}

/// Boost session configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoostConfig {
    #[serde(default = "default_boost_total")]
    pub total_ms: u64,
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/swipedeck/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub deck: DeckConfig,
    #[serde(default)]
    pub boost: BoostConfig,
}

// Default functions
fn default_stiffness() -> f64 {
    230.2
}
fn default_damping() -> f64 {
    22.0
}
fn default_mass() -> f64 {
    1.0
}
fn default_rest_threshold() -> f64 {
    0.001
}
fn default_spring_max_duration() -> u64 {
    2_000
}
fn default_threshold() -> f64 {
    0.25
}
fn default_viewport_width() -> f64 {
    390.0
}
fn default_viewport_height() -> f64 {
    844.0
}
fn default_animation_duration() -> u64 {
    250
}
fn default_offscreen_margin() -> f64 {
    100.0
}
fn default_max_rotation() -> f64 {
    10.0
}
fn default_boost_total() -> u64 {
    30 * 60 * 1000
}
fn default_tick_interval() -> u64 {
    1_000
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: default_stiffness(),
            damping: default_damping(),
            mass: default_mass(),
            rest_displacement: default_rest_threshold(),
            rest_speed: default_rest_threshold(),
            max_duration_ms: default_spring_max_duration(),
        }
    }
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            animation_duration_ms: default_animation_duration(),
            offscreen_margin: default_offscreen_margin(),
            max_rotation_deg: default_max_rotation(),
            spring: SpringConfig::default(),
        }
    }
}

impl Default for BoostConfig {
    fn default() -> Self {
        Self {
            total_ms: default_boost_total(),
            tick_interval_ms: default_tick_interval(),
        }
    }
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidDimension {
            field: field.into(),
            value,
        })
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidDimension {
            field: field.into(),
            value,
        })
    }
}

impl SpringConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        positive("spring.stiffness", self.stiffness)?;
        positive("spring.damping", self.damping)?;
        positive("spring.mass", self.mass)?;
        positive("spring.rest_displacement", self.rest_displacement)?;
        positive("spring.rest_speed", self.rest_speed)?;
        if self.max_duration_ms == 0 {
            return Err(ValidationError::ZeroDuration {
                field: "spring.max_duration_ms".into(),
            });
        }
        Ok(())
    }
}

impl DeckConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.threshold.is_finite() && self.threshold > 0.0 && self.threshold <= 1.0) {
            return Err(ValidationError::ThresholdOutOfRange(self.threshold));
        }
        positive("deck.viewport_width", self.viewport_width)?;
        positive("deck.viewport_height", self.viewport_height)?;
        non_negative("deck.offscreen_margin", self.offscreen_margin)?;
        non_negative("deck.max_rotation_deg", self.max_rotation_deg)?;
        if self.animation_duration_ms == 0 {
            return Err(ValidationError::ZeroDuration {
                field: "deck.animation_duration_ms".into(),
            });
        }
        self.spring.validate()
    }
}

impl BoostConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.total_ms == 0 {
            return Err(ValidationError::ZeroDuration {
                field: "boost.total_ms".into(),
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(ValidationError::ZeroDuration {
                field: "boost.tick_interval_ms".into(),
            });
        }
        if self.tick_interval_ms > self.total_ms {
            return Err(ValidationError::TickExceedsTotal {
                tick_ms: self.tick_interval_ms,
                total_ms: self.total_ms,
            });
        }
        Ok(())
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) => {
                        return Err(invalid("cannot replace a whole section".into()));
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default location of the config file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if it is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, CoreError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, CoreError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(ConfigError::from)?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), CoreError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), CoreError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.deck.validate()?;
        self.boost.validate()
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Update a value in memory by dot-separated key. The result must
    /// still validate; on error `self` is unchanged.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a value by key and persist to the default location.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        self.apply(key, value)?;
        self.save()
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_default_values() {
        let cfg = Config::default();
        assert_eq!(cfg.deck.threshold, 0.25);
        assert_eq!(cfg.deck.animation_duration_ms, 250);
        assert_eq!(cfg.deck.offscreen_margin, 100.0);
        assert_eq!(cfg.deck.max_rotation_deg, 10.0);
        assert_eq!(cfg.boost.total_ms, 1_800_000);
        assert_eq!(cfg.boost.tick_interval_ms, 1_000);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg: Config = toml::from_str("[deck]\nviewport_width = 500.0\n").unwrap();
        assert_eq!(cfg.deck.viewport_width, 500.0);
        assert_eq!(cfg.deck.viewport_height, 844.0);
        assert_eq!(cfg.boost, BoostConfig::default());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("deck.threshold").as_deref(), Some("0.25"));
        assert_eq!(cfg.get("boost.tick_interval_ms").as_deref(), Some("1000"));
        assert_eq!(cfg.get("deck.spring.mass").as_deref(), Some("1.0"));
        assert!(cfg.get("deck.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn apply_updates_nested_number() {
        let mut cfg = Config::default();
        cfg.apply("deck.viewport_width", "400").unwrap();
        assert_eq!(cfg.deck.viewport_width, 400.0);
        cfg.apply("deck.threshold", "0.3").unwrap();
        assert_eq!(cfg.deck.threshold, 0.3);
        cfg.apply("boost.total_ms", "60000").unwrap();
        assert_eq!(cfg.boost.total_ms, 60_000);
    }

    #[test]
    fn apply_rejects_unknown_key() {
        let mut cfg = Config::default();
        let err = cfg.apply("deck.nonexistent_key", "1").unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::UnknownKey(_))));
        assert!(cfg.apply("deck", "1").is_err());
    }

    #[test]
    fn apply_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(cfg.apply("deck.viewport_width", "wide").is_err());
        assert!(cfg.apply("boost.total_ms", "1.5").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn apply_rejects_values_that_fail_validation() {
        let mut cfg = Config::default();
        let err = cfg.apply("deck.threshold", "1.5").unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::ThresholdOutOfRange(_))
        ));
        assert!(cfg.apply("boost.tick_interval_ms", "0").is_err());
        assert!(cfg.apply("boost.tick_interval_ms", "5000000").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn load_from_writes_defaults_when_missing() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn save_and_reload_preserves_changes() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.apply("deck.viewport_height", "900").unwrap();
        cfg.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.deck.viewport_height, 900.0);
    }

    #[test]
    fn load_from_rejects_garbage() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "deck = 12").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}

//! User configuration in TOML: interval lengths, XP rates, default focus
//! toggles and the writing assistant endpoint.
//!
//! Configuration is stored at `~/.config/zenwrite/config.toml`. Session
//! progress is never written here; it lives only in memory.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

use super::config_dir;
use crate::assist::{Assistant, AssistantConfig, HttpPromptService};
use crate::error::ConfigError;
use crate::progress::XpRates;
use crate::settings::FocusSettings;
use crate::timer::TimerConfig;

/// Every section falls back to its defaults when missing from the file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub xp: XpRates,
    #[serde(default)]
    pub focus: FocusSettings,
    #[serde(default)]
    pub assistant: AssistantConfig,
}

impl Config {
    /// `timer.work_minutes` -> `/timer/work_minutes`
    fn pointer(key: &str) -> Option<String> {
        if key.is_empty() || key.split('.').any(str::is_empty) {
            return None;
        }
        Some(format!("/{}", key.replace('.', "/")))
    }

    /// Parse `raw` into the JSON type already stored under `key`.
    fn coerce_like(existing: &Value, key: &str, raw: &str) -> Result<Value, ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        match existing {
            Value::Bool(_) => crate::settings::coerce_bool(raw)
                .map(Value::Bool)
                .ok_or_else(|| invalid(format!("expected on/off, got '{raw}'"))),
            Value::Number(n) if n.is_u64() => raw
                .trim()
                .parse::<u64>()
                .map(Value::from)
                .map_err(|_| invalid(format!("expected a whole number, got '{raw}'"))),
            Value::Number(_) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| invalid(format!("expected a number, got '{raw}'"))),
            Value::String(_) => Ok(Value::String(raw.to_string())),
            _ => Err(invalid("cannot replace a whole section".into())),
        }
    }

    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(config_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults there if absent.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let load_failed = |message: String| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message,
        };
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| load_failed(e.to_string()))?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(load_failed(e.to_string())),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Read one value by dot-path key, rendered as text.
    pub fn get(&self, key: &str) -> Option<String> {
        let tree = serde_json::to_value(self).ok()?;
        match tree.pointer(&Self::pointer(key)?)? {
            Value::String(s) => Some(s.clone()),
            Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Change one value by dot-path key. The result is validated before it
    /// replaces `self`; nothing is written to disk.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let pointer = Self::pointer(key).ok_or_else(unknown)?;
        let mut tree = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        let slot = tree.pointer_mut(&pointer).ok_or_else(unknown)?;
        *slot = Self::coerce_like(slot, key, value)?;

        let updated: Config = serde_json::from_value(tree).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.timer.validate().map_err(|e| ConfigError::InvalidValue {
            key: "timer".into(),
            message: e.to_string(),
        })?;
        if !self.xp.per_word.is_finite() || self.xp.per_word < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "xp.per_word".into(),
                message: "must be a non-negative number".into(),
            });
        }
        url::Url::parse(&self.assistant.base_url).map_err(|e| ConfigError::InvalidValue {
            key: "assistant.base_url".into(),
            message: e.to_string(),
        })?;
        if self.assistant.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "assistant.timeout_secs".into(),
                message: "must be at least 1 second".into(),
            });
        }
        Ok(())
    }

    /// Writing assistant for the `[assistant]` section. Fails when the API
    /// key variable is unset.
    pub fn assistant(&self) -> crate::Result<Assistant<HttpPromptService>> {
        let service = HttpPromptService::from_config(&self.assistant)?;
        Ok(Assistant::new(service))
    }

    /// [`Config::load`], logging and falling back to defaults on failure.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default configuration");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AssistError;

    #[test]
    fn defaults_survive_toml() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(text.contains("[assistant]"));
        assert_eq!(toml::from_str::<Config>(&text).unwrap(), Config::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[timer]\nwork_minutes = 50\n").unwrap();
        assert_eq!(parsed.timer.work_minutes, 50);
        assert_eq!(parsed.timer.cycles_per_long_break, 4);
        assert!(parsed.focus.content_aware_breaks);
        assert_eq!(parsed.xp.per_completion, 50);
    }

    #[test]
    fn get_reads_dot_paths() {
        let cfg = Config::default();
        assert_eq!(cfg.get("timer.work_minutes").as_deref(), Some("25"));
        assert_eq!(cfg.get("focus.dynamic_lighting").as_deref(), Some("true"));
        assert_eq!(cfg.get("assistant.model").as_deref(), Some("gemini-2.0-flash"));
        assert!(cfg.get("timer.missing_key").is_none());
        assert!(cfg.get("").is_none());
        assert!(cfg.get("timer").is_none());
        assert!(cfg.get("timer..work_minutes").is_none());
    }

    #[test]
    fn set_updates_nested_values() {
        let mut cfg = Config::default();
        cfg.set("timer.short_break_minutes", "10").unwrap();
        cfg.set("focus.deep_work_mode", "on").unwrap();
        cfg.set("xp.per_word", "0.25").unwrap();
        cfg.set("assistant.model", "gemini-1.5-pro").unwrap();
        assert_eq!(cfg.timer.short_break_minutes, 10);
        assert!(cfg.focus.deep_work_mode);
        assert_eq!(cfg.xp.per_word, 0.25);
        assert_eq!(cfg.assistant.model, "gemini-1.5-pro");
    }

    #[test]
    fn set_rejects_unknown_and_invalid() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("timer.nonexistent", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(cfg.set("focus.deep_work_mode", "perhaps").is_err());
        assert!(cfg.set("timer.work_minutes", "soon").is_err());
        assert!(cfg.set("timer", "{}").is_err());
    }

    #[test]
    fn set_leaves_config_untouched_when_validation_fails() {
        let mut cfg = Config::default();
        assert!(cfg.set("timer.cycles_per_long_break", "0").is_err());
        assert!(cfg.set("assistant.base_url", "not a url").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn load_from_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.set("timer.long_break_minutes", "20").unwrap();
        cfg.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.timer.long_break_minutes, 20);
    }

    #[test]
    fn assistant_needs_api_key() {
        let mut cfg = Config::default();
        cfg.set("assistant.api_key_env", "ZENWRITE_TEST_UNSET_KEY").unwrap();
        match cfg.assistant() {
            Err(crate::CoreError::Assist(AssistError::MissingApiKey(var))) => {
                assert_eq!(var, "ZENWRITE_TEST_UNSET_KEY");
            }
            other => panic!("expected missing key, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn unparsable_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "timer = [").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }
}

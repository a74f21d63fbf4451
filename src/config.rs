//! 設定ファイル (~/.config/cu-analyzer/config.json)
//!
//! Scoring weights, quotas, policy and the keyword store location.
//! CLI flags override these per run through [`ScoringOverrides`].

use crate::error::{CuAnalyzerError, Result};
use cu_analyzer_common::{CountMode, EngineKind, Field, FieldMap, ScoringPolicy, ScoringSettings};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the keyword store directory
pub const STORE_DIR_ENV: &str = "KW_STORE_DIR";
pub const DEFAULT_STORE_DIR: &str = ".persist";

pub const MAX_WEIGHT: u32 = 100;
pub const MIN_THRESHOLD: i32 = 1;
pub const MAX_THRESHOLD: i32 = 200;

const KNOWN_KEYS: &[&str] = &[
    "weights",
    "thresholds",
    "policy",
    "passThreshold",
    "shareThreshold",
    "engine",
    "storeDir",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub weights: FieldMap<u32>,
    pub thresholds: FieldMap<i32>,
    pub policy: ScoringPolicy,
    pub pass_threshold: u32,
    pub share_threshold: u32,
    pub engine: EngineKind,
    pub store_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default_config());
        }

        let content = std::fs::read_to_string(path)?;
        let value: serde_json::Value = serde_json::from_str(&content)?;
        if let Some(map) = value.as_object() {
            for key in map.keys().filter(|k| !KNOWN_KEYS.contains(&k.as_str())) {
                warn!("unknown config key '{}' in {}", key, path.display());
            }
        }

        let config: Config = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CuAnalyzerError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("cu-analyzer").join("config.json"))
    }

    fn default_config() -> Self {
        let settings = ScoringSettings::default();
        Self {
            weights: settings.weights,
            thresholds: settings.thresholds,
            policy: settings.policy,
            pass_threshold: settings.pass_threshold,
            share_threshold: settings.share_threshold,
            engine: EngineKind::default(),
            store_dir: None,
        }
    }

    /// Range checks for values the user can edit
    pub fn validate(&self) -> Result<()> {
        for (field, weight) in self.weights.iter() {
            if *weight > MAX_WEIGHT {
                return Err(CuAnalyzerError::Config(format!(
                    "{} weight {} is out of range 0..={}",
                    field, weight, MAX_WEIGHT
                )));
            }
        }
        for (field, threshold) in self.thresholds.iter() {
            if !(MIN_THRESHOLD..=MAX_THRESHOLD).contains(threshold) {
                return Err(CuAnalyzerError::Config(format!(
                    "{} threshold {} is out of range {}..={}",
                    field, threshold, MIN_THRESHOLD, MAX_THRESHOLD
                )));
            }
        }
        if self.pass_threshold > 100 {
            return Err(CuAnalyzerError::Config(format!(
                "pass threshold {} is out of range 0..=100",
                self.pass_threshold
            )));
        }
        if self.share_threshold > 100 {
            return Err(CuAnalyzerError::Config(format!(
                "share threshold {} is out of range 0..=100",
                self.share_threshold
            )));
        }
        Ok(())
    }

    /// Keyword store directory: `KW_STORE_DIR`, then config, then `.persist`
    pub fn store_dir(&self) -> PathBuf {
        if let Ok(dir) = std::env::var(STORE_DIR_ENV) {
            if !dir.trim().is_empty() {
                return PathBuf::from(dir);
            }
        }
        self.store_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_DIR))
    }

    pub fn scoring_settings(&self) -> ScoringSettings {
        ScoringSettings {
            weights: self.weights,
            thresholds: self.thresholds,
            policy: self.policy,
            pass_threshold: self.pass_threshold,
            share_threshold: self.share_threshold,
        }
    }

    pub fn set_weight(&mut self, field: Field, weight: u32) -> Result<()> {
        *self.weights.get_mut(field) = weight;
        self.validate()
    }

    pub fn set_threshold(&mut self, field: Field, threshold: i32) -> Result<()> {
        *self.thresholds.get_mut(field) = threshold;
        self.validate()
    }

    pub fn reset(&mut self) {
        let store_dir = self.store_dir.take();
        *self = Self::default_config();
        self.store_dir = store_dir;
    }
}

/// Per-run overrides from CLI flags
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoringOverrides {
    pub count_mode: Option<CountMode>,
    pub require_verbs: Option<bool>,
    pub verb_fields: Option<Vec<Field>>,
    pub pass_threshold: Option<u32>,
    pub engine: Option<EngineKind>,
}

impl ScoringOverrides {
    /// Apply on top of `config`.
    ///
    /// `verb_fields` selects the per-field policy; `count_mode` or
    /// `require_verbs` select the global one (keeping the other global knob).
    pub fn apply(&self, config: &Config) -> Result<Config> {
        let mut out = config.clone();

        if let Some(fields) = &self.verb_fields {
            out.policy = per_field_policy(fields);
        } else if self.count_mode.is_some() || self.require_verbs.is_some() {
            let (mode, verbs) = match config.policy {
                ScoringPolicy::Global {
                    count_mode,
                    require_verbs,
                } => (count_mode, require_verbs),
                ScoringPolicy::PerField { .. } => (CountMode::default(), false),
            };
            out.policy = ScoringPolicy::Global {
                count_mode: self.count_mode.unwrap_or(mode),
                require_verbs: self.require_verbs.unwrap_or(verbs),
            };
        }

        if let Some(pass) = self.pass_threshold {
            out.pass_threshold = pass;
        }
        if let Some(engine) = self.engine {
            out.engine = engine;
        }

        out.validate()?;
        Ok(out)
    }
}

pub fn per_field_policy(fields: &[Field]) -> ScoringPolicy {
    ScoringPolicy::PerField {
        verb_fields: FieldMap::from_fn(|f| fields.contains(&f)),
    }
}

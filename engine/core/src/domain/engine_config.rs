// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Engine Configuration Types
//
// Defines the configuration schema for the interaction engine, including:
// - Evaluation settings (outcome publishing, event bus capacity)
// - Metamodel defaults (property editing policy)
// - Logging level

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_PATH_ENV: &str = "INTERACTION_ENGINE_CONFIG_PATH";
pub const PUBLISH_OUTCOMES_ENV: &str = "INTERACTION_ENGINE_PUBLISH_OUTCOMES";
pub const LOG_LEVEL_ENV: &str = "INTERACTION_ENGINE_LOG_LEVEL";

/// Upper bound accepted by `tokio::sync::broadcast::channel`.
pub const MAX_EVENT_BUS_CAPACITY: usize = usize::MAX / 2;

/// Top-level engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub evaluation: EvaluationConfig,

    #[serde(default)]
    pub metamodel: MetamodelConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Broadcast an `InteractionEvaluated` event after every evaluation
    #[serde(default = "default_publish_outcomes")]
    pub publish_outcomes: bool,

    /// Buffered events before slow receivers start lagging
    #[serde(default = "default_event_bus_capacity")]
    pub event_bus_capacity: usize,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            publish_outcomes: default_publish_outcomes(),
            event_bus_capacity: default_event_bus_capacity(),
        }
    }
}

fn default_publish_outcomes() -> bool {
    true
}

fn default_event_bus_capacity() -> usize {
    1000
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EditingPolicy {
    #[default]
    Enabled,
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MetamodelConfig {
    /// Whether properties are editable unless a facet says otherwise
    #[serde(default)]
    pub property_editing: EditingPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive; `RUST_LOG` takes precedence
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl EngineConfig {
    /// Load configuration from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to YAML file
    pub fn to_yaml_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Parse configuration from YAML string
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Discover configuration file using precedence order
    /// 1. INTERACTION_ENGINE_CONFIG_PATH environment variable
    /// 2. ./interaction-engine.yaml (working directory)
    /// 3. ~/.interaction-engine/config.yaml (user home)
    pub fn discover_config() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        let cwd = PathBuf::from("./interaction-engine.yaml");
        if cwd.exists() {
            return Some(cwd);
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".interaction-engine").join("config.yaml");
            if user_config.exists() {
                return Some(user_config);
            }
        }

        None
    }

    /// Load from an explicit path (must exist), else discover, else defaults.
    /// The result is validated after env overrides are applied.
    pub fn load_or_default(explicit_path: Option<PathBuf>) -> anyhow::Result<Self> {
        if let Some(path) = explicit_path {
            tracing::info!("Loading engine configuration from explicit path: {:?}", path);
            let mut config = Self::from_yaml_file(&path).map_err(|e| {
                anyhow::anyhow!("Failed to load engine config at {:?}: {}", path, e)
            })?;
            config.apply_env_overrides();
            config.validate()?;
            return Ok(config);
        }

        if let Some(config_path) = Self::discover_config() {
            tracing::info!("Loading engine configuration from discovered path: {:?}", config_path);
            let mut config = Self::from_yaml_file(config_path)?;
            config.apply_env_overrides();
            config.validate()?;
            Ok(config)
        } else {
            tracing::debug!("No engine configuration file found. Using defaults.");
            let mut config = Self::default();
            config.apply_env_overrides();
            config.validate()?;
            Ok(config)
        }
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(PUBLISH_OUTCOMES_ENV) {
            match val.to_lowercase().as_str() {
                "true" | "1" | "yes" => self.evaluation.publish_outcomes = true,
                "false" | "0" | "no" => self.evaluation.publish_outcomes = false,
                _ => tracing::warn!("Ignoring invalid {} value: {}", PUBLISH_OUTCOMES_ENV, val),
            }
        }

        if let Ok(level) = std::env::var(LOG_LEVEL_ENV) {
            if !level.trim().is_empty() {
                self.logging.level = level;
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.evaluation.event_bus_capacity == 0 {
            anyhow::bail!("evaluation.event_bus_capacity must be greater than zero");
        }

        if self.evaluation.event_bus_capacity > MAX_EVENT_BUS_CAPACITY {
            anyhow::bail!(
                "evaluation.event_bus_capacity must not exceed {}",
                MAX_EVENT_BUS_CAPACITY
            );
        }

        if self.logging.level.trim().is_empty() {
            anyhow::bail!("logging.level cannot be empty");
        }

        Ok(())
    }
}

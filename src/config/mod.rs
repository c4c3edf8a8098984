pub mod model;

use crate::estimator::{EstimateInput, MemoryEstimate};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

pub use model::{ModelPreset, MODEL_PRESETS};

/// Saved estimate configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateConfig {
    /// Preset the input was derived from, if any
    #[serde(default)]
    pub model: Option<String>,
    pub input: EstimateInput,
    /// Validate inputs before estimating
    #[serde(default)]
    pub strict: bool,
}

impl Default for EstimateConfig {
    fn default() -> Self {
        Self {
            model: None,
            input: EstimateInput::default(),
            strict: false,
        }
    }
}

impl EstimateConfig {
    pub fn for_model(model_preset: &str) -> anyhow::Result<Self> {
        let preset = ModelPreset::from_name(model_preset)?;
        Ok(Self {
            model: Some(model_preset.to_string()),
            input: preset.to_input(16.0, 1.0, None),
            ..Default::default()
        })
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        tracing::info!("Loaded estimate config from {}", path.display());
        Ok(config)
    }

    /// Write the config as JSON. Negative inputs are kept; NaN and
    /// infinity are refused since they would be written as `null`.
    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        self.input
            .check_finite()
            .with_context(|| format!("Refusing to save config {}", path.display()))?;
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config {}", path.display()))?;
        Ok(())
    }

    /// Estimate using the configured mode
    pub fn estimate(&self) -> anyhow::Result<MemoryEstimate> {
        if self.strict {
            Ok(self.input.checked_estimate()?)
        } else {
            Ok(self.input.breakdown())
        }
    }

    pub fn to_dict(&self) -> anyhow::Result<HashMap<String, serde_json::Value>> {
        Ok(serde_json::from_value(serde_json::to_value(self)?)?)
    }

    pub fn from_dict(data: HashMap<String, serde_json::Value>) -> anyhow::Result<Self> {
        let json = serde_json::to_string(&data)?;
        Ok(serde_json::from_str(&json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_model() {
        let config = EstimateConfig::for_model("llama-2-13b").unwrap();
        assert_eq!(config.model.as_deref(), Some("llama-2-13b"));
        assert_eq!(config.input.num_layers, 40.0);
        assert!(!config.strict);
    }

    #[test]
    fn test_strict_mode_rejects_negative() {
        let mut config = EstimateConfig::default();
        config.input.num_layers = -32.0;
        assert!(config.estimate().is_ok());

        config.strict = true;
        let err = config.estimate().unwrap_err().to_string();
        assert!(err.contains("num_layers"), "{}", err);
    }

    #[test]
    fn test_dict_round_trip() {
        let config = EstimateConfig::for_model("mistral-7b").unwrap();
        let dict = config.to_dict().unwrap();
        assert!(dict.contains_key("input"));
        assert!(dict.contains_key("strict"));
        assert_eq!(EstimateConfig::from_dict(dict).unwrap(), config);
    }
}

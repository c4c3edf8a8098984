use crate::estimator::{EstimateInput, DEFAULT_OVERHEAD_FACTOR};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Architecture figures for a well-known model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPreset {
    pub hf_name: String,
    pub description: String,
    /// Total parameter count
    pub params: f64,
    pub hidden_size: usize,
    pub num_layers: usize,
    /// Native context window in tokens
    pub max_context: usize,
}

impl ModelPreset {
    /// Build estimator input for this architecture.
    ///
    /// `context` defaults to the model's native context window.
    pub fn to_input(
        &self,
        precision_bits: f64,
        batch_size: f64,
        context: Option<f64>,
    ) -> EstimateInput {
        EstimateInput {
            params: self.params,
            precision_bits,
            context_length: context.unwrap_or(self.max_context as f64),
            hidden_size: self.hidden_size as f64,
            batch_size,
            num_layers: self.num_layers as f64,
            overhead_factor: DEFAULT_OVERHEAD_FACTOR,
        }
    }

    pub fn from_name(preset: &str) -> anyhow::Result<&'static Self> {
        MODEL_PRESETS.get(preset).ok_or_else(|| {
            let mut available: Vec<_> = MODEL_PRESETS.keys().collect();
            available.sort();
            anyhow::anyhow!("Unknown preset: {}. Available: {:?}", preset, available)
        })
    }
}

fn preset(
    hf_name: &str,
    description: &str,
    params: f64,
    hidden_size: usize,
    num_layers: usize,
    max_context: usize,
) -> ModelPreset {
    ModelPreset {
        hf_name: hf_name.to_string(),
        description: description.to_string(),
        params,
        hidden_size,
        num_layers,
        max_context,
    }
}

/// Model presets keyed by short name
pub static MODEL_PRESETS: Lazy<HashMap<String, ModelPreset>> = Lazy::new(|| {
    let mut models = HashMap::new();

    models.insert(
        "llama-2-7b".to_string(),
        preset("meta-llama/Llama-2-7b-hf", "Llama 2 7B", 7e9, 4096, 32, 4096),
    );
    models.insert(
        "llama-2-13b".to_string(),
        preset("meta-llama/Llama-2-13b-hf", "Llama 2 13B", 13e9, 5120, 40, 4096),
    );
    models.insert(
        "llama-2-70b".to_string(),
        preset("meta-llama/Llama-2-70b-hf", "Llama 2 70B", 70e9, 8192, 80, 4096),
    );
    models.insert(
        "llama-3-8b".to_string(),
        preset("meta-llama/Meta-Llama-3-8B", "Llama 3 8B", 8e9, 4096, 32, 8192),
    );
    models.insert(
        "llama-3-70b".to_string(),
        preset("meta-llama/Meta-Llama-3-70B", "Llama 3 70B", 70e9, 8192, 80, 8192),
    );
    models.insert(
        "mistral-7b".to_string(),
        preset("mistralai/Mistral-7B-v0.1", "Mistral 7B", 7.3e9, 4096, 32, 8192),
    );

    models
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        let p = ModelPreset::from_name("llama-2-7b").unwrap();
        assert_eq!(p.hidden_size, 4096);
        assert_eq!(p.num_layers, 32);
    }

    #[test]
    fn test_unknown_preset_lists_available() {
        let err = ModelPreset::from_name("gpt-5").unwrap_err().to_string();
        assert!(err.contains("Unknown preset: gpt-5"));
        assert!(err.contains("llama-2-7b"));
    }

    #[test]
    fn test_to_input_context_override() {
        let p = ModelPreset::from_name("llama-2-7b").unwrap();
        let input = p.to_input(16.0, 1.0, Some(2048.0));
        assert_eq!(input, EstimateInput::default());

        let native = p.to_input(16.0, 1.0, None);
        assert_eq!(native.context_length, 4096.0);
    }
}

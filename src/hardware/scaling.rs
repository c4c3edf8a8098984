//! Fit checking and model size detection

use crate::hardware::profiles::GPU_PROFILES;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Result of checking an estimate against a memory budget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitReport {
    pub fits: bool,
    /// Capacity minus requirement, negative when over budget
    pub headroom_gb: f64,
    pub utilization_pct: f64,
    pub message: String,
}

/// Check whether `required_gb` fits in `capacity_gb`
pub fn check_fit(required_gb: f64, capacity_gb: f64) -> FitReport {
    let headroom_gb = capacity_gb - required_gb;
    let utilization_pct = if capacity_gb > 0.0 {
        (required_gb / capacity_gb) * 100.0
    } else {
        f64::INFINITY
    };
    let fits = required_gb <= capacity_gb;

    let message = if fits {
        format!(
            "Fits ({:.1}GB / {}GB, {:.1}% utilization)",
            required_gb, capacity_gb, utilization_pct
        )
    } else {
        format!(
            "Exceeds capacity by {:.1}GB ({:.1}GB > {}GB)",
            -headroom_gb, required_gb, capacity_gb
        )
    };

    FitReport {
        fits,
        headroom_gb,
        utilization_pct,
        message,
    }
}

/// Catalog GPUs with enough memory for `required_gb`, smallest first
pub fn gpus_that_fit(required_gb: f64) -> Vec<(String, f64)> {
    let mut fitting: Vec<(String, f64)> = GPU_PROFILES
        .iter()
        .filter(|&(_, &capacity)| required_gb <= capacity)
        .map(|(name, &capacity)| (name.clone(), capacity))
        .collect();

    fitting.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    fitting
}

static MODEL_SIZE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+(?:\.\d+)?)[-_]?b(?:illion)?\b").unwrap());

/// Detect model size category and parameter count (billions) from a model path
///
/// Returns 0.0 when the name carries no size.
pub fn detect_model_size(model_path: &str) -> (String, f64) {
    let model_name = model_path
        .rsplit('/')
        .next()
        .unwrap_or(model_path)
        .to_lowercase();

    let params_billions = MODEL_SIZE_PATTERN
        .captures(&model_name)
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .unwrap_or(0.0);

    let size_category = if params_billions <= 10.0 {
        "small"
    } else if params_billions <= 20.0 {
        "medium"
    } else if params_billions <= 50.0 {
        "large"
    } else {
        "xlarge"
    };

    (size_category.to_string(), params_billions)
}

//! Accelerator memory capacities

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// On-device memory in GB, keyed by lowercase accelerator name
pub static GPU_PROFILES: Lazy<HashMap<String, f64>> = Lazy::new(|| {
    let mut gpus = HashMap::new();

    // Consumer
    gpus.insert("rtx-3060".to_string(), 12.0);
    gpus.insert("rtx-3090".to_string(), 24.0);
    gpus.insert("rtx-4070".to_string(), 12.0);
    gpus.insert("rtx-4080".to_string(), 16.0);
    gpus.insert("rtx-4090".to_string(), 24.0);

    // Datacenter
    gpus.insert("t4".to_string(), 16.0);
    gpus.insert("a10".to_string(), 24.0);
    gpus.insert("l4".to_string(), 24.0);
    gpus.insert("l40s".to_string(), 48.0);
    gpus.insert("a6000".to_string(), 48.0);
    gpus.insert("v100-32gb".to_string(), 32.0);
    gpus.insert("a100-40gb".to_string(), 40.0);
    gpus.insert("a100-80gb".to_string(), 80.0);
    gpus.insert("h100-80gb".to_string(), 80.0);
    gpus.insert("h200".to_string(), 141.0);
    gpus.insert("mi300x".to_string(), 192.0);

    gpus
});

/// Look up an accelerator's memory capacity (case-insensitive)
pub fn gpu_capacity_gb(name: &str) -> Option<f64> {
    GPU_PROFILES.get(&name.to_lowercase()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpu_capacity() {
        assert_eq!(gpu_capacity_gb("rtx-4090"), Some(24.0));
        assert_eq!(gpu_capacity_gb("A100-80GB"), Some(80.0));
        assert_eq!(gpu_capacity_gb("voodoo2"), None);
    }
}

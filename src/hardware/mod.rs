pub mod profiles;
pub mod scaling;

pub use profiles::{gpu_capacity_gb, GPU_PROFILES};
pub use scaling::{check_fit, detect_model_size, gpus_that_fit, FitReport};

//! GPU memory sizing for LLM inference
//!
//! Back-of-envelope estimate of the GPU memory needed to serve a large
//! language model from its parameter count, precision, context length,
//! hidden size, batch size and layer count.
//!
//! ## Main Components
//!
//! - `estimator`: Core estimate and per-term breakdown
//! - `config`: Saved estimate configs and model presets
//! - `hardware`: GPU memory catalog and fit checks
//! - `utils`: Parameter-count parsing and formatting

pub mod config;
pub mod estimator;
pub mod hardware;
pub mod utils;

pub use config::EstimateConfig;
pub use estimator::{
    estimate_gpu_memory, estimate_gpu_memory_default, EstimateError, EstimateInput,
    MemoryEstimate, DEFAULT_OVERHEAD_FACTOR,
};

/// Library errors
pub use anyhow::{Error, Result};

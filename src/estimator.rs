//! GPU memory estimation for LLM inference
//!
//! Naive byte-counting model: weights plus per-layer context activations
//! scaled by batch size, multiplied by a single safety margin.
//!
//! ```text
//! D       = Q / 8
//! M_model = P * D
//! M_ctx   = L * H * D * N
//! M_batch = M_ctx * B
//! total   = (M_model + M_batch) / 1e9 * overhead_factor
//! ```
//!
//! The unscaled context term is computed and reported in the breakdown but
//! does not contribute to the total.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default multiplicative safety margin.
pub const DEFAULT_OVERHEAD_FACTOR: f64 = 1.2;

/// Decimal gigabyte.
pub const BYTES_PER_GB: f64 = 1e9;

const BITS_PER_BYTE: f64 = 8.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimateError {
    #[error("{field} must be non-negative, got {value}")]
    NegativeValue { field: &'static str, value: f64 },

    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },
}

/// Estimate GPU memory (in GB) required to serve a model.
///
/// # Parameters
///
/// * `p` - Total parameter count
/// * `q` - Precision in bits per parameter/activation (e.g. 4, 8, 16, 32)
/// * `l` - Context window length in tokens
/// * `h` - Hidden dimension size
/// * `b` - Batch size
/// * `n` - Number of transformer layers
/// * `overhead_factor` - Safety margin applied once to the total
///
/// No validation is performed: negative or NaN inputs propagate through
/// the arithmetic. Use [`EstimateInput::checked_estimate`] for validated
/// evaluation.
pub fn estimate_gpu_memory(
    p: f64,
    q: f64,
    l: f64,
    h: f64,
    b: f64,
    n: f64,
    overhead_factor: f64,
) -> f64 {
    MemoryEstimate::compute(p, q, l, h, b, n, overhead_factor).total_gb
}

/// [`estimate_gpu_memory`] with [`DEFAULT_OVERHEAD_FACTOR`].
pub fn estimate_gpu_memory_default(p: f64, q: f64, l: f64, h: f64, b: f64, n: f64) -> f64 {
    estimate_gpu_memory(p, q, l, h, b, n, DEFAULT_OVERHEAD_FACTOR)
}

fn default_overhead_factor() -> f64 {
    DEFAULT_OVERHEAD_FACTOR
}

/// Inputs to a single estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimateInput {
    /// Total parameter count
    pub params: f64,
    /// Bits per parameter/activation
    pub precision_bits: f64,
    /// Context window in tokens
    pub context_length: f64,
    pub hidden_size: f64,
    pub batch_size: f64,
    pub num_layers: f64,
    #[serde(default = "default_overhead_factor")]
    pub overhead_factor: f64,
}

impl Default for EstimateInput {
    fn default() -> Self {
        // Llama-2-7B in fp16 at its native context
        Self {
            params: 7e9,
            precision_bits: 16.0,
            context_length: 2048.0,
            hidden_size: 4096.0,
            batch_size: 1.0,
            num_layers: 32.0,
            overhead_factor: DEFAULT_OVERHEAD_FACTOR,
        }
    }
}

impl EstimateInput {
    fn fields(&self) -> [(&'static str, f64); 7] {
        [
            ("params", self.params),
            ("precision_bits", self.precision_bits),
            ("context_length", self.context_length),
            ("hidden_size", self.hidden_size),
            ("batch_size", self.batch_size),
            ("num_layers", self.num_layers),
            ("overhead_factor", self.overhead_factor),
        ]
    }

    /// Reject NaN or infinite fields. JSON cannot represent them.
    pub fn check_finite(&self) -> Result<(), EstimateError> {
        match self.fields().into_iter().find(|(_, value)| !value.is_finite()) {
            Some((field, value)) => Err(EstimateError::NonFinite { field, value }),
            None => Ok(()),
        }
    }

    /// Reject non-finite or negative fields. Zero is accepted.
    pub fn validate(&self) -> Result<(), EstimateError> {
        self.check_finite()?;
        for (field, value) in self.fields() {
            if value < 0.0 {
                return Err(EstimateError::NegativeValue { field, value });
            }
        }
        Ok(())
    }

    /// Permissive estimate in GB, identical to [`estimate_gpu_memory`].
    pub fn estimate(&self) -> f64 {
        self.breakdown().total_gb
    }

    pub fn breakdown(&self) -> MemoryEstimate {
        if let Err(e) = self.validate() {
            tracing::warn!("Estimating with out-of-range input: {}", e);
        }
        MemoryEstimate::compute(
            self.params,
            self.precision_bits,
            self.context_length,
            self.hidden_size,
            self.batch_size,
            self.num_layers,
            self.overhead_factor,
        )
    }

    /// Validate, then compute the breakdown.
    pub fn checked_estimate(&self) -> Result<MemoryEstimate, EstimateError> {
        self.validate()?;
        Ok(self.breakdown())
    }
}

/// Per-term memory breakdown, all sizes in GB
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemoryEstimate {
    pub bytes_per_element: f64,
    /// Model weights
    pub model_gb: f64,
    /// Per-request context activations across all layers (not part of the total)
    pub context_gb: f64,
    /// Context activations scaled by batch size
    pub batch_gb: f64,
    /// `model_gb + batch_gb`
    pub subtotal_gb: f64,
    pub overhead_factor: f64,
    /// `subtotal_gb * overhead_factor`
    pub total_gb: f64,
}

impl MemoryEstimate {
    fn compute(p: f64, q: f64, l: f64, h: f64, b: f64, n: f64, overhead_factor: f64) -> Self {
        let bytes_per_element = q / BITS_PER_BYTE;

        let model_bytes = p * bytes_per_element;
        let model_gb = model_bytes / BYTES_PER_GB;

        let context_bytes = l * h * bytes_per_element * n;
        let context_gb = context_bytes / BYTES_PER_GB;

        // Scaled from the byte value, not the GB value
        let batch_bytes = context_bytes * b;
        let batch_gb = batch_bytes / BYTES_PER_GB;

        let subtotal_gb = model_gb + batch_gb;
        let mut total_gb = subtotal_gb;
        total_gb *= overhead_factor;

        tracing::debug!(
            bytes_per_element,
            model_gb,
            context_gb,
            batch_gb,
            subtotal_gb,
            total_gb,
            "estimated gpu memory"
        );

        Self {
            bytes_per_element,
            model_gb,
            context_gb,
            batch_gb,
            subtotal_gb,
            overhead_factor,
            total_gb,
        }
    }

    /// Format as human-readable string
    #[must_use]
    pub fn format_human(&self) -> String {
        format!(
            "Model: {:.2}GB, Context: {:.2}GB, Batch: {:.2}GB, Subtotal: {:.2}GB, Total (x{}): {:.2}GB",
            self.model_gb,
            self.context_gb,
            self.batch_gb,
            self.subtotal_gb,
            self.overhead_factor,
            self.total_gb
        )
    }
}

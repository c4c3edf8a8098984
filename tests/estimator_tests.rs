use approx::assert_relative_eq;
use gpu_sizer_rs::estimator::{
    estimate_gpu_memory, estimate_gpu_memory_default, EstimateInput, DEFAULT_OVERHEAD_FACTOR,
};
use proptest::prelude::*;

#[test]
fn test_llama_7b_fp16_scenario() {
    let mem = estimate_gpu_memory_default(7e9, 16.0, 2048.0, 4096.0, 1.0, 32.0);
    assert_relative_eq!(mem, 17.4442450944, max_relative = 1e-12);
}

#[test]
fn test_zero_context_terms_leave_model_only() {
    // L, H, N, B all zero: only the weights remain
    let mem = estimate_gpu_memory(7e9, 16.0, 0.0, 0.0, 0.0, 0.0, 1.0);
    let model_gb = 7e9 * (16.0 / 8.0) / 1e9;
    assert_eq!(mem, model_gb * 1.0);
}

#[test]
fn test_zero_params_leaves_batch_only() {
    let overhead = 1.3;
    let mem = estimate_gpu_memory(0.0, 16.0, 2048.0, 4096.0, 4.0, 32.0, overhead);
    let batch_gb = 2048.0 * 4096.0 * (16.0 / 8.0) * 32.0 * 4.0 / 1e9;
    assert_eq!(mem, batch_gb * overhead);
}

#[test]
fn test_quantization_halves_memory() {
    let fp16 = estimate_gpu_memory_default(70e9, 16.0, 4096.0, 8192.0, 1.0, 80.0);
    let int8 = estimate_gpu_memory_default(70e9, 8.0, 4096.0, 8192.0, 1.0, 80.0);
    let int4 = estimate_gpu_memory_default(70e9, 4.0, 4096.0, 8192.0, 1.0, 80.0);
    assert_relative_eq!(fp16, int8 * 2.0, max_relative = 1e-12);
    assert_relative_eq!(int8, int4 * 2.0, max_relative = 1e-12);
}

#[test]
fn test_zero_precision_is_zero() {
    assert_eq!(
        estimate_gpu_memory_default(7e9, 0.0, 2048.0, 4096.0, 1.0, 32.0),
        0.0
    );
}

#[test]
fn test_input_matches_free_function() {
    let input = EstimateInput {
        params: 13e9,
        precision_bits: 8.0,
        context_length: 4096.0,
        hidden_size: 5120.0,
        batch_size: 3.0,
        num_layers: 40.0,
        overhead_factor: DEFAULT_OVERHEAD_FACTOR,
    };
    let free = estimate_gpu_memory(13e9, 8.0, 4096.0, 5120.0, 3.0, 40.0, 1.2);
    assert_eq!(input.estimate(), free);
    assert_eq!(input.checked_estimate().unwrap().total_gb, free);
}

fn inputs() -> impl Strategy<Value = (f64, f64, f64, f64, f64, f64)> {
    (
        0.0f64..1e12,
        prop::sample::select(vec![4.0, 8.0, 16.0, 32.0]),
        0.0f64..131072.0,
        0.0f64..16384.0,
        0.0f64..256.0,
        0.0f64..128.0,
    )
}

proptest! {
    #[test]
    fn prop_non_negative_and_finite(
        (p, q, l, h, b, n) in inputs(),
        overhead in 0.0f64..4.0
    ) {
        let mem = estimate_gpu_memory(p, q, l, h, b, n, overhead);
        prop_assert!(mem.is_finite());
        prop_assert!(mem >= 0.0);
    }

    #[test]
    fn prop_monotonic_in_each_input(
        (p, q, l, h, b, n) in inputs(),
        delta in 0.0f64..1000.0
    ) {
        let base = estimate_gpu_memory_default(p, q, l, h, b, n);
        prop_assert!(estimate_gpu_memory_default(p + delta, q, l, h, b, n) >= base);
        prop_assert!(estimate_gpu_memory_default(p, q + delta, l, h, b, n) >= base);
        prop_assert!(estimate_gpu_memory_default(p, q, l + delta, h, b, n) >= base);
        prop_assert!(estimate_gpu_memory_default(p, q, l, h + delta, b, n) >= base);
        prop_assert!(estimate_gpu_memory_default(p, q, l, h, b + delta, n) >= base);
        prop_assert!(estimate_gpu_memory_default(p, q, l, h, b, n + delta) >= base);
    }

    #[test]
    fn prop_overhead_scales_linearly(
        (p, q, l, h, b, n) in inputs(),
        k in 0.1f64..10.0
    ) {
        let base = estimate_gpu_memory(p, q, l, h, b, n, 1.2);
        let scaled = estimate_gpu_memory(p, q, l, h, b, n, 1.2 * k);
        prop_assert!((scaled - base * k).abs() <= 1e-12 * scaled.abs().max(1.0));
    }

    #[test]
    fn prop_idempotent((p, q, l, h, b, n) in inputs()) {
        let first = estimate_gpu_memory_default(p, q, l, h, b, n);
        let second = estimate_gpu_memory_default(p, q, l, h, b, n);
        prop_assert_eq!(first.to_bits(), second.to_bits());
    }
}

//! CLI command implementations

use super::EstimateArgs;
use anyhow::{bail, Result};
use gpu_sizer_rs::config::{EstimateConfig, ModelPreset, MODEL_PRESETS};
use gpu_sizer_rs::estimator::{EstimateInput, MemoryEstimate, DEFAULT_OVERHEAD_FACTOR};
use gpu_sizer_rs::hardware::{
    check_fit, detect_model_size, gpu_capacity_gb, gpus_that_fit, FitReport, GPU_PROFILES,
};
use gpu_sizer_rs::utils::{format_gb, parse_param_count};

/// Resolve CLI arguments into a config: file or preset first, then flag overrides
fn build_config(args: &EstimateArgs) -> Result<EstimateConfig> {
    let mut config = if let Some(path) = &args.config {
        EstimateConfig::load(path)?
    } else if let Some(model) = &args.model {
        let preset = ModelPreset::from_name(model)?;
        EstimateConfig {
            model: Some(model.clone()),
            input: preset.to_input(
                args.precision.unwrap_or(16.0),
                args.batch.unwrap_or(1.0),
                args.context,
            ),
            strict: false,
        }
    } else {
        let mut missing = Vec::new();
        if args.params.is_none() {
            missing.push("--params");
        }
        if args.precision.is_none() {
            missing.push("--precision");
        }
        if args.context.is_none() {
            missing.push("--context");
        }
        if args.hidden.is_none() {
            missing.push("--hidden");
        }
        if args.batch.is_none() {
            missing.push("--batch");
        }
        if args.layers.is_none() {
            missing.push("--layers");
        }
        if !missing.is_empty() {
            bail!(
                "Missing {} (or use --model <preset> / --config <file>)",
                missing.join(", ")
            );
        }
        EstimateConfig {
            model: None,
            input: EstimateInput {
                params: 0.0,
                precision_bits: 0.0,
                context_length: 0.0,
                hidden_size: 0.0,
                batch_size: 0.0,
                num_layers: 0.0,
                overhead_factor: DEFAULT_OVERHEAD_FACTOR,
            },
            strict: false,
        }
    };

    let input = &mut config.input;
    if let Some(params) = &args.params {
        input.params = parse_param_count(params)?;
    }
    if let Some(precision) = args.precision {
        input.precision_bits = precision;
    }
    if let Some(context) = args.context {
        input.context_length = context;
    }
    if let Some(hidden) = args.hidden {
        input.hidden_size = hidden;
    }
    if let Some(batch) = args.batch {
        input.batch_size = batch;
    }
    if let Some(layers) = args.layers {
        input.num_layers = layers;
    }
    if let Some(overhead) = args.overhead {
        input.overhead_factor = overhead;
    }
    config.strict |= args.strict;

    Ok(config)
}

fn print_estimate(config: &EstimateConfig, est: &MemoryEstimate) {
    let input = &config.input;

    println!();
    println!("╔══════════════════════════════════════════════════════════════════════╗");
    match &config.model {
        Some(model) => println!("║  GPU MEMORY ESTIMATE: {}", model),
        None => println!("║  GPU MEMORY ESTIMATE"),
    }
    println!("╚══════════════════════════════════════════════════════════════════════╝");
    println!();
    println!("  Parameters:        {:e}", input.params);
    println!(
        "  Precision:         {} bits ({} bytes/element)",
        input.precision_bits, est.bytes_per_element
    );
    println!("  Context length:    {}", input.context_length);
    println!("  Hidden size:       {}", input.hidden_size);
    println!("  Batch size:        {}", input.batch_size);
    println!("  Layers:            {}", input.num_layers);
    println!();
    println!("  Model weights:     {:.4} GB", est.model_gb);
    println!("  Context (1 req):   {:.4} GB  (not summed)", est.context_gb);
    println!("  Context x batch:   {:.4} GB", est.batch_gb);
    println!("  Subtotal:          {:.4} GB", est.subtotal_gb);
    println!("  Overhead factor:   x{}", est.overhead_factor);
    println!("  ─────────────────────────────");
    println!(
        "  Total:             {:.4} GB ({})",
        est.total_gb,
        format_gb(est.total_gb)
    );
    println!();
}

/// JSON report for `estimate`, with an optional fit check against one GPU
fn estimate_report(
    args: &EstimateArgs,
) -> Result<(EstimateConfig, MemoryEstimate, serde_json::Value)> {
    let config = build_config(args)?;
    let est = config.estimate()?;
    tracing::info!("{}", est.format_human());

    let fit: Option<FitReport> = match &args.gpu {
        Some(gpu) => {
            let capacity = gpu_capacity_gb(gpu)
                .ok_or_else(|| anyhow::anyhow!("Unknown GPU: {}. Run `gpus` to list", gpu))?;
            Some(check_fit(est.total_gb, capacity))
        }
        None => None,
    };

    let report = serde_json::json!({
        "model": config.model,
        "input": config.input,
        "estimate": est,
        "fit": fit,
    });
    Ok((config, est, report))
}

pub fn estimate(args: &EstimateArgs) -> Result<()> {
    let (config, est, report) = estimate_report(args)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_estimate(&config, &est);
    if let Some(gpu) = &args.gpu {
        let fits = report["fit"]["fits"].as_bool().unwrap_or(false);
        let message = report["fit"]["message"].as_str().unwrap_or("");
        let status = if fits { "✅" } else { "❌" };
        println!("  {} {}: {}", status, gpu, message);
        println!();
    }

    Ok(())
}

/// Required memory and the catalog GPUs that can hold it, smallest first
fn recommend_report(args: &EstimateArgs) -> Result<(f64, Vec<(String, f64, FitReport)>)> {
    let config = build_config(args)?;
    let est = config.estimate()?;
    let fitting: Vec<_> = gpus_that_fit(est.total_gb)
        .into_iter()
        .map(|(name, capacity)| (name, capacity, check_fit(est.total_gb, capacity)))
        .collect();
    tracing::info!(
        "{} of {} GPUs fit {}",
        fitting.len(),
        GPU_PROFILES.len(),
        est.format_human()
    );
    Ok((est.total_gb, fitting))
}

pub fn recommend(args: &EstimateArgs) -> Result<()> {
    let (required_gb, fitting) = recommend_report(args)?;

    if args.json {
        let gpus: Vec<_> = fitting
            .iter()
            .map(|(name, capacity, report)| {
                serde_json::json!({
                    "gpu": name,
                    "capacity_gb": capacity,
                    "fit": report,
                })
            })
            .collect();
        let result = serde_json::json!({
            "required_gb": required_gb,
            "gpus": gpus,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!();
    println!("╔══════════════════════════════════════════════════════════════════════╗");
    println!("║  Required: {:.2}GB", required_gb);
    println!("╠══════════════════════════════════════════════════════════════════════╣");
    println!("║  SINGLE-GPU RECOMMENDATIONS                                          ║");
    println!("╚══════════════════════════════════════════════════════════════════════╝");
    println!();

    if fitting.is_empty() {
        println!("  ❌ No single GPU in the catalog has enough memory.");
        println!("     Try lower precision (--precision 8 or 4) or a smaller batch.");
    }

    for (name, _, report) in &fitting {
        let status = if report.utilization_pct > 90.0 {
            "⚠️  TIGHT"
        } else {
            "✅ OK"
        };
        println!("  {} - {}", status, name);
        println!("    {}", report.message);
    }

    println!();
    Ok(())
}

pub fn presets() -> Result<()> {
    let mut names: Vec<_> = MODEL_PRESETS.keys().collect();
    names.sort();

    println!();
    println!("Model presets:");
    println!();
    for name in names {
        let preset = &MODEL_PRESETS[name];
        let (size_category, _) = detect_model_size(&preset.hf_name);
        println!("  {} ({})", name, size_category);
        println!("    {} - {}", preset.hf_name, preset.description);
        println!(
            "    params: {:e} | hidden: {} | layers: {} | context: {}",
            preset.params, preset.hidden_size, preset.num_layers, preset.max_context
        );
    }
    println!();
    Ok(())
}

pub fn gpus() -> Result<()> {
    let mut gpus: Vec<_> = GPU_PROFILES.iter().collect();
    gpus.sort_by(|a, b| a.1.total_cmp(b.1).then_with(|| a.0.cmp(b.0)));

    println!();
    println!("GPU memory catalog:");
    println!();
    for (name, capacity) in gpus {
        println!("  {:<12} {:>6} GB", name, capacity);
    }
    println!();
    Ok(())
}

pub fn init_config(path: &str, model: Option<&str>) -> Result<()> {
    let config = match model {
        Some(preset) => EstimateConfig::for_model(preset)?,
        None => EstimateConfig::default(),
    };
    config.save(path)?;
    println!("Wrote estimate config to {}", path);
    Ok(())
}

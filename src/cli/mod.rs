pub mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gpu_sizer")]
#[command(about = "Estimate GPU memory for serving LLMs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Estimator inputs shared by `estimate` and `recommend`
#[derive(Args, Debug, Clone)]
pub struct EstimateArgs {
    /// Model preset to take params/hidden/layers/context from (see `presets`)
    #[arg(long)]
    pub model: Option<String>,
    /// Load inputs from a JSON config file
    #[arg(long, conflicts_with = "model")]
    pub config: Option<String>,
    /// Total parameter count (e.g. 7e9, 7B, 350M)
    #[arg(long, allow_negative_numbers = true)]
    pub params: Option<String>,
    /// Precision in bits per parameter/activation
    #[arg(long, allow_negative_numbers = true)]
    pub precision: Option<f64>,
    /// Context window length in tokens
    #[arg(long, allow_negative_numbers = true)]
    pub context: Option<f64>,
    /// Hidden dimension size
    #[arg(long, allow_negative_numbers = true)]
    pub hidden: Option<f64>,
    /// Batch size
    #[arg(long, allow_negative_numbers = true)]
    pub batch: Option<f64>,
    /// Number of transformer layers
    #[arg(long, allow_negative_numbers = true)]
    pub layers: Option<f64>,
    /// Multiplicative safety margin
    #[arg(long, allow_negative_numbers = true)]
    pub overhead: Option<f64>,
    /// Reject negative or non-finite inputs
    #[arg(long)]
    pub strict: bool,
    /// Check the estimate against a catalog GPU (see `gpus`)
    #[arg(long)]
    pub gpu: Option<String>,
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate GPU memory for a model configuration
    Estimate(EstimateArgs),
    /// List GPUs with enough memory for a model configuration
    Recommend(EstimateArgs),
    /// List model presets
    Presets,
    /// List the GPU memory catalog
    Gpus,
    /// Write a default estimate config to a JSON file
    InitConfig {
        /// Output path
        path: String,
        /// Seed the config from a model preset
        #[arg(long)]
        model: Option<String>,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Estimate(args) => commands::estimate(&args),
        Commands::Recommend(args) => commands::recommend(&args),
        Commands::Presets => commands::presets(),
        Commands::Gpus => commands::gpus(),
        Commands::InitConfig { path, model } => commands::init_config(&path, model.as_deref()),
    }
}

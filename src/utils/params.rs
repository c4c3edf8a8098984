//! Parameter count parsing

use anyhow::{anyhow, Result};

/// Parse a parameter count such as `7e9`, `7000000000`, `7B`, `1.5b`, `350M` or `125k`
pub fn parse_param_count(s: &str) -> Result<f64> {
    let trimmed = s.trim();
    let (number, multiplier) = match trimmed.chars().last() {
        Some('B' | 'b') => (&trimmed[..trimmed.len() - 1], 1e9),
        Some('M' | 'm') => (&trimmed[..trimmed.len() - 1], 1e6),
        Some('K' | 'k') => (&trimmed[..trimmed.len() - 1], 1e3),
        Some('T' | 't') => (&trimmed[..trimmed.len() - 1], 1e12),
        _ => (trimmed, 1.0),
    };

    let value: f64 = number
        .trim()
        .parse()
        .map_err(|_| anyhow!("Invalid parameter count: {:?}", s))?;

    Ok(value * multiplier)
}

use crate::estimator::BYTES_PER_GB;

/// Format a decimal byte count as a human-readable string (1 KB = 1000 B)
pub fn format_bytes(bytes: f64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes;
    let mut unit_idx = 0;

    while size.abs() >= 1000.0 && unit_idx < UNITS.len() - 1 {
        size /= 1000.0;
        unit_idx += 1;
    }

    format!("{:.2} {}", size, UNITS[unit_idx])
}

/// Format a GB value with the same units as [`format_bytes`]
pub fn format_gb(gb: f64) -> String {
    format_bytes(gb * BYTES_PER_GB)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512.0), "512.00 B");
        assert_eq!(format_bytes(1000.0), "1.00 KB");
        assert_eq!(format_bytes(536_870_912.0), "536.87 MB");
        assert_eq!(format_bytes(1.4e10), "14.00 GB");
        assert_eq!(format_bytes(2.5e12), "2.50 TB");
    }

    #[test]
    fn test_format_gb() {
        assert_eq!(format_gb(17.4442450944), "17.44 GB");
        assert_eq!(format_gb(0.5), "500.00 MB");
    }
}

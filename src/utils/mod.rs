pub mod format;
pub mod params;

pub use format::{format_bytes, format_gb};
pub use params::parse_param_count;

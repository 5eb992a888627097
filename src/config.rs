//! Client configuration

use clap::{Args, ValueEnum};

/// Default API root of the quotation service.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5001/api";

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human readable, single line per event
    #[default]
    Compact,

    /// One JSON object per event
    Json,
}

/// Settings shared by every command.
#[derive(Debug, Clone, Args)]
pub struct ClientConfig {
    /// Quotation API root URL
    #[arg(long, env = "REPAIR_QUOTE_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log output format
    #[arg(long, env = "REPAIR_QUOTE_LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

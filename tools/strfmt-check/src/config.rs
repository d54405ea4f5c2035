//! Environment configuration for strfmt-check.

use anyhow::{bail, Result};

/// Log output layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl LogFormat {
    fn parse(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "compact" | "text" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => bail!("STRFMT_LOG_FORMAT must be 'compact' or 'json', got {other:?}"),
        }
    }
}

/// Tool configuration (env-driven).
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output layout.
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let log_level = lookup("STRFMT_LOG_LEVEL").unwrap_or_else(|| "warn".to_string());

        let log_format = lookup("STRFMT_LOG_FORMAT")
            .map(|v| LogFormat::parse(&v))
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            log_level,
            log_format,
        })
    }
}

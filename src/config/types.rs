//! Configuration type definitions.

use serde::{Deserialize, Serialize};

use crate::modules::ip_restriction::IpRestrictionConfig;
use crate::modules::time_restriction::TimeRestrictionConfig;

/// Root configuration structure.
///
/// A missing restriction section disables that restriction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RestrictionConfig {
    /// Logging configuration.
    pub logging: LoggingConfig,

    /// IP restriction settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_restriction: Option<IpRestrictionConfig>,

    /// Time restriction settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_restriction: Option<TimeRestrictionConfig>,
}

impl RestrictionConfig {
    /// Check if no restriction is configured.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.ip_restriction.is_none() && self.time_restriction.is_none()
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: LogLevel,

    /// Log format (json, pretty, compact).
    pub format: LogFormat,

    /// Output destination.
    pub output: LogOutput,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Compact,
            output: LogOutput::Stderr,
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level (most verbose).
    Trace,
    /// Debug level.
    Debug,
    /// Info level (default).
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level (least verbose).
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Log format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format (machine-readable).
    Json,
    /// Pretty multi-line format.
    Pretty,
    /// Compact single-line format (default).
    #[default]
    Compact,
}

/// Log output destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    /// Standard output.
    Stdout,
    /// Standard error (default), keeping stdout for decisions.
    #[default]
    Stderr,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RestrictionConfig::default();
        assert_eq!(config.logging.level, LogLevel::Info);
        assert_eq!(config.logging.output, LogOutput::Stderr);
        assert!(config.is_unrestricted());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [logging]
            level = "debug"
            format = "json"
            output = "stdout"

            [ip_restriction]
            rules = ["+192.168.0.0/24", "-192.168.0.5"]
            check_x_forwarded_for = false

            [time_restriction]
            timezone = "Europe/Istanbul"
            allowed_days = "MONDAY,TUESDAY,WEDNESDAY,THURSDAY,FRIDAY"
            start_time = "09:00"
            end_time = "18:00"
            error_message = "Office hours only"
        "#;

        let config: RestrictionConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.output, LogOutput::Stdout);

        let ip = config.ip_restriction.unwrap();
        assert_eq!(ip.rules.len(), 2);
        assert!(!ip.check_x_forwarded_for);

        let time = config.time_restriction.unwrap();
        assert_eq!(time.timezone, "Europe/Istanbul");
        assert_eq!(time.error_message, "Office hours only");
    }

    #[test]
    fn test_parse_empty_sections() {
        let config: RestrictionConfig = toml::from_str(
            r"
            [ip_restriction]
            [time_restriction]
            ",
        )
        .unwrap();

        assert_eq!(config.ip_restriction, Some(IpRestrictionConfig::default()));
        assert_eq!(config.time_restriction, Some(TimeRestrictionConfig::default()));
        assert!(!config.is_unrestricted());
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevel::Warn.to_string(), "warn");
        assert_eq!(LogLevel::Trace.to_string(), "trace");
    }
}

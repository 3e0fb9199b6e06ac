//! # Configuration System
//!
//! TOML-based configuration for the restriction flow: parsing, defaults and
//! validation.
//!
//! A section that is absent disables its restriction. Fields left out of a
//! present section take their defaults.
//!
//! ## Example Configuration
//!
//! ```toml
//! [logging]
//! level = "info"
//! format = "json"
//!
//! [ip_restriction]
//! rules = ["+192.168.0.0/24", "-192.168.0.5"]
//! check_x_forwarded_for = true
//!
//! [time_restriction]
//! timezone = "Europe/Istanbul"
//! allowed_days = "MONDAY,TUESDAY,WEDNESDAY,THURSDAY,FRIDAY"
//! start_time = "09:00"
//! end_time = "18:00"
//! ```

mod error;
mod loader;
mod types;
mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use types::{LogFormat, LogLevel, LogOutput, LoggingConfig, RestrictionConfig};
pub use validation::{
    BasicValidator, ValidationError, ValidationResult, ValidationSeverity, Validator,
};

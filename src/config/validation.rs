//! Configuration validation system.

use super::types::RestrictionConfig;
use crate::modules::time_restriction::{ScheduleError, END_TIME_FIELD};

/// A single validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The field path that failed validation.
    pub field: String,
    /// Error message.
    pub message: String,
    /// Severity level.
    pub severity: ValidationSeverity,
}

impl ValidationError {
    /// Create a new error.
    pub fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity: ValidationSeverity::Error,
        }
    }

    /// Create a new warning.
    pub fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity: ValidationSeverity::Warning,
        }
    }
}

/// Severity of validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationSeverity {
    /// Error - configuration is invalid.
    Error,
    /// Warning - configuration may have issues.
    Warning,
}

/// Result of configuration validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create a new empty (valid) result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Check if the validation passed (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self
            .errors
            .iter()
            .any(|e| e.severity == ValidationSeverity::Error)
    }

    /// Get all validation issues.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Get only errors (not warnings).
    #[must_use]
    pub fn errors_only(&self) -> Vec<&ValidationError> {
        self.errors
            .iter()
            .filter(|e| e.severity == ValidationSeverity::Error)
            .collect()
    }

    /// Get only warnings.
    #[must_use]
    pub fn warnings(&self) -> Vec<&ValidationError> {
        self.errors
            .iter()
            .filter(|e| e.severity == ValidationSeverity::Warning)
            .collect()
    }
}

/// Trait for configuration validators.
pub trait Validator: std::fmt::Debug + Send + Sync {
    /// Validate a configuration and return any errors.
    fn validate(&self, config: &RestrictionConfig) -> ValidationResult;
}

/// Built-in validator for the restriction sections.
///
/// Schedule problems are errors. Malformed IP rules are only warnings since
/// evaluation treats them as rules that match nothing.
#[derive(Debug, Default)]
pub struct BasicValidator;

impl BasicValidator {
    /// Create a new basic validator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Validator for BasicValidator {
    fn validate(&self, config: &RestrictionConfig) -> ValidationResult {
        let mut result = ValidationResult::new();

        if let Some(ref ip) = config.ip_restriction {
            for (index, token, error) in ip.invalid_rules() {
                result.add_error(ValidationError::warning(
                    format!("ip_restriction.rules[{index}]"),
                    format!("Rule '{token}' never matches: {error}"),
                ));
            }
        }

        if let Some(ref time) = config.time_restriction {
            for day in time.parsed_days().rejected {
                result.add_error(ValidationError::warning(
                    "time_restriction.allowed_days",
                    format!("Unknown day name '{day}' is ignored"),
                ));
            }

            if let Err(e) = time.validate() {
                let field = match &e {
                    ScheduleError::UnknownTimezone(_) => "time_restriction.timezone",
                    ScheduleError::InvalidTime { field, .. } if *field == END_TIME_FIELD => {
                        "time_restriction.end_time"
                    },
                    ScheduleError::InvalidTime { .. } => "time_restriction.start_time",
                    ScheduleError::NoAllowedDays(_) => "time_restriction.allowed_days",
                };
                result.add_error(ValidationError::error(field, e.to_string()));
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::ip_restriction::IpRestrictionConfig;
    use crate::modules::time_restriction::TimeRestrictionConfig;

    #[test]
    fn test_basic_validator_valid() {
        let config = RestrictionConfig {
            ip_restriction: Some(IpRestrictionConfig::with_rules(["+10.0.0.0/8"])),
            time_restriction: Some(TimeRestrictionConfig::window("09:00", "17:00")),
            ..Default::default()
        };

        let result = BasicValidator::new().validate(&config);
        assert!(result.is_valid());
        assert!(result.errors().is_empty());
    }

    #[test]
    fn test_malformed_rules_are_warnings() {
        let config = RestrictionConfig {
            ip_restriction: Some(IpRestrictionConfig::with_rules([
                "10.0.0.1",
                "+10.0.0.0/33",
            ])),
            ..Default::default()
        };

        let result = BasicValidator::new().validate(&config);
        assert!(result.is_valid());
        assert_eq!(result.warnings().len(), 2);
        assert_eq!(result.warnings()[0].field, "ip_restriction.rules[0]");
        assert_eq!(result.warnings()[1].field, "ip_restriction.rules[1]");
    }

    #[test]
    fn test_unknown_timezone_is_error() {
        let config = RestrictionConfig {
            time_restriction: Some(TimeRestrictionConfig::default().with_timezone("Mars/Base")),
            ..Default::default()
        };

        let result = BasicValidator::new().validate(&config);
        assert!(!result.is_valid());
        assert_eq!(result.errors_only()[0].field, "time_restriction.timezone");
        assert!(result.errors_only()[0].message.contains("Mars/Base"));
    }

    #[test]
    fn test_invalid_end_time_is_error() {
        let config = RestrictionConfig {
            time_restriction: Some(TimeRestrictionConfig::window("09:00", "5pm")),
            ..Default::default()
        };

        let result = BasicValidator::new().validate(&config);
        assert_eq!(result.errors_only()[0].field, "time_restriction.end_time");
    }

    #[test]
    fn test_no_allowed_days_is_error() {
        let config = RestrictionConfig {
            time_restriction: Some(TimeRestrictionConfig::default().with_allowed_days("Sat,Sun")),
            ..Default::default()
        };

        let result = BasicValidator::new().validate(&config);
        assert!(!result.is_valid());
        assert_eq!(result.warnings().len(), 2);
        assert_eq!(result.errors_only()[0].field, "time_restriction.allowed_days");
    }
}

//! Configuration for the time restriction.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::error::{ScheduleError, ScheduleResult};
use super::schedule::{parse_allowed_days, AllowedDays, Schedule};

/// Config map key for the IANA timezone.
pub const TIMEZONE: &str = "timezone";
/// Config map key for the comma-separated allowed days.
pub const ALLOWED_DAYS: &str = "allowed-days";
/// Config map key for the window start.
pub const START_TIME: &str = "start-time";
/// Config map key for the window end.
pub const END_TIME: &str = "end-time";
/// Config map key for the denial message.
pub const ERROR_MESSAGE: &str = "error-message";

/// Default timezone.
pub const DEFAULT_TIMEZONE: &str = "UTC";
/// Default allowed days: the whole week.
pub const DEFAULT_ALLOWED_DAYS: &str = "MONDAY,TUESDAY,WEDNESDAY,THURSDAY,FRIDAY,SATURDAY,SUNDAY";
/// Default window start.
pub const DEFAULT_START_TIME: &str = "00:00";
/// Default window end.
pub const DEFAULT_END_TIME: &str = "23:59";
/// Default denial message.
pub const DEFAULT_ERROR_MESSAGE: &str = "Access is not allowed at this time";

/// Time restriction configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRestrictionConfig {
    /// IANA timezone identifier.
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Comma-separated full day names.
    #[serde(default = "default_allowed_days")]
    pub allowed_days: String,

    /// Window start (`HH:mm`).
    #[serde(default = "default_start_time")]
    pub start_time: String,

    /// Window end (`HH:mm`).
    #[serde(default = "default_end_time")]
    pub end_time: String,

    /// Message shown on denial.
    #[serde(default = "default_error_message")]
    pub error_message: String,
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

fn default_allowed_days() -> String {
    DEFAULT_ALLOWED_DAYS.to_string()
}

fn default_start_time() -> String {
    DEFAULT_START_TIME.to_string()
}

fn default_end_time() -> String {
    DEFAULT_END_TIME.to_string()
}

fn default_error_message() -> String {
    DEFAULT_ERROR_MESSAGE.to_string()
}

impl Default for TimeRestrictionConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            allowed_days: default_allowed_days(),
            start_time: default_start_time(),
            end_time: default_end_time(),
            error_message: default_error_message(),
        }
    }
}

impl TimeRestrictionConfig {
    /// Create a config for a daily window with all other fields defaulted.
    #[must_use]
    pub fn window(start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            start_time: start_time.into(),
            end_time: end_time.into(),
            ..Default::default()
        }
    }

    /// Set the timezone.
    #[must_use]
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }

    /// Set the allowed days.
    #[must_use]
    pub fn with_allowed_days(mut self, days: impl Into<String>) -> Self {
        self.allowed_days = days.into();
        self
    }

    /// Build the config from a flat host configuration map.
    #[must_use]
    pub fn from_config_map(map: &HashMap<String, String>) -> Self {
        let get = |key: &str, default: &str| {
            map.get(key)
                .cloned()
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            timezone: get(TIMEZONE, DEFAULT_TIMEZONE),
            allowed_days: get(ALLOWED_DAYS, DEFAULT_ALLOWED_DAYS),
            start_time: get(START_TIME, DEFAULT_START_TIME),
            end_time: get(END_TIME, DEFAULT_END_TIME),
            error_message: get(ERROR_MESSAGE, DEFAULT_ERROR_MESSAGE),
        }
    }

    /// Parse the allowed-days field.
    #[must_use]
    pub fn parsed_days(&self) -> AllowedDays {
        parse_allowed_days(&self.allowed_days)
    }

    /// Build the schedule. Unknown day names are dropped.
    #[must_use]
    pub fn schedule(&self) -> Schedule {
        Schedule {
            timezone: self.timezone.clone(),
            allowed_days: self.parsed_days().days,
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ScheduleResult<()> {
        match self.schedule().validate() {
            Err(ScheduleError::NoAllowedDays(_)) => {
                Err(ScheduleError::NoAllowedDays(self.allowed_days.clone()))
            },
            other => other,
        }
    }
}

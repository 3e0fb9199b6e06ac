//! Error types for schedule evaluation.

use thiserror::Error;

/// Result type for schedule operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Schedule configuration errors.
///
/// Callers are expected to fail open on these: a misconfigured schedule
/// must not lock every user out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// The timezone is not a known IANA zone identifier.
    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),

    /// A time bound is not `HH:mm` or `HH:mm:ss`.
    #[error("invalid {field}: '{value}' (expected HH:mm)")]
    InvalidTime {
        /// Which bound (`start-time` or `end-time`).
        field: &'static str,
        /// The rejected text.
        value: String,
    },

    /// No recognizable day name in the allowed-days list.
    #[error("no valid day in allowed days '{0}'")]
    NoAllowedDays(String),
}

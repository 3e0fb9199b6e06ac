//! Audit event model.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Detail key: resolved client address.
pub const DETAIL_CLIENT_IP: &str = "client_ip";
/// Detail key: text of the deciding rule, or `none`.
pub const DETAIL_MATCHED_RULE: &str = "matched_rule";
/// Detail key: `DENY` or `NO_MATCH`.
pub const DETAIL_RULE_TYPE: &str = "rule_type";
/// Detail key: the full rule list joined with `", "`.
pub const DETAIL_ALL_RULES: &str = "all_rules";
/// Detail key: raw `X-Forwarded-For` value.
pub const DETAIL_X_FORWARDED_FOR: &str = "x_forwarded_for";
/// Detail key: human-readable reason.
pub const DETAIL_REASON: &str = "reason";
/// Detail key: configured allowed days.
pub const DETAIL_ALLOWED_DAYS: &str = "allowed_days";
/// Detail key: configured time range.
pub const DETAIL_ALLOWED_TIME_RANGE: &str = "allowed_time_range";
/// Detail key: day of week at evaluation.
pub const DETAIL_CURRENT_DAY: &str = "current_day";
/// Detail key: wall-clock time at evaluation.
pub const DETAIL_CURRENT_TIME: &str = "current_time";
/// Detail key: timezone used for evaluation.
pub const DETAIL_TIMEZONE: &str = "timezone";

/// Error code attached to every restriction event.
pub const ERROR_NOT_ALLOWED: &str = "not_allowed";

/// Which restriction produced the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventKind {
    /// IP restriction denial.
    IpRestriction,
    /// Time restriction denial.
    TimeRestriction,
}

impl fmt::Display for AuditEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IpRestriction => write!(f, "ip_restriction"),
            Self::TimeRestriction => write!(f, "time_restriction"),
        }
    }
}

/// A security event describing a refused attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Event source.
    pub kind: AuditEventKind,

    /// Error code.
    pub error: String,

    /// User, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Structured details, keyed by the `DETAIL_*` constants.
    #[serde(default)]
    pub details: BTreeMap<String, String>,
}

impl AuditEvent {
    /// Create an event with the `not_allowed` error code.
    #[must_use]
    pub fn not_allowed(kind: AuditEventKind) -> Self {
        Self {
            kind,
            error: ERROR_NOT_ALLOWED.to_string(),
            username: None,
            details: BTreeMap::new(),
        }
    }

    /// Set the username.
    #[must_use]
    pub fn with_username(mut self, username: Option<impl Into<String>>) -> Self {
        self.username = username.map(Into::into);
        self
    }

    /// Add a detail.
    #[must_use]
    pub fn detail(mut self, key: &str, value: impl Into<String>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }

    /// Look up a detail.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.details.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_builder() {
        let event = AuditEvent::not_allowed(AuditEventKind::IpRestriction)
            .with_username(Some("bob"))
            .detail(DETAIL_CLIENT_IP, "10.0.0.1")
            .detail(DETAIL_RULE_TYPE, "DENY");

        assert_eq!(event.error, "not_allowed");
        assert_eq!(event.username.as_deref(), Some("bob"));
        assert_eq!(event.get(DETAIL_CLIENT_IP), Some("10.0.0.1"));
        assert_eq!(event.get(DETAIL_RULE_TYPE), Some("DENY"));
        assert_eq!(event.get(DETAIL_X_FORWARDED_FOR), None);
    }

    #[test]
    fn test_event_json() {
        let event = AuditEvent::not_allowed(AuditEventKind::TimeRestriction)
            .detail(DETAIL_TIMEZONE, "UTC");
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["kind"], "time_restriction");
        assert_eq!(json["details"]["timezone"], "UTC");
        assert!(json.get("username").is_none());
    }
}

//! Authentication attempt context.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

/// Header carrying the proxy chain, client first.
pub const X_FORWARDED_FOR: &str = "X-Forwarded-For";

/// A single authentication attempt as seen by restriction authenticators.
///
/// Header names are case-insensitive.
#[derive(Debug, Clone)]
pub struct AuthRequest {
    /// Address of the directly connected peer.
    pub remote_addr: Option<String>,

    /// Username, when the flow has already identified the user.
    pub username: Option<String>,

    /// Arrival time of the attempt.
    pub received_at: DateTime<Utc>,

    /// Request headers keyed by lowercase name.
    headers: HashMap<String, String>,
}

impl Default for AuthRequest {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthRequest {
    /// Create a request stamped with the current wall-clock time.
    #[must_use]
    pub fn new() -> Self {
        Self {
            remote_addr: None,
            username: None,
            received_at: Utc::now(),
            headers: HashMap::new(),
        }
    }

    /// Set the connection address.
    #[must_use]
    pub fn with_remote_addr(mut self, addr: impl Into<String>) -> Self {
        self.remote_addr = Some(addr.into());
        self
    }

    /// Set the username.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Override the arrival time.
    #[must_use]
    pub fn with_received_at(mut self, at: DateTime<Utc>) -> Self {
        self.received_at = at;
        self
    }

    /// Add a header.
    #[must_use]
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    /// Look up a header by name, ignoring case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Raw `X-Forwarded-For` value, if present and not blank.
    #[must_use]
    pub fn forwarded_for(&self) -> Option<&str> {
        self.header(X_FORWARDED_FOR)
            .filter(|value| !value.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_request_builder() {
        let at = Utc.with_ymd_and_hms(2024, 3, 4, 10, 30, 0).unwrap();
        let request = AuthRequest::new()
            .with_remote_addr("10.0.0.1")
            .with_username("alice")
            .with_received_at(at)
            .with_header("Content-Type", "text/html");

        assert_eq!(request.remote_addr.as_deref(), Some("10.0.0.1"));
        assert_eq!(request.username.as_deref(), Some("alice"));
        assert_eq!(request.received_at, at);
        assert_eq!(request.header("content-type"), Some("text/html"));
        assert_eq!(request.header("CONTENT-TYPE"), Some("text/html"));
    }

    #[test]
    fn test_forwarded_for() {
        let request = AuthRequest::new().with_header("x-forwarded-for", "1.2.3.4, 5.6.7.8");
        assert_eq!(request.forwarded_for(), Some("1.2.3.4, 5.6.7.8"));

        let blank = AuthRequest::new().with_header(X_FORWARDED_FOR, "  ");
        assert_eq!(blank.forwarded_for(), None);

        assert_eq!(AuthRequest::new().forwarded_for(), None);
    }
}

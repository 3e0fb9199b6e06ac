//! Authenticator verdicts.

use std::fmt;

/// HTTP status used for restriction failures.
pub const FORBIDDEN: u16 = 403;

/// Error classification reported to the host flow on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFlowError {
    /// The attempt is refused by an access restriction.
    AccessDenied,
}

impl fmt::Display for AuthFlowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AccessDenied => write!(f, "access denied"),
        }
    }
}

/// Details of a refused attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthFailure {
    /// Error classification.
    pub error: AuthFlowError,
    /// Message to show the user.
    pub message: String,
    /// HTTP status for the error page.
    pub status: u16,
}

impl AuthFailure {
    /// Create an access-denied failure.
    #[must_use]
    pub fn access_denied(message: impl Into<String>) -> Self {
        Self {
            error: AuthFlowError::AccessDenied,
            message: message.into(),
            status: FORBIDDEN,
        }
    }
}

/// Outcome of one authenticator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthDecision {
    /// Continue the flow.
    Success,
    /// Stop the flow.
    Failure(AuthFailure),
}

impl AuthDecision {
    /// Create an access-denied failure.
    #[must_use]
    pub fn deny(message: impl Into<String>) -> Self {
        Self::Failure(AuthFailure::access_denied(message))
    }

    /// Check if the attempt may continue.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// The failure, if any.
    #[must_use]
    pub fn failure(&self) -> Option<&AuthFailure> {
        match self {
            Self::Success => None,
            Self::Failure(failure) => Some(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deny_decision() {
        let decision = AuthDecision::deny("Access from your IP address is blocked");
        assert!(!decision.is_success());

        let failure = decision.failure().unwrap();
        assert_eq!(failure.error, AuthFlowError::AccessDenied);
        assert_eq!(failure.status, 403);
        assert_eq!(failure.message, "Access from your IP address is blocked");
    }

    #[test]
    fn test_success_decision() {
        assert!(AuthDecision::Success.is_success());
        assert!(AuthDecision::Success.failure().is_none());
    }
}

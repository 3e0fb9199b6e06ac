//! Error types for IP restriction rules.

use thiserror::Error;

/// Result type for rule parsing and validation.
pub type RuleResult<T> = Result<T, RuleError>;

/// Reasons a single rule token is malformed.
///
/// These never surface from evaluation, where a malformed rule is simply a
/// rule that matches nothing. They are reported by configuration validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// The token is empty after trimming.
    #[error("empty rule")]
    Empty,

    /// The token does not start with `+` or `-`.
    #[error("rule '{0}' must start with '+' (allow) or '-' (deny)")]
    MissingSign(String),

    /// Nothing follows the sign.
    #[error("rule '{0}' has no address pattern")]
    EmptyPattern(String),

    /// The address part is not a dotted-quad IPv4 literal.
    #[error("invalid IPv4 address: {0}")]
    InvalidAddress(String),

    /// The CIDR prefix is not an integer in 0..=32.
    #[error("invalid CIDR prefix length in '{0}' (expected 0-32)")]
    InvalidPrefix(String),

    /// The CIDR text does not split into exactly an address and a prefix.
    #[error("invalid CIDR notation: {0}")]
    InvalidCidr(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RuleError::InvalidPrefix("10.0.0.0/33".to_string());
        assert_eq!(
            err.to_string(),
            "invalid CIDR prefix length in '10.0.0.0/33' (expected 0-32)"
        );

        let err = RuleError::MissingSign("10.0.0.1".to_string());
        assert_eq!(
            err.to_string(),
            "rule '10.0.0.1' must start with '+' (allow) or '-' (deny)"
        );

        let err = RuleError::InvalidCidr("1.2.3.4/8/9".to_string());
        assert_eq!(err.to_string(), "invalid CIDR notation: 1.2.3.4/8/9");
    }
}

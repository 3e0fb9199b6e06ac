//! Signed IP rules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{RuleError, RuleResult};
use super::matcher;

/// Sign marking a rule as a permit or a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    /// `+` prefix.
    Allow,
    /// `-` prefix.
    Deny,
}

impl Sign {
    /// Prefix character for allow rules.
    pub const ALLOW_PREFIX: char = '+';

    /// Prefix character for deny rules.
    pub const DENY_PREFIX: char = '-';

    /// The prefix character for this sign.
    #[must_use]
    pub fn prefix(self) -> char {
        match self {
            Self::Allow => Self::ALLOW_PREFIX,
            Self::Deny => Self::DENY_PREFIX,
        }
    }

    /// Detect the sign of a (trimmed) rule token.
    #[must_use]
    pub fn of(token: &str) -> Option<Self> {
        match token.chars().next() {
            Some(Self::ALLOW_PREFIX) => Some(Self::Allow),
            Some(Self::DENY_PREFIX) => Some(Self::Deny),
            _ => None,
        }
    }

    /// Check if this is the allow sign.
    #[must_use]
    pub fn is_allow(self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Check if this is the deny sign.
    #[must_use]
    pub fn is_deny(self) -> bool {
        matches!(self, Self::Deny)
    }
}

/// A single allow or deny rule such as `+192.168.0.0/24` or `-10.0.0.5`.
///
/// The pattern is kept as text. It is not validated on parse because a
/// malformed pattern is still a rule, one that matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    sign: Sign,
    pattern: String,
}

impl Rule {
    /// Create a rule from a sign and a pattern.
    #[must_use]
    pub fn new(sign: Sign, pattern: impl Into<String>) -> Self {
        Self {
            sign,
            pattern: pattern.into().trim().to_string(),
        }
    }

    /// Create an allow rule.
    #[must_use]
    pub fn allow(pattern: impl Into<String>) -> Self {
        Self::new(Sign::Allow, pattern)
    }

    /// Create a deny rule.
    #[must_use]
    pub fn deny(pattern: impl Into<String>) -> Self {
        Self::new(Sign::Deny, pattern)
    }

    /// Parse a signed rule token, leniently.
    ///
    /// Returns `None` for tokens without a recognized sign; the pattern is not
    /// checked.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        let sign = Sign::of(token)?;
        Some(Self::new(sign, &token[1..]))
    }

    /// The rule's sign.
    #[must_use]
    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// The address or CIDR pattern, without sign.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Check whether a candidate address satisfies this rule's pattern.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        matcher::matches(candidate, &self.pattern)
    }

    /// Check that the pattern is a well-formed address or CIDR network.
    pub fn validate(&self) -> RuleResult<()> {
        if self.pattern.is_empty() {
            return Err(RuleError::EmptyPattern(self.to_string()));
        }
        matcher::validate_pattern(&self.pattern)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.sign.prefix(), self.pattern)
    }
}

impl FromStr for Rule {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.is_empty() {
            return Err(RuleError::Empty);
        }
        let rule =
            Self::from_token(token).ok_or_else(|| RuleError::MissingSign(token.to_string()))?;
        if rule.pattern.is_empty() {
            return Err(RuleError::EmptyPattern(token.to_string()));
        }
        Ok(rule)
    }
}

impl Serialize for Rule {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rule {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

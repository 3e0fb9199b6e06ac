//! Rule-set evaluation with deny-first precedence.
//!
//! Evaluation runs in two passes over the rule list. The first pass looks
//! only at deny rules and stops at the first match. The second pass looks at
//! allow rules. Any deny match therefore wins over any allow match, wherever
//! the two appear in the list. When the list contains at least one allow
//! rule, an address matching none of them is refused.

use std::fmt;

use super::rule::{Rule, Sign};

/// Machine-readable reason for an IP decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchReason {
    /// A deny rule matched.
    Blocked,
    /// An allow rule matched.
    Allowed,
    /// Allow rules exist but none matched.
    NotInAllowList,
    /// Nothing matched and there are no allow rules.
    NoRestrictions,
}

impl MatchReason {
    /// Human-readable description used in logs and audit events.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Blocked => "IP Restriction: IP address is explicitly blocked",
            Self::Allowed => "Allowed",
            Self::NotInAllowList => "IP Restriction: IP address is not in allowed list",
            Self::NoRestrictions => "No restrictions",
        }
    }

    /// Short code.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blocked => "blocked",
            Self::Allowed => "allowed",
            Self::NotInAllowList => "not_in_allow_list",
            Self::NoRestrictions => "no_restrictions",
        }
    }
}

impl fmt::Display for MatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of the rule behind a decision, as reported in audit events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleType {
    /// Decided by a deny rule.
    Deny,
    /// Decided by an allow rule.
    Allow,
    /// Decided by the default.
    NoMatch,
}

impl RuleType {
    /// Audit label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Deny => "DENY",
            Self::Allow => "ALLOW",
            Self::NoMatch => "NO_MATCH",
        }
    }
}

/// Result of evaluating an address against a rule list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Whether the address is allowed.
    pub allowed: bool,
    /// Whether a deny rule refused the address.
    pub explicit_deny: bool,
    /// The rule that decided, if any.
    pub matched_rule: Option<Rule>,
    /// Why.
    pub reason: MatchReason,
}

impl MatchOutcome {
    fn blocked(rule: Rule) -> Self {
        Self {
            allowed: false,
            explicit_deny: true,
            matched_rule: Some(rule),
            reason: MatchReason::Blocked,
        }
    }

    fn allowed(rule: Rule) -> Self {
        Self {
            allowed: true,
            explicit_deny: false,
            matched_rule: Some(rule),
            reason: MatchReason::Allowed,
        }
    }

    fn not_in_allow_list() -> Self {
        Self {
            allowed: false,
            explicit_deny: false,
            matched_rule: None,
            reason: MatchReason::NotInAllowList,
        }
    }

    fn no_restrictions() -> Self {
        Self {
            allowed: true,
            explicit_deny: false,
            matched_rule: None,
            reason: MatchReason::NoRestrictions,
        }
    }

    /// Classify the deciding rule.
    #[must_use]
    pub fn rule_type(&self) -> RuleType {
        match &self.matched_rule {
            Some(rule) if rule.sign().is_deny() => RuleType::Deny,
            Some(_) => RuleType::Allow,
            None => RuleType::NoMatch,
        }
    }
}

/// Evaluates a candidate address against an ordered list of rule tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleSetEvaluator;

impl RuleSetEvaluator {
    /// Create a new evaluator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Evaluate `candidate` against `rules`.
    ///
    /// Tokens are trimmed before sign detection. Tokens without a `+` or `-`
    /// sign are ignored.
    pub fn evaluate<S: AsRef<str>>(&self, candidate: &str, rules: &[S]) -> MatchOutcome {
        let mut has_allow_rules = false;

        for rule in rules.iter().filter_map(|t| Rule::from_token(t.as_ref())) {
            match rule.sign() {
                Sign::Deny if rule.matches(candidate) => return MatchOutcome::blocked(rule),
                Sign::Deny => {},
                Sign::Allow => has_allow_rules = true,
            }
        }

        let allowed = rules
            .iter()
            .filter_map(|t| Rule::from_token(t.as_ref()))
            .find(|rule| rule.sign().is_allow() && rule.matches(candidate));
        if let Some(rule) = allowed {
            return MatchOutcome::allowed(rule);
        }

        if has_allow_rules {
            MatchOutcome::not_in_allow_list()
        } else {
            MatchOutcome::no_restrictions()
        }
    }
}

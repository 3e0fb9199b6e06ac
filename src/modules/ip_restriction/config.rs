//! Configuration for the IP restriction.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::RuleError;
use super::rule::Rule;

/// Config map key holding the rule list.
pub const IP_RULES: &str = "ip-rules";
/// Config map key toggling `X-Forwarded-For` resolution.
pub const CHECK_X_FORWARDED_FOR: &str = "check-x-forwarded-for";
/// Config map key for the message shown when a deny rule matched.
pub const ERROR_MESSAGE_BLOCKED: &str = "error-message-blocked";
/// Config map key for the message shown when the allow list was missed.
pub const ERROR_MESSAGE_NOT_ALLOWED: &str = "error-message-not-allowed";

/// Separator between the key and the index of multivalued entries.
pub const MULTIVALUED_SEPARATOR: &str = "##";

/// Default message for explicitly blocked addresses.
pub const DEFAULT_ERROR_MESSAGE_BLOCKED: &str = "Access from your IP address is blocked";
/// Default message for addresses outside the allow list.
pub const DEFAULT_ERROR_MESSAGE_NOT_ALLOWED: &str = "Access from your IP address is not allowed";

/// IP restriction configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpRestrictionConfig {
    /// Signed rule tokens (`+` allow, `-` deny), in configured order.
    #[serde(default)]
    pub rules: Vec<String>,

    /// Resolve the client from the first `X-Forwarded-For` hop.
    #[serde(default = "default_check_x_forwarded_for")]
    pub check_x_forwarded_for: bool,

    /// Message when a deny rule matched.
    #[serde(default = "default_error_message_blocked")]
    pub error_message_blocked: String,

    /// Message when the address is outside the allow list.
    #[serde(default = "default_error_message_not_allowed")]
    pub error_message_not_allowed: String,
}

fn default_check_x_forwarded_for() -> bool {
    true
}

fn default_error_message_blocked() -> String {
    DEFAULT_ERROR_MESSAGE_BLOCKED.to_string()
}

fn default_error_message_not_allowed() -> String {
    DEFAULT_ERROR_MESSAGE_NOT_ALLOWED.to_string()
}

impl Default for IpRestrictionConfig {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            check_x_forwarded_for: default_check_x_forwarded_for(),
            error_message_blocked: default_error_message_blocked(),
            error_message_not_allowed: default_error_message_not_allowed(),
        }
    }
}

impl IpRestrictionConfig {
    /// Create a config with the given rules and default messages.
    #[must_use]
    pub fn with_rules<I, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rules: rules.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Set whether `X-Forwarded-For` is trusted.
    #[must_use]
    pub fn with_check_x_forwarded_for(mut self, check: bool) -> Self {
        self.check_x_forwarded_for = check;
        self
    }

    /// Build the config from a flat host configuration map.
    ///
    /// Missing keys take their defaults. Boolean values other than `true`
    /// (case-insensitive) read as `false`.
    #[must_use]
    pub fn from_config_map(map: &HashMap<String, String>) -> Self {
        let defaults = Self::default();
        Self {
            rules: rules_from_config_map(map),
            check_x_forwarded_for: map
                .get(CHECK_X_FORWARDED_FOR)
                .map_or(defaults.check_x_forwarded_for, |v| {
                    v.trim().eq_ignore_ascii_case("true")
                }),
            error_message_blocked: map
                .get(ERROR_MESSAGE_BLOCKED)
                .cloned()
                .unwrap_or(defaults.error_message_blocked),
            error_message_not_allowed: map
                .get(ERROR_MESSAGE_NOT_ALLOWED)
                .cloned()
                .unwrap_or(defaults.error_message_not_allowed),
        }
    }

    /// Validate every rule token, returning `(index, token, error)` for each
    /// malformed one.
    ///
    /// Malformed rules are tolerated at evaluation time, so callers usually
    /// report these as warnings.
    #[must_use]
    pub fn invalid_rules(&self) -> Vec<(usize, String, RuleError)> {
        self.rules
            .iter()
            .enumerate()
            .filter_map(|(i, token)| {
                token
                    .parse::<Rule>()
                    .and_then(|rule| rule.validate())
                    .err()
                    .map(|e| (i, token.clone(), e))
            })
            .collect()
    }
}

static RULE_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"##|[\r\n,]+").unwrap());

/// Reconstruct the ordered rule list from a host configuration map.
///
/// Indexed keys (`ip-rules##0`, `ip-rules##1`, ...) are read in order until
/// the first missing or blank one. When there are none, the plain `ip-rules`
/// value is split on `##`, newlines and commas. Entries are trimmed and blank
/// entries dropped.
#[must_use]
pub fn rules_from_config_map(map: &HashMap<String, String>) -> Vec<String> {
    let indexed: Vec<String> = (0..)
        .map(|i| map.get(&format!("{IP_RULES}{MULTIVALUED_SEPARATOR}{i}")))
        .take_while(|value| value.is_some_and(|v| !v.trim().is_empty()))
        .flatten()
        .map(|v| v.trim().to_string())
        .collect();

    if !indexed.is_empty() {
        return indexed;
    }

    map.get(IP_RULES)
        .map(|value| split_rules(value))
        .unwrap_or_default()
}

/// Split a delimiter-joined rule string.
#[must_use]
pub fn split_rules(value: &str) -> Vec<String> {
    RULE_SEPARATOR
        .split(value)
        .map(str::trim)
        .filter(|rule| !rule.is_empty())
        .map(str::to_string)
        .collect()
}

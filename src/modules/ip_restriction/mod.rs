//! # IP Restriction Module
//!
//! Allow/deny rules over client IPv4 addresses.
//!
//! ## Rules
//!
//! Each rule is a signed token: `+` allows, `-` denies. The pattern is either
//! a single address, compared as literal text, or a CIDR range.
//!
//! ```text
//! +192.168.0.0/24
//! -192.168.0.5
//! +10.0.0.1
//! ```
//!
//! ## Precedence
//!
//! A matching deny rule always refuses the address, wherever it sits in the
//! list. Otherwise a matching allow rule accepts it. When no rule matches,
//! the address is refused if the list holds any allow rule and accepted if it
//! holds none. An empty list accepts everything.
//!
//! Malformed rules never fail an evaluation; they simply do not match.
//! [`IpRestrictionConfig::invalid_rules`] reports them for configuration
//! diagnostics.

mod authenticator;
mod config;
mod error;
mod evaluator;
mod matcher;
mod rule;

pub use authenticator::{resolve_client_ip, IpRestrictionAuthenticator};
pub use config::{
    rules_from_config_map, split_rules, IpRestrictionConfig, CHECK_X_FORWARDED_FOR,
    DEFAULT_ERROR_MESSAGE_BLOCKED, DEFAULT_ERROR_MESSAGE_NOT_ALLOWED, ERROR_MESSAGE_BLOCKED,
    ERROR_MESSAGE_NOT_ALLOWED, IP_RULES, MULTIVALUED_SEPARATOR,
};
pub use error::{RuleError, RuleResult};
pub use evaluator::{MatchOutcome, MatchReason, RuleSetEvaluator, RuleType};
pub use matcher::{matches, matches_cidr, parse_ipv4, validate_pattern, Cidr};
pub use rule::{Rule, Sign};

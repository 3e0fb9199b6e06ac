//! # R0N Restrict
//!
//! IP address and time-of-day access restrictions for authentication flows.
//!
//! ## Features
//!
//! - IPv4 allow/deny rules with exact and CIDR patterns, deny first
//! - Weekly time windows in any IANA timezone, including overnight windows
//! - Fail-open handling of unresolvable addresses and broken schedules
//! - Audit events for every refused attempt
//!
//! ## Architecture
//!
//! The evaluators in [`modules::ip_restriction`] and
//! [`modules::time_restriction`] are pure functions of their inputs. The
//! authenticators wrapping them plug into a host flow through the
//! [`flow::Authenticator`] trait; they resolve the client address, pick the
//! user-facing message, and report denials to a
//! [`modules::audit::AuditObserver`].
//!
//! ```
//! use r0n_restrict::modules::ip_restriction::{MatchReason, RuleSetEvaluator};
//!
//! let outcome = RuleSetEvaluator::new()
//!     .evaluate("192.168.0.5", &["+192.168.0.0/24", "-192.168.0.5"]);
//! assert!(!outcome.allowed);
//! assert_eq!(outcome.reason, MatchReason::Blocked);
//! ```

pub mod config;
pub mod flow;
pub mod logging;
pub mod modules;

//! # Authentication Flow Seam
//!
//! The host side of the restrictions. A host authentication flow hands each
//! attempt to a chain of [`Authenticator`]s as an [`AuthRequest`] and gets an
//! [`AuthDecision`] back. The restriction authenticators live in
//! [`crate::modules`]; this module holds the shared request and decision
//! types, the [`RestrictionFlow`] chain and the [`RestrictionStats`] counters.

mod chain;
mod decision;
mod request;
mod stats;

pub use chain::RestrictionFlow;
pub use decision::{AuthDecision, AuthFailure, AuthFlowError, FORBIDDEN};
pub use request::{AuthRequest, X_FORWARDED_FOR};
pub use stats::{DenialKind, RestrictionStats, StatsSnapshot};

/// A step of the authentication flow that can refuse an attempt.
pub trait Authenticator: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Whether the host must identify the user before this step runs.
    fn requires_user(&self) -> bool;

    /// Decide on one attempt.
    fn authenticate(&self, request: &AuthRequest) -> AuthDecision;
}

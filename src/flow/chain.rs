//! Ordered chain of restriction authenticators.

use std::sync::Arc;

use tracing::debug;

use super::decision::AuthDecision;
use super::request::AuthRequest;
use super::stats::RestrictionStats;
use super::Authenticator;
use crate::config::RestrictionConfig;
use crate::modules::audit::AuditObserver;
use crate::modules::ip_restriction::IpRestrictionAuthenticator;
use crate::modules::time_restriction::TimeRestrictionAuthenticator;

/// Runs authenticators in order; the first failure ends the attempt.
pub struct RestrictionFlow {
    authenticators: Vec<Box<dyn Authenticator>>,
    stats: Arc<RestrictionStats>,
}

impl std::fmt::Debug for RestrictionFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.authenticators.iter().map(|a| a.name()).collect();
        f.debug_struct("RestrictionFlow")
            .field("authenticators", &names)
            .field("stats", &self.stats)
            .finish()
    }
}

impl Default for RestrictionFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl RestrictionFlow {
    /// Create an empty flow that allows everything.
    #[must_use]
    pub fn new() -> Self {
        Self {
            authenticators: Vec::new(),
            stats: Arc::new(RestrictionStats::new()),
        }
    }

    /// Build the flow described by a configuration: IP restriction first,
    /// then time restriction.
    #[must_use]
    pub fn from_config(config: &RestrictionConfig, observer: Arc<dyn AuditObserver>) -> Self {
        let mut flow = Self::new();
        let stats = flow.stats();

        if let Some(ref ip) = config.ip_restriction {
            flow = flow.with_authenticator(
                IpRestrictionAuthenticator::new(ip.clone(), Arc::clone(&observer))
                    .with_stats(Arc::clone(&stats)),
            );
        }

        if let Some(ref time) = config.time_restriction {
            flow = flow.with_authenticator(
                TimeRestrictionAuthenticator::new(time.clone(), observer).with_stats(stats),
            );
        }

        flow
    }

    /// Append an authenticator.
    #[must_use]
    pub fn with_authenticator(mut self, authenticator: impl Authenticator + 'static) -> Self {
        self.authenticators.push(Box::new(authenticator));
        self
    }

    /// Number of authenticators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.authenticators.len()
    }

    /// Returns `true` if the flow has no authenticators.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.authenticators.is_empty()
    }

    /// Shared statistics.
    #[must_use]
    pub fn stats(&self) -> Arc<RestrictionStats> {
        Arc::clone(&self.stats)
    }

    /// Run every authenticator against the attempt.
    pub fn check(&self, request: &AuthRequest) -> AuthDecision {
        for authenticator in &self.authenticators {
            let decision = authenticator.authenticate(request);
            if !decision.is_success() {
                debug!(
                    authenticator = authenticator.name(),
                    "restriction flow stopped"
                );
                self.stats.record_check(false);
                return decision;
            }
        }

        self.stats.record_check(true);
        AuthDecision::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::audit::MemoryAuditObserver;
    use crate::modules::ip_restriction::IpRestrictionConfig;
    use crate::modules::time_restriction::TimeRestrictionConfig;

    struct Fixed(AuthDecision);

    impl Authenticator for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn requires_user(&self) -> bool {
            false
        }

        fn authenticate(&self, _request: &AuthRequest) -> AuthDecision {
            self.0.clone()
        }
    }

    #[test]
    fn test_empty_flow_allows() {
        let flow = RestrictionFlow::new();
        assert!(flow.is_empty());
        assert!(flow.check(&AuthRequest::new()).is_success());
        assert_eq!(flow.stats().snapshot().requests_allowed, 1);
    }

    #[test]
    fn test_first_failure_wins() {
        let flow = RestrictionFlow::new()
            .with_authenticator(Fixed(AuthDecision::Success))
            .with_authenticator(Fixed(AuthDecision::deny("first")))
            .with_authenticator(Fixed(AuthDecision::deny("second")));

        let decision = flow.check(&AuthRequest::new());
        assert_eq!(decision.failure().unwrap().message, "first");

        let snapshot = flow.stats().snapshot();
        assert_eq!(snapshot.requests_checked, 1);
        assert_eq!(snapshot.requests_denied, 1);
    }

    #[test]
    fn test_from_config() {
        let config = RestrictionConfig {
            ip_restriction: Some(IpRestrictionConfig::with_rules(["-10.0.0.0/8"])),
            time_restriction: Some(TimeRestrictionConfig::default()),
            ..Default::default()
        };
        let observer = Arc::new(MemoryAuditObserver::new());
        let flow = RestrictionFlow::from_config(&config, observer.clone());
        assert_eq!(flow.len(), 2);

        let request = AuthRequest::new().with_remote_addr("10.1.1.1");
        assert!(!flow.check(&request).is_success());
        assert_eq!(observer.len(), 1);

        let snapshot = flow.stats().snapshot();
        assert_eq!(snapshot.requests_denied, 1);
        assert_eq!(snapshot.ip_denials, 1);
    }
}

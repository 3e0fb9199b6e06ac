//! IP restriction step of the authentication flow.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::config::IpRestrictionConfig;
use super::evaluator::{MatchOutcome, RuleSetEvaluator};
use crate::flow::{AuthDecision, AuthRequest, Authenticator, DenialKind, RestrictionStats};
use crate::modules::audit::{
    AuditEvent, AuditEventKind, AuditObserver, DETAIL_ALL_RULES, DETAIL_CLIENT_IP,
    DETAIL_MATCHED_RULE, DETAIL_REASON, DETAIL_RULE_TYPE, DETAIL_X_FORWARDED_FOR,
};

/// Resolve the address the rules are checked against.
///
/// With `check_x_forwarded_for` set and a non-blank `X-Forwarded-For`
/// header, the first hop of the header wins. Otherwise the connection
/// address is used.
#[must_use]
pub fn resolve_client_ip(request: &AuthRequest, check_x_forwarded_for: bool) -> Option<String> {
    if check_x_forwarded_for {
        let first_hop = request
            .forwarded_for()
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|hop| !hop.is_empty());

        if let Some(hop) = first_hop {
            return Some(hop.to_string());
        }
    }

    request
        .remote_addr
        .as_deref()
        .map(str::trim)
        .filter(|addr| !addr.is_empty())
        .map(str::to_string)
}

/// Refuses attempts whose client address is blocked or outside the allow list.
pub struct IpRestrictionAuthenticator {
    config: IpRestrictionConfig,
    evaluator: RuleSetEvaluator,
    observer: Arc<dyn AuditObserver>,
    stats: Arc<RestrictionStats>,
}

impl std::fmt::Debug for IpRestrictionAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IpRestrictionAuthenticator")
            .field("config", &self.config)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl IpRestrictionAuthenticator {
    /// Create an authenticator reporting denials to `observer`.
    #[must_use]
    pub fn new(config: IpRestrictionConfig, observer: Arc<dyn AuditObserver>) -> Self {
        Self {
            config,
            evaluator: RuleSetEvaluator::new(),
            observer,
            stats: Arc::new(RestrictionStats::new()),
        }
    }

    /// Share statistics with other authenticators.
    #[must_use]
    pub fn with_stats(mut self, stats: Arc<RestrictionStats>) -> Self {
        self.stats = stats;
        self
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &IpRestrictionConfig {
        &self.config
    }

    /// Statistics.
    #[must_use]
    pub fn stats(&self) -> &Arc<RestrictionStats> {
        &self.stats
    }

    fn audit(&self, request: &AuthRequest, client_ip: &str, outcome: &MatchOutcome) {
        let matched_rule = outcome
            .matched_rule
            .as_ref()
            .map_or_else(|| "none".to_string(), ToString::to_string);

        let mut event = AuditEvent::not_allowed(AuditEventKind::IpRestriction)
            .with_username(request.username.as_deref())
            .detail(DETAIL_CLIENT_IP, client_ip)
            .detail(DETAIL_MATCHED_RULE, matched_rule)
            .detail(DETAIL_RULE_TYPE, outcome.rule_type().as_str())
            .detail(DETAIL_ALL_RULES, self.config.rules.join(", "))
            .detail(DETAIL_REASON, outcome.reason.description());

        if let Some(forwarded) = request.forwarded_for() {
            event = event.detail(DETAIL_X_FORWARDED_FOR, forwarded);
        }

        self.observer.record(&event);
    }
}

impl Authenticator for IpRestrictionAuthenticator {
    fn name(&self) -> &'static str {
        "ip-restriction"
    }

    fn requires_user(&self) -> bool {
        false
    }

    fn authenticate(&self, request: &AuthRequest) -> AuthDecision {
        let Some(client_ip) = resolve_client_ip(request, self.config.check_x_forwarded_for) else {
            warn!("Could not determine client IP address, skipping IP restriction");
            self.stats.record_fail_open();
            return AuthDecision::Success;
        };

        if self.config.rules.is_empty() {
            debug!(client_ip = %client_ip, "No IP rules configured");
            return AuthDecision::Success;
        }

        let outcome = self.evaluator.evaluate(&client_ip, &self.config.rules);

        if outcome.allowed {
            debug!(
                client_ip = %client_ip,
                reason = %outcome.reason,
                "IP address allowed"
            );
            return AuthDecision::Success;
        }

        info!(
            client_ip = %client_ip,
            reason = %outcome.reason,
            rule_type = outcome.rule_type().as_str(),
            "IP address denied: {}",
            outcome.reason.description()
        );

        self.audit(request, &client_ip, &outcome);
        self.stats.record_denial(DenialKind::Ip);

        let message = if outcome.explicit_deny {
            &self.config.error_message_blocked
        } else {
            &self.config.error_message_not_allowed
        };
        AuthDecision::deny(message.as_str())
    }
}

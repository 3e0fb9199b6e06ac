//! Time restriction step of the authentication flow.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::config::TimeRestrictionConfig;
use super::evaluator::{ScheduleEvaluator, ScheduleOutcome};
use super::schedule::Schedule;
use crate::flow::{AuthDecision, AuthRequest, Authenticator, DenialKind, RestrictionStats};
use crate::modules::audit::{
    AuditEvent, AuditEventKind, AuditObserver, DETAIL_ALLOWED_DAYS, DETAIL_ALLOWED_TIME_RANGE,
    DETAIL_CURRENT_DAY, DETAIL_CURRENT_TIME, DETAIL_REASON, DETAIL_TIMEZONE,
};

/// Refuses attempts made outside the configured days and hours.
pub struct TimeRestrictionAuthenticator {
    config: TimeRestrictionConfig,
    schedule: Schedule,
    evaluator: ScheduleEvaluator,
    observer: Arc<dyn AuditObserver>,
    stats: Arc<RestrictionStats>,
}

impl std::fmt::Debug for TimeRestrictionAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeRestrictionAuthenticator")
            .field("config", &self.config)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl TimeRestrictionAuthenticator {
    /// Create an authenticator reporting denials to `observer`.
    ///
    /// Unrecognized day names are logged and dropped.
    #[must_use]
    pub fn new(config: TimeRestrictionConfig, observer: Arc<dyn AuditObserver>) -> Self {
        for day in &config.parsed_days().rejected {
            warn!(day = %day, "Invalid day of week in time restriction, ignoring");
        }

        let schedule = config.schedule();
        debug!(
            days = %schedule.days_label(),
            window = %schedule.time_range_label(),
            timezone = %schedule.timezone,
            overnight = schedule.is_overnight().unwrap_or(false),
            "Time restriction configured"
        );

        Self {
            config,
            schedule,
            evaluator: ScheduleEvaluator::new(),
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
    pub fn config(&self) -> &TimeRestrictionConfig {
        &self.config
    }

    /// The schedule in force.
    #[must_use]
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Statistics.
    #[must_use]
    pub fn stats(&self) -> &Arc<RestrictionStats> {
        &self.stats
    }

    fn audit(&self, request: &AuthRequest, outcome: &ScheduleOutcome) {
        let event = AuditEvent::not_allowed(AuditEventKind::TimeRestriction)
            .with_username(request.username.as_deref())
            .detail(DETAIL_REASON, outcome.reason.description())
            .detail(DETAIL_ALLOWED_DAYS, self.config.allowed_days.as_str())
            .detail(DETAIL_ALLOWED_TIME_RANGE, self.schedule.time_range_label())
            .detail(DETAIL_CURRENT_DAY, outcome.day_label())
            .detail(DETAIL_CURRENT_TIME, outcome.time_label())
            .detail(DETAIL_TIMEZONE, self.config.timezone.as_str());

        self.observer.record(&event);
    }
}

impl Authenticator for TimeRestrictionAuthenticator {
    fn name(&self) -> &'static str {
        "time-restriction"
    }

    fn requires_user(&self) -> bool {
        true
    }

    fn authenticate(&self, request: &AuthRequest) -> AuthDecision {
        let user = request.username.as_deref().unwrap_or("-");

        let outcome = match self.evaluator.evaluate(request.received_at, &self.schedule) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Error in time restriction configuration, allowing access: {}", e);
                self.stats.record_fail_open();
                return AuthDecision::Success;
            },
        };

        if outcome.allowed {
            debug!(
                user = user,
                day = outcome.day_label(),
                time = %outcome.time_label(),
                timezone = %self.config.timezone,
                "Access granted within time window"
            );
            return AuthDecision::Success;
        }

        info!(
            user = user,
            reason = %outcome.reason,
            day = outcome.day_label(),
            time = %outcome.time_label(),
            allowed_days = %self.schedule.days_label(),
            allowed_range = %self.schedule.time_range_label(),
            timezone = %self.config.timezone,
            "Access denied outside time window"
        );

        self.audit(request, &outcome);
        self.stats.record_denial(DenialKind::Time);

        AuthDecision::deny(self.config.error_message.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::audit::MemoryAuditObserver;
    use crate::modules::time_restriction::config::DEFAULT_ERROR_MESSAGE;
    use chrono::{TimeZone, Utc};

    fn authenticator(
        config: TimeRestrictionConfig,
    ) -> (TimeRestrictionAuthenticator, Arc<MemoryAuditObserver>) {
        let observer = Arc::new(MemoryAuditObserver::new());
        (TimeRestrictionAuthenticator::new(config, observer.clone()), observer)
    }

    // 2024-01-15 is a Monday.
    fn request_at(hour: u32, minute: u32) -> AuthRequest {
        AuthRequest::new()
            .with_username("alice")
            .with_received_at(Utc.with_ymd_and_hms(2024, 1, 15, hour, minute, 0).unwrap())
    }

    #[test]
    fn test_default_config_allows() {
        let (auth, observer) = authenticator(TimeRestrictionConfig::default());
        assert!(auth.authenticate(&request_at(12, 0)).is_success());
        assert!(observer.is_empty());
    }

    #[test]
    fn test_denied_outside_window() {
        let (auth, observer) = authenticator(TimeRestrictionConfig::window("09:00", "17:00"));
        let decision = auth.authenticate(&request_at(18, 30));

        let failure = decision.failure().unwrap();
        assert_eq!(failure.message, DEFAULT_ERROR_MESSAGE);
        assert_eq!(failure.status, 403);

        let events = observer.events();
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.kind, AuditEventKind::TimeRestriction);
        assert_eq!(event.username.as_deref(), Some("alice"));
        assert_eq!(
            event.get(DETAIL_REASON),
            Some("Time/Date restriction: Time not allowed")
        );
        assert_eq!(event.get(DETAIL_ALLOWED_TIME_RANGE), Some("09:00 - 17:00"));
        assert_eq!(event.get(DETAIL_CURRENT_DAY), Some("MONDAY"));
        assert_eq!(event.get(DETAIL_CURRENT_TIME), Some("18:30:00"));
        assert_eq!(event.get(DETAIL_TIMEZONE), Some("UTC"));

        assert_eq!(auth.stats().snapshot().time_denials, 1);
    }

    #[test]
    fn test_denied_on_day() {
        let (auth, observer) =
            authenticator(TimeRestrictionConfig::default().with_allowed_days("SATURDAY,SUNDAY"));
        assert!(!auth.authenticate(&request_at(12, 0)).is_success());

        let event = &observer.events()[0];
        assert_eq!(event.get(DETAIL_REASON), Some("Time/Date restriction: Day not allowed"));
        assert_eq!(event.get(DETAIL_ALLOWED_DAYS), Some("SATURDAY,SUNDAY"));
    }

    #[test]
    fn test_invalid_days_fail_closed() {
        let (auth, _) = authenticator(TimeRestrictionConfig::default().with_allowed_days("Mon"));
        assert!(auth.schedule().allowed_days.is_empty());
        assert!(!auth.authenticate(&request_at(12, 0)).is_success());
    }

    #[test]
    fn test_unknown_timezone_fails_open() {
        let (auth, observer) =
            authenticator(TimeRestrictionConfig::window("09:00", "10:00").with_timezone("Nope/Zone"));

        assert!(auth.authenticate(&request_at(12, 0)).is_success());
        assert!(observer.is_empty());
        assert_eq!(auth.stats().snapshot().fail_open, 1);
    }

    #[test]
    fn test_invalid_time_fails_open() {
        let (auth, observer) = authenticator(TimeRestrictionConfig::window("9 o'clock", "17:00"));
        assert!(auth.authenticate(&request_at(20, 0)).is_success());
        assert!(observer.is_empty());

        let (auth, observer) = authenticator(TimeRestrictionConfig::window("9:00", "17:00"));
        assert!(auth.authenticate(&request_at(8, 0)).is_success());
        assert!(observer.is_empty());
        assert_eq!(auth.stats().snapshot().fail_open, 1);
    }

    #[test]
    fn test_schedule_matches_config() {
        let config = TimeRestrictionConfig::window("22:00", "06:00")
            .with_timezone("Europe/Istanbul")
            .with_allowed_days("MONDAY, friday, Funday");
        let (auth, _) = authenticator(config.clone());

        assert_eq!(auth.schedule(), &config.schedule());
        assert_eq!(auth.schedule().allowed_days.len(), 2);
    }

    #[test]
    fn test_custom_message() {
        let config = TimeRestrictionConfig {
            error_message: "Come back tomorrow".to_string(),
            ..TimeRestrictionConfig::window("09:00", "10:00")
        };
        let (auth, _) = authenticator(config);

        let decision = auth.authenticate(&request_at(11, 0));
        assert_eq!(decision.failure().unwrap().message, "Come back tomorrow");
    }

    #[test]
    fn test_requires_user() {
        let (auth, _) = authenticator(TimeRestrictionConfig::default());
        assert!(auth.requires_user());
        assert_eq!(auth.name(), "time-restriction");
    }
}

//! Counters for restriction checks.

use std::fmt::Write as _;
use std::sync::atomic::{AtomicU64, Ordering};

/// Which restriction refused an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialKind {
    /// Refused by the IP restriction.
    Ip,
    /// Refused by the time restriction.
    Time,
}

/// Statistics shared by the restriction authenticators.
#[derive(Debug, Default)]
pub struct RestrictionStats {
    /// Total attempts checked.
    pub requests_checked: AtomicU64,
    /// Attempts allowed.
    pub requests_allowed: AtomicU64,
    /// Attempts denied.
    pub requests_denied: AtomicU64,
    /// IP restriction denials.
    pub ip_denials: AtomicU64,
    /// Time restriction denials.
    pub time_denials: AtomicU64,
    /// Checks skipped because of missing input or bad configuration.
    pub fail_open: AtomicU64,
}

/// Point-in-time copy of [`RestrictionStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Total attempts checked.
    pub requests_checked: u64,
    /// Attempts allowed.
    pub requests_allowed: u64,
    /// Attempts denied.
    pub requests_denied: u64,
    /// IP restriction denials.
    pub ip_denials: u64,
    /// Time restriction denials.
    pub time_denials: u64,
    /// Fail-open passes.
    pub fail_open: u64,
}

impl RestrictionStats {
    /// Create new stats.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the overall verdict for one attempt.
    pub fn record_check(&self, allowed: bool) {
        self.requests_checked.fetch_add(1, Ordering::Relaxed);
        if allowed {
            self.requests_allowed.fetch_add(1, Ordering::Relaxed);
        } else {
            self.requests_denied.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record which restriction refused an attempt.
    pub fn record_denial(&self, kind: DenialKind) {
        match kind {
            DenialKind::Ip => {
                self.ip_denials.fetch_add(1, Ordering::Relaxed);
            },
            DenialKind::Time => {
                self.time_denials.fetch_add(1, Ordering::Relaxed);
            },
        }
    }

    /// Record a check that passed without being enforced.
    pub fn record_fail_open(&self) {
        self.fail_open.fetch_add(1, Ordering::Relaxed);
    }

    /// Take a snapshot of all counters.
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            requests_checked: self.requests_checked.load(Ordering::Relaxed),
            requests_allowed: self.requests_allowed.load(Ordering::Relaxed),
            requests_denied: self.requests_denied.load(Ordering::Relaxed),
            ip_denials: self.ip_denials.load(Ordering::Relaxed),
            time_denials: self.time_denials.load(Ordering::Relaxed),
            fail_open: self.fail_open.load(Ordering::Relaxed),
        }
    }
}

impl StatsSnapshot {
    /// Format counters in Prometheus text format.
    #[must_use]
    pub fn to_prometheus(&self, prefix: &str) -> String {
        let mut output = String::new();
        for (name, value) in [
            ("requests_checked", self.requests_checked),
            ("requests_allowed", self.requests_allowed),
            ("requests_denied", self.requests_denied),
            ("ip_denials", self.ip_denials),
            ("time_denials", self.time_denials),
            ("fail_open", self.fail_open),
        ] {
            let _ = writeln!(output, "{prefix}_{name} {value}");
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record() {
        let stats = RestrictionStats::new();
        stats.record_check(true);
        stats.record_check(false);
        stats.record_denial(DenialKind::Ip);
        stats.record_check(false);
        stats.record_denial(DenialKind::Time);
        stats.record_check(false);
        stats.record_denial(DenialKind::Ip);
        stats.record_fail_open();

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.requests_checked, 4);
        assert_eq!(snapshot.requests_allowed, 1);
        assert_eq!(snapshot.requests_denied, 3);
        assert_eq!(snapshot.ip_denials, 2);
        assert_eq!(snapshot.time_denials, 1);
        assert_eq!(snapshot.fail_open, 1);
    }

    #[test]
    fn test_prometheus_output() {
        let stats = RestrictionStats::new();
        stats.record_check(false);
        stats.record_denial(DenialKind::Ip);

        let text = stats.snapshot().to_prometheus("r0n_restrict");
        assert!(text.contains("r0n_restrict_requests_denied 1\n"));
        assert!(text.contains("r0n_restrict_ip_denials 1\n"));
        assert!(text.contains("r0n_restrict_time_denials 0\n"));
    }
}

//! Schedule evaluation.
//!
//! The instant is converted into the schedule's timezone first. The day of
//! week is checked before the time bounds are parsed, so a bad bound on a
//! day that is not allowed anyway still yields a plain denial.
//!
//! A window whose start is not after its end is a normal range and both
//! bounds are inclusive. A window whose start is after its end crosses
//! midnight: it covers everything from the start to the end of the day and
//! everything from midnight to the end bound.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveTime, Utc, Weekday};

use super::error::ScheduleResult;
use super::schedule::{
    day_name, parse_time, parse_timezone, Schedule, END_TIME_FIELD, START_TIME_FIELD,
};

/// Why a schedule decision was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleReason {
    /// Inside the window.
    None,
    /// The local day is not an allowed day.
    DayNotAllowed,
    /// The local time is outside the window.
    TimeNotAllowed,
}

impl ScheduleReason {
    /// Human-readable description used in logs and audit events.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::None => "Allowed",
            Self::DayNotAllowed => "Time/Date restriction: Day not allowed",
            Self::TimeNotAllowed => "Time/Date restriction: Time not allowed",
        }
    }

    /// Short code.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::DayNotAllowed => "day_not_allowed",
            Self::TimeNotAllowed => "time_not_allowed",
        }
    }
}

impl fmt::Display for ScheduleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of evaluating an instant against a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleOutcome {
    /// Whether access is allowed.
    pub allowed: bool,
    /// Why.
    pub reason: ScheduleReason,
    /// Day of week in the schedule's timezone.
    pub local_day: Weekday,
    /// Wall-clock time in the schedule's timezone.
    pub local_time: NaiveTime,
}

impl ScheduleOutcome {
    /// Local day as its upper-case name.
    #[must_use]
    pub fn day_label(&self) -> &'static str {
        day_name(self.local_day)
    }

    /// Local time as `HH:MM:SS`.
    #[must_use]
    pub fn time_label(&self) -> String {
        self.local_time.format("%H:%M:%S").to_string()
    }
}

/// Check whether `current` lies in the inclusive window `start..=end`,
/// wrapping past midnight when `start > end`.
#[must_use]
pub fn time_in_range(current: NaiveTime, start: NaiveTime, end: NaiveTime) -> bool {
    if start <= end {
        current >= start && current <= end
    } else {
        current >= start || current <= end
    }
}

/// Evaluates instants against a [`Schedule`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleEvaluator;

impl ScheduleEvaluator {
    /// Create a new evaluator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Decide whether `now` falls inside the schedule.
    ///
    /// Fails on an unknown timezone, or on an unparseable bound once the day
    /// check has passed.
    pub fn evaluate(
        &self,
        now: DateTime<Utc>,
        schedule: &Schedule,
    ) -> ScheduleResult<ScheduleOutcome> {
        let tz = parse_timezone(&schedule.timezone)?;
        let local = now.with_timezone(&tz);
        let local_day = local.weekday();
        let local_time = local.time();

        let outcome = |allowed, reason| ScheduleOutcome {
            allowed,
            reason,
            local_day,
            local_time,
        };

        if !schedule.allows_day(local_day) {
            return Ok(outcome(false, ScheduleReason::DayNotAllowed));
        }

        let start = parse_time(START_TIME_FIELD, &schedule.start_time)?;
        let end = parse_time(END_TIME_FIELD, &schedule.end_time)?;

        if time_in_range(local_time, start, end) {
            Ok(outcome(true, ScheduleReason::None))
        } else {
            Ok(outcome(false, ScheduleReason::TimeNotAllowed))
        }
    }
}

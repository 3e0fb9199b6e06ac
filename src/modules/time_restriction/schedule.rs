//! Schedule model and parsing helpers.

use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::{NaiveTime, Timelike, Weekday};
use chrono_tz::Tz;
use regex::Regex;

use super::error::{ScheduleError, ScheduleResult};

/// Every day of the week, Monday first.
pub const ALL_DAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Field name of the start bound, used in errors.
pub const START_TIME_FIELD: &str = "start-time";
/// Field name of the end bound, used in errors.
pub const END_TIME_FIELD: &str = "end-time";

/// Two-digit hours and minutes, optionally two-digit seconds.
static TIME_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}:[0-9]{2}(:[0-9]{2})?$").unwrap());

/// Upper-case English name of a day, as used in configuration.
#[must_use]
pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MONDAY",
        Weekday::Tue => "TUESDAY",
        Weekday::Wed => "WEDNESDAY",
        Weekday::Thu => "THURSDAY",
        Weekday::Fri => "FRIDAY",
        Weekday::Sat => "SATURDAY",
        Weekday::Sun => "SUNDAY",
    }
}

/// Parse a full English day name, ignoring case and surrounding whitespace.
///
/// Abbreviations are not accepted.
#[must_use]
pub fn parse_day(name: &str) -> Option<Weekday> {
    let name = name.trim();
    ALL_DAYS
        .into_iter()
        .find(|day| day_name(*day).eq_ignore_ascii_case(name))
}

/// Result of parsing an allowed-days list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedDays {
    /// Recognized days.
    pub days: HashSet<Weekday>,
    /// Entries that were not day names, trimmed.
    pub rejected: Vec<String>,
}

/// Parse a comma-separated list of day names.
///
/// Unknown names are dropped and collected in [`AllowedDays::rejected`];
/// they never fall back to a default. Blank entries are skipped.
#[must_use]
pub fn parse_allowed_days(value: &str) -> AllowedDays {
    let mut parsed = AllowedDays::default();

    for entry in value.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        match parse_day(entry) {
            Some(day) => {
                parsed.days.insert(day);
            },
            None => parsed.rejected.push(entry.to_string()),
        }
    }

    parsed
}

/// Parse a wall-clock bound in 24-hour `HH:mm` or `HH:mm:ss` form.
///
/// Every field must have exactly two digits. Leap seconds are rejected.
pub fn parse_time(field: &'static str, value: &str) -> ScheduleResult<NaiveTime> {
    let invalid = || ScheduleError::InvalidTime {
        field,
        value: value.to_string(),
    };

    let trimmed = value.trim();
    if !TIME_SHAPE.is_match(trimmed) {
        return Err(invalid());
    }

    let format = if trimmed.len() == 5 { "%H:%M" } else { "%H:%M:%S" };
    let time = NaiveTime::parse_from_str(trimmed, format).map_err(|_| invalid())?;

    // chrono encodes a leap second as a nanosecond overflow
    if time.nanosecond() >= 1_000_000_000 {
        return Err(invalid());
    }

    Ok(time)
}

/// Resolve an IANA timezone identifier.
pub fn parse_timezone(name: &str) -> ScheduleResult<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| ScheduleError::UnknownTimezone(name.to_string()))
}

/// A weekly access window.
///
/// Bounds are kept as configured text and parsed at evaluation, so a bad
/// bound only surfaces once the day check has passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    /// IANA timezone identifier.
    pub timezone: String,
    /// Days on which access is possible.
    pub allowed_days: HashSet<Weekday>,
    /// Inclusive start of the window.
    pub start_time: String,
    /// Inclusive end of the window. Earlier than the start for overnight windows.
    pub end_time: String,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            allowed_days: ALL_DAYS.into_iter().collect(),
            start_time: "00:00".to_string(),
            end_time: "23:59".to_string(),
        }
    }
}

impl Schedule {
    /// Create a schedule.
    #[must_use]
    pub fn new(
        timezone: impl Into<String>,
        allowed_days: impl IntoIterator<Item = Weekday>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            timezone: timezone.into(),
            allowed_days: allowed_days.into_iter().collect(),
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }

    /// Check if access is possible on `day`.
    #[must_use]
    pub fn allows_day(&self, day: Weekday) -> bool {
        self.allowed_days.contains(&day)
    }

    /// Whether the window crosses midnight.
    pub fn is_overnight(&self) -> ScheduleResult<bool> {
        let start = parse_time(START_TIME_FIELD, &self.start_time)?;
        let end = parse_time(END_TIME_FIELD, &self.end_time)?;
        Ok(start > end)
    }

    /// Allowed days in week order, comma-joined.
    #[must_use]
    pub fn days_label(&self) -> String {
        ALL_DAYS
            .into_iter()
            .filter(|day| self.allows_day(*day))
            .map(day_name)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// The window as `start - end`.
    #[must_use]
    pub fn time_range_label(&self) -> String {
        format!("{} - {}", self.start_time.trim(), self.end_time.trim())
    }

    /// Check the schedule without evaluating it.
    ///
    /// Returns the first problem found: timezone, start bound, end bound,
    /// then an empty day set.
    pub fn validate(&self) -> ScheduleResult<()> {
        parse_timezone(&self.timezone)?;
        parse_time(START_TIME_FIELD, &self.start_time)?;
        parse_time(END_TIME_FIELD, &self.end_time)?;

        if self.allowed_days.is_empty() {
            return Err(ScheduleError::NoAllowedDays(self.days_label()));
        }

        Ok(())
    }
}

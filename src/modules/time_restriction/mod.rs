//! # Time Restriction Module
//!
//! Weekly access windows evaluated in a configurable timezone.
//!
//! A schedule names the allowed days and an inclusive time window. Windows
//! whose end is earlier than their start cross midnight, so `22:00` to
//! `06:00` covers the night. Day names are full English names in any case;
//! unknown names are dropped, and a schedule left with no day refuses every
//! attempt.
//!
//! Configuration errors (unknown timezone, unparseable bound) surface as
//! [`ScheduleError`]. The [`TimeRestrictionAuthenticator`] lets the attempt
//! through when that happens.

mod authenticator;
mod config;
mod error;
mod evaluator;
mod schedule;

pub use authenticator::TimeRestrictionAuthenticator;
pub use config::{
    TimeRestrictionConfig, ALLOWED_DAYS, DEFAULT_ALLOWED_DAYS, DEFAULT_END_TIME,
    DEFAULT_ERROR_MESSAGE, DEFAULT_START_TIME, DEFAULT_TIMEZONE, END_TIME, ERROR_MESSAGE,
    START_TIME, TIMEZONE,
};
pub use error::{ScheduleError, ScheduleResult};
pub use evaluator::{time_in_range, ScheduleEvaluator, ScheduleOutcome, ScheduleReason};
pub use schedule::{
    day_name, parse_allowed_days, parse_day, parse_time, parse_timezone, AllowedDays, Schedule,
    ALL_DAYS, END_TIME_FIELD, START_TIME_FIELD,
};

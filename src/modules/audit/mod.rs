//! # Audit Module
//!
//! Security events for refused attempts. The restriction authenticators build
//! an [`AuditEvent`] for every denial and hand it to an [`AuditObserver`];
//! the evaluation engine itself never logs.
//!
//! - [`TracingAuditObserver`] writes events to the `r0n_restrict::audit`
//!   tracing target.
//! - [`MemoryAuditObserver`] keeps them in memory.

mod event;
mod observer;

pub use event::{
    AuditEvent, AuditEventKind, DETAIL_ALLOWED_DAYS, DETAIL_ALLOWED_TIME_RANGE, DETAIL_ALL_RULES,
    DETAIL_CLIENT_IP, DETAIL_CURRENT_DAY, DETAIL_CURRENT_TIME, DETAIL_MATCHED_RULE,
    DETAIL_REASON, DETAIL_RULE_TYPE, DETAIL_TIMEZONE, DETAIL_X_FORWARDED_FOR, ERROR_NOT_ALLOWED,
};
pub use observer::{AuditObserver, MemoryAuditObserver, TracingAuditObserver};

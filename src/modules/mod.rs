//! # Restriction Modules
//!
//! ## Available Modules
//!
//! - [`ip_restriction`] - IPv4 allow/deny rules with CIDR support
//! - [`time_restriction`] - Day-of-week and time-of-day windows with timezone support
//! - [`audit`] - Audit events emitted when an attempt is refused

pub mod audit;
pub mod ip_restriction;
pub mod time_restriction;

//! Single-rule address matching.
//!
//! A pattern is either an exact address, compared as text, or an IPv4 network
//! in CIDR notation, compared numerically under the prefix mask. Malformed
//! patterns never fail the caller: they just match nothing.

use std::fmt;

use super::error::{RuleError, RuleResult};

/// An IPv4 network in CIDR notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cidr {
    /// Network address as a big-endian u32 (host bits not cleared).
    network: u32,

    /// Prefix length in 0..=32.
    prefix_len: u8,
}

impl Cidr {
    /// Parse `a.b.c.d/n`.
    pub fn parse(cidr: &str) -> RuleResult<Self> {
        let mut parts = cidr.split('/');
        let (Some(ip), Some(prefix), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(RuleError::InvalidCidr(cidr.to_string()));
        };

        let prefix_len =
            parse_prefix(prefix).ok_or_else(|| RuleError::InvalidPrefix(cidr.to_string()))?;
        let network = parse_ipv4(ip)?;

        Ok(Self {
            network,
            prefix_len,
        })
    }

    /// Subnet mask for the prefix. A /0 network masks everything away.
    #[must_use]
    pub fn mask(&self) -> u32 {
        u32::MAX
            .checked_shl(32 - u32::from(self.prefix_len))
            .unwrap_or(0)
    }

    /// Prefix length.
    #[must_use]
    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// Check whether an address (as u32) lies inside this network.
    #[must_use]
    pub fn contains(&self, ip: u32) -> bool {
        let mask = self.mask();
        (ip & mask) == (self.network & mask)
    }
}

impl fmt::Display for Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.network.to_be_bytes();
        write!(f, "{a}.{b}.{c}.{d}/{}", self.prefix_len)
    }
}

fn parse_prefix(prefix: &str) -> Option<u8> {
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: u8 = prefix.parse().ok()?;
    (value <= 32).then_some(value)
}

/// Parse a dotted-quad IPv4 literal to a big-endian u32.
///
/// Only numeric literals are accepted; host names are never resolved.
pub fn parse_ipv4(ip: &str) -> RuleResult<u32> {
    let parts: Vec<&str> = ip.split('.').collect();

    if parts.len() != 4 {
        return Err(RuleError::InvalidAddress(ip.to_string()));
    }

    let mut result = 0u32;
    for (i, part) in parts.iter().enumerate() {
        if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RuleError::InvalidAddress(ip.to_string()));
        }
        let octet: u8 = part
            .parse()
            .map_err(|_| RuleError::InvalidAddress(ip.to_string()))?;
        result |= u32::from(octet) << (24 - i * 8);
    }

    Ok(result)
}

/// Check that a pattern is a well-formed address or CIDR network.
pub fn validate_pattern(pattern: &str) -> RuleResult<()> {
    let pattern = pattern.trim();
    if pattern.is_empty() {
        return Err(RuleError::EmptyPattern(pattern.to_string()));
    }
    if pattern.contains('/') {
        Cidr::parse(pattern).map(|_| ())
    } else {
        parse_ipv4(pattern).map(|_| ())
    }
}

/// Check whether `candidate` satisfies `pattern`.
///
/// Patterns without `/` are compared as plain text against the candidate, so
/// `010.0.0.1` does not match `10.0.0.1`.
#[must_use]
pub fn matches(candidate: &str, pattern: &str) -> bool {
    let pattern = pattern.trim();
    if candidate.is_empty() || pattern.is_empty() {
        return false;
    }

    if pattern.contains('/') {
        matches_cidr(candidate, pattern)
    } else {
        candidate == pattern
    }
}

/// Check whether `candidate` lies in the network described by `cidr`.
#[must_use]
pub fn matches_cidr(candidate: &str, cidr: &str) -> bool {
    let Ok(network) = Cidr::parse(cidr) else {
        return false;
    };
    let Ok(ip) = parse_ipv4(candidate) else {
        return false;
    };
    network.contains(ip)
}

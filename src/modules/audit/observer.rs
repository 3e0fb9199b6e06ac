//! Audit observers.

use std::sync::{Mutex, PoisonError};

use tracing::{info, warn};

use super::event::AuditEvent;

/// Receives audit events from the restriction authenticators.
pub trait AuditObserver: Send + Sync {
    /// Record one event.
    fn record(&self, event: &AuditEvent);
}

/// Emits audit events as structured `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditObserver;

impl TracingAuditObserver {
    /// Create a new tracing observer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl AuditObserver for TracingAuditObserver {
    fn record(&self, event: &AuditEvent) {
        match serde_json::to_string(&event.details) {
            Ok(details) => info!(
                target: "r0n_restrict::audit",
                kind = %event.kind,
                error = %event.error,
                username = event.username.as_deref().unwrap_or("-"),
                details = %details,
                "access restriction event"
            ),
            Err(e) => warn!(
                target: "r0n_restrict::audit",
                kind = %event.kind,
                "failed to encode audit details: {e}"
            ),
        }
    }
}

/// Keeps audit events in memory.
#[derive(Debug, Default)]
pub struct MemoryAuditObserver {
    events: Mutex<Vec<AuditEvent>>,
}

impl MemoryAuditObserver {
    /// Create an empty observer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all recorded events.
    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl AuditObserver for MemoryAuditObserver {
    fn record(&self, event: &AuditEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}

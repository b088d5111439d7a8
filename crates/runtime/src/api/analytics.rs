//! Fire-and-forget analytics boundary.
//!
//! Sinks receive economic events after the snapshot has already been
//! committed. A sink cannot fail the action that produced the event.
use std::sync::Mutex;

use landscape_core::EconomicEvent;

pub trait AnalyticsSink: Send + Sync {
    fn record(&self, event: &EconomicEvent);
}

/// Logs each event under `runtime::analytics`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAnalytics;

impl AnalyticsSink for TracingAnalytics {
    fn record(&self, event: &EconomicEvent) {
        match event {
            EconomicEvent::VirtualCurrencySpent {
                currency,
                amount,
                item,
            } => tracing::info!(
                target: "runtime::analytics",
                %currency,
                %amount,
                %item,
                "virtual currency spent"
            ),
        }
    }
}

/// Keeps every event in memory, for tests and offline inspection.
#[derive(Debug, Default)]
pub struct RecordingAnalytics {
    events: Mutex<Vec<EconomicEvent>>,
}

impl RecordingAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far. Empty if the lock was poisoned.
    pub fn events(&self) -> Vec<EconomicEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl AnalyticsSink for RecordingAnalytics {
    fn record(&self, event: &EconomicEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

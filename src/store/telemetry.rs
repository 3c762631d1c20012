//! Bounded, in-memory telemetry event buffer.
//!
//! # Purpose
//! Keeps the most recent client-reported events, newest first, capped at a
//! fixed count. Appends from concurrent requests serialize on a write
//! lock; eviction of the oldest record happens inside the same critical
//! section, so readers never observe the buffer over capacity or a torn
//! insertion.
//!
//! Eviction is normal steady-state behavior, not an error.
use crate::model::TelemetryRecord;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Retention bound for the buffer: admin listings are capped here too.
pub const DEFAULT_TELEMETRY_CAPACITY: usize = 500;

/// Shared newest-first ring of telemetry records.
#[derive(Clone)]
pub struct TelemetryBuffer {
    capacity: usize,
    events: Arc<RwLock<VecDeque<TelemetryRecord>>>,
}

impl TelemetryBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            events: Arc::new(RwLock::new(VecDeque::with_capacity(capacity))),
        }
    }

    /// Insert at the newest end, evicting the oldest record when full.
    pub async fn append(&self, record: TelemetryRecord) {
        let mut events = self.events.write().await;
        events.push_front(record);
        while events.len() > self.capacity {
            events.pop_back();
        }
        metrics::gauge!("mfe_telemetry_buffer_len").set(events.len() as f64);
        metrics::counter!("mfe_telemetry_events_total").increment(1);
    }

    /// Point-in-time copy, newest first. Appends racing this call are
    /// either fully included or fully absent.
    pub async fn snapshot(&self) -> Vec<TelemetryRecord> {
        self.events.read().await.iter().cloned().collect()
    }
}

impl Default for TelemetryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_TELEMETRY_CAPACITY)
    }
}

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::{AnalyticsBatch, AnalyticsEntry, EngagementRecord, MenuItem};
use crate::visibility::ViewportVisibilityReporter;

use super::buffer::EngagementBuffer;
use super::transport::FlushTransport;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

/// Owns the engagement buffer for one menu view: constructed when the view
/// mounts, dropped when it unmounts. Nothing here is process-global; two
/// concurrent views each carry their own tracker.
pub struct EngagementTracker {
    buffer: Arc<Mutex<EngagementBuffer>>,
    /// In-flight guard: a flush trigger that finds this held skips rather
    /// than draining a buffer another flush is already draining.
    flush_gate: Arc<Mutex<()>>,
    transport: Arc<dyn FlushTransport>,
    owner_id: String,
    menu_id: String,
    session_id: Uuid,
}

impl Clone for EngagementTracker {
    fn clone(&self) -> Self {
        Self {
            buffer: Arc::clone(&self.buffer),
            flush_gate: Arc::clone(&self.flush_gate),
            transport: Arc::clone(&self.transport),
            owner_id: self.owner_id.clone(),
            menu_id: self.menu_id.clone(),
            session_id: self.session_id,
        }
    }
}

impl EngagementTracker {
    pub fn new(
        owner_id: impl Into<String>,
        menu_id: impl Into<String>,
        transport: Arc<dyn FlushTransport>,
    ) -> Self {
        Self {
            buffer: Arc::new(Mutex::new(EngagementBuffer::new())),
            flush_gate: Arc::new(Mutex::new(())),
            transport,
            owner_id: owner_id.into(),
            menu_id: menu_id.into(),
            session_id: Uuid::new_v4(),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub async fn start_tracking(&self, item: &MenuItem) {
        self.buffer.lock().await.start_tracking(item, Instant::now());
    }

    pub async fn end_tracking(&self, food_name: &str) {
        self.buffer.lock().await.end_tracking(food_name, Instant::now());
    }

    /// Records currently waiting for the next flush.
    pub async fn pending_records(&self) -> usize {
        self.buffer.lock().await.record_count()
    }

    /// Drains the buffer into one analytics batch and submits it.
    ///
    /// Overlapping triggers (an interval tick racing a visibility change)
    /// skip while a flush is in flight. The snapshot is taken under the
    /// buffer lock with open timers synthesized to an end at flush time; the
    /// lock is released across the awaited transport call, so tracking that
    /// lands mid-flight accumulates for the next flush. On transport failure
    /// the snapshot merges back additively and the failure is swallowed —
    /// analytics loss never degrades the customer-facing view.
    pub async fn flush(&self) {
        let Ok(_gate) = self.flush_gate.try_lock() else {
            log_info!(
                "flush already in flight for session {}, skipping trigger",
                self.session_id
            );
            return;
        };

        let snapshot = {
            let mut buffer = self.buffer.lock().await;
            buffer.close_open_timers(Instant::now());
            buffer.take_records()
        };
        if snapshot.is_empty() {
            return;
        }

        let batch = self.build_batch(&snapshot);
        match self.transport.submit(&batch).await {
            Ok(()) => {
                log_info!(
                    "flushed {} engagement records for session {}",
                    batch.analytics.len(),
                    self.session_id
                );
            }
            Err(err) => {
                log_warn!(
                    "analytics flush failed for session {}: {err:?}; retaining {} records for retry",
                    self.session_id,
                    snapshot.len()
                );
                self.buffer.lock().await.restore(snapshot);
            }
        }
    }

    fn build_batch(&self, records: &HashMap<String, EngagementRecord>) -> AnalyticsBatch {
        let timestamp_day = Utc::now().format("%m/%d/%Y").to_string();
        let mut analytics: Vec<AnalyticsEntry> = records
            .values()
            .map(|record| AnalyticsEntry::from_record(record, &timestamp_day))
            .collect();
        // HashMap iteration order is arbitrary; keep the wire payload stable.
        analytics.sort_by(|a, b| a.food_name.cmp(&b.food_name));

        AnalyticsBatch {
            owner_id: self.owner_id.clone(),
            menu_id: self.menu_id.clone(),
            analytics,
        }
    }
}

#[async_trait]
impl ViewportVisibilityReporter for EngagementTracker {
    async fn became_visible(&self, item: &MenuItem) {
        self.start_tracking(item).await;
    }

    async fn became_hidden(&self, food_name: &str) {
        self.end_tracking(food_name).await;
    }
}

use std::collections::HashMap;
use std::time::Instant;

use crate::models::{EngagementRecord, MenuItem};

/// Per-session aggregation state: impression counts and engagement-duration
/// samples per item, plus the timers for items currently in view.
///
/// Owned by one `EngagementTracker` and mutated only behind its lock; the
/// methods here are synchronous and never block.
#[derive(Debug, Default)]
pub struct EngagementBuffer {
    records: HashMap<String, EngagementRecord>,
    active_timers: HashMap<String, Instant>,
}

impl EngagementBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an impression and opens an engagement timer. A no-op while a
    /// timer for the item is already open, so duplicate visibility events
    /// cannot double-count one continuous viewing span.
    pub fn start_tracking(&mut self, item: &MenuItem, now: Instant) {
        if self.active_timers.contains_key(&item.name) {
            return;
        }

        let record = self
            .records
            .entry(item.name.clone())
            .or_insert_with(|| EngagementRecord {
                food_name: item.name.clone(),
                food_category: item.category.clone(),
                impressions: 0,
                durations_secs: Vec::new(),
            });
        record.impressions += 1;
        self.active_timers.insert(item.name.clone(), now);
    }

    /// Closes the item's engagement timer and appends the elapsed span.
    /// Tolerates duplicate end events: without an open timer it is a no-op.
    pub fn end_tracking(&mut self, food_name: &str, now: Instant) {
        let Some(started) = self.active_timers.remove(food_name) else {
            return;
        };
        if let Some(record) = self.records.get_mut(food_name) {
            record
                .durations_secs
                .push(now.duration_since(started).as_secs_f64());
        }
    }

    /// Flush-time synthesis: every still-open span ends now, so time spent
    /// on an item the user is still viewing is not lost to the flush.
    pub fn close_open_timers(&mut self, now: Instant) {
        let open: Vec<String> = self.active_timers.keys().cloned().collect();
        for food_name in open {
            self.end_tracking(&food_name, now);
        }
    }

    /// Drains the record set for serialization. Timers are untouched; the
    /// caller is expected to have closed them first.
    pub fn take_records(&mut self) -> HashMap<String, EngagementRecord> {
        std::mem::take(&mut self.records)
    }

    /// Merges a failed-flush snapshot back underneath whatever accumulated
    /// while the transport call was in flight. Impressions add; retained
    /// duration samples keep their place ahead of the fresh ones. Nothing is
    /// lost and nothing already counted is counted again.
    pub fn restore(&mut self, snapshot: HashMap<String, EngagementRecord>) {
        for (food_name, retained) in snapshot {
            match self.records.get_mut(&food_name) {
                Some(fresh) => {
                    fresh.impressions += retained.impressions;
                    let fresh_durations =
                        std::mem::replace(&mut fresh.durations_secs, retained.durations_secs);
                    fresh.durations_secs.extend(fresh_durations);
                }
                None => {
                    self.records.insert(food_name, retained);
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn record(&self, food_name: &str) -> Option<&EngagementRecord> {
        self.records.get(food_name)
    }

    pub fn has_open_timer(&self, food_name: &str) -> bool {
        self.active_timers.contains_key(food_name)
    }
}

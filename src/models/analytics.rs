use serde::{Deserialize, Serialize};

/// Per-item aggregate for one browsing session, accumulated between flushes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngagementRecord {
    pub food_name: String,
    pub food_category: String,
    pub impressions: u64,
    /// Seconds per continuous viewing span, in the order the spans ended.
    pub durations_secs: Vec<f64>,
}

impl EngagementRecord {
    pub fn average_engagement_secs(&self) -> f64 {
        if self.durations_secs.is_empty() {
            return 0.0;
        }
        self.durations_secs.iter().sum::<f64>() / self.durations_secs.len() as f64
    }
}

/// Wire payload for the analytics endpoint. Built fresh at each flush from
/// the current record set; nothing is persisted between flushes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsBatch {
    pub owner_id: String,
    pub menu_id: String,
    pub analytics: Vec<AnalyticsEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEntry {
    /// "MM/DD/YYYY", the UTC day the flush ran.
    pub timestamp_day: String,
    pub impressions: u64,
    pub engagement_sec: Vec<i64>,
    pub food_name: String,
    pub average_engagement: f64,
    /// Purchase attribution happens server-side; the viewer always sends 0.
    pub purchase_count: u32,
    pub purchased_with: Vec<String>,
    pub food_category: String,
}

impl AnalyticsEntry {
    pub fn from_record(record: &EngagementRecord, timestamp_day: &str) -> Self {
        Self {
            timestamp_day: timestamp_day.to_string(),
            impressions: record.impressions,
            engagement_sec: record
                .durations_secs
                .iter()
                .map(|secs| secs.round() as i64)
                .collect(),
            food_name: record.food_name.clone(),
            average_engagement: record.average_engagement_secs(),
            purchase_count: 0,
            purchased_with: Vec::new(),
            food_category: record.food_category.clone(),
        }
    }
}

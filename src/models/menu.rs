use serde::{Deserialize, Serialize};

/// One menu entry as served by the backend.
///
/// `name` is the join key for override schedules and A/B diffs. Within one
/// menu instance it must be unique among active items; the backend does not
/// enforce this, and a duplicate silently misattributes overrides and diffs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Display string, compared verbatim ("$9.50" vs "$9.5" counts as a change).
    pub price: String,
    #[serde(default)]
    pub description: String,
    /// Base feed position. Items without one sort after every ranked item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i64>,
    #[serde(default)]
    pub you_may_also_like: Vec<String>,
}

/// Time-boxed display-order override. Times are 24h UTC wall clock; a window
/// whose end precedes its start wraps past midnight.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideSchedule {
    pub food_name: String,
    /// "HH:MM". Anything else deactivates the schedule without error.
    pub start_time: String,
    pub end_time: String,
    pub display_order_override: i64,
}

/// Which cohort's menu to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MenuVariant {
    Control,
    Test,
}

impl MenuVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuVariant::Control => "control",
            MenuVariant::Test => "test",
        }
    }
}

/// Everything the viewer needs for one (owner, menu, variant).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuPayload {
    pub items: Vec<MenuItem>,
    #[serde(default)]
    pub override_schedules: Vec<OverrideSchedule>,
}

pub mod analytics;
pub mod menu;

pub use analytics::{AnalyticsBatch, AnalyticsEntry, EngagementRecord};
pub use menu::{MenuItem, MenuPayload, MenuVariant, OverrideSchedule};

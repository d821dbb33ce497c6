//! Menu presentation and engagement-analytics engine for digital restaurant
//! menus: time-windowed display-order resolution, significance-filtered A/B
//! menu diffs, and loss-free buffering of per-item engagement telemetry.

pub mod diff;
pub mod engagement;
pub mod menu_source;
pub mod models;
pub mod schedule;
mod utils;
pub mod visibility;

pub use diff::{diff_menus, ChangeKind, DiffConfig, DiffResult};
pub use engagement::{
    EngagementBuffer, EngagementTracker, FlushScheduler, FlushTransport, HttpFlushTransport,
    FLUSH_INTERVAL_SECS,
};
pub use menu_source::{HttpMenuSource, MenuSource};
pub use models::{
    AnalyticsBatch, AnalyticsEntry, EngagementRecord, MenuItem, MenuPayload, MenuVariant,
    OverrideSchedule,
};
pub use schedule::resolve_order;
pub use visibility::{PageVisibility, ViewportVisibilityReporter};

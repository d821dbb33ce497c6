pub mod buffer;
pub mod scheduler;
pub mod tracker;
pub mod transport;

pub use buffer::EngagementBuffer;
pub use scheduler::{FlushScheduler, FLUSH_INTERVAL_SECS};
pub use tracker::EngagementTracker;
pub use transport::{FlushTransport, HttpFlushTransport};

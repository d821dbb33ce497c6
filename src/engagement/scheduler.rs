use anyhow::{bail, Context, Result};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::visibility::PageVisibility;

use super::tracker::EngagementTracker;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_info;

/// Cadence of the periodic flush while the menu view is active.
pub const FLUSH_INTERVAL_SECS: u64 = 30;

/// Drives the tracker's flush: on a fixed interval, immediately when the
/// page goes hidden, and once more on teardown. All three triggers funnel
/// into the same `EngagementTracker::flush`, whose in-flight gate keeps
/// overlapping triggers from draining the same snapshot twice.
pub struct FlushScheduler {
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
    flush_interval: Duration,
}

impl FlushScheduler {
    pub fn new() -> Self {
        Self::with_interval(Duration::from_secs(FLUSH_INTERVAL_SECS))
    }

    pub fn with_interval(flush_interval: Duration) -> Self {
        Self {
            handle: None,
            cancel_token: None,
            flush_interval,
        }
    }

    pub fn start(
        &mut self,
        tracker: EngagementTracker,
        visibility_rx: watch::Receiver<PageVisibility>,
    ) -> Result<()> {
        if self.handle.is_some() {
            bail!("flush scheduler already running");
        }

        let cancel_token = CancellationToken::new();
        let token_clone = cancel_token.clone();
        let handle = tokio::spawn(flush_loop(
            tracker,
            visibility_rx,
            token_clone,
            self.flush_interval,
        ));

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        Ok(())
    }

    /// Cancels the loop and waits for its terminal flush to complete. The
    /// interval stops ticking before that flush runs, so exactly one final
    /// attempt happens with nothing racing it.
    pub async fn stop(&mut self) -> Result<()> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            handle.await.context("flush loop task failed to join")?;
        }
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl Default for FlushScheduler {
    fn default() -> Self {
        Self::new()
    }
}

async fn flush_loop(
    tracker: EngagementTracker,
    mut visibility_rx: watch::Receiver<PageVisibility>,
    cancel_token: CancellationToken,
    flush_interval: Duration,
) {
    let mut ticker = tokio::time::interval(flush_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The interval fires immediately once; consume it so the first periodic
    // flush lands a full interval after mount.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                tracker.flush().await;
            }
            changed = visibility_rx.changed() => {
                match changed {
                    Ok(()) => {
                        if *visibility_rx.borrow_and_update() == PageVisibility::Hidden {
                            log_info!(
                                "page hidden, flushing session {}",
                                tracker.session_id()
                            );
                            tracker.flush().await;
                        }
                    }
                    // Sender dropped: the view is gone, fall through to the
                    // terminal flush.
                    Err(_) => break,
                }
            }
            _ = cancel_token.cancelled() => {
                log_info!("flush loop shutting down");
                break;
            }
        }
    }

    tracker.flush().await;
}

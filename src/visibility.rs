use async_trait::async_trait;

use crate::models::MenuItem;

/// Page-level visibility as reported by the embedding surface (tab switch,
/// navigation away, device lock). Drives the immediate-flush trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageVisibility {
    Visible,
    Hidden,
}

/// Capability seam between the rendering surface's viewport tracking and the
/// engagement engine. Whatever watches the viewport (an intersection
/// observer firing at its qualifying threshold, a test harness, a headless
/// simulator) reports through these callbacks; the engine never sees a
/// platform viewport API.
#[async_trait]
pub trait ViewportVisibilityReporter: Send + Sync {
    /// The item crossed into qualifying visibility.
    async fn became_visible(&self, item: &MenuItem);

    /// The item left qualifying visibility.
    async fn became_hidden(&self, food_name: &str);
}

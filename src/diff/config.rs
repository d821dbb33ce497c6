/// Materiality thresholds for the A/B change report.
///
/// Below-threshold differences are cosmetic reshuffles the report should not
/// flood operators with; the defaults are product tuning, not invariants.
#[derive(Debug, Clone)]
pub struct DiffConfig {
    /// Feed positions an item must move before the shift is reportable.
    pub order_delta_threshold: i64,

    /// Combined added+removed recommendation count that counts as a rework.
    pub recommendation_delta_threshold: usize,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            order_delta_threshold: 5,
            recommendation_delta_threshold: 2,
        }
    }
}

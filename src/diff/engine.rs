use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::diff::config::DiffConfig;
use crate::models::MenuItem;

/// What changed about one test-menu item relative to control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeKind {
    NewItem,
    Promoted,
    DescriptionChanged,
    PriceChanged,
    RecommendationsChanged,
}

/// Per-item diff outcome. Every test item produces one entry; report UIs
/// filter to `is_significant` for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffResult {
    pub name: String,
    pub is_significant: bool,
    pub changes: Vec<ChangeKind>,
}

impl DiffResult {
    /// Operator-readable one-liner for the report view.
    pub fn summary(&self) -> String {
        if !self.is_significant {
            return format!("{}: no material change", self.name);
        }
        if self.changes.is_empty() {
            // Significant with no kind attached: an order shift that moved
            // the item down the feed.
            return format!("{}: moved down the feed", self.name);
        }

        let phrases: Vec<&str> = self
            .changes
            .iter()
            .map(|change| match change {
                ChangeKind::NewItem => "new on the test menu",
                ChangeKind::Promoted => "promoted up the feed",
                ChangeKind::DescriptionChanged => "description rewritten",
                ChangeKind::PriceChanged => "price changed",
                ChangeKind::RecommendationsChanged => "recommendations reworked",
            })
            .collect();
        format!("{}: {}", self.name, phrases.join(", "))
    }
}

/// Compares a control menu against a test menu, one result per test item.
/// Joined by item name through a control-side lookup built once per call.
pub fn diff_menus(control: &[MenuItem], test: &[MenuItem], config: &DiffConfig) -> Vec<DiffResult> {
    let baseline: HashMap<&str, &MenuItem> = control
        .iter()
        .map(|item| (item.name.as_str(), item))
        .collect();

    test.iter()
        .map(|item| diff_item(item, baseline.get(item.name.as_str()).copied(), config))
        .collect()
}

fn diff_item(test: &MenuItem, control: Option<&MenuItem>, config: &DiffConfig) -> DiffResult {
    // An item absent from control is significant by definition and has no
    // baseline to compare field-by-field.
    let Some(control) = control else {
        return DiffResult {
            name: test.name.clone(),
            is_significant: true,
            changes: vec![ChangeKind::NewItem],
        };
    };

    let mut changes = Vec::new();
    let mut is_significant = false;

    if let (Some(control_order), Some(test_order)) = (control.display_order, test.display_order) {
        if (test_order - control_order).abs() >= config.order_delta_threshold {
            is_significant = true;
            // A demotion of the same magnitude is just as significant but
            // carries no kind; the report words it differently.
            if test_order < control_order {
                changes.push(ChangeKind::Promoted);
            }
        }
    }

    if test.description != control.description {
        is_significant = true;
        changes.push(ChangeKind::DescriptionChanged);
    }

    if recommendation_churn(control, test) >= config.recommendation_delta_threshold {
        is_significant = true;
        changes.push(ChangeKind::RecommendationsChanged);
    }

    if test.price != control.price {
        is_significant = true;
        changes.push(ChangeKind::PriceChanged);
    }

    DiffResult {
        name: test.name.clone(),
        is_significant,
        changes,
    }
}

/// Added + removed count across the two recommendation sets. Order within
/// `you_may_also_like` is presentation noise, so this is a true set diff.
fn recommendation_churn(control: &MenuItem, test: &MenuItem) -> usize {
    let control_set: HashSet<&str> = control
        .you_may_also_like
        .iter()
        .map(String::as_str)
        .collect();
    let test_set: HashSet<&str> = test.you_may_also_like.iter().map(String::as_str).collect();

    let added = test_set.difference(&control_set).count();
    let removed = control_set.difference(&test_set).count();
    added + removed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str) -> MenuItem {
        MenuItem {
            id: format!("id-{name}"),
            name: name.to_string(),
            category: "Mains".to_string(),
            price: "$12.00".to_string(),
            description: "House favourite".to_string(),
            display_order: Some(10),
            you_may_also_like: vec!["Bread".to_string(), "Wine".to_string()],
        }
    }

    fn diff_single(control: MenuItem, test: MenuItem) -> DiffResult {
        let mut results = diff_menus(&[control], &[test], &DiffConfig::default());
        assert_eq!(results.len(), 1);
        results.remove(0)
    }

    #[test]
    fn item_missing_from_control_is_new_and_significant() {
        let results = diff_menus(&[], &[item("Lamb Tagine")], &DiffConfig::default());
        assert_eq!(results.len(), 1);
        assert!(results[0].is_significant);
        assert_eq!(results[0].changes, vec![ChangeKind::NewItem]);
    }

    #[test]
    fn order_delta_below_threshold_is_not_significant() {
        let mut test = item("Soup");
        test.display_order = Some(6);
        let result = diff_single(item("Soup"), test);
        assert!(!result.is_significant);
        assert!(result.changes.is_empty());
    }

    #[test]
    fn order_delta_over_threshold_is_a_promotion() {
        let mut test = item("Soup");
        test.display_order = Some(4);
        let result = diff_single(item("Soup"), test);
        assert!(result.is_significant);
        assert_eq!(result.changes, vec![ChangeKind::Promoted]);
    }

    #[test]
    fn demotion_is_significant_but_not_a_promotion() {
        let mut test = item("Soup");
        test.display_order = Some(17);
        let result = diff_single(item("Soup"), test);
        assert!(result.is_significant);
        assert!(result.changes.is_empty());
    }

    #[test]
    fn missing_order_on_either_side_skips_the_order_check() {
        let mut control = item("Soup");
        control.display_order = None;
        let mut test = item("Soup");
        test.display_order = Some(1);
        let result = diff_single(control, test);
        assert!(!result.is_significant);
    }

    #[test]
    fn description_is_compared_verbatim() {
        let mut test = item("Soup");
        test.description = "House favourite ".to_string();
        let result = diff_single(item("Soup"), test);
        assert!(result.is_significant);
        assert_eq!(result.changes, vec![ChangeKind::DescriptionChanged]);
    }

    #[test]
    fn price_formatting_difference_registers() {
        let mut test = item("Soup");
        test.price = "$12.0".to_string();
        let result = diff_single(item("Soup"), test);
        assert!(result.is_significant);
        assert_eq!(result.changes, vec![ChangeKind::PriceChanged]);
    }

    #[test]
    fn reordered_recommendations_are_not_a_change() {
        let mut test = item("Soup");
        test.you_may_also_like = vec!["Wine".to_string(), "Bread".to_string()];
        let result = diff_single(item("Soup"), test);
        assert!(!result.is_significant);
    }

    #[test]
    fn recommendation_churn_at_threshold_registers() {
        let mut test = item("Soup");
        test.you_may_also_like = vec!["Bread".to_string(), "Olives".to_string()];
        // Wine removed, Olives added: churn of two.
        let result = diff_single(item("Soup"), test);
        assert!(result.is_significant);
        assert_eq!(result.changes, vec![ChangeKind::RecommendationsChanged]);
    }

    #[test]
    fn single_recommendation_swap_below_threshold_is_quiet() {
        let mut test = item("Soup");
        test.you_may_also_like = vec!["Bread".to_string(), "Wine".to_string(), "Olives".to_string()];
        // Only Olives added: churn of one.
        let result = diff_single(item("Soup"), test);
        assert!(!result.is_significant);
    }

    #[test]
    fn independent_changes_co_occur() {
        let mut test = item("Soup");
        test.display_order = Some(2);
        test.description = "Rewritten".to_string();
        test.price = "$14.00".to_string();
        let result = diff_single(item("Soup"), test);
        assert!(result.is_significant);
        assert_eq!(
            result.changes,
            vec![
                ChangeKind::Promoted,
                ChangeKind::DescriptionChanged,
                ChangeKind::PriceChanged
            ]
        );
    }

    #[test]
    fn empty_inputs_produce_empty_report() {
        assert!(diff_menus(&[], &[], &DiffConfig::default()).is_empty());
        assert!(diff_menus(&[item("Soup")], &[], &DiffConfig::default()).is_empty());
    }

    #[test]
    fn change_kinds_serialize_as_kebab_case() {
        let results = diff_menus(&[], &[item("Lamb Tagine")], &DiffConfig::default());
        let wire = serde_json::to_value(&results).unwrap();
        assert_eq!(wire[0]["isSignificant"], true);
        assert_eq!(wire[0]["changes"][0], "new-item");
    }

    #[test]
    fn summary_reads_for_operators() {
        let results = diff_menus(&[], &[item("Lamb Tagine")], &DiffConfig::default());
        assert_eq!(results[0].summary(), "Lamb Tagine: new on the test menu");

        let mut test = item("Soup");
        test.display_order = Some(17);
        let demoted = diff_single(item("Soup"), test);
        assert_eq!(demoted.summary(), "Soup: moved down the feed");
    }
}

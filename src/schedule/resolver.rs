use std::collections::HashMap;

use chrono::{NaiveTime, Timelike};

use crate::models::{MenuItem, OverrideSchedule};

/// Computes the effective display order of a menu at a given UTC wall-clock
/// time. Pure: callers re-run it on whatever cadence they need (active
/// windows open and close as the clock moves), it never schedules anything
/// itself.
///
/// Sort key is (effective rank, name): an active override rank beats the
/// item's base `display_order`, items with neither sort last, and the name
/// tiebreak keeps the result total and deterministic.
pub fn resolve_order(
    items: &[MenuItem],
    schedules: &[OverrideSchedule],
    now: NaiveTime,
) -> Vec<MenuItem> {
    let current_minutes = now.hour() * 60 + now.minute();
    let overrides = active_overrides(schedules, current_minutes);

    let mut ordered = items.to_vec();
    ordered.sort_by(|a, b| {
        let rank_a = effective_rank(a, &overrides);
        let rank_b = effective_rank(b, &overrides);
        match (rank_a, rank_b) {
            (Some(ra), Some(rb)) => ra.cmp(&rb).then_with(|| a.name.cmp(&b.name)),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.name.cmp(&b.name),
        }
    });
    ordered
}

fn effective_rank(item: &MenuItem, overrides: &HashMap<&str, i64>) -> Option<i64> {
    overrides
        .get(item.name.as_str())
        .copied()
        .or(item.display_order)
}

/// Collects the override rank per item name from currently active schedules.
/// When two active schedules target the same name, the later one in input
/// order wins; schedule order is editor order and carries no semantic
/// precedence, so this tie-break is documented rather than meaningful.
fn active_overrides(schedules: &[OverrideSchedule], current_minutes: u32) -> HashMap<&str, i64> {
    let mut overrides = HashMap::new();
    for schedule in schedules {
        if schedule_is_active(schedule, current_minutes) {
            overrides.insert(schedule.food_name.as_str(), schedule.display_order_override);
        }
    }
    overrides
}

/// Window membership with a half-open [start, end) interval. A window whose
/// end precedes its start wraps past midnight. Malformed times deactivate
/// the schedule silently; an operator typo must not break the feed.
fn schedule_is_active(schedule: &OverrideSchedule, current_minutes: u32) -> bool {
    let (Some(start), Some(end)) = (
        parse_hh_mm(&schedule.start_time),
        parse_hh_mm(&schedule.end_time),
    ) else {
        return false;
    };

    if start <= end {
        start <= current_minutes && current_minutes < end
    } else {
        current_minutes >= start || current_minutes < end
    }
}

/// Strict "HH:MM" (00-23, 00-59) to minutes past midnight.
fn parse_hh_mm(value: &str) -> Option<u32> {
    let bytes = value.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return None;
    }
    if !bytes[0].is_ascii_digit()
        || !bytes[1].is_ascii_digit()
        || !bytes[3].is_ascii_digit()
        || !bytes[4].is_ascii_digit()
    {
        return None;
    }

    let hour: u32 = value[0..2].parse().ok()?;
    let minute: u32 = value[3..5].parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some(hour * 60 + minute)
}

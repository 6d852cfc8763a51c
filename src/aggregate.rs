use crate::models::{DayTotals, SavedItem};
use chrono::{Local, NaiveDate, TimeZone};
use std::collections::HashMap;

/// Local calendar day for a millisecond-epoch timestamp.
pub fn local_day(timestamp_ms: i64) -> Option<NaiveDate> {
    Local
        .timestamp_millis_opt(timestamp_ms)
        .earliest()
        .map(|dt| dt.date_naive())
}

/// Two instants are the same day iff their local-midnight truncations match.
pub fn same_local_day(timestamp_ms: i64, date: NaiveDate) -> bool {
    local_day(timestamp_ms) == Some(date)
}

/// `per_100g * quantity / 100`, with a missing or non-finite per-100g value
/// contributing 0 rather than erroring.
pub fn scaled(per_100g: Option<f64>, quantity: u32) -> f64 {
    per_100g
        .filter(|value| value.is_finite())
        .map(|value| value * f64::from(quantity) / 100.0)
        .unwrap_or(0.0)
}

/// Items whose timestamp falls on `date`, preserving input order.
pub fn items_for_day(items: &[SavedItem], date: NaiveDate) -> Vec<SavedItem> {
    items
        .iter()
        .filter(|item| same_local_day(item.timestamp, date))
        .cloned()
        .collect()
}

/// Quantity-scaled totals for one day. Pure function of (items, date).
pub fn day_totals(items: &[SavedItem], date: NaiveDate) -> DayTotals {
    let mut totals = DayTotals::default();
    for item in items
        .iter()
        .filter(|item| same_local_day(item.timestamp, date))
    {
        let n = &item.nutriments;
        totals.grams += u64::from(item.quantity);
        totals.kcal += scaled(n.kcal_100g(), item.quantity);
        totals.carbs_g += scaled(n.carbs_100g(), item.quantity);
        totals.fat_g += scaled(n.fat_100g, item.quantity);
        totals.protein_g += scaled(n.proteins_100g, item.quantity);
    }
    totals
}

/// Scaled kcal summed per local day, for the monthly tracking grid.
pub fn kcal_by_day(items: &[SavedItem]) -> HashMap<NaiveDate, f64> {
    let mut map = HashMap::new();
    for item in items {
        let Some(day) = local_day(item.timestamp) else {
            continue;
        };
        let kcal = scaled(item.nutriments.kcal_100g(), item.quantity);
        *map.entry(day).or_insert(0.0) += kcal;
    }
    map
}

/// Percentage of target, clamped to [0, 200].
pub fn pct_of_target(kcal: f64, target_kcal: u32) -> f64 {
    if target_kcal == 0 {
        return 0.0;
    }
    (kcal / f64::from(target_kcal) * 100.0).clamp(0.0, 200.0)
}

// 🔎 Query/Filter Layer - Pure selections over loaded entries
//
// Every filter keeps input order and clones the surviving entries, so filters
// compose in any order with the same result.

use crate::entities::{Entry, Owner, OwnerFilter};
use crate::month::MonthKey;
use crate::reconciliation::MonthlySummaryRow;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

/// Identity for `OwnerFilter::All`, exact owner match otherwise
pub fn filter_by_owner<E: Entry + Clone>(entries: &[E], owner: &OwnerFilter) -> Vec<E> {
    entries
        .iter()
        .filter(|e| owner.matches(e.owner()))
        .cloned()
        .collect()
}

/// Entries dated within the given calendar month of the given year
/// A month outside 1..=12 matches nothing
pub fn filter_by_period<E: Entry + Clone>(entries: &[E], year: i32, month: u32) -> Vec<E> {
    let period = match MonthKey::new(year, month) {
        Ok(period) => period,
        Err(_) => return Vec::new(),
    };

    entries
        .iter()
        .filter(|e| period.contains(e.date()))
        .cloned()
        .collect()
}

/// Entries dated within `start..=end`
pub fn filter_by_range<E: Entry + Clone>(entries: &[E], start: NaiveDate, end: NaiveDate) -> Vec<E> {
    entries
        .iter()
        .filter(|e| (start..=end).contains(&e.date()))
        .cloned()
        .collect()
}

// ============================================================================
// SELECTOR OPTIONS
// ============================================================================

/// Distinct years present, most recent first
pub fn available_years<E: Entry>(entries: &[E]) -> Vec<i32> {
    let years: BTreeSet<i32> = entries.iter().map(|e| e.date().year()).collect();
    years.into_iter().rev().collect()
}

/// Distinct months present in `year`, ascending
pub fn available_months<E: Entry>(entries: &[E], year: i32) -> Vec<u32> {
    let months: BTreeSet<u32> = entries
        .iter()
        .map(|e| e.date())
        .filter(|d| d.year() == year)
        .map(|d| d.month())
        .collect();
    months.into_iter().collect()
}

/// Distinct owners in order of first appearance
pub fn owners_present<E: Entry>(entries: &[E]) -> Vec<Owner> {
    let mut owners = Vec::new();
    for entry in entries {
        if !owners.contains(&entry.owner()) {
            owners.push(entry.owner());
        }
    }
    owners
}

/// Keep only rows whose month is in `months`; an empty selection keeps nothing
pub fn filter_months(rows: &[MonthlySummaryRow], months: &[MonthKey]) -> Vec<MonthlySummaryRow> {
    rows.iter()
        .filter(|row| months.contains(&row.month))
        .cloned()
        .collect()
}

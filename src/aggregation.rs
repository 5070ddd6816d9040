// ➕ Aggregation Engine - Exact decimal sums, optionally grouped by a key
//
// Groups only exist for keys that have at least one entry; zero-filling is
// the reconciliation step's job.

use crate::entities::{Category, Entry, ExpenseEntry, Owner};
use crate::month::MonthKey;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Sum amounts grouped by `key_fn(entry)`
pub fn group_sum<E, K, F>(entries: &[E], key_fn: F) -> BTreeMap<K, Decimal>
where
    E: Entry,
    K: Ord,
    F: Fn(&E) -> K,
{
    let mut totals = BTreeMap::new();

    for entry in entries {
        *totals.entry(key_fn(entry)).or_insert(Decimal::ZERO) += entry.amount();
    }

    totals
}

/// Sum of all amounts, 0 for an empty slice
pub fn total_sum<E: Entry>(entries: &[E]) -> Decimal {
    entries.iter().map(Entry::amount).sum()
}

pub fn sum_by_owner<E: Entry>(entries: &[E]) -> BTreeMap<Owner, Decimal> {
    group_sum(entries, |e| e.owner())
}

pub fn sum_by_month<E: Entry>(entries: &[E]) -> BTreeMap<MonthKey, Decimal> {
    group_sum(entries, |e| MonthKey::from_date(e.date()))
}

pub fn sum_by_category(entries: &[ExpenseEntry]) -> BTreeMap<Category, Decimal> {
    group_sum(entries, |e| e.category)
}

//! Derived orderings over the record collection.
//!
//! These are computed by consumers from `AddressStore::list`; nothing here is
//! persisted. Sorts are stable, so ties keep collection order.

use crate::types::AddressRecord;
use std::cmp::Reverse;

/// Default size of the recent view.
pub const RECENT_LIMIT: usize = 5;

/// Most recently used first, records never used last, capped at `limit`.
pub fn recent(records: &[AddressRecord], limit: usize) -> Vec<AddressRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by_key(|r| Reverse(r.recency()));
    sorted.truncate(limit);
    sorted
}

/// The record matching `current` first, the rest by recency.
///
/// `filter` is a case-insensitive substring over name and url, applied
/// before sorting.
pub fn manage(records: &[AddressRecord], current: &str, filter: Option<&str>) -> Vec<AddressRecord> {
    let mut sorted: Vec<AddressRecord> = records
        .iter()
        .filter(|r| filter.is_none_or(|needle| r.matches(needle)))
        .cloned()
        .collect();
    sorted.sort_by_key(|r| (r.url.as_str() != current, Reverse(r.recency())));
    sorted
}

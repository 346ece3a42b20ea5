//! Age-based eviction policy
//!
//! Selects the entries a trim should remove: everything last accessed
//! strictly before the cutoff. Entries accessed exactly at the cutoff stay.

use crate::store::EntryStore;
use std::time::Instant;

/// Keys whose last access precedes `cutoff`, oldest first. Ties are broken
/// by key so hook order is deterministic.
pub fn expired_keys<V: ?Sized>(store: &EntryStore<V>, cutoff: Instant) -> Vec<String> {
    let mut expired: Vec<(Instant, &String)> = store
        .iter()
        .filter(|(_, entry)| entry.last_accessed < cutoff)
        .map(|(key, entry)| (entry.last_accessed, key))
        .collect();

    expired.sort_unstable();
    expired.into_iter().map(|(_, key)| key.clone()).collect()
}

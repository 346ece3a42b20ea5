//! Key to entry mapping guarded by the access coordinator

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

/// A cached value and the last time it was read or written
pub struct Entry<V: ?Sized> {
    pub value: Arc<V>,
    pub last_accessed: Instant,
}

/// Entry storage. Only ever touched through a coordinator guard, so it needs
/// no locking of its own.
pub struct EntryStore<V: ?Sized> {
    entries: HashMap<String, Entry<V>>,
}

impl<V: ?Sized> Default for EntryStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: ?Sized> EntryStore<V> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Look up a value without refreshing its timestamp
    pub fn get(&self, key: &str) -> Option<Arc<V>> {
        self.entries.get(key).map(|entry| Arc::clone(&entry.value))
    }

    pub fn last_accessed(&self, key: &str) -> Option<Instant> {
        self.entries.get(key).map(|entry| entry.last_accessed)
    }

    /// Insert or overwrite an entry
    pub fn insert(&mut self, key: String, value: Arc<V>, now: Instant) {
        match self.entries.get_mut(&key) {
            Some(entry) => {
                entry.value = value;
                entry.last_accessed = entry.last_accessed.max(now);
            }
            None => {
                self.entries.insert(
                    key,
                    Entry {
                        value,
                        last_accessed: now,
                    },
                );
            }
        }
    }

    /// Refresh the timestamp of a present key. Never moves a timestamp
    /// backwards.
    pub fn touch(&mut self, key: &str, at: Instant) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.last_accessed = entry.last_accessed.max(at);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Arc<V>> {
        self.entries.remove(key).map(|entry| entry.value)
    }

    /// Drop every entry, returning how many there were
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&String, &Entry<V>)> {
        self.entries.iter()
    }
}

//! Layered key-value cache over a backing store.
//!
//! Each script execution works against a private overlay whose writes
//! stay invisible to the committed store until the embedder explicitly
//! persists them.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// The committed key-value store beneath the overlay chain.
pub trait Store: Send + Sync {
    /// Reads the value stored under `key`.
    fn get(&self, key: &[u8]) -> Option<Vec<u8>>;

    /// Stores `value` under `key`.
    fn put(&self, key: &[u8], value: &[u8]);

    /// Removes the value stored under `key`.
    fn delete(&self, key: &[u8]);
}

/// An in-memory store (matches C# MemoryStore).
#[derive(Default)]
pub struct MemoryStore {
    items: RwLock<HashMap<Vec<u8>, Vec<u8>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.items.read().get(key).cloned()
    }

    fn put(&self, key: &[u8], value: &[u8]) {
        self.items.write().insert(key.to_vec(), value.to_vec());
    }

    fn delete(&self, key: &[u8]) {
        self.items.write().remove(key);
    }
}

/// A write-back cache layered over a [`Store`]. `None` entries mark
/// pending deletions.
pub struct DataCache {
    store: Arc<dyn Store>,
    changes: HashMap<Vec<u8>, Option<Vec<u8>>>,
}

impl DataCache {
    /// Creates a cache with no pending changes over the given store.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            changes: HashMap::new(),
        }
    }

    /// Reads through the overlay, falling back to the backing store.
    pub fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        match self.changes.get(key) {
            Some(entry) => entry.clone(),
            None => self.store.get(key),
        }
    }

    /// Buffers a write; the backing store is untouched until
    /// [`DataCache::persist`].
    pub fn put(&mut self, key: &[u8], value: &[u8]) {
        self.changes.insert(key.to_vec(), Some(value.to_vec()));
    }

    /// Buffers a deletion.
    pub fn delete(&mut self, key: &[u8]) {
        self.changes.insert(key.to_vec(), None);
    }

    /// Returns a private overlay seeded with this cache's pending state.
    /// Writes made to the private copy never flow back implicitly.
    pub fn get_private(&self) -> DataCache {
        DataCache {
            store: Arc::clone(&self.store),
            changes: self.changes.clone(),
        }
    }

    /// Applies all pending changes to the backing store and clears the
    /// overlay. Returns the number of entries written.
    pub fn persist(&mut self) -> usize {
        let count = self.changes.len();
        for (key, entry) in self.changes.drain() {
            match entry {
                Some(value) => self.store.put(&key, &value),
                None => self.store.delete(&key),
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_isolation() {
        let store = Arc::new(MemoryStore::new());
        store.put(b"k", b"committed");

        let mut cache = DataCache::new(Arc::clone(&store) as Arc<dyn Store>);
        cache.put(b"k", b"pending");

        assert_eq!(cache.get(b"k").as_deref(), Some(&b"pending"[..]));
        assert_eq!(store.get(b"k").as_deref(), Some(&b"committed"[..]));
    }

    #[test]
    fn test_private_copy_sees_parent_pending_state() {
        let store = Arc::new(MemoryStore::new());
        let mut parent = DataCache::new(Arc::clone(&store) as Arc<dyn Store>);
        parent.put(b"a", b"1");

        let mut private = parent.get_private();
        assert_eq!(private.get(b"a").as_deref(), Some(&b"1"[..]));

        private.put(b"b", b"2");
        assert_eq!(parent.get(b"b"), None);
    }

    #[test]
    fn test_persist_applies_writes_and_deletes() {
        let store = Arc::new(MemoryStore::new());
        store.put(b"gone", b"x");

        let mut cache = DataCache::new(Arc::clone(&store) as Arc<dyn Store>);
        cache.put(b"kept", b"v");
        cache.delete(b"gone");
        assert_eq!(cache.persist(), 2);

        assert_eq!(store.get(b"kept").as_deref(), Some(&b"v"[..]));
        assert_eq!(store.get(b"gone"), None);
        // A second persist is a no-op.
        assert_eq!(cache.persist(), 0);
    }
}

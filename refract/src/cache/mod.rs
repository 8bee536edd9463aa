use std::{fmt::Debug, hash::Hash, num::NonZeroUsize};

use lru::LruCache;

use crate::util::typedefs::FastBuildHasher;

/// Key-value store holding at most a fixed number of entries, evicting the
/// least recently used one to make room.
pub struct BoundedCache<K, V> {
    name: &'static str,
    inner: LruCache<K, V, FastBuildHasher>,
}

impl<K: Eq + Hash, V> Debug for BoundedCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundedCache")
            .field("name", &self.name)
            .field("len", &self.inner.len())
            .field("capacity", &self.inner.cap())
            .finish()
    }
}

impl<K, V> BoundedCache<K, V>
where
    K: Copy + Eq + Hash + Debug,
    V: Copy,
{
    pub fn new(name: &'static str, capacity: NonZeroUsize) -> Self {
        Self {
            name,
            inner: LruCache::with_hasher(capacity, FastBuildHasher::default()),
        }
    }

    /// Looks up `key`, marking it as the most recently used entry.
    pub fn get(&mut self, key: &K) -> Option<V> {
        self.inner.get(key).copied()
    }

    /// Looks up `key`, computing and storing the value if it is missing.
    ///
    /// The cache stays borrowed while `derive` runs.
    pub fn get_or_insert_with(&mut self, key: K, derive: impl FnOnce() -> V) -> V {
        if let Some(value) = self.get(&key) {
            return value;
        }
        profiling::scope!("BoundedCache miss", self.name);

        let value = derive();
        self.insert(key, value);
        value
    }

    /// Stores `value` under `key`, returning the entry evicted to make room, if
    /// any.
    pub fn insert(&mut self, key: K, value: V) -> Option<(K, V)> {
        match self.inner.push(key, value) {
            Some((old_key, _)) if old_key == key => None,
            Some(evicted) => {
                log::trace!("{} cache full, evicted {:?}", self.name, evicted.0);
                Some(evicted)
            }
            None => None,
        }
    }

    /// Whether `key` is present. Does not change which entry is least recently
    /// used.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.contains(key)
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.inner.pop(key)
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn capacity(&self) -> NonZeroUsize {
        self.inner.cap()
    }
}

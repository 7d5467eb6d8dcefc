//! Memoized summaries

use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::RwLock;
use tracing::debug;

use agri_core::FilterSelection;

/// Identifies one summary: which load of the store, under which selection
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub generation: u64,
    pub selection: FilterSelection,
}

impl CacheKey {
    pub fn new(generation: u64, selection: FilterSelection) -> Self {
        Self {
            generation,
            selection,
        }
    }
}

struct CacheInner<V> {
    entries: AHashMap<CacheKey, Arc<V>>,
    max_entries: usize,
    /// Least recently used first
    access_order: Vec<CacheKey>,
    /// Generation of the cached entries
    generation: u64,
}

/// Bounded LRU cache of summaries for one domain
///
/// Entries from an older store generation are dropped as soon as a key from a
/// newer generation is seen.
pub struct SummaryCache<V> {
    inner: RwLock<CacheInner<V>>,
}

impl<V> SummaryCache<V> {
    pub fn new(max_entries: usize) -> Self {
        Self {
            inner: RwLock::new(CacheInner {
                entries: AHashMap::new(),
                max_entries: max_entries.max(1),
                access_order: Vec::new(),
                generation: 0,
            }),
        }
    }

    /// Cached value for `key`, computing and storing it on a miss
    pub fn get_or_insert_with<F>(&self, key: CacheKey, compute: F) -> Arc<V>
    where
        F: FnOnce() -> V,
    {
        let mut cache = self.inner.write();

        if key.generation != cache.generation {
            cache.entries.clear();
            cache.access_order.clear();
            cache.generation = key.generation;
        }

        if let Some(value) = cache.entries.get(&key).cloned() {
            if let Some(pos) = cache.access_order.iter().position(|k| *k == key) {
                let recent = cache.access_order.remove(pos);
                cache.access_order.push(recent);
            }
            return value;
        }

        debug!("Summary cache miss for {:?}", key.selection);
        let value = Arc::new(compute());

        if cache.entries.len() >= cache.max_entries && !cache.access_order.is_empty() {
            let evicted = cache.access_order.remove(0);
            cache.entries.remove(&evicted);
        }
        cache.entries.insert(key.clone(), value.clone());
        cache.access_order.push(key);
        value
    }

    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut cache = self.inner.write();
        cache.entries.clear();
        cache.access_order.clear();
    }
}

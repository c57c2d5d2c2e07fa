//! Uniform memoizer contract over both substrates

use std::hash::Hash;

use crate::lru::RecencyCache;
use crate::splay::SelfAdjustingTree;

/// Key-value store a caller consults before computing a value
///
/// The protocol is two calls: `lookup`, then on a miss compute the value and
/// `store` it.
pub trait Memoizer<K, V> {
    /// Get a previously stored value
    fn lookup(&mut self, key: &K) -> Option<V>;

    /// Record a computed value, returning any entry dropped to make room
    fn store(&mut self, key: K, value: V) -> Option<(K, V)>;

    /// Forget every stored value
    fn invalidate(&mut self);

    /// Number of stored values
    fn len(&self) -> usize;

    /// Check if nothing is stored
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up `key`, computing and storing it on a miss
    fn get_or_compute<F>(&mut self, key: K, compute: F) -> V
    where
        F: FnOnce(&K) -> V,
        V: Clone,
    {
        if let Some(value) = self.lookup(&key) {
            return value;
        }
        let value = compute(&key);
        self.store(key, value.clone());
        value
    }
}

impl<K, V> Memoizer<K, V> for RecencyCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    fn lookup(&mut self, key: &K) -> Option<V> {
        RecencyCache::lookup(self, key).cloned()
    }

    fn store(&mut self, key: K, value: V) -> Option<(K, V)> {
        RecencyCache::store(self, key, value)
    }

    fn invalidate(&mut self) {
        RecencyCache::invalidate(self);
    }

    fn len(&self) -> usize {
        RecencyCache::len(self)
    }
}

impl<K, V> Memoizer<K, V> for SelfAdjustingTree<K, V>
where
    K: Ord,
    V: Clone,
{
    fn lookup(&mut self, key: &K) -> Option<V> {
        self.search(key).cloned()
    }

    fn store(&mut self, key: K, value: V) -> Option<(K, V)> {
        self.insert(key, value);
        None
    }

    fn invalidate(&mut self) {
        self.clear();
    }

    fn len(&self) -> usize {
        SelfAdjustingTree::len(self)
    }
}

//! SharedMemo: a memoizer behind one lock, with statistics

use std::marker::PhantomData;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::memo::Memoizer;
use crate::stats::MemoStats;

/// Memoizer shared across callers
///
/// Both substrates mutate on lookup, so a single mutex guards the whole
/// structure for the duration of each call. Clones share the same memoizer
/// and statistics.
pub struct SharedMemo<K, V, M> {
    /// Underlying memoizer
    inner: Arc<Mutex<M>>,

    /// Lookup and store statistics
    stats: Arc<MemoStats>,

    _entries: PhantomData<fn(K) -> V>,
}

impl<K, V, M> SharedMemo<K, V, M>
where
    M: Memoizer<K, V>,
{
    /// Wrap a memoizer for shared use
    pub fn new(memo: M) -> Self {
        Self {
            inner: Arc::new(Mutex::new(memo)),
            stats: Arc::new(MemoStats::new()),
            _entries: PhantomData,
        }
    }

    /// Get a stored value
    pub fn lookup(&self, key: &K) -> Option<V> {
        let value = self.inner.lock().lookup(key);
        match value {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }
        value
    }

    /// Store a value, returning any entry evicted to make room
    pub fn store(&self, key: K, value: V) -> Option<(K, V)> {
        let evicted = self.inner.lock().store(key, value);
        self.stats.record_store();
        if evicted.is_some() {
            self.stats.record_eviction();
        }
        evicted
    }

    /// Look up `key`, computing and storing it on a miss
    ///
    /// The lock is not held while `compute` runs, so two callers racing on
    /// the same missing key may both compute it; the later store wins.
    pub fn get_or_compute<F>(&self, key: K, compute: F) -> V
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

    /// Forget every stored value (statistics are kept)
    pub fn invalidate(&self) {
        self.inner.lock().invalidate();
        self.stats.record_invalidation();
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if nothing is stored
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Get statistics
    pub fn stats(&self) -> &MemoStats {
        &self.stats
    }

    /// Run `f` with exclusive access to the underlying memoizer
    pub fn with_inner<R>(&self, f: impl FnOnce(&mut M) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl<K, V, M> Memoizer<K, V> for SharedMemo<K, V, M>
where
    M: Memoizer<K, V>,
{
    fn lookup(&mut self, key: &K) -> Option<V> {
        SharedMemo::lookup(self, key)
    }

    fn store(&mut self, key: K, value: V) -> Option<(K, V)> {
        SharedMemo::store(self, key, value)
    }

    fn invalidate(&mut self) {
        SharedMemo::invalidate(self);
    }

    fn len(&self) -> usize {
        SharedMemo::len(self)
    }
}

impl<K, V, M> Clone for SharedMemo<K, V, M> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            stats: Arc::clone(&self.stats),
            _entries: PhantomData,
        }
    }
}

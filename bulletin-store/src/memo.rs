//! Single-entry memoization for derived views.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

struct Entry<I, K, O> {
    input: Arc<I>,
    key: K,
    output: Arc<O>,
}

/// Caches the last output of a derivation together with the input and key
/// it was computed from.
///
/// The input is compared by pointer (`Arc::ptr_eq`), the key by value. A
/// call matching both returns the cached `Arc` without recomputing;
/// anything else recomputes and replaces the entry.
pub struct Memoized<I, K, O> {
    entry: Mutex<Option<Entry<I, K, O>>>,
    recomputations: AtomicUsize,
}

impl<I, K: Clone + PartialEq, O> Default for Memoized<I, K, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, K: Clone + PartialEq, O> Memoized<I, K, O> {
    /// An empty cache.
    pub fn new() -> Self {
        Self {
            entry: Mutex::new(None),
            recomputations: AtomicUsize::new(0),
        }
    }

    /// Returns the cached output for `(input, key)`, computing it first if
    /// either changed since the last call.
    pub fn get(&self, input: &Arc<I>, key: &K, compute: impl FnOnce(&I, &K) -> O) -> Arc<O> {
        let mut entry = self.entry.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = entry.as_ref() {
            if cached.key == *key && Arc::ptr_eq(&cached.input, input) {
                return Arc::clone(&cached.output);
            }
        }

        let output = Arc::new(compute(&**input, key));
        self.recomputations.fetch_add(1, Ordering::Relaxed);
        *entry = Some(Entry {
            input: Arc::clone(input),
            key: key.clone(),
            output: Arc::clone(&output),
        });
        output
    }

    /// How many times the derivation actually ran.
    pub fn recomputations(&self) -> usize {
        self.recomputations.load(Ordering::Relaxed)
    }

    /// Drops the cached entry and zeroes the counter.
    pub fn reset(&self) {
        *self.entry.lock().unwrap_or_else(PoisonError::into_inner) = None;
        self.recomputations.store(0, Ordering::Relaxed);
    }
}

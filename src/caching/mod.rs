//! # Caching Module
//!
//! This module provides caching wrappers for challenges. Caching pays off for expensive
//! fitness functions when equal genotypes keep reappearing, which is common once a
//! population converges.
//!
//! Genotypes are looked up by a key computed by a caller supplied function, so genes whose
//! values cannot be hashed (such as `f64`) can still be cached under a derived key.
//!
//! ## Example
//!
//! ```rust
//! use genforge::caching::CachedChallenge;
//! use genforge::error::Result;
//! use genforge::evolution::Challenge;
//! use genforge::genetic::{Chromosome, Genotype, IntGene};
//!
//! let challenge = CachedChallenge::new(
//!     |g: &Genotype<IntGene>| -> Result<f64> { Ok(g.flatten().iter().sum::<i64>() as f64) },
//!     |g: &Genotype<IntGene>| g.flatten(),
//! );
//!
//! let genotype = Genotype::new(vec![Chromosome::new(vec![IntGene::unbounded(3)])]).unwrap();
//! assert_eq!(challenge.score(&genotype).unwrap(), 3.0);
//! assert_eq!(challenge.score(&genotype).unwrap(), 3.0);
//! assert_eq!(challenge.cache_size(), 1);
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thread_local::ThreadLocal;
use tracing::trace;

use crate::error::Result;
use crate::evolution::Challenge;
use crate::genetic::{Gene, Genotype};

/// Computes the cache key of a genotype.
pub type KeyFn<G, K> = Arc<dyn Fn(&Genotype<G>) -> K + Send + Sync>;

/// A wrapper around a challenge that caches fitness evaluations in one shared map.
///
/// The lock is not held while the wrapped challenge runs, so parallel evaluation is not
/// serialized; two threads may occasionally score the same key.
pub struct CachedChallenge<G, C, K>
where
    G: Gene,
    C: Challenge<G>,
    K: Eq + Hash + Send,
{
    challenge: C,
    key: KeyFn<G, K>,
    cache: Arc<Mutex<HashMap<K, f64>>>,
    _marker: PhantomData<fn(&G)>,
}

impl<G, C, K> CachedChallenge<G, C, K>
where
    G: Gene,
    C: Challenge<G>,
    K: Eq + Hash + Send,
{
    /// Creates a new cached challenge wrapping the given challenge.
    pub fn new<F>(challenge: C, key: F) -> Self
    where
        F: Fn(&Genotype<G>) -> K + Send + Sync + 'static,
    {
        Self::with_cache(challenge, key, HashMap::new())
    }

    /// Creates a new cached challenge with a pre-populated cache.
    pub fn with_cache<F>(challenge: C, key: F, cache: HashMap<K, f64>) -> Self
    where
        F: Fn(&Genotype<G>) -> K + Send + Sync + 'static,
    {
        Self {
            challenge,
            key: Arc::new(key),
            cache: Arc::new(Mutex::new(cache)),
            _marker: PhantomData,
        }
    }

    /// Returns a reference to the wrapped challenge.
    pub fn inner(&self) -> &C {
        &self.challenge
    }

    /// Returns the number of cached fitness evaluations.
    pub fn cache_size(&self) -> usize {
        self.lock().len()
    }

    /// Clears the cache.
    pub fn clear_cache(&self) {
        self.lock().clear();
    }

    /// Returns a copy of the cache.
    pub fn get_cache(&self) -> HashMap<K, f64>
    where
        K: Clone,
    {
        self.lock().clone()
    }

    // A panic elsewhere cannot leave the map half-written, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<K, f64>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<G, C, K> Clone for CachedChallenge<G, C, K>
where
    G: Gene,
    C: Challenge<G> + Clone,
    K: Eq + Hash + Send,
{
    /// The clone shares the cache with the original.
    fn clone(&self) -> Self {
        Self {
            challenge: self.challenge.clone(),
            key: Arc::clone(&self.key),
            cache: Arc::clone(&self.cache),
            _marker: PhantomData,
        }
    }
}

impl<G, C, K> fmt::Debug for CachedChallenge<G, C, K>
where
    G: Gene,
    C: Challenge<G>,
    K: Eq + Hash + Send,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedChallenge")
            .field("cache_size", &self.cache_size())
            .finish_non_exhaustive()
    }
}

impl<G, C, K> Challenge<G> for CachedChallenge<G, C, K>
where
    G: Gene,
    C: Challenge<G>,
    K: Eq + Hash + Send,
{
    fn score(&self, genotype: &Genotype<G>) -> Result<f64> {
        let key = (self.key)(genotype);
        if let Some(&score) = self.lock().get(&key) {
            trace!("fitness cache hit");
            return Ok(score);
        }

        let score = self.challenge.score(genotype)?;
        self.lock().insert(key, score);
        Ok(score)
    }
}

/// A wrapper around a challenge that keeps one cache per thread.
///
/// Designed for parallel evaluation: threads never contend for a lock, at the price of
/// scoring a genotype once per thread that meets it. Size and clear operations only see
/// the calling thread's cache.
pub struct ThreadLocalCachedChallenge<G, C, K>
where
    G: Gene,
    C: Challenge<G>,
    K: Eq + Hash + Send,
{
    challenge: C,
    key: KeyFn<G, K>,
    cache: ThreadLocal<RefCell<HashMap<K, f64>>>,
    _marker: PhantomData<fn(&G)>,
}

impl<G, C, K> ThreadLocalCachedChallenge<G, C, K>
where
    G: Gene,
    C: Challenge<G>,
    K: Eq + Hash + Send,
{
    pub fn new<F>(challenge: C, key: F) -> Self
    where
        F: Fn(&Genotype<G>) -> K + Send + Sync + 'static,
    {
        Self {
            challenge,
            key: Arc::new(key),
            cache: ThreadLocal::new(),
            _marker: PhantomData,
        }
    }

    pub fn inner(&self) -> &C {
        &self.challenge
    }

    /// Returns the number of cached fitness evaluations for the current thread.
    pub fn len(&self) -> usize {
        self.cache.get().map_or(0, |cell| cell.borrow().len())
    }

    /// Returns `true` if the cache for the current thread is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears the cache for the current thread.
    pub fn clear(&self) {
        if let Some(cell) = self.cache.get() {
            cell.borrow_mut().clear();
        }
    }

    /// Clears the caches of every thread.
    pub fn clear_all(&mut self) {
        self.cache.clear();
    }

    fn local(&self) -> &RefCell<HashMap<K, f64>> {
        self.cache.get_or(|| RefCell::new(HashMap::new()))
    }
}

impl<G, C, K> fmt::Debug for ThreadLocalCachedChallenge<G, C, K>
where
    G: Gene,
    C: Challenge<G>,
    K: Eq + Hash + Send,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadLocalCachedChallenge")
            .field("local_size", &self.len())
            .finish_non_exhaustive()
    }
}

impl<G, C, K> Challenge<G> for ThreadLocalCachedChallenge<G, C, K>
where
    G: Gene,
    C: Challenge<G>,
    K: Eq + Hash + Send,
{
    fn score(&self, genotype: &Genotype<G>) -> Result<f64> {
        let key = (self.key)(genotype);
        if let Some(&score) = self.local().borrow().get(&key) {
            return Ok(score);
        }

        let score = self.challenge.score(genotype)?;
        self.local().borrow_mut().insert(key, score);
        Ok(score)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::genetic::{Chromosome, IntGene};

    fn genotype(values: &[i64]) -> Genotype<IntGene> {
        Genotype::new(vec![values.iter().map(|&v| IntGene::unbounded(v)).collect::<Chromosome<_>>()])
            .unwrap()
    }

    #[derive(Debug, Default)]
    struct CountingChallenge {
        calls: AtomicUsize,
    }

    impl Challenge<IntGene> for CountingChallenge {
        fn score(&self, genotype: &Genotype<IntGene>) -> Result<f64> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(genotype.flatten().iter().sum::<i64>() as f64)
        }
    }

    #[test]
    fn test_cached_challenge() {
        let challenge = CachedChallenge::new(CountingChallenge::default(), |g| g.flatten());

        assert_eq!(challenge.score(&genotype(&[1, 2])).unwrap(), 3.0);
        assert_eq!(challenge.score(&genotype(&[1, 2])).unwrap(), 3.0);
        assert_eq!(challenge.score(&genotype(&[2, 2])).unwrap(), 4.0);

        assert_eq!(challenge.inner().calls.load(Ordering::SeqCst), 2);
        assert_eq!(challenge.cache_size(), 2);
        assert_eq!(challenge.get_cache().get(&vec![1, 2]), Some(&3.0));

        challenge.clear_cache();
        assert_eq!(challenge.cache_size(), 0);
        challenge.score(&genotype(&[1, 2])).unwrap();
        assert_eq!(challenge.inner().calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_prepopulated_cache() {
        let mut cache = HashMap::new();
        cache.insert(vec![5], 100.0);
        let challenge = CachedChallenge::with_cache(CountingChallenge::default(), |g| g.flatten(), cache);
        assert_eq!(challenge.score(&genotype(&[5])).unwrap(), 100.0);
        assert_eq!(challenge.inner().calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let failing = move |_: &Genotype<IntGene>| -> Result<f64> {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(crate::error::GeneticError::Other("unavailable".to_string()))
        };
        let challenge = CachedChallenge::new(failing, |g: &Genotype<IntGene>| g.flatten());
        assert!(challenge.score(&genotype(&[1])).is_err());
        assert!(challenge.score(&genotype(&[1])).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(challenge.cache_size(), 0);
    }

    #[test]
    fn test_thread_local_cache() {
        let challenge = ThreadLocalCachedChallenge::new(CountingChallenge::default(), |g| g.flatten());
        assert!(challenge.is_empty());

        challenge.score(&genotype(&[1, 2])).unwrap();
        challenge.score(&genotype(&[1, 2])).unwrap();
        assert_eq!(challenge.len(), 1);
        assert_eq!(challenge.inner().calls.load(Ordering::SeqCst), 1);

        challenge.clear();
        assert!(challenge.is_empty());
    }

    #[test]
    fn test_thread_local_cache_per_thread() {
        let challenge = ThreadLocalCachedChallenge::new(CountingChallenge::default(), |g| g.flatten());
        challenge.score(&genotype(&[7])).unwrap();

        std::thread::scope(|scope| {
            scope.spawn(|| {
                assert!(challenge.is_empty());
                challenge.score(&genotype(&[7])).unwrap();
                assert_eq!(challenge.len(), 1);
            });
        });

        assert_eq!(challenge.inner().calls.load(Ordering::SeqCst), 2);
    }
}

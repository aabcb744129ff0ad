//! Memoized track link lookups.
//!
//! [`TrackLinkCache`] sits in front of a [`Resolve`] implementation. A hit
//! returns the stored result and marks it as recently used. A miss asks the
//! resolver, stores the outcome (found or not found) and evicts the least
//! recently used entry when full. Resolver errors are passed through and
//! leave the cache untouched.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt, Shared};
use lru::LruCache;
use tokio::sync::Mutex;

use super::stats::{CacheStats, Counters};
use crate::config::{AppConfig, ConfigError};
use crate::{Error, Resolve, ResolutionResult};

/// Default number of descriptors kept in memory.
pub const DEFAULT_CAPACITY: NonZeroUsize = NonZeroUsize::new(1000).unwrap();

/// A resolution shared by every lookup waiting on the same descriptor.
type PendingLookup = Shared<BoxFuture<'static, Result<ResolutionResult, Error>>>;

/// Construction options for [`TrackLinkCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheOptions {
    /// Maximum number of stored descriptors. Fixed for the cache's lifetime.
    pub capacity: NonZeroUsize,
    /// Share one upstream resolution between concurrent misses for the same descriptor.
    pub coalesce_requests: bool,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self { capacity: DEFAULT_CAPACITY, coalesce_requests: true }
    }
}

impl CacheOptions {
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        Ok(Self { capacity: config.capacity()?, coalesce_requests: config.coalesce_requests })
    }
}

/// Bounded LRU cache of track descriptor resolutions.
///
/// Cloning is cheap and yields a handle to the same cache. Descriptors are
/// used as keys verbatim.
pub struct TrackLinkCache<R> {
    inner: Arc<Inner<R>>,
}

impl<R> Clone for TrackLinkCache<R> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

struct Inner<R> {
    resolver: R,
    entries: Mutex<LruCache<String, ResolutionResult>>,
    in_flight: Mutex<HashMap<String, PendingLookup>>,
    capacity: NonZeroUsize,
    coalesce_requests: bool,
    counters: Counters,
}

impl<R> TrackLinkCache<R> {
    /// Create an empty cache in front of `resolver`.
    pub fn new(resolver: R, options: CacheOptions) -> Self {
        Self {
            inner: Arc::new(Inner {
                resolver,
                entries: Mutex::new(LruCache::new(options.capacity)),
                in_flight: Mutex::new(HashMap::new()),
                capacity: options.capacity,
                coalesce_requests: options.coalesce_requests,
                counters: Counters::default(),
            }),
        }
    }

    pub fn capacity(&self) -> NonZeroUsize {
        self.inner.capacity
    }

    pub async fn len(&self) -> usize {
        self.inner.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Whether a result is stored for `descriptor`. Does not affect recency.
    pub async fn contains(&self, descriptor: &str) -> bool {
        self.inner.entries.lock().await.contains(descriptor)
    }

    /// Stored result for `descriptor`, if any. Does not affect recency.
    pub async fn peek(&self, descriptor: &str) -> Option<ResolutionResult> {
        self.inner.entries.lock().await.peek(descriptor).cloned()
    }

    pub async fn stats(&self) -> CacheStats {
        let entries = self.len().await;
        let in_flight = self.inner.in_flight.lock().await.len();

        CacheStats {
            entries,
            capacity: self.inner.capacity.get(),
            in_flight,
            hits: self.inner.counters.hits(),
            misses: self.inner.counters.misses(),
        }
    }
}

impl<R: Resolve + 'static> TrackLinkCache<R> {
    /// Look up the link for `descriptor`, resolving and storing it on a miss.
    ///
    /// With coalescing on, the resolution runs in its own task. It finishes
    /// and stores its result even if every caller waiting on it is dropped.
    ///
    /// # Errors
    ///
    /// Returns the resolver's error unchanged. Nothing is stored in that case,
    /// so the next lookup for the same descriptor goes upstream again.
    pub async fn lookup(&self, descriptor: &str) -> Result<ResolutionResult, Error> {
        if let Some(result) = self.inner.cached(descriptor).await {
            return Ok(result);
        }

        if !self.inner.coalesce_requests {
            self.inner.counters.miss();
            tracing::debug!(descriptor, "track link cache miss");
            return self.inner.resolve_and_store(descriptor).await;
        }

        let pending = {
            let mut in_flight = self.inner.in_flight.lock().await;
            if let Some(pending) = in_flight.get(descriptor).cloned() {
                self.inner.counters.miss();
                tracing::debug!(descriptor, "joining in-flight track link resolution");
                pending
            } else {
                // A pending resolution stores its result before leaving `in_flight`.
                if let Some(result) = self.inner.cached(descriptor).await {
                    return Ok(result);
                }

                self.inner.counters.miss();
                tracing::debug!(descriptor, "track link cache miss");

                let pending = Inner::pending(Arc::clone(&self.inner), descriptor.to_owned());
                in_flight.insert(descriptor.to_owned(), pending.clone());
                pending
            }
        };

        pending.await
    }
}

impl<R> Inner<R> {
    /// Stored result for `descriptor`, counted as a hit and marked as recently used.
    async fn cached(&self, descriptor: &str) -> Option<ResolutionResult> {
        let result = self.entries.lock().await.get(descriptor).cloned()?;
        self.counters.hit();
        tracing::debug!(descriptor, found = result.is_found(), "track link cache hit");
        Some(result)
    }
}

impl<R: Resolve + 'static> Inner<R> {
    fn pending(inner: Arc<Self>, descriptor: String) -> PendingLookup {
        let task = tokio::spawn({
            let inner = Arc::clone(&inner);
            let descriptor = descriptor.clone();
            async move {
                let outcome = inner.resolve_and_store(&descriptor).await;
                inner.in_flight.lock().await.remove(&descriptor);
                outcome
            }
        });

        async move {
            match task.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    inner.in_flight.lock().await.remove(&descriptor);
                    tracing::error!(descriptor = %descriptor, error = %e, "track link resolution task failed");
                    Err(Error::Internal(format!("track link resolution task failed: {e}")))
                }
            }
        }
        .boxed()
        .shared()
    }

    async fn resolve_and_store(&self, descriptor: &str) -> Result<ResolutionResult, Error> {
        let outcome = self.resolver.resolve(descriptor).await;

        match &outcome {
            Ok(result) => {
                let evicted = self.entries.lock().await.push(descriptor.to_owned(), result.clone());
                if let Some((key, _)) = evicted
                    && key != descriptor
                {
                    tracing::debug!(evicted = %key, "evicted least recently used track link");
                }
            }
            Err(e) => {
                tracing::warn!(descriptor, error = %e, "track link resolution failed, not caching");
            }
        }

        outcome
    }
}

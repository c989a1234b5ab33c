//! Time-bounded memoization of fetch results.
//!
//! Entries live under one of two independent scope keys, full history and
//! the recent window, so a caller who only needs recent activity never
//! forces a full-history refetch. Invalidation is purely by age; the only
//! other way out is a whole-store `clear`.
//!
//! Each key owns an async mutex slot that is held across the producer call,
//! which gives single-flight behavior: a second concurrent caller on the
//! same key waits for the first's result instead of issuing a duplicate
//! fetch.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::error::{AppError, Result};
use crate::models::CommitRecord;

/// Scope of one cached fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    AllHistory,
    Recent(usize),
}

#[derive(Debug, Clone)]
struct CacheEntry {
    payload: Vec<CommitRecord>,
    fetched_at: Instant,
}

type Slot = Arc<tokio::sync::Mutex<Option<CacheEntry>>>;

pub struct FeedCache {
    ttl: Duration,
    /// Outer lock is never held across an await; the per-key slot lock is.
    slots: Mutex<HashMap<CacheKey, Slot>>,
}

impl FeedCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Return the live entry for `key`, or run `producer` and store its
    /// result. Entries are replaced atomically, never mutated in place.
    pub async fn get_or_fetch<F, Fut>(&self, key: CacheKey, producer: F) -> Result<Vec<CommitRecord>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<CommitRecord>>>,
    {
        let slot = self.slot(key)?;
        let mut guard = slot.lock().await;

        if let Some(entry) = guard.as_ref() {
            if entry.fetched_at.elapsed() < self.ttl {
                tracing::debug!(?key, "cache hit");
                return Ok(entry.payload.clone());
            }
        }

        tracing::debug!(?key, "cache miss, fetching");
        let payload = producer().await?;
        *guard = Some(CacheEntry {
            payload: payload.clone(),
            fetched_at: Instant::now(),
        });
        Ok(payload)
    }

    /// Drop every entry regardless of age.
    pub fn clear(&self) -> Result<()> {
        self.slots
            .lock()
            .map_err(|_| AppError::Internal("Lock poisoned".to_string()))?
            .clear();
        Ok(())
    }

    /// Number of entries that are populated and within TTL.
    pub fn live_entries(&self) -> usize {
        let Ok(slots) = self.slots.lock() else {
            return 0;
        };
        slots
            .values()
            .filter(|slot| {
                slot.try_lock()
                    .map(|guard| {
                        guard
                            .as_ref()
                            .is_some_and(|e| e.fetched_at.elapsed() < self.ttl)
                    })
                    .unwrap_or(false)
            })
            .count()
    }

    fn slot(&self, key: CacheKey) -> Result<Slot> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| AppError::Internal("Lock poisoned".to_string()))?;
        Ok(slots.entry(key).or_default().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn record(hash: &str) -> CommitRecord {
        CommitRecord {
            short_hash: hash.to_string(),
            timestamp_seconds: 1_700_000_000,
            author_handle: "dev".to_string(),
            raw_message: "update".to_string(),
            source_tag: "web".to_string(),
        }
    }

    #[tokio::test]
    async fn second_call_within_ttl_skips_producer() {
        let cache = FeedCache::new(Duration::from_secs(60));
        let calls = AtomicUsize::new(0);

        for _ in 0..2 {
            let payload = cache
                .get_or_fetch(CacheKey::AllHistory, || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(vec![record("abc1234")])
                })
                .await
                .unwrap();
            assert_eq!(payload.len(), 1);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn expired_entry_invokes_producer_again() {
        let cache = FeedCache::new(Duration::from_millis(10));
        let calls = AtomicUsize::new(0);

        for _ in 0..2 {
            cache
                .get_or_fetch(CacheKey::Recent(30), || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(Vec::new())
                })
                .await
                .unwrap();
            tokio::time::sleep(Duration::from_millis(25)).await;
        }

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn scopes_are_cached_independently() {
        let cache = FeedCache::new(Duration::from_secs(60));
        let calls = AtomicUsize::new(0);

        for key in [CacheKey::AllHistory, CacheKey::Recent(30)] {
            cache
                .get_or_fetch(key, || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(Vec::new())
                })
                .await
                .unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.live_entries(), 2);
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_flight() {
        let cache = Arc::new(FeedCache::new(Duration::from_secs(60)));
        let calls = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..4 {
            let cache = cache.clone();
            let calls = calls.clone();
            handles.push(tokio::spawn(async move {
                cache
                    .get_or_fetch(CacheKey::AllHistory, || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(20)).await;
                        Ok(vec![record("abc1234")])
                    })
                    .await
                    .unwrap()
            }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap().len(), 1);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn clear_drops_live_entries() {
        let cache = FeedCache::new(Duration::from_secs(60));
        cache
            .get_or_fetch(CacheKey::AllHistory, || async { Ok(Vec::new()) })
            .await
            .unwrap();
        assert_eq!(cache.live_entries(), 1);

        cache.clear().unwrap();
        assert_eq!(cache.live_entries(), 0);
    }
}

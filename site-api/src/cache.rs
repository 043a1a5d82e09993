/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Time-bounded response cache with tag-based invalidation.
//!
//! Entries expire after their own TTL and can also be dropped in bulk by tag,
//! which is how CMS webhooks force fresh content. The cache holds at most
//! `capacity` entries; past that the oldest insert is evicted first.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

/// Entry limit used by [`TaggedCache::new`].
pub const DEFAULT_CAPACITY: usize = 1024;

struct Entry<V> {
    value: V,
    tags: Vec<String>,
    stored_at: Instant,
    ttl: Duration,
    seq: u64,
}

impl<V> Entry<V> {
    fn is_fresh(&self) -> bool {
        self.stored_at.elapsed() < self.ttl
    }
}

struct Inner<V> {
    entries: HashMap<String, Entry<V>>,
    // Insertion order as (key, seq). A key that was overwritten or removed
    // leaves a stale pair behind, skipped when popped.
    order: VecDeque<(String, u64)>,
    next_seq: u64,
}

impl<V> Inner<V> {
    fn evict_oldest(&mut self) -> bool {
        while let Some((key, seq)) = self.order.pop_front() {
            if self.entries.get(&key).is_some_and(|e| e.seq == seq) {
                self.entries.remove(&key);
                return true;
            }
        }
        false
    }

    fn compact_order(&mut self) {
        let entries = &self.entries;
        self.order
            .retain(|(key, seq)| entries.get(key).is_some_and(|e| e.seq == *seq));
    }
}

/// A keyed cache whose entries carry an expiry and a set of tags.
pub struct TaggedCache<V> {
    inner: RwLock<Inner<V>>,
    capacity: usize,
}

impl<V: Clone> TaggedCache<V> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(Inner {
                entries: HashMap::new(),
                order: VecDeque::new(),
                next_seq: 0,
            }),
            capacity: capacity.max(1),
        }
    }

    /// Fresh value for `key`, if any. Expired entries stay until they are
    /// overwritten, evicted or invalidated.
    pub async fn get(&self, key: &str) -> Option<V> {
        let inner = self.inner.read().await;
        inner
            .entries
            .get(key)
            .filter(|entry| entry.is_fresh())
            .map(|entry| entry.value.clone())
    }

    pub async fn insert(&self, key: impl Into<String>, value: V, tags: &[&str], ttl: Duration) {
        if ttl.is_zero() {
            return;
        }
        let key = key.into();
        let mut inner = self.inner.write().await;
        let seq = inner.next_seq;
        inner.next_seq += 1;

        if !inner.entries.contains_key(&key) {
            while inner.entries.len() >= self.capacity && inner.evict_oldest() {}
        }
        inner.entries.insert(
            key.clone(),
            Entry {
                value,
                tags: tags.iter().map(|t| t.to_string()).collect(),
                stored_at: Instant::now(),
                ttl,
                seq,
            },
        );
        inner.order.push_back((key, seq));

        if inner.order.len() > self.capacity * 2 {
            inner.compact_order();
        }
    }

    /// Drop every entry carrying `tag`. Returns how many were removed.
    pub async fn invalidate_tag(&self, tag: &str) -> usize {
        let mut inner = self.inner.write().await;
        let before = inner.entries.len();
        inner.entries.retain(|_, e| !e.tags.iter().any(|t| t == tag));
        let removed = before - inner.entries.len();
        if removed > 0 {
            inner.compact_order();
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl<V: Clone> Default for TaggedCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: Duration = Duration::from_secs(3600);

    #[tokio::test]
    async fn returns_fresh_entries() {
        let cache = TaggedCache::new();
        cache.insert("page:index", 1, &["sanity"], HOUR).await;
        assert_eq!(cache.get("page:index").await, Some(1));
        assert_eq!(cache.get("page:about").await, None);
    }

    #[tokio::test]
    async fn expired_entries_are_not_served() {
        let cache = TaggedCache::new();
        cache
            .insert("k", "v".to_string(), &[], Duration::from_millis(10))
            .await;
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(cache.get("k").await, None);
    }

    #[tokio::test]
    async fn zero_ttl_is_not_stored() {
        let cache = TaggedCache::new();
        cache.insert("k", 1, &["sanity"], Duration::ZERO).await;
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn invalidate_tag_drops_only_tagged_entries() {
        let cache = TaggedCache::new();
        cache.insert("a", 1, &["sanity"], HOUR).await;
        cache.insert("b", 2, &["sanity", "posts"], HOUR).await;
        cache.insert("c", 3, &["places"], HOUR).await;

        assert_eq!(cache.invalidate_tag("sanity").await, 2);
        assert_eq!(cache.get("a").await, None);
        assert_eq!(cache.get("b").await, None);
        assert_eq!(cache.get("c").await, Some(3));
        assert_eq!(cache.invalidate_tag("sanity").await, 0);
    }

    #[tokio::test]
    async fn stays_within_capacity_evicting_oldest_first() {
        let cache = TaggedCache::with_capacity(3);
        for i in 0..10 {
            cache.insert(format!("slug-{i}"), i, &["sanity"], HOUR).await;
        }
        assert_eq!(cache.len().await, 3);
        assert_eq!(cache.get("slug-6").await, None);
        assert_eq!(cache.get("slug-7").await, Some(7));
        assert_eq!(cache.get("slug-9").await, Some(9));
    }

    #[tokio::test]
    async fn overwriting_a_key_does_not_evict_others() {
        let cache = TaggedCache::with_capacity(2);
        cache.insert("a", 1, &[], HOUR).await;
        cache.insert("b", 2, &[], HOUR).await;
        for i in 0..50 {
            cache.insert("a", i, &[], HOUR).await;
        }
        assert_eq!(cache.get("a").await, Some(49));
        assert_eq!(cache.get("b").await, Some(2));

        // "b" is now the oldest live insert.
        cache.insert("c", 3, &[], HOUR).await;
        assert_eq!(cache.get("b").await, None);
        assert_eq!(cache.get("a").await, Some(49));
        assert_eq!(cache.len().await, 2);
    }

    #[tokio::test]
    async fn many_distinct_keys_stay_bounded() {
        let cache = TaggedCache::new();
        for i in 0..20_000 {
            cache
                .insert(format!("place-{i}"), i, &["google-places"], HOUR)
                .await;
        }
        assert_eq!(cache.len().await, DEFAULT_CAPACITY);
        assert_eq!(cache.get("place-19999").await, Some(19_999));
    }
}

// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Tag-invalidated memoization.
//!
//! Every entry is stored under a key plus a set of tags. Invalidating a tag
//! makes every entry that carries it stale in one step, without touching the
//! entries themselves.
//!
//! # How invalidation works
//!
//! Each tag has a generation counter. An entry remembers the generation of each
//! of its tags *at the moment its computation started* (a `TagStamp`). An entry
//! is fresh only while all of those generations are still current:
//!
//! ```text
//! stamp(["search","products"])  → {search: 3, products: 7}
//!         │  fetch + rank ...
//!         │                        invalidate_tag("products") → products: 8
//!         ▼
//! insert(key, value, stamp)     → stored, but already Invalidated
//! ```
//!
//! So an invalidation that lands while a computation is in flight can't be
//! lost: the late insert is born stale and the next lookup recomputes.
//!
//! # Per-key states
//!
//! `Absent → Cached` on insert, `Cached → Invalidated` on a tag bump or TTL
//! expiry, and `Invalidated` reads exactly like `Absent`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, info};

/// Lifecycle state of one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryState {
    Absent,
    Cached,
    Invalidated,
}

/// Tag generations captured before a computation starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagStamp {
    tags: Vec<(String, u64)>,
}

impl TagStamp {
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|(tag, _)| tag.as_str())
    }

    fn carries(&self, tag: &str) -> bool {
        self.tags.iter().any(|(t, _)| t == tag)
    }

    fn is_current(&self, generations: &HashMap<String, u64>) -> bool {
        self.tags
            .iter()
            .all(|(tag, generation)| generations.get(tag).copied().unwrap_or(0) == *generation)
    }
}

/// Counters since construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub invalidations: u64,
    pub evictions: u64,
    /// Stale inserts dropped because storing them would have evicted something.
    pub stale_skips: u64,
}

struct CacheEntry<V> {
    value: V,
    stamp: TagStamp,
    created_at: Instant,
}

struct CacheState<V> {
    entries: HashMap<String, CacheEntry<V>>,
    generations: HashMap<String, u64>,
}

#[derive(Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    inserts: AtomicU64,
    invalidations: AtomicU64,
    evictions: AtomicU64,
    stale_skips: AtomicU64,
}

/// Key/value memo with tag-based invalidation, an optional TTL and a size cap.
///
/// A `max_entries` of zero disables storage: inserts are dropped and every
/// lookup misses.
pub struct TagCache<V> {
    ttl: Option<Duration>,
    max_entries: usize,
    state: RwLock<CacheState<V>>,
    counters: Counters,
}

impl<V: Clone> TagCache<V> {
    pub fn new(max_entries: usize, ttl: Option<Duration>) -> Self {
        Self {
            ttl,
            max_entries,
            state: RwLock::new(CacheState {
                entries: HashMap::new(),
                generations: HashMap::new(),
            }),
            counters: Counters::default(),
        }
    }

    /// Capture the current generation of each tag. Take this *before* computing.
    pub fn stamp(&self, tags: &[&str]) -> TagStamp {
        let state = self.state.read();
        TagStamp {
            tags: tags
                .iter()
                .map(|tag| {
                    let generation = state.generations.get(*tag).copied().unwrap_or(0);
                    ((*tag).to_string(), generation)
                })
                .collect(),
        }
    }

    /// Fresh value for `key`, if any. Counts a hit or a miss.
    pub fn get(&self, key: &str) -> Option<V> {
        let state = self.state.read();
        let found = state
            .entries
            .get(key)
            .filter(|entry| self.is_fresh(entry, &state.generations))
            .map(|entry| entry.value.clone());

        match found {
            Some(_) => self.counters.hits.fetch_add(1, Ordering::Relaxed),
            None => self.counters.misses.fetch_add(1, Ordering::Relaxed),
        };
        found
    }

    /// Like `get`, but leaves the hit/miss counters alone.
    pub fn peek(&self, key: &str) -> Option<V> {
        let state = self.state.read();
        state
            .entries
            .get(key)
            .filter(|entry| self.is_fresh(entry, &state.generations))
            .map(|entry| entry.value.clone())
    }

    /// Where `key` is in its lifecycle. Does not touch the hit/miss counters.
    pub fn state(&self, key: &str) -> EntryState {
        let state = self.state.read();
        match state.entries.get(key) {
            None => EntryState::Absent,
            Some(entry) if self.is_fresh(entry, &state.generations) => EntryState::Cached,
            Some(_) => EntryState::Invalidated,
        }
    }

    /// Store `value` under `key`, replacing whatever was there.
    ///
    /// If any tag in `stamp` was invalidated since the stamp was taken, the
    /// entry is stored already invalidated. Such an entry never evicts anything:
    /// when the cache is full and `key` is new, it is dropped instead.
    pub fn insert(&self, key: impl Into<String>, value: V, stamp: TagStamp) {
        if self.max_entries == 0 {
            return;
        }
        let key = key.into();
        let mut state = self.state.write();
        let stale = !stamp.is_current(&state.generations);
        let needs_room =
            !state.entries.contains_key(&key) && state.entries.len() >= self.max_entries;

        if stale && needs_room {
            debug!(key = %key, "dropping stale entry instead of evicting");
            self.counters.stale_skips.fetch_add(1, Ordering::Relaxed);
            return;
        }
        if needs_room {
            self.make_room(&mut state);
        }
        if stale {
            debug!(key = %key, "storing entry computed before an invalidation");
        }
        state.entries.insert(
            key,
            CacheEntry {
                value,
                stamp,
                created_at: Instant::now(),
            },
        );
        self.counters.inserts.fetch_add(1, Ordering::Relaxed);
    }

    /// Invalidate every entry carrying `tag`. Returns how many were fresh before.
    pub fn invalidate_tag(&self, tag: &str) -> usize {
        let mut state = self.state.write();
        let affected = state
            .entries
            .values()
            .filter(|entry| entry.stamp.carries(tag) && self.is_fresh(entry, &state.generations))
            .count();
        *state.generations.entry(tag.to_string()).or_insert(0) += 1;
        self.counters.invalidations.fetch_add(1, Ordering::Relaxed);
        info!(tag, affected, "cache tag invalidated");
        affected
    }

    /// Drop every invalidated entry. Returns how many were removed.
    pub fn purge(&self) -> usize {
        let mut state = self.state.write();
        let CacheState {
            entries,
            generations,
        } = &mut *state;
        let generations = &*generations;
        let before = entries.len();
        entries.retain(|_, entry| self.is_fresh(entry, generations));
        let removed = before - entries.len();
        self.counters
            .evictions
            .fetch_add(removed as u64, Ordering::Relaxed);
        removed
    }

    /// Drop everything, fresh or not. Tag generations are kept.
    pub fn clear(&self) {
        self.state.write().entries.clear();
    }

    /// Stored entries, invalidated ones included.
    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            inserts: self.counters.inserts.load(Ordering::Relaxed),
            invalidations: self.counters.invalidations.load(Ordering::Relaxed),
            evictions: self.counters.evictions.load(Ordering::Relaxed),
            stale_skips: self.counters.stale_skips.load(Ordering::Relaxed),
        }
    }

    fn is_fresh(&self, entry: &CacheEntry<V>, generations: &HashMap<String, u64>) -> bool {
        let within_ttl = self
            .ttl
            .map_or(true, |ttl| entry.created_at.elapsed() <= ttl);
        within_ttl && entry.stamp.is_current(generations)
    }

    /// Free one slot: stale entries go first, then the oldest fresh one.
    fn make_room(&self, state: &mut CacheState<V>) {
        let CacheState {
            entries,
            generations,
        } = state;
        let generations = &*generations;
        let before = entries.len();
        entries.retain(|_, entry| self.is_fresh(entry, generations));

        if entries.len() >= self.max_entries {
            if let Some(victim) = entries
                .iter()
                .min_by_key(|(_, entry)| entry.created_at)
                .map(|(key, _)| key.clone())
            {
                entries.remove(&victim);
            }
        }
        let removed = before - entries.len();
        self.counters
            .evictions
            .fetch_add(removed as u64, Ordering::Relaxed);
    }
}

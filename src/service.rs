// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The cached product search callers actually use.
//!
//! `ProductSearch` owns a store and a `TagCache`. On a miss it fetches one
//! bounded batch, ranks it, joins the ranked ids back to *that same batch* and
//! caches the result under the exact query string, tagged `search` and
//! `products`. Writes made through it invalidate both tags.
//!
//! # Known relaxations
//!
//! - Without `coalesce_misses`, two concurrent misses for the same query both
//!   fetch. The second insert simply replaces the first.
//! - A hit racing a concurrent invalidation may return the pre-invalidation
//!   result. The next call after the invalidation completes recomputes.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::cache::{CacheStats, EntryState, TagCache};
use crate::coalesce::QueryCoalescer;
use crate::config::SearchConfig;
use crate::error::StoreError;
use crate::ranker::search_entries;
use crate::store::{CatalogStore, CatalogWriter};
use crate::types::{CatalogEntry, EmptyQueryPolicy, EntryId};

pub const SEARCH_TAG: &str = "search";
pub const PRODUCTS_TAG: &str = "products";

/// Tags every cached search result is stored under.
pub const SEARCH_TAGS: [&str; 2] = [SEARCH_TAG, PRODUCTS_TAG];

/// Ordered search results. Cache hits hand out clones of the same `Arc`.
pub type SearchResults = Arc<[CatalogEntry]>;

pub struct ProductSearch<S> {
    store: S,
    cache: TagCache<SearchResults>,
    coalescer: Option<QueryCoalescer>,
    fetch_limit: usize,
    empty_query: EmptyQueryPolicy,
}

impl<S: CatalogStore> ProductSearch<S> {
    pub fn new(store: S, config: &SearchConfig) -> Self {
        Self {
            store,
            cache: TagCache::new(config.max_cache_entries, config.cache_ttl),
            coalescer: config.coalesce_misses.then(QueryCoalescer::new),
            fetch_limit: config.fetch_limit,
            empty_query: config.empty_query,
        }
    }

    pub fn with_defaults(store: S) -> Self {
        Self::new(store, &SearchConfig::default())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Ranked catalog entries for `query`, from cache when possible.
    ///
    /// Store errors come back unchanged and are never cached.
    #[instrument(level = "debug", skip(self), fields(backend = self.store.backend_tag()))]
    pub async fn search_products(&self, query: &str) -> Result<SearchResults, StoreError> {
        if let Some(hit) = self.cache.get(query) {
            debug!(results = hit.len(), "search cache hit");
            return Ok(hit);
        }

        let _inflight = match &self.coalescer {
            Some(coalescer) => {
                let guard = coalescer.acquire(query).await;
                // Whoever held the lock before us may have filled the cache.
                // This lookup was already counted as a miss above.
                if let Some(hit) = self.cache.peek(query) {
                    debug!(results = hit.len(), "search cache hit after waiting");
                    return Ok(hit);
                }
                Some(guard)
            }
            None => None,
        };

        // Stamp before fetching so an invalidation during the fetch is not lost.
        let stamp = self.cache.stamp(&SEARCH_TAGS);
        let entries = self
            .store
            .fetch_catalog(self.fetch_limit)
            .await
            .map_err(|err| {
                warn!(error = %err, "catalog fetch failed");
                err
            })?;

        let results: SearchResults = search_entries(&entries, query, self.empty_query).into();
        debug!(
            fetched = entries.len(),
            results = results.len(),
            "search cache miss computed"
        );
        self.cache.insert(query, Arc::clone(&results), stamp);
        Ok(results)
    }

    /// Invalidate one tag. Returns how many cached queries it made stale.
    pub fn invalidate_tag(&self, tag: &str) -> usize {
        self.cache.invalidate_tag(tag)
    }

    /// The signal for "product data changed": invalidates `search` and `products`.
    pub fn invalidate_products(&self) {
        for tag in SEARCH_TAGS {
            self.cache.invalidate_tag(tag);
        }
    }

    pub fn entry_state(&self, query: &str) -> EntryState {
        self.cache.state(query)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drop invalidated results to free memory. Lookups behave the same either way.
    pub fn purge_invalidated(&self) -> usize {
        self.cache.purge()
    }
}

impl<S: CatalogWriter> ProductSearch<S> {
    /// Write an entry through to the store, then invalidate product data.
    ///
    /// Invalidation happens even if the write fails, since a failed write may
    /// still have changed something.
    pub async fn upsert_entry(&self, entry: CatalogEntry) -> Result<(), StoreError> {
        let result = self.store.upsert_entry(entry).await;
        self.invalidate_products();
        result
    }

    /// Remove an entry from the store, then invalidate product data.
    pub async fn remove_entry(&self, id: EntryId) -> Result<bool, StoreError> {
        let result = self.store.remove_entry(id).await;
        self.invalidate_products();
        result
    }
}

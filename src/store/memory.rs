// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{upsert_in_place, CatalogStore, CatalogWriter};
use crate::error::StoreError;
use crate::types::{CatalogEntry, EntryId};

/// In-memory catalog.
///
/// Counts fetches and can be told to fail or to stall, which is what the cache
/// tests lean on.
#[derive(Default)]
pub struct MemoryCatalogStore {
    entries: RwLock<Vec<CatalogEntry>>,
    fetch_calls: AtomicU64,
    unavailable: AtomicBool,
    fetch_delay: Duration,
}

impl MemoryCatalogStore {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self {
            entries: RwLock::new(entries),
            ..Self::default()
        }
    }

    /// Make every fetch sleep for `delay` before reading.
    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = delay;
        self
    }

    /// Number of `fetch_catalog` calls so far, failed ones included.
    pub fn fetch_calls(&self) -> u64 {
        self.fetch_calls.load(Ordering::Relaxed)
    }

    /// While set, fetches fail with `StoreError::Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::Relaxed);
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn fetch_catalog(&self, limit: usize) -> Result<Vec<CatalogEntry>, StoreError> {
        self.fetch_calls.fetch_add(1, Ordering::Relaxed);
        if !self.fetch_delay.is_zero() {
            tokio::time::sleep(self.fetch_delay).await;
        }
        if self.unavailable.load(Ordering::Relaxed) {
            return Err(StoreError::Unavailable(
                "memory store marked unavailable".to_string(),
            ));
        }
        Ok(self.entries.read().iter().take(limit).cloned().collect())
    }
}

#[async_trait]
impl CatalogWriter for MemoryCatalogStore {
    async fn upsert_entry(&self, entry: CatalogEntry) -> Result<(), StoreError> {
        upsert_in_place(&mut self.entries.write(), entry);
        Ok(())
    }

    async fn remove_entry(&self, id: EntryId) -> Result<bool, StoreError> {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|e| e.id != id);
        Ok(entries.len() != before)
    }
}

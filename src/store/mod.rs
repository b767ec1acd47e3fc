// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Where catalog entries come from.
//!
//! The search side only needs one thing from persistence: "give me up to N
//! entries with their variants, images and category". `CatalogStore` is that
//! seam. Writes go through `CatalogWriter` so the search service can wrap
//! them and invalidate its cache afterwards.
//!
//! Two backends ship with the crate:
//!
//! | Backend              | Use                                        |
//! |----------------------|--------------------------------------------|
//! | `MemoryCatalogStore` | embedding, tests, fault injection          |
//! | `JsonCatalogStore`   | a JSON file on disk (the CLI reads these)  |

mod json;
mod memory;

pub use json::JsonCatalogStore;
pub use memory::MemoryCatalogStore;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::types::{CatalogEntry, EntryId};

/// Default upper bound on rows fetched per search.
pub const DEFAULT_FETCH_LIMIT: usize = 100;

/// Bounded read access to the catalog.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Short name for logs.
    fn backend_tag(&self) -> &'static str;

    /// Fetch at most `limit` entries, in the store's natural order.
    async fn fetch_catalog(&self, limit: usize) -> Result<Vec<CatalogEntry>, StoreError>;
}

/// Write access to the catalog.
#[async_trait]
pub trait CatalogWriter: CatalogStore {
    /// Insert a new entry or replace the one with the same id (keeping its position).
    async fn upsert_entry(&self, entry: CatalogEntry) -> Result<(), StoreError>;

    /// Remove an entry. Returns whether anything was removed.
    async fn remove_entry(&self, id: EntryId) -> Result<bool, StoreError>;
}

#[async_trait]
impl<S: CatalogStore + ?Sized> CatalogStore for Arc<S> {
    fn backend_tag(&self) -> &'static str {
        (**self).backend_tag()
    }

    async fn fetch_catalog(&self, limit: usize) -> Result<Vec<CatalogEntry>, StoreError> {
        (**self).fetch_catalog(limit).await
    }
}

#[async_trait]
impl<S: CatalogWriter + ?Sized> CatalogWriter for Arc<S> {
    async fn upsert_entry(&self, entry: CatalogEntry) -> Result<(), StoreError> {
        (**self).upsert_entry(entry).await
    }

    async fn remove_entry(&self, id: EntryId) -> Result<bool, StoreError> {
        (**self).remove_entry(id).await
    }
}

/// Replace-or-append by id, the shared upsert rule for the in-crate backends.
pub(crate) fn upsert_in_place(entries: &mut Vec<CatalogEntry>, entry: CatalogEntry) {
    match entries.iter_mut().find(|existing| existing.id == entry.id) {
        Some(existing) => *existing = entry,
        None => entries.push(entry),
    }
}

// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Relevance-ranked product search for a storefront catalog.
//!
//! A search fetches one bounded batch of catalog entries from a store, ranks
//! them against a free-text query, and memoizes the ranked list per query
//! string until the `search` or `products` tag is invalidated.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  fetch ≤ N  ┌──────────────┐  rank + join  ┌──────────────┐
//! │   store/     │────────────▶│  service.rs  │──────────────▶│  ranker.rs   │
//! │ CatalogStore │             │ ProductSearch│               │  scoring/    │
//! └──────────────┘             └──────┬───────┘               └──────────────┘
//!                                     │ get / insert / invalidate_tag
//!                                     ▼
//!                              ┌──────────────┐
//!                              │   cache.rs   │
//!                              │  TagCache    │
//!                              └──────────────┘
//! ```
//!
//! # Ranking in one paragraph
//!
//! Name and description are normalized (diacritics stripped, lowercased,
//! whitespace collapsed) and matched against the normalized query. The
//! strongest applicable `MatchKind` decides the base score; a bounded bonus
//! for position and token coverage breaks ties inside a kind. Any name match
//! outranks any description-only match, and equal scores keep fetch order.
//!
//! # Usage
//!
//! ```no_run
//! use catalog_search::{MemoryCatalogStore, ProductSearch};
//! # async fn run() -> Result<(), catalog_search::StoreError> {
//! let search = ProductSearch::with_defaults(MemoryCatalogStore::new(vec![]));
//! let results = search.search_products("red mug").await?;
//! for entry in results.iter() {
//!     println!("{} {}", entry.id, entry.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod coalesce;
pub mod config;
pub mod error;
pub mod ranker;
pub mod scoring;
pub mod service;
pub mod store;
pub mod testing;
mod types;
mod utils;

pub use cache::{CacheStats, EntryState, TagCache, TagStamp};
pub use config::SearchConfig;
pub use error::{ConfigError, Error, Result, StoreError};
pub use ranker::{rank, resolve_matches, search_entries};
pub use service::{ProductSearch, SearchResults, PRODUCTS_TAG, SEARCH_TAG, SEARCH_TAGS};
pub use store::{
    CatalogStore, CatalogWriter, JsonCatalogStore, MemoryCatalogStore, DEFAULT_FETCH_LIMIT,
};
pub use types::{
    CatalogEntry, CategoryRef, EmptyQueryPolicy, EntryId, Image, MatchKind, ScoredMatch, Variant,
};
pub use utils::normalize;

//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use catalog_search::{CatalogEntry, CatalogStore, EntryId, StoreError};
use parking_lot::Mutex;

// Re-export canonical test utilities from catalog_search::testing
pub use catalog_search::testing::{make_entry, make_entry_with_description, make_listed_entry};

// ============================================================================
// FIXTURES
// ============================================================================

/// The three-product catalog from the storefront search example:
/// `mug` finds Red Mug by name and Blue Pen by description.
pub fn mug_catalog() -> Vec<CatalogEntry> {
    vec![
        make_entry_with_description(1, "Red Mug", "ceramic"),
        make_entry_with_description(2, "Blue Pen", "mug-shaped cap"),
        make_entry(3, "Desk Lamp"),
    ]
}

/// A small but varied storefront: every `MatchKind` shows up for some query.
pub fn storefront_catalog() -> Vec<CatalogEntry> {
    vec![
        make_listed_entry(10, "Mug", 900, "Kitchen"),
        make_listed_entry(11, "Mug Warmer", 2400, "Kitchen"),
        make_listed_entry(12, "Travel Mug", 1800, "Outdoor"),
        make_listed_entry(13, "Smugglers Map", 1500, "Books"),
        make_entry_with_description(14, "Tea Set", "four cups and a mug"),
        make_entry_with_description(15, "Coffee Press", "pairs well with any cup"),
        make_listed_entry(16, "Café Crème Cup", 1200, "Kitchen"),
        make_entry(17, "Desk Lamp"),
    ]
}

/// `n` listed entries with ids `0..n`, cycling through a few product names.
pub fn generated_catalog(n: usize) -> Vec<CatalogEntry> {
    const NAMES: &[&str] = &[
        "Red Mug",
        "Blue Pen",
        "Desk Lamp",
        "Travel Mug",
        "Notebook",
        "Mug Warmer",
    ];
    const CATEGORIES: &[&str] = &["Kitchen", "Office", "Outdoor"];
    (0..n)
        .map(|i| {
            make_listed_entry(
                i as u64,
                NAMES[i % NAMES.len()],
                500 + (i as u64 * 37) % 5000,
                CATEGORIES[i % CATEGORIES.len()],
            )
        })
        .collect()
}

pub fn ids(entries: &[CatalogEntry]) -> Vec<EntryId> {
    entries.iter().map(|e| e.id).collect()
}

/// Write `entries` as a bare JSON array to `dir/name`.
pub fn write_catalog(dir: &Path, name: &str, entries: &[CatalogEntry]) -> PathBuf {
    let path = dir.join(name);
    let json = serde_json::to_vec(entries).expect("serialize catalog");
    std::fs::write(&path, json).expect("write catalog");
    path
}

// ============================================================================
// SCRIPTED STORE
// ============================================================================

/// Store that hands out a pre-scripted batch per fetch, then repeats the last
/// one. Lets a test change the catalog between two fetches without a writer.
pub struct ScriptedStore {
    batches: Mutex<VecDeque<Vec<CatalogEntry>>>,
    last: Mutex<Vec<CatalogEntry>>,
    calls: AtomicU64,
}

impl ScriptedStore {
    pub fn new(batches: Vec<Vec<CatalogEntry>>) -> Self {
        Self {
            batches: Mutex::new(batches.into()),
            last: Mutex::new(Vec::new()),
            calls: AtomicU64::new(0),
        }
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl CatalogStore for ScriptedStore {
    fn backend_tag(&self) -> &'static str {
        "scripted"
    }

    async fn fetch_catalog(&self, limit: usize) -> Result<Vec<CatalogEntry>, StoreError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let mut last = self.last.lock();
        if let Some(next) = self.batches.lock().pop_front() {
            *last = next;
        }
        Ok(last.iter().take(limit).cloned().collect())
    }
}

// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use super::{upsert_in_place, CatalogStore, CatalogWriter};
use crate::error::StoreError;
use crate::types::{CatalogEntry, EntryId};

/// Accepted file layouts: a bare array or `{"products": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    List(Vec<CatalogEntry>),
    Wrapped { products: Vec<CatalogEntry> },
}

impl From<CatalogFile> for Vec<CatalogEntry> {
    fn from(file: CatalogFile) -> Self {
        match file {
            CatalogFile::List(entries) => entries,
            CatalogFile::Wrapped { products } => products,
        }
    }
}

#[derive(Serialize)]
struct CatalogFileOut<'a> {
    products: &'a [CatalogEntry],
}

/// Catalog backed by a JSON file. Every fetch re-reads the file.
pub struct JsonCatalogStore {
    path: PathBuf,
    // Serializes read-modify-write cycles; plain fetches don't take it.
    write_lock: Mutex<()>,
}

impl JsonCatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Vec<CatalogEntry>, StoreError> {
        let bytes = tokio::fs::read(&self.path).await?;
        let file: CatalogFile = serde_json::from_slice(&bytes)?;
        Ok(file.into())
    }

    /// Write via temp file + rename so readers never see a half-written catalog.
    async fn write_all(&self, entries: &[CatalogEntry]) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(&CatalogFileOut { products: entries })?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, &data).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        debug!(path = %self.path.display(), entries = entries.len(), "catalog file rewritten");
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for JsonCatalogStore {
    fn backend_tag(&self) -> &'static str {
        "json"
    }

    async fn fetch_catalog(&self, limit: usize) -> Result<Vec<CatalogEntry>, StoreError> {
        let mut entries = self.read_all().await?;
        entries.truncate(limit);
        Ok(entries)
    }
}

#[async_trait]
impl CatalogWriter for JsonCatalogStore {
    async fn upsert_entry(&self, entry: CatalogEntry) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_all().await?;
        upsert_in_place(&mut entries, entry);
        self.write_all(&entries).await
    }

    async fn remove_entry(&self, id: EntryId) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_all().await?;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Ok(false);
        }
        self.write_all(&entries).await?;
        Ok(true)
    }
}

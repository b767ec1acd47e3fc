// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The shapes that flow through a product search.
//!
//! `CatalogEntry` is what the store hands us and what the caller gets back.
//! `ScoredMatch` is the transient middle step: an id plus a number, created
//! fresh by the ranker and thrown away once it has been joined back to the
//! batch it came from.
//!
//! # Invariants
//!
//! - **CatalogEntry**: `id` is unique within a fetched batch. Everything else is
//!   read-only from the search side; optional data is an explicit `Option` or an
//!   empty `Vec`, never a missing key.
//!
//! - **ScoredMatch**: `id` refers to an entry of the batch that was scored. The
//!   join in `ranker::resolve_matches` drops anything that doesn't.

use serde::{Deserialize, Serialize};

/// Unique product identifier as assigned by the persistence layer.
pub type EntryId = u64;

/// A sellable product with its nested variant and image data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: EntryId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Ordered as the store returns them (first variant is the default one).
    #[serde(default)]
    pub variants: Vec<Variant>,
    #[serde(default)]
    pub category: Option<CategoryRef>,
}

impl CatalogEntry {
    /// Number of images across all variants.
    pub fn image_count(&self) -> usize {
        self.variants.iter().map(|v| v.images.len()).sum()
    }

    /// Cheapest variant price, if the entry has any variants.
    pub fn min_price_cents(&self) -> Option<u64> {
        self.variants.iter().map(|v| v.price_cents).min()
    }

    /// First image of the first variant that has one.
    pub fn cover_image(&self) -> Option<&Image> {
        self.variants.iter().find_map(|v| v.images.first())
    }
}

/// One purchasable configuration of a product (size, color, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: u64,
    pub name: String,
    pub price_cents: u64,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRef {
    pub id: u64,
    pub name: String,
}

/// Which rule produced a match, best first.
///
/// The derived `Ord` follows declaration order, so `NameExact < NamePrefix < ...`
/// and a smaller kind is a stronger match. Every `Name*` kind sorts before every
/// `Description*` kind; the scoring constants mirror this ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchKind {
    /// Normalized name equals the normalized query.
    NameExact,
    /// Name starts with the query.
    NamePrefix,
    /// Some word of the name starts with the query.
    NameWord,
    /// Name contains the query somewhere.
    NameSubstring,
    /// Name contains at least one query token.
    NameTokens,
    /// Description contains the whole query.
    DescriptionPhrase,
    /// Description contains at least one query token.
    DescriptionTokens,
    /// Empty query passed through without scoring.
    Unfiltered,
}

impl MatchKind {
    /// Did this match come from the product name?
    pub fn is_name_match(self) -> bool {
        matches!(
            self,
            MatchKind::NameExact
                | MatchKind::NamePrefix
                | MatchKind::NameWord
                | MatchKind::NameSubstring
                | MatchKind::NameTokens
        )
    }

    /// Short label used by the CLI.
    pub fn label(self) -> &'static str {
        match self {
            MatchKind::NameExact => "name=",
            MatchKind::NamePrefix => "name^",
            MatchKind::NameWord => "name-word",
            MatchKind::NameSubstring => "name~",
            MatchKind::NameTokens => "name-tok",
            MatchKind::DescriptionPhrase => "desc~",
            MatchKind::DescriptionTokens => "desc-tok",
            MatchKind::Unfiltered => "all",
        }
    }
}

/// A ranked reference to a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredMatch {
    pub id: EntryId,
    pub score: f64,
    pub kind: MatchKind,
}

/// What to do with a query that normalizes to nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EmptyQueryPolicy {
    /// Return every fetched entry in fetch order.
    #[default]
    All,
    /// Return an empty result.
    Nothing,
}

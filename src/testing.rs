// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit tests, integration tests and benches.
//!
//! Always compiled but hidden from documentation.

#![doc(hidden)]

use crate::types::{CatalogEntry, CategoryRef, Image, Variant};

/// Entry with a name and nothing else.
pub fn make_entry(id: u64, name: &str) -> CatalogEntry {
    CatalogEntry {
        id,
        name: name.to_string(),
        description: None,
        variants: vec![],
        category: None,
    }
}

/// Entry with a name and a description.
pub fn make_entry_with_description(id: u64, name: &str, description: &str) -> CatalogEntry {
    CatalogEntry {
        description: Some(description.to_string()),
        ..make_entry(id, name)
    }
}

/// Entry with one priced variant, one image and a category, the way a
/// storefront listing page sees it.
pub fn make_listed_entry(id: u64, name: &str, price_cents: u64, category: &str) -> CatalogEntry {
    CatalogEntry {
        id,
        name: name.to_string(),
        description: Some(format!("{} from the {} range", name, category)),
        variants: vec![Variant {
            id: id * 100,
            name: "Default".to_string(),
            price_cents,
            stock: 10,
            images: vec![Image {
                url: format!("/images/{}.jpg", id),
                alt: Some(name.to_string()),
            }],
        }],
        category: Some(CategoryRef {
            id: category.len() as u64,
            name: category.to_string(),
        }),
    }
}

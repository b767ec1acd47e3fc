//! Empty and degenerate inputs.

use super::common::{ids, make_entry, mug_catalog, storefront_catalog};
use catalog_search::{
    rank, search_entries, EmptyQueryPolicy, MatchKind, MemoryCatalogStore, ProductSearch,
    SearchConfig,
};

#[test]
fn test_empty_query_returns_fetch_order_by_default() {
    let catalog = storefront_catalog();
    let results = search_entries(&catalog, "", EmptyQueryPolicy::default());
    assert_eq!(results, catalog);
}

#[test]
fn test_whitespace_query_counts_as_empty() {
    let matches = rank(&mug_catalog(), " \t \n", EmptyQueryPolicy::All);
    assert_eq!(matches.len(), 3);
    assert!(matches
        .iter()
        .all(|m| m.kind == MatchKind::Unfiltered && m.score == 0.0));

    assert!(rank(&mug_catalog(), "   ", EmptyQueryPolicy::Nothing).is_empty());
}

#[test]
fn test_no_match_is_empty_not_error() {
    assert!(search_entries(&mug_catalog(), "bicycle", EmptyQueryPolicy::All).is_empty());
}

#[test]
fn test_empty_batch() {
    assert!(search_entries(&[], "mug", EmptyQueryPolicy::All).is_empty());
    assert!(search_entries(&[], "", EmptyQueryPolicy::All).is_empty());
}

#[test]
fn test_query_longer_than_every_name() {
    let entries = vec![make_entry(1, "Mug")];
    let matches = rank(&entries, "mug with a very long handle", EmptyQueryPolicy::All);
    // Only the "mug" token hits.
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].kind, MatchKind::NameTokens);
}

#[tokio::test]
async fn test_empty_query_policy_from_config() {
    let config = SearchConfig {
        empty_query: EmptyQueryPolicy::Nothing,
        ..SearchConfig::default()
    };
    let search = ProductSearch::new(MemoryCatalogStore::new(mug_catalog()), &config);
    assert!(search.search_products("").await.unwrap().is_empty());

    let search = ProductSearch::with_defaults(MemoryCatalogStore::new(mug_catalog()));
    assert_eq!(ids(&search.search_products("").await.unwrap()), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_fetch_limit_caps_the_ranked_batch() {
    let catalog: Vec<_> = (0..150).map(|i| make_entry(i, "Mug")).collect();
    let search = ProductSearch::with_defaults(MemoryCatalogStore::new(catalog));
    let results = search.search_products("mug").await.unwrap();
    assert_eq!(results.len(), 100);
    assert_eq!(results.last().map(|e| e.id), Some(99));
}

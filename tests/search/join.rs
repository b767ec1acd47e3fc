//! The id join from ranked matches back to full entries.
//!
//! Results are always built from the batch that was ranked, never from a
//! second read of the store.

use std::sync::Arc;

use super::common::{ids, make_entry, make_listed_entry, mug_catalog, ScriptedStore};
use catalog_search::{resolve_matches, MatchKind, ProductSearch, ScoredMatch};

fn scored(id: u64, score: f64) -> ScoredMatch {
    ScoredMatch {
        id,
        score,
        kind: MatchKind::NameSubstring,
    }
}

#[test]
fn test_join_follows_match_order() {
    let matches = vec![scored(3, 40.0), scored(1, 20.0)];
    let joined = resolve_matches(&mug_catalog(), &matches);
    assert_eq!(ids(&joined), vec![3, 1]);
    assert_eq!(joined[0].name, "Desk Lamp");
}

#[test]
fn test_join_drops_ids_missing_from_batch() {
    let matches = vec![scored(42, 100.0), scored(2, 10.0), scored(99, 5.0)];
    let joined = resolve_matches(&mug_catalog(), &matches);
    assert_eq!(ids(&joined), vec![2]);
}

#[test]
fn test_join_keeps_full_nested_data() {
    let entries = vec![make_listed_entry(5, "Red Mug", 1250, "Kitchen")];
    let joined = resolve_matches(&entries, &[scored(5, 80.0)]);
    assert_eq!(joined, entries);
    assert_eq!(joined[0].min_price_cents(), Some(1250));
    assert!(joined[0].cover_image().is_some());
}

#[test]
fn test_join_uses_first_of_duplicate_ids() {
    let entries = vec![make_entry(1, "First"), make_entry(1, "Second")];
    let joined = resolve_matches(&entries, &[scored(1, 1.0)]);
    assert_eq!(joined.len(), 1);
    assert_eq!(joined[0].name, "First");
}

#[tokio::test]
async fn test_results_come_from_the_ranked_batch() {
    // Second fetch renames entry 1; the cached result must still show the
    // entry as it was when it was ranked.
    let store = Arc::new(ScriptedStore::new(vec![
        vec![make_entry(1, "Red Mug"), make_entry(2, "Blue Pen")],
        vec![make_entry(1, "Red Mug Deluxe"), make_entry(2, "Blue Pen")],
    ]));
    let search = ProductSearch::with_defaults(Arc::clone(&store));

    let first = search.search_products("mug").await.unwrap();
    assert_eq!(first[0].name, "Red Mug");

    search.invalidate_products();
    let second = search.search_products("mug").await.unwrap();
    assert_eq!(second[0].name, "Red Mug Deluxe");
    assert_eq!(first[0].name, "Red Mug");
    assert_eq!(store.calls(), 2);
}

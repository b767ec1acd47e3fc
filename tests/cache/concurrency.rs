//! Concurrent misses and invalidations racing a fetch.
//!
//! Both futures run on one task via `tokio::join!`, so interleaving is driven
//! by the store's fetch delay rather than by thread scheduling.

use std::sync::Arc;
use std::time::Duration;

use super::common::{ids, make_entry, mug_catalog};
use catalog_search::{EntryState, MemoryCatalogStore, ProductSearch, SearchConfig};

const FETCH_DELAY: Duration = Duration::from_millis(40);

fn slow_search(coalesce_misses: bool) -> ProductSearch<MemoryCatalogStore> {
    let config = SearchConfig {
        coalesce_misses,
        ..SearchConfig::default()
    };
    let store = MemoryCatalogStore::new(mug_catalog()).with_fetch_delay(FETCH_DELAY);
    ProductSearch::new(store, &config)
}

#[tokio::test]
async fn test_uncoalesced_misses_both_fetch() {
    let search = slow_search(false);
    let (a, b) = tokio::join!(search.search_products("mug"), search.search_products("mug"));

    assert_eq!(ids(&a.unwrap()), vec![1, 2]);
    assert_eq!(ids(&b.unwrap()), vec![1, 2]);
    assert_eq!(search.store().fetch_calls(), 2);
    assert_eq!(search.entry_state("mug"), EntryState::Cached);
}

#[tokio::test]
async fn test_coalesced_misses_fetch_once() {
    let search = slow_search(true);
    let (a, b, c) = tokio::join!(
        search.search_products("mug"),
        search.search_products("mug"),
        search.search_products("mug"),
    );

    let (a, b, c) = (a.unwrap(), b.unwrap(), c.unwrap());
    assert!(Arc::ptr_eq(&a, &b));
    assert!(Arc::ptr_eq(&b, &c));
    assert_eq!(search.store().fetch_calls(), 1);
}

#[tokio::test]
async fn test_coalesced_lookup_counts_one_miss() {
    let search = slow_search(true);
    search.search_products("mug").await.unwrap();

    let stats = search.cache_stats();
    assert_eq!(search.store().fetch_calls(), 1);
    assert_eq!((stats.hits, stats.misses), (0, 1));

    search.search_products("mug").await.unwrap();
    let stats = search.cache_stats();
    assert_eq!((stats.hits, stats.misses), (1, 1));
}

#[tokio::test]
async fn test_coalesced_waiters_each_count_one_miss() {
    let search = slow_search(true);
    let (a, b) = tokio::join!(search.search_products("mug"), search.search_products("mug"));
    a.unwrap();
    b.unwrap();

    // Both callers missed once on arrival; the waiter's re-check is uncounted.
    let stats = search.cache_stats();
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.hits, 0);
    assert_eq!(search.store().fetch_calls(), 1);
}

#[tokio::test]
async fn test_coalescing_is_per_query() {
    let search = slow_search(true);
    let (mug, lamp) = tokio::join!(search.search_products("mug"), search.search_products("lamp"));

    assert_eq!(ids(&mug.unwrap()), vec![1, 2]);
    assert_eq!(ids(&lamp.unwrap()), vec![3]);
    assert_eq!(search.store().fetch_calls(), 2);
}

#[tokio::test]
async fn test_invalidation_during_fetch_is_not_lost() {
    let search = slow_search(false);

    let (result, ()) = tokio::join!(search.search_products("mug"), async {
        tokio::time::sleep(FETCH_DELAY / 4).await;
        search.invalidate_products();
    });

    // The caller still gets its answer, but it is never served as fresh.
    assert_eq!(ids(&result.unwrap()), vec![1, 2]);
    assert_eq!(search.entry_state("mug"), EntryState::Invalidated);

    search.search_products("mug").await.unwrap();
    assert_eq!(search.store().fetch_calls(), 2);
    assert_eq!(search.entry_state("mug"), EntryState::Cached);
}

#[tokio::test]
async fn test_write_during_fetch_forces_recompute() {
    let search = slow_search(true);

    let (stale, written) = tokio::join!(search.search_products("mug"), async {
        tokio::time::sleep(FETCH_DELAY / 4).await;
        search.upsert_entry(make_entry(4, "Mug")).await
    });
    written.unwrap();
    // The memory store reads after its delay, so the in-flight fetch may or
    // may not see entry 4. Either way the next search must.
    assert!(stale.is_ok());

    let fresh = search.search_products("mug").await.unwrap();
    assert_eq!(ids(&fresh), vec![4, 1, 2]);
}

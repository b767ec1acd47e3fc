// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-key async locks so only one cache miss per query fetches at a time.
//!
//! Waiters queue on the same `tokio::sync::Mutex`; once the first caller has
//! filled the cache, the next one re-checks and usually gets a hit. The map
//! entry for a key is dropped when its last holder or waiter lets go.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

#[derive(Default)]
pub struct QueryCoalescer {
    inflight: Mutex<HashMap<String, Slot>>,
}

/// One key's lock plus how many callers hold it or are queued on it.
struct Slot {
    lock: Arc<AsyncMutex<()>>,
    users: usize,
}

/// Held while computing a key. Releasing it lets the next waiter in.
///
/// The guard exists from the moment a caller joins the queue, so a caller
/// cancelled while waiting still gives its slot back.
pub struct InflightGuard<'a> {
    coalescer: &'a QueryCoalescer,
    key: String,
    held: Option<OwnedMutexGuard<()>>,
}

impl QueryCoalescer {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, key: &str) -> InflightGuard<'_> {
        let lock = {
            let mut inflight = self.inflight.lock();
            let slot = inflight.entry(key.to_string()).or_insert_with(|| Slot {
                lock: Arc::new(AsyncMutex::new(())),
                users: 0,
            });
            slot.users += 1;
            Arc::clone(&slot.lock)
        };
        let mut guard = InflightGuard {
            coalescer: self,
            key: key.to_string(),
            held: None,
        };
        guard.held = Some(lock.lock_owned().await);
        guard
    }

    /// Keys with a holder or waiters right now.
    pub fn inflight_keys(&self) -> usize {
        self.inflight.lock().len()
    }
}

impl Drop for InflightGuard<'_> {
    fn drop(&mut self) {
        self.held.take();
        let mut inflight = self.coalescer.inflight.lock();
        if let Some(slot) = inflight.get_mut(&self.key) {
            slot.users -= 1;
            if slot.users == 0 {
                inflight.remove(&self.key);
            }
        }
    }
}

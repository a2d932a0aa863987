// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Flat string-keyed JSON mapping used for memory seeds and snapshots.
pub type MemoryMap = Map<String, Value>;

/// Key-value store shared by every behaviour in a run.
///
/// Cloning is cheap and yields a handle onto the same store. Writes go through
/// an async `RwLock`, so they stay serialised even if sibling branches are ever
/// executed in parallel.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<MemoryMap>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(initial: MemoryMap) -> Self {
        Self {
            inner: Arc::new(RwLock::new(initial)),
        }
    }

    pub async fn get(&self, key: &str) -> Option<Value> {
        self.inner.read().await.get(key).cloned()
    }

    /// Store `value` under `key`, returning the previous value.
    pub async fn set(&self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.inner.write().await.insert(key.into(), value)
    }

    pub async fn remove(&self, key: &str) -> Option<Value> {
        self.inner.write().await.remove(key)
    }

    pub async fn contains_key(&self, key: &str) -> bool {
        self.inner.read().await.contains_key(key)
    }

    pub async fn snapshot(&self) -> MemoryMap {
        self.inner.read().await.clone()
    }
}

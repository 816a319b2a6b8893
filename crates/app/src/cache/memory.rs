//! In-process page cache.

use std::time::Duration;

use async_trait::async_trait;
use moka::sync::Cache;

use super::{CacheError, CacheNamespace, PageCache};

const MAX_ENTRIES_PER_NAMESPACE: u64 = 10_000;

/// Page cache held in process memory, one `moka` cache per namespace.
#[derive(Debug, Clone)]
pub struct MemoryPageCache {
    products: Cache<String, String>,
}

impl MemoryPageCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            products: Self::build(ttl),
        }
    }

    fn build(ttl: Duration) -> Cache<String, String> {
        Cache::builder()
            .max_capacity(MAX_ENTRIES_PER_NAMESPACE)
            .time_to_live(ttl)
            .build()
    }

    fn namespace(&self, namespace: CacheNamespace) -> &Cache<String, String> {
        match namespace {
            CacheNamespace::Products => &self.products,
        }
    }
}

#[async_trait]
impl PageCache for MemoryPageCache {
    async fn get(
        &self,
        namespace: CacheNamespace,
        key: String,
    ) -> Result<Option<String>, CacheError> {
        Ok(self.namespace(namespace).get(&key))
    }

    async fn put(
        &self,
        namespace: CacheNamespace,
        key: String,
        value: String,
    ) -> Result<(), CacheError> {
        self.namespace(namespace).insert(key, value);

        Ok(())
    }

    async fn evict_all(&self, namespace: CacheNamespace) -> Result<(), CacheError> {
        self.namespace(namespace).invalidate_all();

        Ok(())
    }
}

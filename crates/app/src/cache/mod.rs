//! Response cache
//!
//! Listing pages are memoised as JSON strings under a namespace. Writers
//! evict a whole namespace at once; there is no per-key invalidation.

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

mod memory;
mod redis_store;

pub use memory::MemoryPageCache;
pub use redis_store::RedisPageCache;

/// Entries live this long after being written, however often they are read.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Group of entries evicted together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheNamespace {
    Products,
}

impl CacheNamespace {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Products => "products",
        }
    }
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache backend error")]
    Redis(#[from] ::redis::RedisError),
}

#[automock]
#[async_trait]
pub trait PageCache: Send + Sync {
    /// Look up a cached value.
    async fn get(&self, namespace: CacheNamespace, key: String)
    -> Result<Option<String>, CacheError>;

    /// Store a value for the cache's configured time-to-live.
    async fn put(
        &self,
        namespace: CacheNamespace,
        key: String,
        value: String,
    ) -> Result<(), CacheError>;

    /// Drop every entry of the namespace.
    async fn evict_all(&self, namespace: CacheNamespace) -> Result<(), CacheError>;
}

//! Redis page cache.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    time::Duration,
};

use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisResult, aio::ConnectionManager};

use super::{CacheError, CacheNamespace, PageCache};

const SCAN_BATCH: usize = 500;

/// Page cache shared between instances through Redis.
///
/// Keys are `"{namespace}::{key}"`. Eviction walks the namespace with `SCAN`
/// rather than `KEYS` so a large cache does not stall the server.
#[derive(Clone)]
pub struct RedisPageCache {
    connection: ConnectionManager,
    ttl: Duration,
}

impl RedisPageCache {
    /// Connect and verify the server answers `PING`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the server is unreachable.
    pub async fn connect(url: &str, ttl: Duration) -> RedisResult<Self> {
        let client = Client::open(url)?;
        let mut connection = ConnectionManager::new(client).await?;

        let _: String = redis::cmd("PING").query_async(&mut connection).await?;

        Ok(Self { connection, ttl })
    }

    fn ttl_seconds(&self) -> u64 {
        self.ttl.as_secs().max(1)
    }
}

impl Debug for RedisPageCache {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("RedisPageCache")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

fn entry_key(namespace: CacheNamespace, key: &str) -> String {
    format!("{}::{key}", namespace.as_str())
}

fn namespace_pattern(namespace: CacheNamespace) -> String {
    format!("{}::*", namespace.as_str())
}

#[async_trait]
impl PageCache for RedisPageCache {
    async fn get(
        &self,
        namespace: CacheNamespace,
        key: String,
    ) -> Result<Option<String>, CacheError> {
        let mut connection = self.connection.clone();

        let value: Option<String> = connection.get(entry_key(namespace, &key)).await?;

        Ok(value)
    }

    async fn put(
        &self,
        namespace: CacheNamespace,
        key: String,
        value: String,
    ) -> Result<(), CacheError> {
        let mut connection = self.connection.clone();

        connection
            .set_ex::<_, _, ()>(entry_key(namespace, &key), value, self.ttl_seconds())
            .await?;

        Ok(())
    }

    async fn evict_all(&self, namespace: CacheNamespace) -> Result<(), CacheError> {
        let mut connection = self.connection.clone();
        let pattern = namespace_pattern(namespace);
        let mut cursor = 0_u64;

        loop {
            let (next, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut connection)
                .await?;

            if !keys.is_empty() {
                connection.del::<_, ()>(keys).await?;
            }

            if next == 0 {
                break;
            }

            cursor = next;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
    use testcontainers_modules::redis::Redis;
    use testresult::TestResult;

    use super::*;

    async fn start_redis(ttl: Duration) -> (ContainerAsync<Redis>, RedisPageCache) {
        let container = Redis::default()
            .with_tag("7-alpine")
            .start()
            .await
            .expect("Failed to start Redis container");

        let port = container
            .get_host_port_ipv4(6379)
            .await
            .expect("Failed to get container port");

        let host = std::env::var("TESTCONTAINERS_HOST_OVERRIDE")
            .unwrap_or_else(|_| "localhost".to_string());

        let cache = RedisPageCache::connect(&format!("redis://{host}:{port}"), ttl)
            .await
            .expect("Failed to connect to Redis");

        (container, cache)
    }

    #[test]
    fn entry_keys_are_prefixed_with_namespace() {
        assert_eq!(
            entry_key(CacheNamespace::Products, "[0,10]"),
            "products::[0,10]"
        );
        assert_eq!(namespace_pattern(CacheNamespace::Products), "products::*");
    }

    #[tokio::test]
    async fn connect_fails_when_server_is_unreachable() {
        let result = RedisPageCache::connect("redis://127.0.0.1:1", Duration::from_secs(1)).await;

        assert!(result.is_err(), "nothing listens on port 1");
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn put_stores_value_with_expiry() -> TestResult {
        let (_container, cache) = start_redis(Duration::from_secs(3600)).await;

        cache
            .put(CacheNamespace::Products, "[0,10]".to_string(), "page".to_string())
            .await?;

        let hit = cache.get(CacheNamespace::Products, "[0,10]".to_string()).await?;
        let miss = cache.get(CacheNamespace::Products, "[1,10]".to_string()).await?;

        assert_eq!(hit.as_deref(), Some("page"));
        assert_eq!(miss, None);

        let mut connection = cache.connection.clone();
        let ttl: i64 = connection.ttl("products::[0,10]").await?;

        assert!((1..=3600).contains(&ttl), "expected a 1h expiry, got {ttl}");

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn evict_all_clears_namespace_across_scan_batches() -> TestResult {
        let (_container, cache) = start_redis(Duration::from_secs(3600)).await;
        let entries = SCAN_BATCH * 2 + 7;

        for n in 0..entries {
            cache
                .put(CacheNamespace::Products, format!("[{n},10]"), "page".to_string())
                .await?;
        }

        let mut connection = cache.connection.clone();
        connection.set::<_, _, ()>("sessions::keep", "other").await?;

        cache.evict_all(CacheNamespace::Products).await?;

        let remaining: Vec<String> = redis::cmd("KEYS")
            .arg("products::*")
            .query_async(&mut connection)
            .await?;
        let kept: Option<String> = connection.get("sessions::keep").await?;

        assert!(remaining.is_empty(), "{} entries survived", remaining.len());
        assert_eq!(kept.as_deref(), Some("other"));

        let after = cache.get(CacheNamespace::Products, "[0,10]".to_string()).await?;

        assert_eq!(after, None);

        Ok(())
    }
}

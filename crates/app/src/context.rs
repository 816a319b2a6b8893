//! App Context

use std::{sync::Arc, time::Duration};

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    ai::{AiConfig, GeminiSummarizer, Summarizer},
    cache::{MemoryPageCache, PageCache, RedisPageCache},
    database::{self, Db},
    domain::{
        categories::{CategoriesService, PgCategoriesRepository, StoreCategoriesService},
        products::{
            PgProductsRepository, ProductsService, StoreProductsService, views::ImageBaseUrl,
        },
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

/// Everything needed to assemble the application services.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,

    /// Shared cache; the in-process cache is used when absent or unreachable.
    pub redis_url: Option<String>,

    pub cache_ttl: Duration,

    pub image_base_url: String,

    pub ai: AiConfig,
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub categories: Arc<dyn CategoriesService>,
    pub summarizer: Arc<dyn Summarizer>,
}

impl AppContext {
    /// Connect to the backing stores and build the services.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn connect(config: AppConfig) -> Result<Self, AppInitError> {
        let pool = database::connect(&config.database_url)
            .await
            .map_err(AppInitError::Database)?;

        let cache = page_cache(config.redis_url.as_deref(), config.cache_ttl).await;

        Ok(Self::from_parts(
            Db::new(pool),
            cache,
            ImageBaseUrl::new(config.image_base_url),
            Arc::new(GeminiSummarizer::new(config.ai)),
        ))
    }

    #[must_use]
    pub fn from_parts(
        db: Db,
        cache: Arc<dyn PageCache>,
        images: ImageBaseUrl,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        Self {
            products: Arc::new(StoreProductsService::new(
                Arc::new(PgProductsRepository::new(db.clone())),
                cache.clone(),
                images,
            )),
            categories: Arc::new(StoreCategoriesService::new(
                Arc::new(PgCategoriesRepository::new(db)),
                cache,
            )),
            summarizer,
        }
    }
}

async fn page_cache(redis_url: Option<&str>, ttl: Duration) -> Arc<dyn PageCache> {
    if let Some(url) = redis_url.filter(|url| !url.trim().is_empty()) {
        match RedisPageCache::connect(url, ttl).await {
            Ok(cache) => {
                info!(ttl_seconds = ttl.as_secs(), "using redis page cache");

                return Arc::new(cache);
            }
            Err(error) => {
                warn!(%error, "redis unavailable, falling back to in-process page cache");
            }
        }
    }

    info!(ttl_seconds = ttl.as_secs(), "using in-process page cache");

    Arc::new(MemoryPageCache::new(ttl))
}

//! Server configuration module

use std::time::Duration;

use clap::Parser;

use storefront_app::context::AppConfig;

use crate::config::{
    ai::AiSettings, cache::CacheConfig, catalog::CatalogConfig, db::DatabaseConfig,
    observability::ObservabilityConfig, server::ServerRuntimeConfig,
};

pub(crate) use observability::{LogFormat, LoggingConfig};

pub(crate) mod ai;
pub(crate) mod cache;
pub(crate) mod catalog;
pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;

/// Storefront JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "storefront-json", about = "Storefront JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Request observability settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Listing cache settings.
    #[command(flatten)]
    pub cache: CacheConfig,

    /// Product catalog presentation settings.
    #[command(flatten)]
    pub catalog: CatalogConfig,

    /// Generative-AI provider settings.
    #[command(flatten)]
    pub ai: AiSettings,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Settings the application services are assembled from.
    #[must_use]
    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            database_url: self.database.database_url.clone(),
            redis_url: self.cache.redis_url.clone(),
            cache_ttl: Duration::from_secs(self.cache.cache_ttl_seconds),
            image_base_url: self.catalog.image_base_url.clone(),
            ai: self.ai.to_ai_config(),
        }
    }
}

//! Cache Config

use clap::Args;

/// Listing cache settings.
#[derive(Debug, Args)]
pub struct CacheConfig {
    /// Redis connection string; the in-process cache is used when unset
    #[arg(long, env = "REDIS_URL")]
    pub redis_url: Option<String>,

    /// Seconds a cached listing page lives before it expires
    #[arg(long, env = "CACHE_TTL_SECONDS", default_value_t = 3_600_u64)]
    pub cache_ttl_seconds: u64,
}

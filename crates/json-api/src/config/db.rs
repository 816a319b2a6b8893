//! Database Config

use clap::Args;

/// Catalog database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string for the catalog store
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,
}

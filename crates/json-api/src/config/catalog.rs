//! Catalog Config

use clap::Args;

/// Product presentation settings.
#[derive(Debug, Args)]
pub struct CatalogConfig {
    /// Base URL product image names are resolved against; keep the trailing slash
    #[arg(long, env = "IMAGE_BASE_URL", default_value = "http://localhost:8080/images/")]
    pub image_base_url: String,
}

pub mod http_fetcher;
pub mod image;

use async_trait::async_trait;

use crate::app::Result;

pub use http_fetcher::HttpFetcher;
pub use image::ImageDownloader;

/// Opaque byte fetch over HTTP.
#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

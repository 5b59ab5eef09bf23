//! Browser-driven article collection.
//!
//! The browser is reached only through the [`Session`] trait so the filter and
//! collector can run against headless Chrome or an in-memory page.
//!
//! # Architecture
//!
//! ```text
//! Session → CategoryFilter → ArticleCollector → Vec<NewsArticle>
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use newsgrab::scraper::{ArticleCollector, CategoryFilter, ChromeSession, ScraperConfig};
//!
//! let config = ScraperConfig::default();
//! let mut session = ChromeSession::launch(&config, true).await?;
//! session.navigate("https://finance.yahoo.com/news/").await?;
//!
//! CategoryFilter::new(&session, &config, &ctx).apply("Business").await?;
//! let articles = ArticleCollector::new(&session, &config, &classifier, &images, &ctx)
//!     .collect()
//!     .await;
//!
//! session.close().await?;
//! ```

mod category;
mod chrome;
mod collector;
mod config;
mod scripts;

#[cfg(test)]
pub(crate) mod mock;

pub use category::CategoryFilter;
pub use chrome::ChromeSession;
pub use collector::ArticleCollector;
pub use config::{RetryPolicy, ScraperConfig};

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use crate::app::Result;

/// Browser automation capability used by the scraper.
///
/// Every wait is bounded by the timeout passed in; exceeding it returns
/// [`GrabError::Timeout`](crate::app::GrabError::Timeout).
#[async_trait]
pub trait Session: Send + Sync {
    /// Handle to an element in the current page
    type Element: Send + Sync;

    /// Load `url` in the session's page
    async fn navigate(&self, url: &str) -> Result<()>;

    /// All elements matching `selector`, in document order
    async fn find_all(&self, selector: &str) -> Result<Vec<Self::Element>>;

    /// First descendant of `element` matching `selector`
    async fn find_within(&self, element: &Self::Element, selector: &str)
        -> Result<Self::Element>;

    /// Poll for a descendant of `element` until it appears or `timeout` passes
    async fn wait_within(
        &self,
        element: &Self::Element,
        selector: &str,
        timeout: Duration,
    ) -> Result<Self::Element>;

    /// Wait until the first match of `selector` is visible
    async fn wait_until_visible(&self, selector: &str, timeout: Duration) -> Result<()>;

    /// Wait until `selector` matches anything in the document
    async fn wait_until_present(&self, selector: &str, timeout: Duration) -> Result<()>;

    async fn click(&self, element: &Self::Element) -> Result<()>;

    /// Rendered text of `element`
    async fn text(&self, element: &Self::Element) -> Result<String>;

    async fn attribute(&self, element: &Self::Element, name: &str) -> Result<Option<String>>;

    async fn execute_script(&self, script: &str) -> Result<()>;

    /// Save a PNG of the page to `path`
    async fn screenshot(&self, path: &Path) -> Result<()>;

    /// Release the browser. The session is unusable afterwards.
    async fn close(&mut self) -> Result<()>;
}

//! # newsgrab
//!
//! Scrapes one category of a news site into a spreadsheet and a text report.
//!
//! ## Architecture
//!
//! A run is strictly sequential:
//!
//! ```text
//! CategoryFilter → ArticleCollector → TextClassifier + ImageDownloader → ResultPersister
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! # Uses $ROBOT_CONFIG, else devdata/workitems/work-item.json
//! newsgrab
//!
//! # Explicit work item
//! newsgrab devdata/workitems/work-item.json
//! ```

/// Run context and error types.
///
/// [`RunContext`](app::RunContext) captures the run timestamp once and names
/// every output artifact from it.
pub mod app;

/// Money-mention detection and search-phrase counting.
pub mod classifier;

/// Command-line interface and run orchestration.
pub mod cli;

/// Work-item configuration loading and validation.
pub mod config;

/// Core domain models.
///
/// - [`NewsArticle`](domain::NewsArticle): one extracted, classified article
/// - [`RawArticle`](domain::RawArticle): fields read off the page before enrichment
pub mod domain;

/// HTTP fetching and image downloads.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for byte fetches
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
/// - [`ImageDownloader`](fetcher::ImageDownloader): Stores article images, or a placeholder
pub mod fetcher;

/// Browser-driven category filtering and article collection.
///
/// Uses headless Chrome via chromiumoxide behind the [`Session`](scraper::Session) trait.
pub mod scraper;

/// Spreadsheet and text-report output.
pub mod store;

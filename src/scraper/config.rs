use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Bounded retry budget for applying the category filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Attempts before the run is aborted (default: 3)
    pub max_attempts: u32,

    /// How long to wait for the category navigation to become visible (default: 10000)
    pub visible_timeout_ms: u64,

    /// How long to wait for the article list to re-render after the click (default: 10000)
    pub render_timeout_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            visible_timeout_ms: 10_000,
            render_timeout_ms: 10_000,
        }
    }
}

impl RetryPolicy {
    pub fn visible_timeout(&self) -> Duration {
        Duration::from_millis(self.visible_timeout_ms)
    }

    pub fn render_timeout(&self) -> Duration {
        Duration::from_millis(self.render_timeout_ms)
    }
}

/// Configuration for the browser-driven scraper
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Navigation list items holding the category controls
    pub category_item_selector: String,

    /// Clickable label inside a navigation item
    pub category_label_selector: String,

    /// Element whose presence marks the article list as rendered
    pub rendered_marker_selector: String,

    /// One article in the stream
    pub article_selector: String,

    /// Title inside an article (required)
    pub title_selector: String,

    /// Summary inside an article
    pub description_selector: String,

    /// Image inside an article
    pub image_selector: String,

    /// Maximum number of articles collected (default: 20)
    pub target_articles: usize,

    /// Pause after each scroll for lazy content in milliseconds (default: 4000)
    pub settle_ms: u64,

    /// Each scroll moves `scrollHeight / scroll_divisor` pixels (default: 3)
    pub scroll_divisor: u32,

    /// Hard ceiling on scroll rounds (default: 50)
    pub max_scroll_rounds: usize,

    /// How long to wait for an article's description in milliseconds (default: 3000)
    pub description_timeout_ms: u64,

    /// Interval between polls while waiting on page state (default: 250)
    pub poll_interval_ms: u64,

    /// Image download timeout in seconds (default: 30)
    pub image_timeout_secs: u64,

    /// User agent string for the browser and image downloads
    pub user_agent: Option<String>,

    /// Retry budget for the category filter
    pub category_retry: RetryPolicy,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            category_item_selector: "ul._yb_c8hmf2 li".to_string(),
            category_label_selector: "span._yb_5tqys3".to_string(),
            rendered_marker_selector: "h3".to_string(),
            article_selector: "li.stream-item".to_string(),
            title_selector: "h3.stream-item-title".to_string(),
            description_selector: "p[data-test-locator='stream-item-summary']".to_string(),
            image_selector: "img".to_string(),
            target_articles: 20,
            settle_ms: 4000,
            scroll_divisor: 3,
            max_scroll_rounds: 50,
            description_timeout_ms: 3000,
            poll_interval_ms: 250,
            image_timeout_secs: 30,
            user_agent: Some(
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                    .to_string(),
            ),
            category_retry: RetryPolicy::default(),
        }
    }
}

impl ScraperConfig {
    /// Get the settle pause as a Duration
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    /// Get the description wait as a Duration
    pub fn description_timeout(&self) -> Duration {
        Duration::from_millis(self.description_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn image_timeout(&self) -> Duration {
        Duration::from_secs(self.image_timeout_secs)
    }
}

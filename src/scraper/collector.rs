use tracing::{debug, info, warn};

use crate::app::{GrabError, Result, RunContext};
use crate::classifier::TextClassifier;
use crate::domain::{NewsArticle, RawArticle, DESCRIPTION_PLACEHOLDER};
use crate::fetcher::image::title_snippet;
use crate::fetcher::ImageDownloader;
use crate::scraper::config::ScraperConfig;
use crate::scraper::scripts;
use crate::scraper::Session;

/// Attributes tried, in order, for an article's image URL.
const IMAGE_ATTRIBUTES: [&str; 2] = ["src", "data-src"];

/// Scrolls the stream, then extracts and classifies each article.
pub struct ArticleCollector<'a, S: Session> {
    session: &'a S,
    config: &'a ScraperConfig,
    classifier: &'a TextClassifier,
    images: &'a ImageDownloader,
    ctx: &'a RunContext,
}

impl<'a, S: Session> ArticleCollector<'a, S> {
    pub fn new(
        session: &'a S,
        config: &'a ScraperConfig,
        classifier: &'a TextClassifier,
        images: &'a ImageDownloader,
        ctx: &'a RunContext,
    ) -> Self {
        Self {
            session,
            config,
            classifier,
            images,
            ctx,
        }
    }

    /// Collect up to `target_articles` records in page order.
    ///
    /// Articles without a title, or that fail mid-extraction, are skipped.
    pub async fn collect(&self) -> Vec<NewsArticle> {
        info!("Extracting news data...");
        let elements = match self.scroll_and_load().await {
            Ok(elements) => elements,
            Err(e) => {
                warn!("Failed to load article stream: {}", e);
                return Vec::new();
            }
        };

        let mut articles = Vec::with_capacity(elements.len());
        for (index, element) in elements.iter().enumerate() {
            match self.extract(element).await {
                Ok(raw) => {
                    let article = self.enrich(raw).await;
                    debug!("Extracted news item: {:?}", article);
                    articles.push(article);
                }
                Err(e) => warn!("Skipping article {}: {}", index + 1, e),
            }
        }

        info!(
            "Extracted {} of {} articles",
            articles.len(),
            elements.len()
        );
        articles
    }

    /// Scroll until the stream holds `target_articles` items or stops growing.
    pub async fn scroll_and_load(&self) -> Result<Vec<S::Element>> {
        let target = self.config.target_articles;
        let scroll = scripts::scroll_by_fraction(self.config.scroll_divisor);

        info!("Scrolling and loading news articles...");
        let mut elements = Vec::new();
        let mut previous_count = 0;
        let mut rounds = 0;

        while elements.len() < target && rounds < self.config.max_scroll_rounds {
            rounds += 1;
            self.session.execute_script(&scroll).await?;
            tokio::time::sleep(self.config.settle()).await;

            elements = self.session.find_all(&self.config.article_selector).await?;
            info!("Loaded {} articles...", elements.len());

            if elements.len() == previous_count {
                info!("No more articles loaded, exiting scroll loop");
                break;
            }
            previous_count = elements.len();
        }

        elements.truncate(target);
        Ok(elements)
    }

    /// Read title, description and image URL off one stream item.
    async fn extract(&self, element: &S::Element) -> Result<RawArticle> {
        let title_element = self
            .session
            .find_within(element, &self.config.title_selector)
            .await
            .map_err(|_| GrabError::ElementNotFound("article title".into()))?;

        let title = self.session.text(&title_element).await?.trim().to_string();
        if title.is_empty() {
            return Err(GrabError::ElementNotFound("article title text".into()));
        }

        let mut raw = RawArticle::new(title);
        raw.description = self.description(element, &raw.title).await;
        raw.image_url = self.image_url(element).await;
        Ok(raw)
    }

    async fn description(&self, element: &S::Element, title: &str) -> String {
        let found = self
            .session
            .wait_within(
                element,
                &self.config.description_selector,
                self.config.description_timeout(),
            )
            .await;

        let text = match found {
            Ok(description) => self.session.text(&description).await,
            Err(e) => Err(e),
        };

        match text {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => DESCRIPTION_PLACEHOLDER.to_string(),
            Err(e) => {
                debug!("No description for '{}': {}", title_snippet(title), e);
                DESCRIPTION_PLACEHOLDER.to_string()
            }
        }
    }

    async fn image_url(&self, element: &S::Element) -> Option<String> {
        let image = self
            .session
            .find_within(element, &self.config.image_selector)
            .await
            .ok()?;

        for name in IMAGE_ATTRIBUTES {
            match self.session.attribute(&image, name).await {
                Ok(Some(url)) if !url.trim().is_empty() => {
                    debug!("Extracted image URL: {}", url);
                    return Some(url);
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("Failed to read image attribute '{}': {}", name, e);
                    return None;
                }
            }
        }
        None
    }

    async fn enrich(&self, raw: RawArticle) -> NewsArticle {
        let classification = self.classifier.classify(&raw.title, &raw.description);
        let picture = self
            .images
            .download(raw.image_url.as_deref(), &raw.title)
            .await;

        NewsArticle::from_raw(raw, self.ctx.date(), picture, classification)
    }
}

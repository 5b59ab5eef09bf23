use tracing::{error, info, warn};

use crate::app::{GrabError, Result, RunContext};
use crate::scraper::config::{RetryPolicy, ScraperConfig};
use crate::scraper::Session;

/// Applies the category filter by clicking the matching navigation control.
pub struct CategoryFilter<'a, S: Session> {
    session: &'a S,
    config: &'a ScraperConfig,
    ctx: &'a RunContext,
}

impl<'a, S: Session> CategoryFilter<'a, S> {
    pub fn new(session: &'a S, config: &'a ScraperConfig, ctx: &'a RunContext) -> Self {
        Self {
            session,
            config,
            ctx,
        }
    }

    fn policy(&self) -> &RetryPolicy {
        &self.config.category_retry
    }

    /// Click the control labelled `category` and wait for the list to re-render.
    ///
    /// Each failed attempt leaves a screenshot in the output directory. Running
    /// out of attempts is fatal and reported once as [`GrabError::CategoryNotFound`].
    /// An empty category leaves the page as it is.
    pub async fn apply(&self, category: &str) -> Result<()> {
        let category = category.trim();
        if category.is_empty() {
            info!("No category configured, using page as-is");
            return Ok(());
        }

        let attempts = self.policy().max_attempts.max(1);
        info!("Filtering news by category: {}", category);

        for attempt in 1..=attempts {
            match self.attempt(category).await {
                Ok(()) => {
                    info!("Category '{}' applied on attempt {}", category, attempt);
                    return Ok(());
                }
                Err(e) => {
                    warn!(
                        "Category selection attempt {}/{} failed: {}",
                        attempt, attempts, e
                    );
                    let path = self.ctx.screenshot_path(attempt);
                    match self.session.screenshot(&path).await {
                        Ok(()) => info!("Saved diagnostic screenshot: {}", path.display()),
                        Err(e) => warn!("Failed to capture screenshot: {}", e),
                    }
                }
            }
        }

        error!(
            "Category '{}' not found after {} attempts",
            category, attempts
        );
        Err(GrabError::CategoryNotFound {
            category: category.to_string(),
            attempts,
        })
    }

    async fn attempt(&self, category: &str) -> Result<()> {
        let policy = self.policy();

        self.session
            .wait_until_visible(&self.config.category_item_selector, policy.visible_timeout())
            .await?;

        let items = self
            .session
            .find_all(&self.config.category_item_selector)
            .await?;

        let wanted = category.to_lowercase();
        for item in &items {
            let Ok(label) = self
                .session
                .find_within(item, &self.config.category_label_selector)
                .await
            else {
                continue;
            };

            let text = self.session.text(&label).await?;
            if text.trim().to_lowercase() != wanted {
                continue;
            }

            info!("Found category '{}', clicking it now", category);
            self.session.click(&label).await?;
            self.session
                .wait_until_present(
                    &self.config.rendered_marker_selector,
                    policy.render_timeout(),
                )
                .await?;
            return Ok(());
        }

        Err(GrabError::ElementNotFound(format!(
            "category control '{}' among {} navigation items",
            category,
            items.len()
        )))
    }
}

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::element::Element;
use chromiumoxide::page::{Page, ScreenshotParams};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::app::{GrabError, Result};
use crate::scraper::config::ScraperConfig;
use crate::scraper::scripts;
use crate::scraper::Session;

const WINDOW_WIDTH: u32 = 1920;
const WINDOW_HEIGHT: u32 = 1080;

/// Chrome-backed [`Session`] using chromiumoxide.
///
/// Owns one browser and one page for the lifetime of the run.
pub struct ChromeSession {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    poll_interval: Duration,
    closed: bool,
}

impl ChromeSession {
    /// Launch Chrome and open a blank page.
    pub async fn launch(config: &ScraperConfig, headless: bool) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .window_size(WINDOW_WIDTH, WINDOW_HEIGHT)
            .arg("--no-sandbox")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage");

        if !headless {
            builder = builder.with_head();
        }

        let browser_config = builder
            .build()
            .map_err(|e| GrabError::Browser(format!("Failed to build browser config: {}", e)))?;

        let (browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
            GrabError::Browser(format!(
                "Failed to launch browser: {}. Is Chrome or Chromium installed and in PATH?",
                e
            ))
        })?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser handler event error: {}", e);
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| GrabError::Browser(format!("Failed to create page: {}", e)))?;

        if let Some(ref ua) = config.user_agent {
            page.set_user_agent(ua)
                .await
                .map_err(|e| GrabError::Browser(format!("Failed to set user agent: {}", e)))?;
        }

        info!("Browser launched (headless: {})", headless);

        Ok(Self {
            browser,
            page,
            handler,
            poll_interval: config.poll_interval(),
            closed: false,
        })
    }

    async fn evaluate_bool(&self, script: String) -> Result<bool> {
        self.page
            .evaluate(script)
            .await
            .map_err(|e| GrabError::Browser(format!("Script execution failed: {}", e)))?
            .into_value::<bool>()
            .map_err(|e| GrabError::Browser(format!("Failed to parse result: {:?}", e)))
    }
}

/// Repeatedly run `probe` until it yields a value or `timeout` elapses.
async fn poll_until<T, F, Fut>(
    what: &str,
    timeout: Duration,
    interval: Duration,
    mut probe: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Option<T>>,
{
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(value) = probe().await {
            return Ok(value);
        }
        if Instant::now() >= deadline {
            return Err(GrabError::Timeout {
                what: what.to_string(),
                timeout_ms: timeout.as_millis() as u64,
            });
        }
        tokio::time::sleep(interval).await;
    }
}

#[async_trait]
impl Session for ChromeSession {
    type Element = Element;

    async fn navigate(&self, url: &str) -> Result<()> {
        info!("Opening site: {}", url);
        self.page
            .goto(url)
            .await
            .map_err(|e| GrabError::Browser(format!("Navigation failed: {}", e)))?;
        self.page
            .wait_for_navigation()
            .await
            .map_err(|e| GrabError::Browser(format!("Navigation failed: {}", e)))?;
        Ok(())
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<Element>> {
        self.page
            .find_elements(selector)
            .await
            .map_err(|e| GrabError::Browser(format!("Query '{}' failed: {}", selector, e)))
    }

    async fn find_within(&self, element: &Element, selector: &str) -> Result<Element> {
        element
            .find_element(selector)
            .await
            .map_err(|_| GrabError::ElementNotFound(selector.to_string()))
    }

    async fn wait_within(
        &self,
        element: &Element,
        selector: &str,
        timeout: Duration,
    ) -> Result<Element> {
        poll_until(selector, timeout, self.poll_interval, move || async move {
            element.find_element(selector).await.ok()
        })
        .await
    }

    async fn wait_until_visible(&self, selector: &str, timeout: Duration) -> Result<()> {
        poll_until(selector, timeout, self.poll_interval, move || async move {
            match self.evaluate_bool(scripts::visibility_probe(selector)).await {
                Ok(true) => Some(()),
                _ => None,
            }
        })
        .await
    }

    async fn wait_until_present(&self, selector: &str, timeout: Duration) -> Result<()> {
        poll_until(selector, timeout, self.poll_interval, move || async move {
            match self.evaluate_bool(scripts::presence_probe(selector)).await {
                Ok(true) => Some(()),
                _ => None,
            }
        })
        .await
    }

    async fn click(&self, element: &Element) -> Result<()> {
        element
            .click()
            .await
            .map_err(|e| GrabError::Browser(format!("Click failed: {}", e)))?;
        Ok(())
    }

    async fn text(&self, element: &Element) -> Result<String> {
        let text = element
            .inner_text()
            .await
            .map_err(|e| GrabError::Browser(format!("Failed to read text: {}", e)))?;
        Ok(text.unwrap_or_default())
    }

    async fn attribute(&self, element: &Element, name: &str) -> Result<Option<String>> {
        element
            .attribute(name)
            .await
            .map_err(|e| GrabError::Browser(format!("Failed to read attribute '{}': {}", name, e)))
    }

    async fn execute_script(&self, script: &str) -> Result<()> {
        self.page
            .evaluate(script)
            .await
            .map_err(|e| GrabError::Browser(format!("Script execution failed: {}", e)))?;
        Ok(())
    }

    async fn screenshot(&self, path: &Path) -> Result<()> {
        self.page
            .save_screenshot(ScreenshotParams::builder().full_page(true).build(), path)
            .await
            .map_err(|e| GrabError::Browser(format!("Screenshot failed: {}", e)))?;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        info!("Closing browser");

        if let Err(e) = self.page.clone().close().await {
            warn!("Failed to close page: {}", e);
        }

        let result = self
            .browser
            .close()
            .await
            .map(|_| ())
            .map_err(|e| GrabError::Browser(format!("Failed to close browser: {}", e)));

        if let Err(e) = self.browser.wait().await {
            warn!("Browser process did not exit cleanly: {}", e);
        }
        self.handler.abort();

        result
    }
}

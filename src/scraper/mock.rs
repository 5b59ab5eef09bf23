//! In-memory [`Session`] for exercising the filter and collector.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::app::{GrabError, Result};
use crate::scraper::{ScraperConfig, Session};

#[derive(Debug, Clone, Default)]
pub(crate) struct MockArticle {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    /// Reading the title text fails with a browser error
    pub broken: bool,
}

impl MockArticle {
    pub fn titled(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            description: Some(format!("Summary of {}", title)),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MockElement {
    NavItem(usize),
    Label(usize),
    Article(usize),
    Title(usize),
    Description(usize),
    Image(usize),
}

pub(crate) struct MockSession {
    selectors: ScraperConfig,
    categories: Vec<String>,
    articles: Vec<MockArticle>,
    /// Article counts returned by successive stream queries; the last one repeats
    counts: Mutex<VecDeque<usize>>,
    last_count: Mutex<usize>,
    rendered: AtomicBool,
    pub scrolls: AtomicUsize,
    pub article_queries: AtomicUsize,
    pub screenshots: Mutex<Vec<PathBuf>>,
    pub clicked: Mutex<Vec<String>>,
    pub navigations: Mutex<Vec<String>>,
    pub closed: AtomicBool,
}

impl MockSession {
    pub fn new(selectors: &ScraperConfig) -> Self {
        Self {
            selectors: selectors.clone(),
            categories: Vec::new(),
            articles: Vec::new(),
            counts: Mutex::new(VecDeque::new()),
            last_count: Mutex::new(0),
            rendered: AtomicBool::new(false),
            scrolls: AtomicUsize::new(0),
            article_queries: AtomicUsize::new(0),
            screenshots: Mutex::new(Vec::new()),
            clicked: Mutex::new(Vec::new()),
            navigations: Mutex::new(Vec::new()),
            closed: AtomicBool::new(false),
        }
    }

    pub fn with_categories(mut self, categories: &[&str]) -> Self {
        self.categories = categories.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Articles on the page. Without [`with_counts`](Self::with_counts) every
    /// query returns all of them.
    pub fn with_articles(mut self, articles: Vec<MockArticle>) -> Self {
        *self.last_count.lock().unwrap() = articles.len();
        self.articles = articles;
        self
    }

    pub fn with_counts(self, counts: &[usize]) -> Self {
        *self.counts.lock().unwrap() = counts.iter().copied().collect();
        self
    }

    pub fn screenshot_count(&self) -> usize {
        self.screenshots.lock().unwrap().len()
    }

    fn next_count(&self) -> usize {
        let mut last = self.last_count.lock().unwrap();
        if let Some(count) = self.counts.lock().unwrap().pop_front() {
            *last = count;
        }
        (*last).min(self.articles.len())
    }

    fn article(&self, index: usize) -> &MockArticle {
        &self.articles[index]
    }

    fn timeout(what: &str, timeout: Duration) -> GrabError {
        GrabError::Timeout {
            what: what.to_string(),
            timeout_ms: timeout.as_millis() as u64,
        }
    }
}

#[async_trait]
impl Session for MockSession {
    type Element = MockElement;

    async fn navigate(&self, url: &str) -> Result<()> {
        self.navigations.lock().unwrap().push(url.to_string());
        Ok(())
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<MockElement>> {
        if selector == self.selectors.article_selector {
            self.article_queries.fetch_add(1, Ordering::SeqCst);
            return Ok((0..self.next_count()).map(MockElement::Article).collect());
        }
        if selector == self.selectors.category_item_selector {
            return Ok((0..self.categories.len()).map(MockElement::NavItem).collect());
        }
        Ok(Vec::new())
    }

    async fn find_within(&self, element: &MockElement, selector: &str) -> Result<MockElement> {
        let found = match *element {
            MockElement::NavItem(i) if selector == self.selectors.category_label_selector => {
                Some(MockElement::Label(i))
            }
            MockElement::Article(i) if selector == self.selectors.title_selector => {
                self.article(i).title.as_ref().map(|_| MockElement::Title(i))
            }
            MockElement::Article(i) if selector == self.selectors.image_selector => {
                self.article(i).image.as_ref().map(|_| MockElement::Image(i))
            }
            _ => None,
        };
        found.ok_or_else(|| GrabError::ElementNotFound(selector.to_string()))
    }

    async fn wait_within(
        &self,
        element: &MockElement,
        selector: &str,
        timeout: Duration,
    ) -> Result<MockElement> {
        match *element {
            MockElement::Article(i)
                if selector == self.selectors.description_selector
                    && self.article(i).description.is_some() =>
            {
                Ok(MockElement::Description(i))
            }
            _ => Err(Self::timeout(selector, timeout)),
        }
    }

    async fn wait_until_visible(&self, selector: &str, timeout: Duration) -> Result<()> {
        if selector == self.selectors.category_item_selector && !self.categories.is_empty() {
            Ok(())
        } else {
            Err(Self::timeout(selector, timeout))
        }
    }

    async fn wait_until_present(&self, selector: &str, timeout: Duration) -> Result<()> {
        let rendered = self.rendered.load(Ordering::SeqCst);
        if rendered || selector != self.selectors.rendered_marker_selector {
            Ok(())
        } else {
            Err(Self::timeout(selector, timeout))
        }
    }

    async fn click(&self, element: &MockElement) -> Result<()> {
        if let MockElement::Label(i) = *element {
            self.clicked.lock().unwrap().push(self.categories[i].clone());
            self.rendered.store(true, Ordering::SeqCst);
        }
        Ok(())
    }

    async fn text(&self, element: &MockElement) -> Result<String> {
        match *element {
            MockElement::Label(i) => Ok(self.categories[i].clone()),
            MockElement::Title(i) => {
                let article = self.article(i);
                if article.broken {
                    return Err(GrabError::Browser("stale element reference".into()));
                }
                Ok(article.title.clone().unwrap_or_default())
            }
            MockElement::Description(i) => {
                Ok(self.article(i).description.clone().unwrap_or_default())
            }
            _ => Ok(String::new()),
        }
    }

    async fn attribute(&self, element: &MockElement, name: &str) -> Result<Option<String>> {
        match *element {
            MockElement::Image(i) if name == "src" => Ok(self.article(i).image.clone()),
            _ => Ok(None),
        }
    }

    async fn execute_script(&self, script: &str) -> Result<()> {
        if script.contains("scrollBy") {
            self.scrolls.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }

    async fn screenshot(&self, path: &Path) -> Result<()> {
        std::fs::write(path, b"")?;
        self.screenshots.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

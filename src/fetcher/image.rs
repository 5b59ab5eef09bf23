use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};
use url::Url;

use crate::app::{GrabError, Result, RunContext};
use crate::domain::PICTURE_PLACEHOLDER;
use crate::fetcher::Fetcher;

/// Number of title characters kept in an image filename.
const TITLE_PREFIX_CHARS: usize = 15;

/// Downloads article images into the run's `images/` directory.
pub struct ImageDownloader {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    images_dir: PathBuf,
    category_prefix: String,
    stamp: String,
}

impl ImageDownloader {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>, ctx: &RunContext) -> Self {
        Self {
            fetcher,
            images_dir: ctx.images_dir().to_path_buf(),
            category_prefix: ctx.category_prefix(),
            stamp: ctx.stamp(),
        }
    }

    /// `{CATEGORY}_{sanitized title prefix}_{stamp}.jpg`
    pub fn filename_for(&self, title: &str) -> String {
        format!(
            "{}_{}_{}.jpg",
            self.category_prefix,
            sanitize_title(title),
            self.stamp
        )
    }

    /// Download `image_url` and return the stored filename.
    ///
    /// Never fails: a missing URL or any fetch/write error yields the placeholder.
    pub async fn download(&self, image_url: Option<&str>, title: &str) -> String {
        let Some(url) = image_url.map(str::trim).filter(|u| !u.is_empty()) else {
            return PICTURE_PLACEHOLDER.to_string();
        };

        match self.try_download(url, title).await {
            Ok(filename) => filename,
            Err(e) => {
                warn!(
                    "Failed to download image for '{}': {}",
                    title_snippet(title),
                    e
                );
                PICTURE_PLACEHOLDER.to_string()
            }
        }
    }

    async fn try_download(&self, url: &str, title: &str) -> Result<String> {
        let parsed = Url::parse(url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(GrabError::Config(format!(
                "unsupported image URL scheme: {}",
                parsed.scheme()
            )));
        }

        let bytes = self.fetcher.fetch(parsed.as_str()).await?;

        let filename = self.filename_for(title);
        let path = self.images_dir.join(&filename);
        tokio::fs::write(&path, &bytes).await?;
        info!("Downloaded image to: {}", path.display());

        Ok(filename)
    }
}

/// First 15 characters of the title with non-word characters removed.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .take(TITLE_PREFIX_CHARS)
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

pub(crate) fn title_snippet(title: &str) -> String {
    let snippet: String = title.chars().take(40).collect();
    if snippet.len() < title.len() {
        format!("{}...", snippet)
    } else {
        snippet
    }
}

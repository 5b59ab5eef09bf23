use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::app::error::Result;

/// Prefix used for artifact names when no category is configured.
const NO_CATEGORY_PREFIX: &str = "ALL";

/// Per-run naming context.
///
/// The run timestamp is captured once by the caller and every artifact of the
/// run (output directory, spreadsheet, log, images, screenshots) is named from it.
#[derive(Debug, Clone)]
pub struct RunContext {
    started_at: DateTime<Utc>,
    category: String,
    output_dir: PathBuf,
    images_dir: PathBuf,
}

impl RunContext {
    /// Build the context and create `{root}/{PREFIX}_{stamp}/images`.
    ///
    /// The run directory itself must not exist yet.
    pub fn create(root: &Path, category: &str, started_at: DateTime<Utc>) -> Result<Self> {
        let ctx = Self::new(root, category, started_at);

        fs::create_dir_all(root)?;
        fs::create_dir(&ctx.output_dir)?;
        fs::create_dir(&ctx.images_dir)?;
        info!("Created output directory: {}", ctx.output_dir.display());

        Ok(ctx)
    }

    fn new(root: &Path, category: &str, started_at: DateTime<Utc>) -> Self {
        let category = category.trim().to_string();
        let prefix = category_prefix(&category);
        let stamp = started_at.format("%Y%m%d%H%M%S").to_string();
        let output_dir = root.join(format!("{}_{}", prefix, stamp));
        let images_dir = output_dir.join("images");

        Self {
            started_at,
            category,
            output_dir,
            images_dir,
        }
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Run timestamp as `YYYYMMDDHHMMSS`.
    pub fn stamp(&self) -> String {
        self.started_at.format("%Y%m%d%H%M%S").to_string()
    }

    /// Run date as `YYYY-MM-DD`.
    pub fn date(&self) -> String {
        self.started_at.format("%Y-%m-%d").to_string()
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn category_prefix(&self) -> String {
        category_prefix(&self.category)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    pub fn spreadsheet_path(&self) -> PathBuf {
        self.output_dir.join(format!(
            "{}_news_data_{}.xlsx",
            self.category_prefix(),
            self.stamp()
        ))
    }

    pub fn log_path(&self) -> PathBuf {
        self.output_dir.join(format!(
            "{}_scrape_log_{}.txt",
            self.category_prefix(),
            self.stamp()
        ))
    }

    pub fn screenshot_path(&self, attempt: u32) -> PathBuf {
        self.output_dir
            .join(format!("category_error_attempt_{}.png", attempt))
    }
}

fn category_prefix(category: &str) -> String {
    if category.is_empty() {
        NO_CATEGORY_PREFIX.to_string()
    } else {
        category.to_uppercase().replace(' ', "_")
    }
}

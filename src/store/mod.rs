pub mod report;
pub mod xlsx;

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::app::{Result, RunContext};
use crate::domain::NewsArticle;

pub use report::{write_report, ReportHeader};
pub use xlsx::XlsxWriter;

/// Spreadsheet columns, in output order.
pub const COLUMNS: [&str; 6] = [
    "title",
    "description",
    "date",
    "picture_filename",
    "money_mentioned",
    "search_phrase_count",
];

/// A typed spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Bool(bool),
    Number(f64),
}

impl Cell {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }
}

/// Sink for one header row plus data rows.
pub trait TableWriter {
    fn write_table(&self, header: &[&str], rows: &[Vec<Cell>], path: &Path) -> Result<()>;
}

/// One spreadsheet row for `article`, in [`COLUMNS`] order.
pub fn article_row(article: &NewsArticle) -> Vec<Cell> {
    vec![
        Cell::Text(article.title.clone()),
        Cell::Text(article.description.clone()),
        Cell::Text(article.date.clone()),
        Cell::Text(article.picture_filename.clone()),
        Cell::Bool(article.money_mentioned),
        Cell::Number(article.search_phrase_count as f64),
    ]
}

/// Writes the result spreadsheet and the companion text log for a run.
pub struct ResultPersister<W: TableWriter = XlsxWriter> {
    writer: W,
    ctx: RunContext,
    site_url: String,
    search_phrase: String,
}

impl ResultPersister<XlsxWriter> {
    pub fn new(ctx: RunContext, site_url: &str, search_phrase: &str) -> Self {
        Self::with_writer(XlsxWriter, ctx, site_url, search_phrase)
    }
}

impl<W: TableWriter> ResultPersister<W> {
    pub fn with_writer(writer: W, ctx: RunContext, site_url: &str, search_phrase: &str) -> Self {
        Self {
            writer,
            ctx,
            site_url: site_url.to_string(),
            search_phrase: search_phrase.to_string(),
        }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Write the spreadsheet, then the text log, and return the spreadsheet path.
    ///
    /// The spreadsheet is the primary artifact: failing to write the log is
    /// only logged.
    pub fn save(&self, articles: &[NewsArticle]) -> Result<PathBuf> {
        let path = self.ctx.spreadsheet_path();
        let rows: Vec<Vec<Cell>> = articles.iter().map(article_row).collect();

        self.writer.write_table(&COLUMNS, &rows, &path)?;
        info!("Data saved to {} ({} rows)", path.display(), rows.len());

        self.save_log(articles, &path);
        Ok(path)
    }

    fn save_log(&self, articles: &[NewsArticle], spreadsheet: &Path) {
        let log_path = self.ctx.log_path();
        let header = ReportHeader {
            generated_at: self.ctx.started_at(),
            site_url: &self.site_url,
            category: self.ctx.category(),
            search_phrase: &self.search_phrase,
            spreadsheet,
        };

        match write_report(&log_path, &header, articles) {
            Ok(()) => info!("Scraping log saved to: {}", log_path.display()),
            Err(e) => warn!(
                "Failed to save scraping log {}: {}",
                log_path.display(),
                e
            ),
        }
    }
}

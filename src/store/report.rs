use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::domain::NewsArticle;

/// Run metadata printed at the top of the report.
#[derive(Debug, Clone)]
pub struct ReportHeader<'a> {
    pub generated_at: DateTime<Utc>,
    pub site_url: &'a str,
    pub category: &'a str,
    pub search_phrase: &'a str,
    pub spreadsheet: &'a Path,
}

/// Write the human-readable scrape log.
pub fn write_report(
    path: &Path,
    header: &ReportHeader<'_>,
    articles: &[NewsArticle],
) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    render(&mut out, header, articles)?;
    out.flush()
}

fn render<W: Write>(
    out: &mut W,
    header: &ReportHeader<'_>,
    articles: &[NewsArticle],
) -> std::io::Result<()> {
    writeln!(
        out,
        "Scraping Report - {}",
        header.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(out)?;
    writeln!(out, "URL: {}", header.site_url)?;
    writeln!(out, "Category: {}", header.category)?;
    writeln!(out, "Search Phrase: {}", header.search_phrase)?;
    writeln!(out, "Excel File: {}", header.spreadsheet.display())?;
    writeln!(out)?;
    writeln!(out, "Extracted News Articles:")?;

    if articles.is_empty() {
        writeln!(out, "(none)")?;
    }

    for article in articles {
        writeln!(out, "- Title: {}", article.title)?;
        writeln!(out, "  Description: {}", article.description)?;
        writeln!(out, "  Date: {}", article.date)?;
        writeln!(out, "  Picture Filename: {}", article.picture_filename)?;
        writeln!(out, "  Money Mentioned: {}", article.money_mentioned)?;
        writeln!(out, "  Search Phrase Count: {}", article.search_phrase_count)?;
        writeln!(out)?;
    }

    Ok(())
}

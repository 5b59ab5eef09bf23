use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::app::{Result, RunContext};
use crate::classifier::TextClassifier;
use crate::config::RunConfig;
use crate::fetcher::{Fetcher, HttpFetcher, ImageDownloader};
use crate::scraper::{ArticleCollector, CategoryFilter, ChromeSession, Session};
use crate::store::ResultPersister;

/// Run one scrape with headless Chrome and return the spreadsheet path.
///
/// `started_at` names every artifact of the run.
pub async fn run(config: &RunConfig, started_at: DateTime<Utc>) -> Result<PathBuf> {
    if config.months > 0 {
        warn!(
            "months = {} was supplied but date-range filtering is not implemented; ignoring it",
            config.months
        );
    }

    let classifier = TextClassifier::new(&config.search_phrase)?;
    let ctx = RunContext::create(&config.output_dir, &config.category, started_at)?;
    info!(
        "Initialized scraper with URL: {}, Search Phrase: {}, Category: {}, Months: {}",
        config.site_url, config.search_phrase, config.category, config.months
    );

    let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new(
        config.scraper.image_timeout(),
        config.scraper.user_agent.as_deref(),
    )?);

    let mut session = ChromeSession::launch(&config.scraper, config.headless).await?;
    run_in_session(&mut session, config, &ctx, &classifier, fetcher).await
}

/// Scrape with `session`, then close it whether or not the scrape succeeded.
pub async fn run_in_session<S: Session>(
    session: &mut S,
    config: &RunConfig,
    ctx: &RunContext,
    classifier: &TextClassifier,
    fetcher: Arc<dyn Fetcher + Send + Sync>,
) -> Result<PathBuf> {
    let images = ImageDownloader::new(fetcher, ctx);
    let result = scrape(&*session, config, ctx, classifier, &images).await;

    if let Err(e) = session.close().await {
        warn!("Failed to close browser session: {}", e);
    }

    match &result {
        Ok(path) => info!("Run complete: {}", path.display()),
        Err(e) => warn!("Run failed: {}", e),
    }
    result
}

/// Open the site, apply the category filter, collect and persist articles.
pub async fn scrape<S: Session>(
    session: &S,
    config: &RunConfig,
    ctx: &RunContext,
    classifier: &TextClassifier,
    images: &ImageDownloader,
) -> Result<PathBuf> {
    session.navigate(&config.site_url).await?;

    CategoryFilter::new(session, &config.scraper, ctx)
        .apply(&config.category)
        .await?;

    let articles = ArticleCollector::new(session, &config.scraper, classifier, images, ctx)
        .collect()
        .await;

    ResultPersister::new(ctx.clone(), &config.site_url, &config.search_phrase).save(&articles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;

    use calamine::Data;
    use chrono::TimeZone;

    use crate::app::GrabError;
    use crate::domain::{DESCRIPTION_PLACEHOLDER, PICTURE_PLACEHOLDER};
    use crate::fetcher::image::tests::StubFetcher;
    use crate::scraper::mock::{MockArticle, MockSession};
    use crate::scraper::ScraperConfig;
    use crate::store::xlsx::tests::read_sheet;
    use crate::store::COLUMNS;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn config(output_dir: &std::path::Path, category: &str) -> RunConfig {
        RunConfig {
            site_url: "https://finance.yahoo.com/news/".into(),
            search_phrase: "story".into(),
            category: category.into(),
            months: 0,
            headless: true,
            output_dir: output_dir.to_path_buf(),
            scraper: ScraperConfig {
                settle_ms: 0,
                ..Default::default()
            },
        }
    }

    fn articles(n: usize) -> Vec<MockArticle> {
        (0..n)
            .map(|i| MockArticle::titled(&format!("Story {}", i)))
            .collect()
    }

    #[tokio::test]
    async fn test_collect_and_persist_preserve_order() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), "Business");
        let ctx = RunContext::create(&config.output_dir, &config.category, ts()).unwrap();
        let classifier = TextClassifier::new(&config.search_phrase).unwrap();
        let images = ImageDownloader::new(Arc::new(StubFetcher::default()), &ctx);
        let session = MockSession::new(&config.scraper).with_articles(articles(7));

        let collected =
            ArticleCollector::new(&session, &config.scraper, &classifier, &images, &ctx)
                .collect()
                .await;
        let path = ResultPersister::new(ctx.clone(), &config.site_url, &config.search_phrase)
            .save(&collected)
            .unwrap();

        let sheet = read_sheet(&path);
        let header: Vec<String> = sheet[0].iter().map(|cell| cell.to_string()).collect();
        assert_eq!(header, COLUMNS.to_vec());

        let rows = &sheet[1..];
        assert_eq!(rows.len(), 7);
        let titles: Vec<String> = rows.iter().map(|row| row[0].to_string()).collect();
        let expected: Vec<String> = (0..7).map(|i| format!("Story {}", i)).collect();
        assert_eq!(titles, expected);

        for row in rows {
            assert_eq!(row[1], Data::String(DESCRIPTION_PLACEHOLDER.into()));
            assert_eq!(row[2], Data::String("2024-01-01".into()));
            assert_eq!(row[3], Data::String(PICTURE_PLACEHOLDER.into()));
            assert_eq!(row[4], Data::Bool(false));
            // "Story N" holds the phrase "story" once
            assert_eq!(row[5], Data::Float(1.0));
        }
    }

    #[tokio::test]
    async fn test_full_run_writes_artifacts_and_closes_session() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), "Business");
        let ctx = RunContext::create(&config.output_dir, &config.category, ts()).unwrap();
        let classifier = TextClassifier::new(&config.search_phrase).unwrap();
        let mut session = MockSession::new(&config.scraper)
            .with_categories(&["Markets", "Business"])
            .with_articles(articles(3));

        let path = run_in_session(
            &mut session,
            &config,
            &ctx,
            &classifier,
            Arc::new(StubFetcher::default()),
        )
        .await
        .unwrap();

        assert_eq!(path, ctx.spreadsheet_path());
        assert!(path.is_file());
        assert!(ctx.log_path().is_file());
        assert_eq!(
            *session.navigations.lock().unwrap(),
            vec![config.site_url.clone()]
        );
        assert_eq!(*session.clicked.lock().unwrap(), vec!["Business".to_string()]);
        assert!(session.closed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_missing_category_aborts_and_still_closes() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), "Crypto");
        let ctx = RunContext::create(&config.output_dir, &config.category, ts()).unwrap();
        let classifier = TextClassifier::new(&config.search_phrase).unwrap();
        let mut session = MockSession::new(&config.scraper)
            .with_categories(&["Markets"])
            .with_articles(articles(3));

        let err = run_in_session(
            &mut session,
            &config,
            &ctx,
            &classifier,
            Arc::new(StubFetcher::default()),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, GrabError::CategoryNotFound { .. }));
        assert_eq!(session.screenshot_count(), 3);
        assert_eq!(session.article_queries.load(Ordering::SeqCst), 0);
        assert!(!ctx.spreadsheet_path().exists());
        assert!(session.closed.load(Ordering::SeqCst));
    }
}

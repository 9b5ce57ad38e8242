use log::{error, info, warn};
use scraper::Html;
use tokio::time::sleep;

use crate::{
    models::NewActivity,
    page_scraper::{PageScraper, scraper_for_url},
    scrape_error::ScrapeError,
    scraping_context::ScrapingContext,
    store::ActivityStore,
};

/// Outcome of one pass over the configured sources.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScrapeSummary {
    pub pages_scraped: usize,
    pub pages_skipped: usize,
    pub pages_failed: usize,
    pub activities_saved: usize,
}

/// Scrapes every configured source in order. A failing page is logged and
/// the run moves on to the next one. Consecutive fetched pages are separated
/// by the configured pause, counted from when the previous page finished.
pub async fn run_scrape_job(ctx: &ScrapingContext) -> ScrapeSummary {
    info!("Starting web scraping...");
    let mut summary = ScrapeSummary::default();
    let mut fetched_previous_page = false;

    for url in &ctx.scraping_config.source_urls {
        let page_scraper = match scraper_for_url(url) {
            Ok(Some(page_scraper)) => page_scraper,
            Ok(None) => {
                warn!("No specific scraping logic for URL: {url}. Skipping.");
                summary.pages_skipped += 1;
                continue;
            }
            Err(e) => {
                error!("{url}: {}", ScrapeError::Parse(e));
                summary.pages_failed += 1;
                continue;
            }
        };

        if fetched_previous_page {
            sleep(ctx.scraping_config.fetch_pause).await;
        }
        fetched_previous_page = true;

        match scrape_source(ctx, page_scraper.as_ref(), url).await {
            Ok(saved) => {
                summary.pages_scraped += 1;
                summary.activities_saved += saved;
            }
            Err(e) => {
                error!("{url}: {e}");
                summary.pages_failed += 1;
            }
        }
    }

    info!(
        "Web scraping completed: {} pages scraped, {} skipped, {} failed, {} activities saved.",
        summary.pages_scraped, summary.pages_skipped, summary.pages_failed, summary.activities_saved
    );
    summary
}

async fn scrape_source(
    ctx: &ScrapingContext,
    page_scraper: &dyn PageScraper,
    url: &str,
) -> Result<usize, ScrapeError> {
    info!("Attempting to fetch URL: {url}");
    let html = ctx
        .request_client
        .fetch_url_body(url)
        .await
        .map_err(ScrapeError::Fetch)?;
    info!("Successfully fetched and parsing data from: {url}");

    save_page(&ctx.store, page_scraper, url, &html).await
}

/// Extracts the activities on an already fetched page and stores each one.
pub async fn save_page(
    store: &ActivityStore,
    page_scraper: &dyn PageScraper,
    url: &str,
    html: &str,
) -> Result<usize, ScrapeError> {
    let activities = extract_activities(page_scraper, url, html);

    for activity in &activities {
        store.insert(activity).await.map_err(ScrapeError::Save)?;
    }
    info!("'{url}': {} activities saved.", activities.len());
    Ok(activities.len())
}

// `Html` is not `Send`, so it never lives across an await.
fn extract_activities(page_scraper: &dyn PageScraper, url: &str, html: &str) -> Vec<NewActivity> {
    let document = Html::parse_document(html);
    page_scraper.scrape(&document, url)
}

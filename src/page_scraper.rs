use scraper::Html;

use crate::{
    article_scraper::ArticleScraper, council_scraper::CouncilScraper, models::NewActivity,
};

/// Site-specific extraction rule for one kind of source page.
pub trait PageScraper {
    /// Extracts every activity on `document`, which was fetched from `page_url`.
    /// A page with nothing recognisable yields an empty vec.
    fn scrape(&self, document: &Html, page_url: &str) -> Vec<NewActivity>;
}

/// Picks the extraction rule for `url` by the site it belongs to.
pub fn scraper_for_url(url: &str) -> anyhow::Result<Option<Box<dyn PageScraper>>> {
    let scraper: Box<dyn PageScraper> = if url.contains("swansea.gov.uk") {
        Box::new(CouncilScraper::new()?)
    } else if url.contains("wales247.co.uk") {
        Box::new(ArticleScraper::new()?)
    } else {
        return Ok(None);
    };
    Ok(Some(scraper))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_on_site() {
        assert!(scraper_for_url("https://www.swansea.gov.uk/swanseaprom").unwrap().is_some());
        assert!(
            scraper_for_url("https://www.wales247.co.uk/things-to-do")
                .unwrap()
                .is_some()
        );
        assert!(scraper_for_url("https://example.com/").unwrap().is_none());
    }
}

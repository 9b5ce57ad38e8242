pub mod api;
pub mod config;
pub mod models;
pub mod scrape_job;
pub mod store;

mod article_scraper;
mod council_scraper;
mod page_scraper;
mod requests;
mod scrape_error;
mod scraping_context;
mod text_manipulators;

pub use article_scraper::ArticleScraper;
pub use council_scraper::CouncilScraper;
pub use page_scraper::{PageScraper, scraper_for_url};
pub use scrape_error::ScrapeError;
pub use scraping_context::ScrapingContext;

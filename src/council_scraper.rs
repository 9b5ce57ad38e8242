use log::{info, warn};
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

use crate::{
    models::NewActivity,
    page_scraper::PageScraper,
    text_manipulators::{extract_text, selector},
};

const NO_TITLE: &str = "No Title";
const NO_DESCRIPTION: &str = "No Description";
const DATE_PLACEHOLDER: &str = "See individual page";
const LOCATION_PLACEHOLDER: &str = "Swansea Prom Area";
const COST_PLACEHOLDER: &str = "Check website";

/// Swansea Council listing pages: one activity per listing block.
pub struct CouncilScraper {
    listing_selector: Selector,
    fallback_listing_selector: Selector,
    title_selector: Selector,
    body_selector: Selector,
    link_selector: Selector,
}

impl CouncilScraper {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            listing_selector: selector("div.item--article")?,
            fallback_listing_selector: selector("div.grid__cell--listitem")?,
            title_selector: selector("h2.item__title")?,
            body_selector: selector("div.item__body")?,
            link_selector: selector("a.item__link")?,
        })
    }

    fn scrape_block(&self, block: ElementRef, page_url: &str) -> NewActivity {
        let title_node = block.select(&self.title_selector).next();
        let body_node = block.select(&self.body_selector).next();
        let href = title_node
            .and_then(|node| node.select(&self.link_selector).next())
            .and_then(|link| link.value().attr("href"));

        let title = title_node.map_or_else(|| NO_TITLE.to_string(), extract_text);
        let description = body_node.map_or_else(|| NO_DESCRIPTION.to_string(), extract_text);
        let source_url = href
            .and_then(|href| resolve_link(page_url, href))
            .unwrap_or_else(|| page_url.to_string());

        NewActivity {
            title,
            description: Some(description),
            date: Some(DATE_PLACEHOLDER.to_string()),
            location: Some(LOCATION_PLACEHOLDER.to_string()),
            cost: Some(COST_PLACEHOLDER.to_string()),
            source_url: Some(source_url),
        }
    }
}

impl PageScraper for CouncilScraper {
    fn scrape(&self, document: &Html, page_url: &str) -> Vec<NewActivity> {
        let mut blocks: Vec<ElementRef> = document.select(&self.listing_selector).collect();
        if blocks.is_empty() {
            blocks = document.select(&self.fallback_listing_selector).collect();
        }
        if blocks.is_empty() {
            warn!("No suitable activity items found on {page_url}. Skipping this URL.");
            return vec![];
        }
        info!("Found {} listing blocks on {page_url}", blocks.len());

        blocks
            .into_iter()
            .map(|block| self.scrape_block(block, page_url))
            .collect()
    }
}

fn resolve_link(page_url: &str, href: &str) -> Option<String> {
    let base = Url::parse(page_url).ok()?;
    base.join(href).ok().map(String::from)
}

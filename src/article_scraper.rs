use log::{info, warn};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::{
    models::NewActivity,
    page_scraper::PageScraper,
    text_manipulators::{extract_text, selector, truncate_with_ellipsis},
};

const FALLBACK_TITLE: &str = "Wales247 Article";
const DATE_PLACEHOLDER: &str = "See article";
const LOCATION_PLACEHOLDER: &str = "Swansea Area";
const COST_PLACEHOLDER: &str = "Check article";
const MAX_ARTICLE_DESCRIPTION_CHARS: usize = 500;
const MIN_TITLE_CHARS: usize = 6;

/// Wales247 news articles: emphasised names become activities, otherwise the
/// whole article is saved as one.
pub struct ArticleScraper {
    content_selector: Selector,
    fallback_content_selector: Selector,
    paragraph_selector: Selector,
    emphasis_selector: Selector,
    article_title_selector: Selector,
    // Link text such as "Read more" that is emphasised but names nothing.
    generic_link_regex: Regex,
}

impl ArticleScraper {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            content_selector: selector("div.td-post-content")?,
            fallback_content_selector: selector("article")?,
            paragraph_selector: selector("p")?,
            emphasis_selector: selector("strong")?,
            article_title_selector: selector("h1.entry-title")?,
            generic_link_regex: Regex::new(r"(?i)^(read more|click here)")?,
        })
    }

    fn find_content<'a>(&self, document: &'a Html, page_url: &str) -> Option<ElementRef<'a>> {
        if let Some(content) = document.select(&self.content_selector).next() {
            return Some(content);
        }
        warn!("Could not find main article content div (td-post-content) on {page_url}. Trying 'article' tag.");
        document.select(&self.fallback_content_selector).next()
    }

    fn article_text(&self, content: ElementRef) -> String {
        content
            .select(&self.paragraph_selector)
            .map(extract_text)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// `(title, description)` pairs for every emphasised activity name.
    fn emphasised_activities(&self, content: ElementRef) -> Vec<(String, String)> {
        content
            .select(&self.emphasis_selector)
            .filter_map(|strong| {
                let title = extract_text(strong);
                if !self.is_activity_title(&title) {
                    return None;
                }
                let description = strong
                    .next_siblings()
                    .filter_map(ElementRef::wrap)
                    .find(|sibling| sibling.value().name() == "p")
                    .map(extract_text)
                    .unwrap_or_default();
                Some((title, description))
            })
            .collect()
    }

    fn is_activity_title(&self, title: &str) -> bool {
        title.chars().count() >= MIN_TITLE_CHARS && !self.generic_link_regex.is_match(title)
    }

    fn activity(title: String, description: String, page_url: &str) -> NewActivity {
        NewActivity {
            title,
            description: Some(description),
            date: Some(DATE_PLACEHOLDER.to_string()),
            location: Some(LOCATION_PLACEHOLDER.to_string()),
            cost: Some(COST_PLACEHOLDER.to_string()),
            source_url: Some(page_url.to_string()),
        }
    }
}

impl PageScraper for ArticleScraper {
    fn scrape(&self, document: &Html, page_url: &str) -> Vec<NewActivity> {
        let Some(content) = self.find_content(document, page_url) else {
            warn!("Could not find main article content on {page_url}. Skipping this URL.");
            return vec![];
        };

        let emphasised = self.emphasised_activities(content);
        if !emphasised.is_empty() {
            return emphasised
                .into_iter()
                .map(|(title, description)| Self::activity(title, description, page_url))
                .collect();
        }

        info!("No specific activities identified by strong tags on {page_url}. Saving whole article.");
        let title = document
            .select(&self.article_title_selector)
            .next()
            .map_or_else(|| FALLBACK_TITLE.to_string(), extract_text);
        let description =
            truncate_with_ellipsis(&self.article_text(content), MAX_ARTICLE_DESCRIPTION_CHARS);
        vec![Self::activity(title, description, page_url)]
    }
}

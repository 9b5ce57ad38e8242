use serde::{Deserialize, Serialize};

/// Tokens that mark a cost field as free, matched case-insensitively.
const FREE_COST_TOKENS: [&str; 2] = ["free", "ücretsiz"];

/// A single scraped listing, as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Activity {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub date: Option<String>,
    pub location: Option<String>,
    pub cost: Option<String>,
    pub source_url: Option<String>,
}

/// An activity produced by a scraper, not yet assigned an id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewActivity {
    pub title: String,
    pub description: Option<String>,
    pub date: Option<String>,
    pub location: Option<String>,
    pub cost: Option<String>,
    pub source_url: Option<String>,
}

/// Query parameters accepted by `GET /activities`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityFilter {
    pub search: Option<String>,
    pub cost: Option<String>,
}

impl ActivityFilter {
    pub fn matches(&self, activity: &Activity) -> bool {
        self.matches_search(activity) && self.matches_cost(activity)
    }

    fn matches_search(&self, activity: &Activity) -> bool {
        let Some(term) = self.search.as_deref().filter(|term| !term.is_empty()) else {
            return true;
        };
        let term = term.to_lowercase();
        contains_lowercase(&activity.title, &term)
            || activity
                .description
                .as_deref()
                .is_some_and(|description| contains_lowercase(description, &term))
    }

    fn matches_cost(&self, activity: &Activity) -> bool {
        if self.cost.as_deref() != Some("free") {
            return true;
        }
        activity.cost.as_deref().is_some_and(is_free_cost)
    }
}

fn contains_lowercase(haystack: &str, lowercase_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowercase_needle)
}

pub fn is_free_cost(cost: &str) -> bool {
    cost == "0"
        || FREE_COST_TOKENS
            .iter()
            .any(|token| contains_lowercase(cost, token))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(title: &str, description: Option<&str>, cost: Option<&str>) -> Activity {
        Activity {
            id: 1,
            title: title.to_string(),
            description: description.map(str::to_string),
            date: None,
            location: None,
            cost: cost.map(str::to_string),
            source_url: None,
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = ActivityFilter::default();
        assert!(filter.matches(&activity("Anything", None, None)));
    }

    #[test]
    fn empty_search_term_is_ignored() {
        let filter = ActivityFilter {
            search: Some(String::new()),
            cost: None,
        };
        assert!(filter.matches(&activity("Anything", None, None)));
    }

    #[test]
    fn search_is_case_insensitive_over_title_or_description() {
        let filter = ActivityFilter {
            search: Some("BEACH".to_string()),
            cost: None,
        };
        assert!(filter.matches(&activity("Beach clean", None, None)));
        assert!(filter.matches(&activity("Clean-up", Some("on the beach"), None)));
        assert!(!filter.matches(&activity("Museum trip", Some("indoors"), None)));
        assert!(!filter.matches(&activity("Museum trip", None, None)));
    }

    #[test]
    fn free_cost_tokens() {
        assert!(is_free_cost("Free entry"));
        assert!(is_free_cost("FREE"));
        assert!(is_free_cost("Ücretsiz"));
        assert!(is_free_cost("0"));
        assert!(!is_free_cost("£0.50"));
        assert!(!is_free_cost("Check website"));
    }

    #[test]
    fn cost_filter_only_applies_to_free() {
        let free = ActivityFilter {
            search: None,
            cost: Some("free".to_string()),
        };
        assert!(free.matches(&activity("Walk", None, Some("free"))));
        assert!(!free.matches(&activity("Walk", None, Some("£5"))));
        assert!(!free.matches(&activity("Walk", None, None)));

        let other = ActivityFilter {
            search: None,
            cost: Some("paid".to_string()),
        };
        assert!(other.matches(&activity("Walk", None, Some("£5"))));
    }
}

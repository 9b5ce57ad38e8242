/// Why a single source page produced no activities.
#[derive(Debug)]
pub enum ScrapeError {
    /// The scraping rule for the page could not be built.
    Parse(anyhow::Error),
    /// The page could not be fetched.
    Fetch(anyhow::Error),
    /// The page was fetched but its activities could not be saved.
    Save(anyhow::Error),
}

impl std::fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScrapeError::Parse(e) => write!(f, "An error occurred while parsing: {e:#}"),
            ScrapeError::Fetch(e) => write!(f, "Error fetching data: {e:#}"),
            ScrapeError::Save(e) => write!(f, "Failed to save activities: {e:#}"),
        }
    }
}

impl std::error::Error for ScrapeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScrapeError::Parse(e) | ScrapeError::Fetch(e) | ScrapeError::Save(e) => Some(&**e),
        }
    }
}

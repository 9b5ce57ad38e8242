use crate::{config::ScrapingConfig, requests::RequestClient, store::ActivityStore};

pub struct ScrapingContext {
    pub scraping_config: ScrapingConfig,
    pub request_client: RequestClient,
    pub store: ActivityStore,
}

impl ScrapingContext {
    pub async fn new() -> anyhow::Result<Self> {
        let scraping_config = ScrapingConfig::new()?;
        Self::from_config(scraping_config).await
    }

    pub async fn from_config(scraping_config: ScrapingConfig) -> anyhow::Result<Self> {
        let request_client = RequestClient::new(scraping_config.fetch_timeout)?;
        let store = ActivityStore::connect(&scraping_config.database_url).await?;
        Ok(ScrapingContext {
            scraping_config,
            request_client,
            store,
        })
    }
}

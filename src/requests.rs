use std::time::Duration;

use anyhow::Context;
use reqwest::{Client, ClientBuilder, Response};

pub struct RequestClient {
    client: Client,
}

impl RequestClient {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = ClientBuilder::new().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub async fn fetch_url_response(&self, url: &str) -> anyhow::Result<Response> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?
            .error_for_status()?;
        Ok(response)
    }

    pub async fn fetch_url_body(&self, url: &str) -> anyhow::Result<String> {
        let response = self.fetch_url_response(url).await?;
        let body = response.text().await?;
        Ok(body)
    }
}

use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, de::DeserializeOwned};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://instance/site.db";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

pub const SWANSEA_PROM_URL: &str = "https://www.swansea.gov.uk/swanseaprom";
pub const WALES247_HALF_TERM_URL: &str =
    "https://www.wales247.co.uk/things-to-do-in-swansea-this-half-term";

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

fn default_bind_addr() -> String {
    DEFAULT_BIND_ADDR.to_string()
}

fn default_activity_sources() -> Vec<String> {
    vec![
        SWANSEA_PROM_URL.to_string(),
        WALES247_HALF_TERM_URL.to_string(),
    ]
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

fn default_fetch_pause_secs() -> u64 {
    2
}

/// The env vars read by the scraper. All of them are optional.
#[derive(Debug, Deserialize)]
pub struct ScrapingEnv {
    #[serde(default = "default_database_url")]
    database_url: String,
    #[serde(default = "default_activity_sources")]
    activity_sources: Vec<String>,
    #[serde(default = "default_fetch_timeout_secs")]
    fetch_timeout_secs: u64,
    #[serde(default = "default_fetch_pause_secs")]
    fetch_pause_secs: u64,
}

#[derive(Debug, Clone)]
pub struct ScrapingConfig {
    pub database_url: String,
    pub source_urls: Vec<String>,
    pub fetch_timeout: Duration,
    pub fetch_pause: Duration,
}

impl ScrapingConfig {
    pub fn new() -> anyhow::Result<Self> {
        let scraping_env = ScrapingEnv::load_from_env()?;
        Ok(Self::from(scraping_env))
    }
}

impl From<ScrapingEnv> for ScrapingConfig {
    fn from(env: ScrapingEnv) -> Self {
        let source_urls = env
            .activity_sources
            .into_iter()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .collect();
        Self {
            database_url: env.database_url,
            source_urls,
            fetch_timeout: Duration::from_secs(env.fetch_timeout_secs),
            fetch_pause: Duration::from_secs(env.fetch_pause_secs),
        }
    }
}

/// The env vars read by the API server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

// Extension trait.
pub trait LoadFromEnv: DeserializeOwned {
    fn load_from_env() -> anyhow::Result<Self> {
        // Don't throw an error if .env file doesn't exist.
        let _ = dotenv::dotenv();
        let config =
            envy::from_env::<Self>().context("failed to load env variables into config struct")?;
        Ok(config)
    }
}

impl<T: DeserializeOwned> LoadFromEnv for T {}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn scraping_defaults_match_the_fixed_sources() {
        let env: ScrapingEnv = envy::from_iter(vars(&[])).unwrap();
        let config = ScrapingConfig::from(env);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(
            config.source_urls,
            vec![SWANSEA_PROM_URL.to_string(), WALES247_HALF_TERM_URL.to_string()]
        );
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
        assert_eq!(config.fetch_pause, Duration::from_secs(2));
    }

    #[test]
    fn sources_are_comma_separated_and_trimmed() {
        let env: ScrapingEnv = envy::from_iter(vars(&[
            ("ACTIVITY_SOURCES", "https://a.example/, https://b.example/"),
            ("FETCH_PAUSE_SECS", "0"),
        ]))
        .unwrap();
        let config = ScrapingConfig::from(env);
        assert_eq!(
            config.source_urls,
            vec!["https://a.example/".to_string(), "https://b.example/".to_string()]
        );
        assert_eq!(config.fetch_pause, Duration::ZERO);
    }

    #[test]
    fn server_config_overrides() {
        let config: ServerConfig = envy::from_iter(vars(&[
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("DATABASE_URL", "sqlite::memory:"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.database_url, "sqlite::memory:");
    }
}

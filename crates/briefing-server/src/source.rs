use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use shared::{Config, NewsCategory, NewsClient, StockClient, WeatherClient};

/// Seam between the cacheable handlers and the upstream adapters.
///
/// Handlers only see serialized canonical payloads, which is also what the
/// cache stores. Tests substitute a spy implementation to observe call
/// counts.
#[async_trait]
pub trait BriefingSource: Send + Sync {
    async fn fetch_weather(&self) -> Result<Value>;
    async fn fetch_stocks(&self) -> Result<Value>;
    /// `api_key` arrives with the request, not from server config.
    async fn fetch_news(&self, category: NewsCategory, api_key: &str) -> Result<Value>;
}

/// Production source backed by the real provider clients.
pub struct LiveSource {
    weather: WeatherClient,
    stocks: StockClient,
}

impl LiveSource {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            weather: WeatherClient::new(
                config.openweather_api_key.clone(),
                config.weather_location.clone(),
            )?,
            stocks: StockClient::new(config.alpha_vantage_api_key.clone())?,
        })
    }
}

#[async_trait]
impl BriefingSource for LiveSource {
    async fn fetch_weather(&self) -> Result<Value> {
        let payload = self.weather.current().await?;
        serde_json::to_value(payload).context("Failed to serialize weather payload")
    }

    async fn fetch_stocks(&self) -> Result<Value> {
        let payload = self.stocks.quotes().await?;
        serde_json::to_value(payload).context("Failed to serialize stocks payload")
    }

    async fn fetch_news(&self, category: NewsCategory, api_key: &str) -> Result<Value> {
        let client = NewsClient::new(api_key.to_string())?;
        let stories = client.fetch_stories(category).await?;
        serde_json::to_value(stories).context("Failed to serialize news stories")
    }
}

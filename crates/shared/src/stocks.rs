use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::models::{IndexQuote, StocksPayload};

/// Proxy instruments for the two tracked indices.
const SP500_PROXY: &str = "SPY";
const NASDAQ_PROXY: &str = "QQQ";

/// Gap between the two sequential quote calls. Alpha Vantage's free tier
/// enforces a per-minute request limit, so back-to-back calls get throttled.
const DEFAULT_CALL_INTERVAL: Duration = Duration::from_millis(1200);

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    #[serde(rename = "Global Quote")]
    global_quote: Option<GlobalQuote>,
}

#[derive(Debug, Deserialize)]
struct GlobalQuote {
    #[serde(rename = "01. symbol")]
    symbol: Option<String>,
    #[serde(rename = "05. price")]
    price: Option<String>,
    #[serde(rename = "09. change")]
    change: Option<String>,
    #[serde(rename = "10. change percent")]
    change_percent: Option<String>,
}

pub struct StockClient {
    client: Client,
    api_key: String,
    call_interval: Duration,
}

impl StockClient {
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_call_interval(api_key, DEFAULT_CALL_INTERVAL)
    }

    /// Override the inter-call delay, e.g. for a paid tier with a higher
    /// per-minute limit.
    pub fn with_call_interval(api_key: String, call_interval: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            call_interval,
        })
    }

    /// Fetch both index quotes, sequentially, separated by the configured
    /// rate-limit delay.
    pub async fn quotes(&self) -> Result<StocksPayload> {
        let sp500 = self.fetch_quote(SP500_PROXY).await?;
        tokio::time::sleep(self.call_interval).await;
        let nasdaq = self.fetch_quote(NASDAQ_PROXY).await?;

        Ok(StocksPayload { sp500, nasdaq })
    }

    async fn fetch_quote(&self, symbol: &str) -> Result<IndexQuote> {
        let response = self
            .client
            .get("https://www.alphavantage.co/query")
            .query(&[
                ("function", "GLOBAL_QUOTE"),
                ("symbol", symbol),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await
            .with_context(|| format!("Failed to fetch quote for {}", symbol))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("unknown error"));
            anyhow::bail!("Quote API returned error: {} - {}", status, error_text);
        }

        let quote_response = response
            .json::<QuoteResponse>()
            .await
            .context("Failed to parse quote API response")?;

        // Alpha Vantage reports rate limiting as a 200 with the quote object
        // missing or empty, not as an error status.
        let quote = quote_response
            .global_quote
            .filter(|q| q.price.is_some())
            .with_context(|| {
                format!(
                    "No quote data returned for {} (possibly rate limited)",
                    symbol
                )
            })?;

        Ok(IndexQuote {
            symbol: quote.symbol.unwrap_or_else(|| symbol.to_string()),
            price: format_decimal(quote.price.as_deref().unwrap_or_default())?,
            change: format_decimal(quote.change.as_deref().unwrap_or_default())?,
            change_percent: format_percent(quote.change_percent.as_deref().unwrap_or_default())?,
        })
    }
}

/// Reformat a raw numeric string to exactly two decimal places.
fn format_decimal(raw: &str) -> Result<String> {
    let value: f64 = raw
        .trim()
        .parse()
        .with_context(|| format!("Quote field is not numeric: {:?}", raw))?;
    Ok(format!("{:.2}", value))
}

/// Same as [`format_decimal`], with the provider's trailing `%` stripped.
fn format_percent(raw: &str) -> Result<String> {
    format_decimal(raw.trim().trim_end_matches('%'))
}

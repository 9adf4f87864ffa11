use serde::{Deserialize, Serialize};

/// Current conditions for the configured location.
///
/// Temperature, feels-like, and wind speed are rounded to the nearest whole
/// unit; humidity and the provider's icon token pass through verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherPayload {
    pub temperature: i64,
    pub feels_like: i64,
    pub description: String,
    pub icon: String,
    pub humidity: u8,
    pub wind_speed: i64,
}

/// One index quote. Numeric fields are kept as strings formatted to two
/// decimal places so the front-end renders them as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IndexQuote {
    pub symbol: String,
    pub price: String,
    pub change: String,
    pub change_percent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StocksPayload {
    pub sp500: IndexQuote,
    pub nasdaq: IndexQuote,
}

/// One story in a news briefing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewsStory {
    pub title: String,
    pub summary: String,
    pub url: String,
    pub source: String,
    #[serde(default)]
    pub image_url: String,
}

/// A busy window on the primary calendar, as reported by the free/busy query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BusyInterval {
    pub start: String,
    pub end: String,
}

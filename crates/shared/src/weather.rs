use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;

use crate::models::WeatherPayload;

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    main: MainConditions,
    weather: Vec<Condition>,
    wind: Wind,
}

#[derive(Debug, Deserialize)]
struct MainConditions {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct Wind {
    speed: f64,
}

pub struct WeatherClient {
    client: Client,
    api_key: String,
    location: String,
}

impl WeatherClient {
    pub fn new(api_key: String, location: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            location,
        })
    }

    /// Fetch current conditions for the configured location.
    pub async fn current(&self) -> Result<WeatherPayload> {
        let response = self
            .client
            .get("https://api.openweathermap.org/data/2.5/weather")
            .query(&[
                ("q", self.location.as_str()),
                ("units", "metric"),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await
            .context("Failed to fetch current weather")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("unknown error"));
            anyhow::bail!("Weather API returned error: {} - {}", status, error_text);
        }

        let weather = response
            .json::<WeatherResponse>()
            .await
            .context("Failed to parse weather API response")?;

        to_payload(weather)
    }
}

fn to_payload(weather: WeatherResponse) -> Result<WeatherPayload> {
    let condition = weather
        .weather
        .first()
        .context("Weather API response contained no conditions")?;

    Ok(WeatherPayload {
        temperature: weather.main.temp.round() as i64,
        feels_like: weather.main.feels_like.round() as i64,
        description: condition.description.clone(),
        icon: condition.icon.clone(),
        humidity: weather.main.humidity,
        wind_speed: weather.wind.speed.round() as i64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_floats_and_passes_icon_through() {
        let raw = r#"{
            "main": {"temp": 21.6, "feels_like": 20.4, "humidity": 62},
            "weather": [{"description": "scattered clouds", "icon": "03d"}],
            "wind": {"speed": 4.5}
        }"#;
        let parsed: WeatherResponse = serde_json::from_str(raw).unwrap();
        let payload = to_payload(parsed).unwrap();

        assert_eq!(payload.temperature, 22);
        assert_eq!(payload.feels_like, 20);
        assert_eq!(payload.wind_speed, 5);
        assert_eq!(payload.humidity, 62);
        assert_eq!(payload.icon, "03d");
        assert_eq!(payload.description, "scattered clouds");
    }

    #[test]
    fn rounds_negative_temperatures_toward_nearest() {
        let raw = r#"{
            "main": {"temp": -3.5, "feels_like": -7.2, "humidity": 80},
            "weather": [{"description": "snow", "icon": "13d"}],
            "wind": {"speed": 0.4}
        }"#;
        let parsed: WeatherResponse = serde_json::from_str(raw).unwrap();
        let payload = to_payload(parsed).unwrap();

        assert_eq!(payload.temperature, -4);
        assert_eq!(payload.feels_like, -7);
        assert_eq!(payload.wind_speed, 0);
    }
}

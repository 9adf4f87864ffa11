use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub openweather_api_key: String,
    pub alpha_vantage_api_key: String,
    /// Raw service-account credentials JSON (client_email + private_key).
    pub google_service_account_key: String,
    /// Location passed to the weather provider, e.g. "Chicago,US".
    pub weather_location: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Try to load .env from multiple locations
        Self::try_load_dotenv();

        let openweather_api_key = env::var("OPENWEATHER_API_KEY").context(
            "OPENWEATHER_API_KEY not found.\n\n\
            To fix this, create ~/.config/daily-briefing/.env with:\n  \
            OPENWEATHER_API_KEY=your_key_here\n  \
            ALPHA_VANTAGE_API_KEY=your_key_here\n  \
            GOOGLE_SERVICE_ACCOUNT_KEY=your_credentials_json_here\n\n\
            Get an OpenWeatherMap key from: https://home.openweathermap.org/api_keys",
        )?;

        let alpha_vantage_api_key = env::var("ALPHA_VANTAGE_API_KEY").context(
            "ALPHA_VANTAGE_API_KEY not found.\n\n\
            Get an Alpha Vantage key from: https://www.alphavantage.co/support/#api-key",
        )?;

        let google_service_account_key = env::var("GOOGLE_SERVICE_ACCOUNT_KEY").context(
            "GOOGLE_SERVICE_ACCOUNT_KEY not found.\n\n\
            Set it to the service-account credentials JSON downloaded from the\n\
            Google Cloud console (the blob containing client_email and private_key).",
        )?;

        let weather_location =
            env::var("WEATHER_LOCATION").unwrap_or_else(|_| "Chicago,US".to_string());

        Ok(Self {
            openweather_api_key,
            alpha_vantage_api_key,
            google_service_account_key,
            weather_location,
        })
    }

    fn try_load_dotenv() {
        // Try locations in order of preference:

        // 1. Current directory (for development)
        if dotenvy::dotenv().is_ok() {
            return;
        }

        // 2. ~/.config/daily-briefing/.env (standard config location)
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("daily-briefing").join(".env");
            if config_path.exists() && dotenvy::from_path(&config_path).is_ok() {
                return;
            }
        }

        // 3. ~/.env (home directory)
        if let Some(home_dir) = dirs::home_dir() {
            let home_path = home_dir.join(".env");
            if home_path.exists() && dotenvy::from_path(&home_path).is_ok() {
                return;
            }
        }

        // If none found, that's okay - environment variables might be set system-wide
    }
}

// Public modules
pub mod cache;
pub mod calendar;
pub mod config;
pub mod extract;
pub mod models;
pub mod news;
pub mod stocks;
pub mod weather;

// Re-export commonly used types
pub use cache::{BriefingCache, CacheEntry, Category, CACHE_TTL_SECS};
pub use calendar::CalendarClient;
pub use config::Config;
pub use extract::first_json_array;
pub use models::{BusyInterval, IndexQuote, NewsStory, StocksPayload, WeatherPayload};
pub use news::{NewsCategory, NewsClient};
pub use stocks::StockClient;
pub use weather::WeatherClient;

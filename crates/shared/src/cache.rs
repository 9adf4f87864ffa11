use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// How long a cached payload stays fresh.
pub const CACHE_TTL_SECS: i64 = 3600;

/// Data category served by the briefing endpoint. Picks the adapter and the
/// key the payload is returned under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Weather,
    Stocks,
    GlobalNews,
    LegalNews,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Weather => "weather",
            Category::Stocks => "stocks",
            Category::GlobalNews => "globalNews",
            Category::LegalNews => "legalNews",
        }
    }

    /// Key the canonical payload appears under in the response envelope.
    /// Both news categories share the same key.
    pub fn response_key(&self) -> &'static str {
        match self {
            Category::Weather => "weather",
            Category::Stocks => "stocks",
            Category::GlobalNews | Category::LegalNews => "news",
        }
    }
}

/// One cached result. `data = None` means the category was never populated.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub data: Option<Value>,
    pub timestamp: DateTime<Utc>,
}

impl CacheEntry {
    pub fn empty() -> Self {
        Self {
            data: None,
            timestamp: Utc::now(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    /// Valid iff populated and younger than the TTL at `now`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.data.is_some() && now - self.timestamp < Duration::seconds(CACHE_TTL_SECS)
    }
}

/// Per-process cache of the last fetched payload for each category.
///
/// Constructed once in main and shared via `Arc`; handlers running
/// concurrently race benignly to populate it (last writer wins). Entries are
/// only ever overwritten whole, never partially, and nothing here can fail:
/// a lost race just means one redundant upstream fetch.
pub struct BriefingCache {
    entries: Mutex<HashMap<Category, CacheEntry>>,
}

impl Default for BriefingCache {
    fn default() -> Self {
        Self::new()
    }
}

impl BriefingCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Snapshot of the current entry, or an empty entry if the category has
    /// never been populated.
    pub async fn get(&self, category: Category) -> CacheEntry {
        let entries = self.entries.lock().await;
        entries.get(&category).cloned().unwrap_or_else(CacheEntry::empty)
    }

    /// Overwrite the entry for `category` with a fresh timestamp.
    pub async fn set(&self, category: Category, payload: Value) {
        let mut entries = self.entries.lock().await;
        entries.insert(
            category,
            CacheEntry {
                data: Some(payload),
                timestamp: Utc::now(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_entry_is_never_valid() {
        let entry = CacheEntry::empty();
        assert!(!entry.is_valid_at(Utc::now()));
    }

    #[test]
    fn fresh_entry_is_valid() {
        let now = Utc::now();
        let entry = CacheEntry {
            data: Some(json!({"temperature": 21})),
            timestamp: now,
        };
        assert!(entry.is_valid_at(now + Duration::minutes(59)));
    }

    #[test]
    fn entry_expires_after_ttl() {
        let now = Utc::now();
        let entry = CacheEntry {
            data: Some(json!({"temperature": 21})),
            timestamp: now,
        };
        assert!(!entry.is_valid_at(now + Duration::seconds(CACHE_TTL_SECS)));
        assert!(!entry.is_valid_at(now + Duration::hours(2)));
    }

    #[tokio::test]
    async fn get_returns_empty_for_unpopulated_category() {
        let cache = BriefingCache::new();
        let entry = cache.get(Category::Weather).await;
        assert!(entry.data.is_none());
    }

    #[tokio::test]
    async fn set_then_get_roundtrips_payload() {
        let cache = BriefingCache::new();
        let payload = json!({"sp500": {"price": "512.30"}});
        cache.set(Category::Stocks, payload.clone()).await;

        let entry = cache.get(Category::Stocks).await;
        assert_eq!(entry.data, Some(payload));
        assert!(entry.is_valid());
    }

    #[tokio::test]
    async fn categories_do_not_share_entries() {
        let cache = BriefingCache::new();
        cache.set(Category::GlobalNews, json!([1, 2, 3])).await;

        assert!(cache.get(Category::GlobalNews).await.data.is_some());
        assert!(cache.get(Category::LegalNews).await.data.is_none());
    }

    #[tokio::test]
    async fn set_overwrites_previous_entry() {
        let cache = BriefingCache::new();
        cache.set(Category::Weather, json!({"temperature": 10})).await;
        cache.set(Category::Weather, json!({"temperature": 12})).await;

        let entry = cache.get(Category::Weather).await;
        assert_eq!(entry.data, Some(json!({"temperature": 12})));
    }
}

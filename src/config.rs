use serde::Deserialize;
use std::time::Duration;

/// Namespace prefix shared by every filter parameter.
pub const FILTER_URL_PREFIX: &str = "filter.";
/// Filter key that holds the single-valued price range.
pub const PRICE_FILTER_KEY: &str = "price";
pub const SORT_PARAM_KEY: &str = "sort";
pub const SEARCH_PARAM_KEY: &str = "q";
/// Quiet period before a price edit turns into a navigation.
pub const PRICE_RANGE_FILTER_DEBOUNCE: Duration = Duration::from_millis(500);
/// Products requested per page of a collection.
pub const DEFAULT_PAGE_BY: u32 = 8;

/// Runtime settings for the collection loader and the price-range control.
///
/// Hosts usually deserialize this from their own settings file; every field
/// falls back to the constants above.
///
/// ```rust,ignore
/// let config: CodecConfig = serde_json::from_str(r#"{"debounce_ms": 300}"#)?;
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub search_key: String,
    pub debounce_ms: u64,
    pub page_by: u32,
}

impl CodecConfig {
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            search_key: SEARCH_PARAM_KEY.to_string(),
            debounce_ms: u64::try_from(PRICE_RANGE_FILTER_DEBOUNCE.as_millis()).unwrap_or(500),
            page_by: DEFAULT_PAGE_BY,
        }
    }
}

/// Namespaced query key for a filter, e.g. `filter.productVendor`.
#[must_use]
pub fn filter_param_key(key: &str) -> String {
    format!("{FILTER_URL_PREFIX}{key}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CodecConfig::default();
        assert_eq!(config.search_key, "q");
        assert_eq!(config.debounce(), Duration::from_millis(500));
        assert_eq!(config.page_by, 8);
    }

    #[test]
    fn test_partial_deserialize_keeps_defaults() {
        let config: CodecConfig = serde_json::from_str(r#"{"debounce_ms": 250}"#).unwrap();
        assert_eq!(config.debounce(), Duration::from_millis(250));
        assert_eq!(config.page_by, DEFAULT_PAGE_BY);
    }

    #[test]
    fn test_filter_param_key() {
        assert_eq!(filter_param_key("price"), "filter.price");
    }
}

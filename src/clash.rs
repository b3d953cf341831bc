//! Corporate Clash holder: districts and launcher news.
//!
//! Both endpoints return top-level JSON arrays. Upstream asks clients to
//! poll no more than once every 5-15 minutes; nothing here enforces that.

use crate::config::ClientConfig;
use crate::data::{Fetcher, HttpFetcher, Shape};
use crate::error::ApiError;
use crate::model::{District, NewsArticle};
use crate::snapshot::Snapshot;
use serde_json::Value;

/// Holder for `GET /api/v1/districts.js` and `GET /api/v1/launcher/news`.
///
/// The two snapshots load and fail independently.
#[derive(Debug)]
pub struct CorporateClash<F: Fetcher = HttpFetcher> {
    fetcher: F,
    districts: Snapshot,
    news: Snapshot,
}

impl CorporateClash<HttpFetcher> {
    pub fn new() -> Self {
        Self::with_config(&ClientConfig::default())
    }

    pub fn with_config(config: &ClientConfig) -> Self {
        Self::with_fetcher(HttpFetcher::new(config), config)
    }
}

impl Default for CorporateClash<HttpFetcher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Fetcher> CorporateClash<F> {
    pub fn with_fetcher(fetcher: F, config: &ClientConfig) -> Self {
        let districts = Snapshot::load(&fetcher, config.districts_url(), Shape::Array);
        let news = Snapshot::load(&fetcher, config.news_url(), Shape::Array);
        Self {
            fetcher,
            districts,
            news,
        }
    }

    /// Re-fetches and replaces both snapshots.
    pub fn refresh(&mut self) {
        self.districts.reload(&self.fetcher);
        self.news.reload(&self.fetcher);
    }

    pub fn districts_snapshot(&self) -> &Snapshot {
        &self.districts
    }

    pub fn news_snapshot(&self) -> &Snapshot {
        &self.news
    }

    pub fn districts_error(&self) -> Option<&ApiError> {
        self.districts.last_error()
    }

    pub fn news_error(&self) -> Option<&ApiError> {
        self.news.last_error()
    }

    /// The district list exactly as sent.
    pub fn districts_raw(&self) -> Option<&Value> {
        self.districts.raw()
    }

    /// `None` if the list is absent or any entry has a field of the wrong
    /// type.
    pub fn districts(&self) -> Option<Vec<District>> {
        self.districts.parse()
    }

    pub fn district(&self, name: &str) -> Option<District> {
        self.districts()?
            .into_iter()
            .find(|district| district.name == name)
    }

    /// The news list exactly as sent.
    pub fn news_raw(&self) -> Option<&Value> {
        self.news.raw()
    }

    pub fn news(&self) -> Option<Vec<NewsArticle>> {
        self.news.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::stub::StubFetcher;
    use crate::error::ErrorKind;
    use serde_json::json;

    fn config() -> ClientConfig {
        ClientConfig::default().with_clash_base_url("http://stub")
    }

    fn districts_payload() -> Value {
        json!([
            {
                "name": "Anvil Acres",
                "online": true,
                "population": 51,
                "invasion_online": true,
                "last_update": 1700000000,
                "cogs_attacking": "Mr. Hollywood",
                "count_defeated": 120,
                "count_total": 3000,
                "remaining_time": 900
            },
            {
                "name": "Seltzer Summit",
                "online": false,
                "population": 0,
                "invasion_online": false,
                "last_update": 1700000000,
                "cogs_attacking": "None",
                "count_defeated": 0,
                "count_total": 0,
                "remaining_time": 0
            }
        ])
    }

    fn news_payload() -> Value {
        json!([{
            "id": 101,
            "author": "Corporate Clash Team",
            "posted": "2023-10-31 18:00:00",
            "image_url": "https://example.invalid/halloween.png",
            "title": "Halloween Event",
            "summary": "Spooky",
            "category": "Events"
        }])
    }

    #[test]
    fn test_districts_and_news() {
        let fetcher = StubFetcher::new();
        fetcher.serve_json(&config().districts_url(), districts_payload());
        fetcher.serve_json(&config().news_url(), news_payload());
        let clash = CorporateClash::with_fetcher(fetcher, &config());

        let districts = clash.districts().unwrap();
        assert_eq!(districts.len(), 2);
        assert_eq!(districts[0].name, "Anvil Acres");
        assert_eq!(districts[0].cogs_attacking.as_deref(), Some("Mr. Hollywood"));
        assert_eq!(districts[0].remaining_time, 900);
        assert!(!districts[1].online);

        let anvil = clash.district("Anvil Acres").unwrap();
        assert_eq!(anvil.count_defeated, 120);
        assert!(clash.district("Nowhere").is_none());

        let news = clash.news().unwrap();
        assert_eq!(news[0].id, 101);
        assert_eq!(news[0].posted, "2023-10-31 18:00:00");
        assert_eq!(clash.news_raw(), Some(&news_payload()));
    }

    #[test]
    fn test_absent_snapshot() {
        let clash = CorporateClash::with_fetcher(StubFetcher::new(), &config());

        assert!(!clash.districts_snapshot().is_present());
        assert!(!clash.news_snapshot().is_present());
        assert!(clash.districts_error().is_some());
        assert!(clash.news_error().is_some());
        assert!(clash.districts_raw().is_none());
        assert!(clash.districts().is_none());
        assert!(clash.district("Anvil Acres").is_none());
        assert!(clash.news_raw().is_none());
        assert!(clash.news().is_none());
    }

    #[test]
    fn test_null_fields_keep_list() {
        let fetcher = StubFetcher::new();
        fetcher.serve_json(
            &config().districts_url(),
            json!([{"name": "Anvil Acres", "population": null, "cogs_attacking": null}]),
        );
        fetcher.serve_json(
            &config().news_url(),
            json!([{"id": 3, "title": "Hotfix", "author": null, "summary": null}]),
        );
        let clash = CorporateClash::with_fetcher(fetcher, &config());

        assert_eq!(clash.district("Anvil Acres").map(|d| d.population), Some(0));
        let news = clash.news().unwrap();
        assert_eq!(news[0].title, "Hotfix");
        assert_eq!(news[0].author, "");
    }

    #[test]
    fn test_snapshots_fail_independently() {
        let fetcher = StubFetcher::new();
        fetcher.serve_json(&config().news_url(), news_payload());
        let clash = CorporateClash::with_fetcher(fetcher, &config());

        assert!(clash.districts().is_none());
        assert!(clash.districts_raw().is_none());
        assert!(clash.district("Anvil Acres").is_none());
        assert_eq!(clash.districts_error().map(ApiError::kind), Some(ErrorKind::Fetch));
        assert!(clash.news_error().is_none());
        assert_eq!(clash.news().map(|n| n.len()), Some(1));
    }

    #[test]
    fn test_object_body_is_rejected() {
        let fetcher = StubFetcher::new();
        fetcher.serve_json(&config().districts_url(), json!({"error": "maintenance"}));
        let clash = CorporateClash::with_fetcher(fetcher, &config());

        assert!(clash.districts_raw().is_none());
        assert_eq!(clash.districts_error().map(ApiError::kind), Some(ErrorKind::Decode));
    }

    #[test]
    fn test_malformed_entry() {
        let fetcher = StubFetcher::new();
        fetcher.serve_json(
            &config().districts_url(),
            json!([{"name": "Anvil Acres", "population": "many"}]),
        );
        let clash = CorporateClash::with_fetcher(fetcher, &config());

        assert!(clash.districts_raw().is_some());
        assert!(clash.districts().is_none());
    }

    #[test]
    fn test_refresh_replaces_both() {
        let fetcher = StubFetcher::new();
        fetcher.serve_json(&config().districts_url(), districts_payload());
        fetcher.serve_json(&config().news_url(), news_payload());
        let mut clash = CorporateClash::with_fetcher(fetcher.clone(), &config());
        assert_eq!(fetcher.calls(), 2);

        fetcher.serve_json(
            &config().districts_url(),
            json!([{"name": "Kazoo Kanyon", "online": true, "population": 7}]),
        );
        fetcher.go_offline(&config().news_url());
        clash.refresh();

        assert_eq!(fetcher.calls(), 4);
        let districts = clash.districts().unwrap();
        assert_eq!(districts.len(), 1);
        assert_eq!(districts[0].name, "Kazoo Kanyon");
        assert!(clash.district("Anvil Acres").is_none());
        assert!(clash.news().is_none());
        assert!(clash.news_error().is_some());
    }
}

use crate::config::ClientConfig;
use crate::data::{Fetcher, HttpFetcher, Shape};
use crate::error::ApiError;
use crate::snapshot::Snapshot;
use serde_json::{Map, Value};

/// Holder for `GET /api/population`.
#[derive(Debug)]
pub struct Population<F: Fetcher = HttpFetcher> {
    fetcher: F,
    snapshot: Snapshot,
}

impl Population<HttpFetcher> {
    pub fn new() -> Self {
        Self::with_config(&ClientConfig::default())
    }

    pub fn with_config(config: &ClientConfig) -> Self {
        Self::with_fetcher(HttpFetcher::new(config), config)
    }
}

impl Default for Population<HttpFetcher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Fetcher> Population<F> {
    pub fn with_fetcher(fetcher: F, config: &ClientConfig) -> Self {
        let snapshot = Snapshot::load(&fetcher, config.population_url(), Shape::Object);
        Self { fetcher, snapshot }
    }

    /// Re-fetches and replaces the snapshot.
    pub fn refresh(&mut self) {
        self.snapshot.reload(&self.fetcher);
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn last_error(&self) -> Option<&ApiError> {
        self.snapshot.last_error()
    }

    pub fn last_updated(&self) -> Option<i64> {
        self.snapshot.field("lastUpdated")
    }

    pub fn error(&self) -> Option<String> {
        self.snapshot.field("error")
    }

    /// Toons online across all districts.
    pub fn total_population(&self) -> Option<u64> {
        self.snapshot.field("totalPopulation")
    }

    /// District name to population, in upstream order.
    pub fn population_by_district(&self) -> Option<&Map<String, Value>> {
        self.snapshot
            .field_with("populationByDistrict", Value::as_object)
    }

    pub fn district_population(&self, district: &str) -> Option<u64> {
        self.population_by_district()?.get(district)?.as_u64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::stub::StubFetcher;
    use serde_json::json;

    fn config() -> ClientConfig {
        ClientConfig::default().with_toontown_base_url("http://stub")
    }

    #[test]
    fn test_population_payload() {
        let fetcher = StubFetcher::new();
        fetcher.serve_json(
            &config().population_url(),
            json!({"totalPopulation": 4821, "populationByDistrict": {"Oakley": 120}}),
        );
        let population = Population::with_fetcher(fetcher, &config());

        assert_eq!(population.total_population(), Some(4821));
        assert_eq!(
            population.population_by_district(),
            json!({"Oakley": 120}).as_object()
        );
        assert_eq!(population.district_population("Oakley"), Some(120));
        assert!(population.district_population("Gulp Gulch").is_none());
        assert!(population.last_updated().is_none());
        assert!(population.error().is_none());
    }

    #[test]
    fn test_field_independence() {
        let fetcher = StubFetcher::new();
        fetcher.serve_json(&config().population_url(), json!({"totalPopulation": 10}));
        let population = Population::with_fetcher(fetcher, &config());

        assert_eq!(population.total_population(), Some(10));
        assert!(population.population_by_district().is_none());
    }

    #[test]
    fn test_absent_snapshot() {
        let population = Population::with_fetcher(StubFetcher::new(), &config());

        assert!(!population.snapshot().is_present());
        assert!(population.last_error().is_some());
        assert!(population.last_updated().is_none());
        assert!(population.error().is_none());
        assert!(population.total_population().is_none());
        assert!(population.population_by_district().is_none());
        assert!(population.district_population("Oakley").is_none());
    }

    #[test]
    fn test_decode_failure_is_absent() {
        let fetcher = StubFetcher::new();
        fetcher.serve(&config().population_url(), "Service Unavailable");
        let population = Population::with_fetcher(fetcher, &config());

        assert!(population.total_population().is_none());
        assert!(population.population_by_district().is_none());
        assert_eq!(
            population.last_error().map(ApiError::kind),
            Some(crate::error::ErrorKind::Decode)
        );
    }

    #[test]
    fn test_refresh_replaces_snapshot() {
        let fetcher = StubFetcher::new();
        let url = config().population_url();
        fetcher.serve_json(
            &url,
            json!({"totalPopulation": 4821, "populationByDistrict": {"Oakley": 120}, "lastUpdated": 1}),
        );
        let mut population = Population::with_fetcher(fetcher.clone(), &config());

        fetcher.serve_json(&url, json!({"populationByDistrict": {"Kaboom Cliffs": 30}}));
        population.refresh();

        assert!(population.total_population().is_none());
        assert!(population.last_updated().is_none());
        assert_eq!(
            population.population_by_district(),
            json!({"Kaboom Cliffs": 30}).as_object()
        );
    }
}

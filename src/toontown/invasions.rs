use crate::config::ClientConfig;
use crate::data::{Fetcher, HttpFetcher, Shape};
use crate::error::ApiError;
use crate::model::Invasion;
use crate::snapshot::Snapshot;
use serde_json::{Map, Value};
use tracing::debug;

/// Holder for `GET /api/invasions`.
#[derive(Debug)]
pub struct Invasions<F: Fetcher = HttpFetcher> {
    fetcher: F,
    snapshot: Snapshot,
}

impl Invasions<HttpFetcher> {
    pub fn new() -> Self {
        Self::with_config(&ClientConfig::default())
    }

    pub fn with_config(config: &ClientConfig) -> Self {
        Self::with_fetcher(HttpFetcher::new(config), config)
    }
}

impl Default for Invasions<HttpFetcher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Fetcher> Invasions<F> {
    pub fn with_fetcher(fetcher: F, config: &ClientConfig) -> Self {
        let snapshot = Snapshot::load(&fetcher, config.invasions_url(), Shape::Object);
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

    /// `lastUpdated` timestamp.
    pub fn last_updated(&self) -> Option<i64> {
        self.snapshot.field("lastUpdated")
    }

    /// Upstream error message, if the API reported one.
    pub fn error(&self) -> Option<String> {
        self.snapshot.field("error")
    }

    /// Ongoing invasions keyed by district, each `{asof, type, progress}`.
    pub fn invasions(&self) -> Option<&Map<String, Value>> {
        self.snapshot.field_with("invasions", Value::as_object)
    }

    /// Ongoing invasions in upstream order.
    ///
    /// `None` when the `invasions` key is missing or any entry lacks a string
    /// `type` or `progress`; `Some(vec![])` when no invasion is running.
    pub fn invasion_entries(&self) -> Option<Vec<Invasion>> {
        let entries = self
            .invasions()?
            .iter()
            .map(|(district, entry)| Invasion::from_entry(district, entry))
            .collect::<Option<Vec<_>>>();
        if entries.is_none() {
            debug!(url = %self.snapshot.url(), "malformed invasion entry");
        }
        entries
    }

    /// Invasions as `[district, type, progress]` rows, unsorted.
    pub fn invasions_as_array(&self) -> Option<Vec<[String; 3]>> {
        self.invasion_entries()
            .map(|entries| entries.iter().map(Invasion::as_row).collect())
    }

    /// The invasion in `district`, if there is one.
    pub fn invasion_in(&self, district: &str) -> Option<Invasion> {
        let entry = self.invasions()?.get(district)?;
        Invasion::from_entry(district, entry)
    }
}

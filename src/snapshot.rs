//! The snapshot held by every endpoint holder, and the lookup helpers that
//! all accessors are built from.

use crate::data::{Fetcher, Shape, fetch_json};
use crate::error::ApiError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

/// Decoded response of one endpoint, or nothing if the last load failed.
#[derive(Debug)]
pub struct Snapshot {
    url: String,
    shape: Shape,
    data: Option<Value>,
    last_error: Option<ApiError>,
}

impl Snapshot {
    /// Fetches `url` once. Failures leave the snapshot absent.
    pub(crate) fn load<F: Fetcher + ?Sized>(fetcher: &F, url: String, shape: Shape) -> Self {
        let mut snapshot = Self {
            url,
            shape,
            data: None,
            last_error: None,
        };
        snapshot.reload(fetcher);
        snapshot
    }

    /// Re-fetches and replaces the whole snapshot; nothing from the previous
    /// load survives.
    pub(crate) fn reload<F: Fetcher + ?Sized>(&mut self, fetcher: &F) {
        match fetch_json(fetcher, &self.url, self.shape) {
            Ok(value) => {
                self.data = Some(value);
                self.last_error = None;
            }
            Err(err) => {
                warn!(url = %self.url, error = %err, "snapshot unavailable");
                self.data = None;
                self.last_error = Some(err);
            }
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_present(&self) -> bool {
        self.data.is_some()
    }

    /// The whole decoded document.
    pub fn raw(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// Why the last load failed, if it did.
    pub fn last_error(&self) -> Option<&ApiError> {
        self.last_error.as_ref()
    }

    /// Looks up a top-level key. JSON `null` counts as missing.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data
            .as_ref()?
            .get(key)
            .filter(|value| !value.is_null())
    }

    /// Looks up a top-level key and converts it to `T`.
    pub fn field<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.field_with(key, |value| convert(key, value))
    }

    /// Looks up a top-level key and applies `transform` to it.
    pub fn field_with<'a, T>(
        &'a self,
        key: &str,
        transform: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Option<T> {
        self.get(key).and_then(transform)
    }

    /// Converts the whole document to `T`.
    pub fn parse<T: DeserializeOwned>(&self) -> Option<T> {
        convert(&self.url, self.data.as_ref()?)
    }
}

pub(crate) fn convert<T: DeserializeOwned>(what: &str, value: &Value) -> Option<T> {
    match T::deserialize(value) {
        Ok(converted) => Some(converted),
        Err(err) => {
            debug!(field = what, error = %err, "value did not convert");
            None
        }
    }
}

//! Fetch-and-decode helpers: one blocking GET, one JSON decode.

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use serde_json::Value;
use tracing::debug;

/// Source of raw response bodies.
///
/// [`HttpFetcher`] is the production implementation; anything that can turn
/// a URL into a body (or a failure) can stand in for it.
pub trait Fetcher {
    fn get_text(&self, url: &str) -> ApiResult<String>;
}

/// Top-level JSON shape an endpoint is expected to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Object,
    Array,
}

impl Shape {
    fn name(self) -> &'static str {
        match self {
            Shape::Object => "object",
            Shape::Array => "array",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            Shape::Object => value.is_object(),
            Shape::Array => value.is_array(),
        }
    }
}

/// Blocking `reqwest` fetcher.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    // A failed client build is kept so that holders can still be constructed
    // and report the failure through `last_error()`.
    client: Result<reqwest::blocking::Client, String>,
}

impl HttpFetcher {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: http_client(config).map_err(|e| e.to_string()),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(&ClientConfig::default())
    }
}

impl Fetcher for HttpFetcher {
    fn get_text(&self, url: &str) -> ApiResult<String> {
        let client = self
            .client
            .as_ref()
            .map_err(|msg| ApiError::Client(msg.clone()))?;
        let response = client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status,
            });
        }
        Ok(response.text()?)
    }
}

fn http_client(config: &ClientConfig) -> reqwest::Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(config.timeout)
        .build()
}

/// Fetches `url` and decodes the body as a JSON document of the given shape.
///
/// Fails on transport errors, non-success status, invalid JSON, or a
/// top-level value of the wrong shape. No defaults are substituted here.
pub fn fetch_json<F: Fetcher + ?Sized>(fetcher: &F, url: &str, shape: Shape) -> ApiResult<Value> {
    debug!(url, "fetching");
    let body = fetcher.get_text(url)?;
    decode_body(url, &body, shape)
}

/// Decodes a response body exactly once.
pub fn decode_body(url: &str, body: &str, shape: Shape) -> ApiResult<Value> {
    let value: Value = serde_json::from_str(body)?;
    if !shape.matches(&value) {
        return Err(ApiError::UnexpectedShape {
            url: url.to_string(),
            expected: shape.name(),
            found: value_kind(&value),
        });
    }
    Ok(value)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

//! Client configuration shared by every holder.

use std::time::Duration;

pub const TOONTOWN_BASE_URL: &str = "https://www.toontownrewritten.com";
pub const CLASH_BASE_URL: &str = "https://corporateclash.net";

pub const INVASIONS_PATH: &str = "/api/invasions";
pub const POPULATION_PATH: &str = "/api/population";
pub const SILLYMETER_PATH: &str = "/api/sillymeter";
pub const DISTRICTS_PATH: &str = "/api/v1/districts.js";
pub const NEWS_PATH: &str = "/api/v1/launcher/news";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for the blocking HTTP client and the upstream hosts.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Whole-request timeout. `None` disables the timeout.
    pub timeout: Option<Duration>,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
    /// Scheme and host of the Toontown Rewritten API, without trailing slash.
    pub toontown_base_url: String,
    /// Scheme and host of the Corporate Clash API, without trailing slash.
    pub clash_base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_TIMEOUT),
            user_agent: format!("toon-status/{}", env!("CARGO_PKG_VERSION")),
            toontown_base_url: TOONTOWN_BASE_URL.to_string(),
            clash_base_url: CLASH_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_toontown_base_url(mut self, url: impl Into<String>) -> Self {
        self.toontown_base_url = url.into();
        self
    }

    pub fn with_clash_base_url(mut self, url: impl Into<String>) -> Self {
        self.clash_base_url = url.into();
        self
    }

    pub fn invasions_url(&self) -> String {
        join(&self.toontown_base_url, INVASIONS_PATH)
    }

    pub fn population_url(&self) -> String {
        join(&self.toontown_base_url, POPULATION_PATH)
    }

    pub fn sillymeter_url(&self) -> String {
        join(&self.toontown_base_url, SILLYMETER_PATH)
    }

    pub fn districts_url(&self) -> String {
        join(&self.clash_base_url, DISTRICTS_PATH)
    }

    pub fn news_url(&self) -> String {
        join(&self.clash_base_url, NEWS_PATH)
    }
}

fn join(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

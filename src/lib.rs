//! toon-status: read-only clients for the Toontown Rewritten and Corporate
//! Clash game-status APIs.
//!
//! Holders fetch on construction and on `refresh()`. Accessors never fail:
//! a missing snapshot or a missing field is simply `None`.

pub mod clash;
pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod snapshot;
pub mod toontown;

pub use clash::CorporateClash;
pub use config::ClientConfig;
pub use data::{Fetcher, HttpFetcher, Shape};
pub use error::{ApiError, ApiResult, ErrorKind};
pub use model::{District, Invasion, NewsArticle, SillyMeterState};
pub use snapshot::Snapshot;
pub use toontown::{Invasions, Population, SillyMeter};

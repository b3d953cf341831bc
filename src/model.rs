//! Typed views over individual entries of the upstream payloads.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// One ongoing Toontown Rewritten invasion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invasion {
    /// District the invasion is in.
    pub district: String,
    /// Cog type, e.g. "Bossbot" or "Telemarketer".
    pub cog_type: String,
    /// Upstream progress string, `"defeated/total"`, unmodified.
    pub progress: String,
    /// Timestamp the invasion started, if reported.
    pub as_of: Option<i64>,
}

impl Invasion {
    /// Builds an entry from one `district → {asof, type, progress}` pair.
    /// Returns `None` when `type` or `progress` is not a string.
    pub fn from_entry(district: &str, entry: &Value) -> Option<Self> {
        let cog_type = entry.get("type")?.as_str()?.to_string();
        let progress = entry.get("progress")?.as_str()?.to_string();
        let as_of = entry.get("asof").and_then(Value::as_i64);
        Some(Self {
            district: district.to_string(),
            cog_type,
            progress,
            as_of,
        })
    }

    /// `[district, type, progress]`.
    pub fn as_row(&self) -> [String; 3] {
        [
            self.district.clone(),
            self.cog_type.clone(),
            self.progress.clone(),
        ]
    }

    /// Parses `progress` into `(defeated, total)`.
    pub fn progress_counts(&self) -> Option<(u64, u64)> {
        let (defeated, total) = self.progress.split_once('/')?;
        Some((defeated.trim().parse().ok()?, total.trim().parse().ok()?))
    }
}

/// A Corporate Clash district as reported by `districts.js`.
/// Missing keys and JSON `null` fall back to zero values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct District {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub online: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub population: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub invasion_online: bool,
    /// UTC seconds.
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_update: i64,
    #[serde(default)]
    pub cogs_attacking: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub count_defeated: u64,
    /// Zero for invasions that are not tied to a district.
    #[serde(default, deserialize_with = "null_as_default")]
    pub count_total: u64,
    /// Seconds until the invasion ends.
    #[serde(default, deserialize_with = "null_as_default")]
    pub remaining_time: i64,
}

/// A Corporate Clash launcher news article. Only `id` and `title` are
/// required; other text fields read missing or `null` as empty.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewsArticle {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    /// `"yyyy-mm-dd hh:mm:ss"`, passed through as sent.
    #[serde(default, deserialize_with = "null_as_default")]
    pub posted: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Phase of the Toontown Rewritten silly meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum SillyMeterState {
    Active,
    Reward,
    Inactive,
}

impl SillyMeterState {
    pub fn as_str(self) -> &'static str {
        match self {
            SillyMeterState::Active => "Active",
            SillyMeterState::Reward => "Reward",
            SillyMeterState::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for SillyMeterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

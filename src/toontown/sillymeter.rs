use crate::config::ClientConfig;
use crate::data::{Fetcher, HttpFetcher, Shape};
use crate::error::ApiError;
use crate::model::SillyMeterState;
use crate::snapshot::Snapshot;
use tracing::debug;

/// Silly meter HP ceiling, also the ceiling for each team's reward points.
pub const MAX_SILLY_POINTS: u64 = 5_000_000;

/// Holder for `GET /api/sillymeter`.
///
/// The three reward fields are positional: index `i` of `rewards`,
/// `reward_descriptions` and `reward_points` all describe the same team.
#[derive(Debug)]
pub struct SillyMeter<F: Fetcher = HttpFetcher> {
    fetcher: F,
    snapshot: Snapshot,
}

impl SillyMeter<HttpFetcher> {
    pub fn new() -> Self {
        Self::with_config(&ClientConfig::default())
    }

    pub fn with_config(config: &ClientConfig) -> Self {
        Self::with_fetcher(HttpFetcher::new(config), config)
    }
}

impl Default for SillyMeter<HttpFetcher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Fetcher> SillyMeter<F> {
    pub fn with_fetcher(fetcher: F, config: &ClientConfig) -> Self {
        let snapshot = Snapshot::load(&fetcher, config.sillymeter_url(), Shape::Object);
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

    /// When upstream generated this response (`lastUpdated`).
    pub fn as_of(&self) -> Option<i64> {
        self.snapshot.field("lastUpdated")
    }

    pub fn error(&self) -> Option<String> {
        self.snapshot.field("error")
    }

    /// `None` also for states this crate does not know.
    pub fn state(&self) -> Option<SillyMeterState> {
        self.snapshot.field("state")
    }

    /// Current HP. `None` if above `MAX_SILLY_POINTS`.
    pub fn hp(&self) -> Option<u64> {
        self.snapshot
            .field("hp")
            .filter(|hp| *hp <= MAX_SILLY_POINTS)
    }

    /// The three rewards teams can join. Rerolled when the meter leaves
    /// the `Reward` state.
    pub fn rewards(&self) -> Option<[String; 3]> {
        self.snapshot.field("rewards")
    }

    pub fn reward_descriptions(&self) -> Option<[String; 3]> {
        self.snapshot.field("rewardDescriptions")
    }

    /// The team whose reward is active. Only set in the `Reward` state.
    pub fn winner(&self) -> Option<String> {
        self.snapshot.field("winner")
    }

    /// Points per team, each at most `MAX_SILLY_POINTS`.
    ///
    /// In the `Reward` state all three slots must be populated, otherwise
    /// the whole field is `None`. Outside it upstream sends three nulls,
    /// which come back as `[None, None, None]`; any populated slot is
    /// passed through as long as it is within range.
    pub fn reward_points(&self) -> Option<[Option<u64>; 3]> {
        let points: [Option<u64>; 3] = self.snapshot.field("rewardPoints")?;
        if points.iter().flatten().any(|p| *p > MAX_SILLY_POINTS) {
            debug!(?points, "reward points above ceiling");
            return None;
        }
        if self.state() == Some(SillyMeterState::Reward) && points.iter().any(Option::is_none) {
            debug!(?points, "missing reward points in Reward state");
            return None;
        }
        Some(points)
    }

    /// Next state change: points tallied (`Active`), rewards end (`Reward`)
    /// or meter reactivates (`Inactive`).
    pub fn next_update_timestamp(&self) -> Option<i64> {
        self.snapshot.field("nextUpdateTimestamp")
    }
}

use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// One playable playlist entry.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Channel {
    pub name: String,
    pub logo: String,
    pub genre: String,
    pub url: String,
}

/// Parsed playlist as served from the cache. Replaced as a whole on refresh.
#[derive(Debug, Clone)]
pub struct PlaylistSnapshot {
    pub channels: Arc<[Channel]>,
    /// Distinct non empty genres, ascending.
    pub genres: Arc<[String]>,
    pub fetched_at: DateTime<Utc>,
    pub fetched_instant: Instant,
}

impl PlaylistSnapshot {
    pub fn new(channels: Vec<Channel>) -> Self {
        let genres = collect_genres(&channels);
        Self {
            channels: channels.into(),
            genres: genres.into(),
            fetched_at: Utc::now(),
            fetched_instant: Instant::now(),
        }
    }

    pub fn age(&self) -> Duration {
        self.fetched_instant.elapsed()
    }

    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.age() < ttl
    }
}

pub fn collect_genres(channels: &[Channel]) -> Vec<String> {
    channels.iter()
        .map(|c| c.genre.as_str())
        .filter(|g| !g.is_empty())
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(ToString::to_string)
        .collect()
}

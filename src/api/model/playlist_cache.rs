use crate::error::AddonError;
use crate::model::{CacheStatus, Channel, PlaylistSnapshot};
use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use log::{debug, error, info};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Where the channel list comes from.
#[async_trait]
pub trait PlaylistSource: Send + Sync {
    /// One fetch attempt returning the parsed channels.
    async fn fetch(&self) -> Result<Vec<Channel>, AddonError>;

    /// Name for log output, must not leak credentials.
    fn name(&self) -> String;
}

type RefreshFuture = Shared<BoxFuture<'static, Option<Arc<PlaylistSnapshot>>>>;

struct InFlight {
    generation: u64,
    refresh: RefreshFuture,
}

#[derive(Default)]
struct RefreshState {
    generation: u64,
    in_flight: Option<InFlight>,
}

/// Time based cache over a [`PlaylistSource`].
///
/// A fresh snapshot is served without I/O. Concurrent misses share one fetch,
/// which runs as its own task and completes even when every caller went away.
/// A failed fetch keeps the previous snapshot and its timestamp so the next
/// request tries again.
pub struct PlaylistCache {
    source: Arc<dyn PlaylistSource>,
    ttl: Duration,
    snapshot: Arc<ArcSwapOption<PlaylistSnapshot>>,
    refresh_state: Arc<Mutex<RefreshState>>,
}

async fn refresh_snapshot(source: Arc<dyn PlaylistSource>, snapshot: Arc<ArcSwapOption<PlaylistSnapshot>>) -> Option<Arc<PlaylistSnapshot>> {
    let source_name = source.name();
    info!("Fetching playlist {source_name}");
    match source.fetch().await {
        Ok(channels) => {
            let fresh = Arc::new(PlaylistSnapshot::new(channels));
            info!("Playlist loaded with {} channels and {} genres", fresh.channels.len(), fresh.genres.len());
            snapshot.store(Some(Arc::clone(&fresh)));
            Some(fresh)
        }
        Err(err) => {
            error!("Failed to fetch playlist {source_name}: {err}");
            None
        }
    }
}

fn spawn_refresh(
    generation: u64,
    source: Arc<dyn PlaylistSource>,
    snapshot: Arc<ArcSwapOption<PlaylistSnapshot>>,
    refresh_state: Arc<Mutex<RefreshState>>,
) -> RefreshFuture {
    let task = tokio::spawn(async move {
        let result = refresh_snapshot(source, snapshot).await;
        // the slot is released before waiters see the result, later misses start a new fetch
        let mut state = refresh_state.lock().await;
        if state.in_flight.as_ref().is_some_and(|in_flight| in_flight.generation == generation) {
            state.in_flight = None;
        }
        result
    });
    task.map(|joined| joined.unwrap_or_else(|err| {
        error!("Playlist refresh task failed: {err}");
        None
    }))
    .boxed()
    .shared()
}

impl PlaylistCache {
    pub fn new(source: Arc<dyn PlaylistSource>, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            snapshot: Arc::new(ArcSwapOption::empty()),
            refresh_state: Arc::new(Mutex::new(RefreshState::default())),
        }
    }

    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Last successful snapshot regardless of its age.
    pub fn current(&self) -> Option<Arc<PlaylistSnapshot>> {
        self.snapshot.load_full()
    }

    fn fresh_snapshot(&self) -> Option<Arc<PlaylistSnapshot>> {
        self.snapshot.load_full().filter(|snapshot| snapshot.is_fresh(self.ttl))
    }

    /// Returns a fresh snapshot, refreshing it when expired or missing.
    /// `None` when the refresh this call waited on failed.
    pub async fn get_snapshot(&self) -> Option<Arc<PlaylistSnapshot>> {
        if let Some(snapshot) = self.fresh_snapshot() {
            return Some(snapshot);
        }

        let refresh = {
            let mut state = self.refresh_state.lock().await;
            // someone else may have finished a refresh while we waited for the lock
            if let Some(snapshot) = self.fresh_snapshot() {
                return Some(snapshot);
            }
            if let Some(in_flight) = state.in_flight.as_ref() {
                debug!("Joining in-flight playlist refresh");
                in_flight.refresh.clone()
            } else {
                state.generation += 1;
                let generation = state.generation;
                let refresh = spawn_refresh(
                    generation,
                    Arc::clone(&self.source),
                    Arc::clone(&self.snapshot),
                    Arc::clone(&self.refresh_state),
                );
                state.in_flight = Some(InFlight { generation, refresh: refresh.clone() });
                refresh
            }
        };

        refresh.await
    }

    /// Channels of a fresh snapshot, empty if the playlist could not be fetched.
    pub async fn get_channels(&self) -> Arc<[Channel]> {
        self.get_snapshot().await
            .map_or_else(|| Arc::from(Vec::new()), |snapshot| Arc::clone(&snapshot.channels))
    }

    pub fn status(&self) -> CacheStatus {
        match self.current() {
            Some(snapshot) => CacheStatus {
                loaded: true,
                channels: snapshot.channels.len(),
                genres: snapshot.genres.len(),
                fetched_at: Some(snapshot.fetched_at.to_rfc3339()),
                age_secs: Some(snapshot.age().as_secs()),
            },
            None => CacheStatus {
                loaded: false,
                channels: 0,
                genres: 0,
                fetched_at: None,
                age_secs: None,
            },
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::{PlaylistCache, PlaylistSource};
    use crate::error::AddonError;
    use crate::error::fetch_err;
    use crate::model::Channel;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    const TTL: Duration = Duration::from_secs(3600);

    /// Replays queued results, repeating the last one, and counts fetches.
    pub(crate) struct MockSource {
        pub calls: AtomicUsize,
        results: Mutex<VecDeque<Result<Vec<Channel>, AddonError>>>,
        delay: Option<Duration>,
    }

    impl MockSource {
        pub(crate) fn new(results: Vec<Result<Vec<Channel>, AddonError>>) -> Self {
            Self { calls: AtomicUsize::new(0), results: Mutex::new(results.into()), delay: None }
        }

        pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PlaylistSource for MockSource {
        async fn fetch(&self) -> Result<Vec<Channel>, AddonError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            let mut results = self.results.lock().unwrap();
            if results.len() > 1 {
                results.pop_front().unwrap()
            } else {
                results.front().cloned().unwrap_or_else(|| Ok(vec![]))
            }
        }

        fn name(&self) -> String {
            "mock".to_string()
        }
    }

    pub(crate) fn channel(name: &str, genre: &str) -> Channel {
        Channel { name: name.to_string(), logo: format!("http://logo/{name}.png"), genre: genre.to_string(), url: format!("http://stream/{name}") }
    }

    fn failure() -> Result<Vec<Channel>, AddonError> {
        Err(fetch_err!("Request failed with status 500 Internal Server Error http://provider/get.php?username=u&password=p"))
    }

    fn names(channels: &[Channel]) -> Vec<&str> {
        channels.iter().map(|c| c.name.as_str()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_calls_within_ttl_fetch_once() {
        let source = Arc::new(MockSource::new(vec![Ok(vec![channel("A", "News")])]));
        let cache = PlaylistCache::new(source.clone(), TTL);

        assert_eq!(names(&cache.get_channels().await), vec!["A"]);
        tokio::time::advance(Duration::from_secs(3599)).await;
        assert_eq!(names(&cache.get_channels().await), vec!["A"]);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_snapshot_is_replaced() {
        let source = Arc::new(MockSource::new(vec![
            Ok(vec![channel("A", "News")]),
            Ok(vec![channel("B", "Sports"), channel("C", "Kids")]),
        ]));
        let cache = PlaylistCache::new(source.clone(), TTL);

        assert_eq!(names(&cache.get_channels().await), vec!["A"]);
        tokio::time::advance(TTL).await;
        assert_eq!(names(&cache.get_channels().await), vec!["B", "C"]);
        assert_eq!(source.calls(), 2);

        let snapshot = cache.current().unwrap();
        assert_eq!(&*snapshot.genres, &["Kids".to_string(), "Sports".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_refresh_keeps_stale_snapshot() {
        let source = Arc::new(MockSource::new(vec![
            Ok(vec![channel("A", "News")]),
            failure(),
            Ok(vec![channel("B", "News")]),
        ]));
        let cache = PlaylistCache::new(source.clone(), TTL);

        cache.get_channels().await;
        let first = cache.current().unwrap();
        tokio::time::advance(TTL + Duration::from_secs(1)).await;

        assert!(cache.get_channels().await.is_empty());
        let kept = cache.current().unwrap();
        assert!(Arc::ptr_eq(&first, &kept));
        assert_eq!(kept.fetched_instant, first.fetched_instant);

        // no partial ttl, the next request fetches again
        assert_eq!(names(&cache.get_channels().await), vec!["B"]);
        assert_eq!(source.calls(), 3);
    }

    #[tokio::test]
    async fn test_failed_first_fetch() {
        let source = Arc::new(MockSource::new(vec![failure(), Ok(vec![channel("A", "News")])]));
        let cache = PlaylistCache::new(source.clone(), TTL);

        assert!(cache.get_snapshot().await.is_none());
        assert!(cache.current().is_none());
        assert!(!cache.status().loaded);

        assert_eq!(names(&cache.get_channels().await), vec!["A"]);
        let status = cache.status();
        assert!(status.loaded);
        assert_eq!(status.channels, 1);
        assert_eq!(status.genres, 1);
        assert!(status.fetched_at.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_misses_share_one_fetch() {
        let source = Arc::new(
            MockSource::new(vec![Ok(vec![channel("A", "News"), channel("B", "News")])])
                .with_delay(Duration::from_millis(500)),
        );
        let cache = Arc::new(PlaylistCache::new(source.clone(), TTL));

        let requests = (0..10).map(|_| {
            let cache = Arc::clone(&cache);
            async move { cache.get_channels().await }
        });
        let results = futures::future::join_all(requests).await;

        assert_eq!(source.calls(), 1);
        assert!(results.iter().all(|channels| names(channels) == vec!["A", "B"]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_completes_after_caller_is_dropped() {
        let source = Arc::new(
            MockSource::new(vec![Ok(vec![channel("A", "News")])])
                .with_delay(Duration::from_secs(2)),
        );
        let cache = PlaylistCache::new(source.clone(), TTL);

        assert!(tokio::time::timeout(Duration::from_secs(1), cache.get_channels()).await.is_err());
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert_eq!(source.calls(), 1);
        assert_eq!(names(&cache.current().unwrap().channels), vec!["A"]);
        assert_eq!(names(&cache.get_channels().await), vec!["A"]);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_finished_failed_refresh_is_not_joined() {
        let source = Arc::new(
            MockSource::new(vec![failure(), Ok(vec![channel("A", "News")])])
                .with_delay(Duration::from_secs(2)),
        );
        let cache = PlaylistCache::new(source.clone(), TTL);

        // nobody waits for the failing refresh to finish
        assert!(tokio::time::timeout(Duration::from_secs(1), cache.get_channels()).await.is_err());
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(source.calls(), 1);
        assert!(cache.current().is_none());

        assert_eq!(names(&cache.get_channels().await), vec!["A"]);
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_failure_is_shared_and_retried() {
        let source = Arc::new(
            MockSource::new(vec![failure(), Ok(vec![channel("A", "News")])])
                .with_delay(Duration::from_millis(100)),
        );
        let cache = Arc::new(PlaylistCache::new(source.clone(), TTL));

        let requests = (0..5).map(|_| {
            let cache = Arc::clone(&cache);
            async move { cache.get_channels().await }
        });
        let results = futures::future::join_all(requests).await;
        assert_eq!(source.calls(), 1);
        assert!(results.iter().all(|channels| channels.is_empty()));

        assert_eq!(names(&cache.get_channels().await), vec!["A"]);
        assert_eq!(source.calls(), 2);
    }
}

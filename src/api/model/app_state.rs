use crate::api::model::{PlaylistCache, PlaylistSource};
use crate::model::Config;
use crate::utils::network::m3u::HttpPlaylistSource;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub playlist: Arc<PlaylistCache>,
}

impl AppState {
    pub fn new(config: Arc<Config>, source: Arc<dyn PlaylistSource>) -> Self {
        let playlist = Arc::new(PlaylistCache::new(source, config.cache.ttl()));
        Self { config, playlist }
    }

    pub fn from_config(config: Arc<Config>) -> Self {
        let source = Arc::new(HttpPlaylistSource::new(&config.source));
        Self::new(config, source)
    }
}

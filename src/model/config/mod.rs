mod addon;
mod api;
mod cache;
mod catalog;
mod log;
mod source;

pub use self::addon::*;
pub use self::api::*;
pub use self::cache::*;
pub use self::catalog::*;
pub use self::log::*;
pub use self::source::*;

use crate::error::AddonError;
use crate::utils::CONSTANTS;
use std::sync::atomic::Ordering;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub api: ConfigApi,
    pub source: PlaylistSourceConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub addon: AddonConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<LogConfig>,
}

impl Config {
    pub fn prepare(&mut self) -> Result<(), AddonError> {
        self.api.prepare()?;
        self.source.prepare()?;
        self.cache.prepare()?;
        self.catalog.prepare()?;
        if let Some(log) = self.log.as_mut() {
            log.prepare();
        }
        Ok(())
    }

    /// Applies process wide runtime switches derived from the config.
    pub fn update_runtime(&self) {
        let sanitize = self.log.as_ref().is_none_or(|l| l.sanitize_sensitive_info);
        CONSTANTS.sanitize.store(sanitize, Ordering::Relaxed);
    }

    pub fn log_level(&self) -> Option<&str> {
        self.log.as_ref().and_then(|l| l.log_level.as_deref())
    }
}

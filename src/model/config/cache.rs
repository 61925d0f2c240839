use crate::error::{config_err_res, AddonError};
use std::time::Duration;

const fn default_ttl_secs() -> u64 {
    3600
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    #[serde(default)]
    pub update_on_boot: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            update_on_boot: false,
        }
    }
}

impl CacheConfig {
    pub fn prepare(&self) -> Result<(), AddonError> {
        if self.ttl_secs == 0 {
            return config_err_res!("cache.ttl_secs must be greater than 0");
        }
        Ok(())
    }

    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

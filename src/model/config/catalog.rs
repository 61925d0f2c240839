use crate::error::{config_err_res, AddonError};

const fn default_page_size() -> usize {
    100
}

fn default_id_prefix() -> String {
    "channel:".to_string()
}

fn default_genre_id_prefix() -> String {
    "genre:".to_string()
}

const fn default_genre_options_limit() -> u32 {
    200
}

fn default_channels_name() -> String {
    "IPTV Channels".to_string()
}

fn default_genres_name() -> String {
    "IPTV Genres".to_string()
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_id_prefix")]
    pub id_prefix: String,
    #[serde(default = "default_genre_id_prefix")]
    pub genre_id_prefix: String,
    #[serde(default = "default_genre_options_limit")]
    pub genre_options_limit: u32,
    #[serde(default = "default_channels_name")]
    pub channels_name: String,
    #[serde(default = "default_genres_name")]
    pub genres_name: String,
    /// Poster for genre groups whose first channel has no logo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder_poster: Option<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            id_prefix: default_id_prefix(),
            genre_id_prefix: default_genre_id_prefix(),
            genre_options_limit: default_genre_options_limit(),
            channels_name: default_channels_name(),
            genres_name: default_genres_name(),
            placeholder_poster: None,
        }
    }
}

impl CatalogConfig {
    pub fn prepare(&mut self) -> Result<(), AddonError> {
        if self.page_size == 0 {
            return config_err_res!("catalog.page_size must be greater than 0");
        }
        if self.id_prefix.trim().is_empty() || self.genre_id_prefix.trim().is_empty() {
            return config_err_res!("catalog id prefixes can't be empty");
        }
        if self.id_prefix.starts_with(&self.genre_id_prefix) || self.genre_id_prefix.starts_with(&self.id_prefix) {
            return config_err_res!("catalog.id_prefix and catalog.genre_id_prefix must be distinguishable");
        }
        if self.placeholder_poster.as_ref().is_some_and(|p| p.trim().is_empty()) {
            self.placeholder_poster = None;
        }
        Ok(())
    }
}

use regex::Regex;
use std::sync::atomic::AtomicBool;
use std::sync::LazyLock;

pub const CONFIG_PATH: &str = "config";
pub const CONFIG_FILE: &str = "config.yml";

pub const LOG_ENV_VAR: &str = "IPTV_ADDON_LOG";

pub const EXTM3U: &str = "#EXTM3U";
pub const EXTINF_PREFIX: &str = "#EXTINF:";

pub const CONTENT_TYPE_TV: &str = "tv";
pub const CATALOG_CHANNELS: &str = "iptv_channels";
pub const CATALOG_GENRES: &str = "iptv_genres";
pub const UNCATEGORIZED: &str = "uncategorized";
pub const POSTER_SHAPE_SQUARE: &str = "square";
pub const JSON_EXT: &str = ".json";

pub const DEFAULT_USER_AGENT: &str = concat!("iptv-addon/", env!("CARGO_PKG_VERSION"));

pub struct Constants {
    pub re_credentials: Regex,
    pub re_env_var: Regex,
    pub re_extinf: Regex,
    pub sanitize: AtomicBool,
}

pub static CONSTANTS: LazyLock<Constants> = LazyLock::new(||
    Constants {
        re_credentials: Regex::new(r"((username|password|token)=)[^&\s]*").unwrap(),
        re_env_var: Regex::new(r"\$\{env:(?P<var>[a-zA-Z_][a-zA-Z0-9_]*)}").unwrap(),
        // captures: logo, group, display name (everything after the last comma)
        re_extinf: Regex::new(r#"tvg-logo="([^"]*)".*group-title="([^"]*)".*,(.+)"#).unwrap(),
        sanitize: AtomicBool::new(true),
    }
);

fn default_addon_id() -> String {
    "org.myiptvaddon".to_string()
}

fn default_addon_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_addon_name() -> String {
    "IPTV Addon".to_string()
}

fn default_addon_description() -> String {
    "Personal IPTV channel list with categories".to_string()
}

/// Static manifest metadata, the catalogs themselves are derived from the playlist.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AddonConfig {
    #[serde(default = "default_addon_id")]
    pub id: String,
    #[serde(default = "default_addon_version")]
    pub version: String,
    #[serde(default = "default_addon_name")]
    pub name: String,
    #[serde(default = "default_addon_description")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

impl Default for AddonConfig {
    fn default() -> Self {
        Self {
            id: default_addon_id(),
            version: default_addon_version(),
            name: default_addon_name(),
            description: default_addon_description(),
            logo: None,
        }
    }
}

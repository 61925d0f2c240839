use crate::api::model::PlaylistSource;
use crate::error::AddonError;
use crate::model::{Channel, PlaylistSourceConfig};
use crate::processing::parser::m3u;
use crate::utils::request::{create_http_client, download_text_content};
use crate::utils::sanitize_sensitive_info;
use async_trait::async_trait;

/// Remote m3u playlist fetched over http.
pub struct HttpPlaylistSource {
    client: reqwest::Client,
    url: String,
}

impl HttpPlaylistSource {
    pub fn new(cfg: &PlaylistSourceConfig) -> Self {
        Self {
            client: create_http_client(cfg),
            url: cfg.url.clone(),
        }
    }
}

pub async fn download_m3u_playlist(client: &reqwest::Client, url: &str) -> Result<Vec<Channel>, AddonError> {
    let content = download_text_content(client, url).await?;
    Ok(m3u::parse_m3u(&content))
}

#[async_trait]
impl PlaylistSource for HttpPlaylistSource {
    async fn fetch(&self) -> Result<Vec<Channel>, AddonError> {
        download_m3u_playlist(&self.client, &self.url).await
    }

    fn name(&self) -> String {
        sanitize_sensitive_info(&self.url).into_owned()
    }
}

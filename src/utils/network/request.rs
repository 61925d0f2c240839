use crate::error::{fetch_err, fetch_err_res, AddonError};
use crate::model::PlaylistSourceConfig;
use crate::utils::{sanitize_sensitive_info, DEFAULT_USER_AGENT};
use log::{debug, error};
use reqwest::header::{HeaderValue, USER_AGENT};
use reqwest::StatusCode;
use std::time::{Duration, Instant};

pub fn format_http_status(status: StatusCode) -> String {
    let code = status.as_u16();
    match status.canonical_reason() {
        Some(reason) => format!("{code} {reason}"),
        None => code.to_string(),
    }
}

fn get_user_agent(cfg: &PlaylistSourceConfig) -> HeaderValue {
    cfg.user_agent
        .as_deref()
        .map(str::trim)
        .filter(|ua| !ua.is_empty())
        .and_then(|ua| HeaderValue::from_str(ua).ok())
        .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_USER_AGENT))
}

pub fn create_client(cfg: &PlaylistSourceConfig) -> reqwest::ClientBuilder {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(USER_AGENT, get_user_agent(cfg));
    let mut builder = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::limited(10))
        .pool_idle_timeout(Duration::from_secs(30))
        .default_headers(headers)
        .timeout(Duration::from_secs(u64::from(cfg.timeout_secs)));
    if cfg.connect_timeout_secs > 0 {
        builder = builder.connect_timeout(Duration::from_secs(u64::from(cfg.connect_timeout_secs)));
    }
    builder
}

pub fn create_http_client(cfg: &PlaylistSourceConfig) -> reqwest::Client {
    create_client(cfg).build().unwrap_or_else(|err| {
        error!("Failed to build client {err}");
        reqwest::Client::new()
    })
}

/// Single GET, no retries. Non 2xx answers are failures.
pub async fn download_text_content(client: &reqwest::Client, url: &str) -> Result<String, AddonError> {
    let start_time = Instant::now();
    let response = client.get(url).send().await
        .map_err(|err| fetch_err!("Request failed: {url} {err}"))?;

    let status = response.status();
    if !status.is_success() {
        return fetch_err_res!("Request failed with status {} {url}", format_http_status(status));
    }

    let content = response.text().await
        .map_err(|err| fetch_err!("Failed to read response body: {url} {err}"))?;
    debug!("Downloaded {} bytes from {} in {} ms", content.len(), sanitize_sensitive_info(url), start_time.elapsed().as_millis());
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::{format_http_status, get_user_agent};
    use crate::model::PlaylistSourceConfig;
    use reqwest::StatusCode;

    fn source(user_agent: Option<&str>) -> PlaylistSourceConfig {
        PlaylistSourceConfig {
            url: "http://provider.example/list.m3u".to_string(),
            user_agent: user_agent.map(ToString::to_string),
            connect_timeout_secs: 1,
            timeout_secs: 1,
        }
    }

    #[test]
    fn test_format_http_status() {
        assert_eq!(format_http_status(StatusCode::NOT_FOUND), "404 Not Found");
        assert_eq!(format_http_status(StatusCode::from_u16(599).unwrap()), "599");
    }

    #[test]
    fn test_user_agent() {
        assert_eq!(get_user_agent(&source(Some("VLC/3.0"))), "VLC/3.0");
        assert!(get_user_agent(&source(None)).to_str().unwrap().starts_with("iptv-addon/"));
        assert!(get_user_agent(&source(Some("  "))).to_str().unwrap().starts_with("iptv-addon/"));
    }
}
